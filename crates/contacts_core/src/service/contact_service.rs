//! Contact use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for HTTP handlers.
//! - Delegate persistence to repository implementations.
//! - Emit metadata-only diagnostic events for write paths.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.
//! - Log lines carry ids and error codes, never names or emails.

use crate::model::contact::{Contact, ContactId, ContactPatch, NewContact};
use crate::repo::contact_repo::{ContactRepository, RepoError, RepoResult};
use log::{info, warn};

/// Use-case service wrapper for contact CRUD operations.
pub struct ContactService<R: ContactRepository> {
    repo: R,
}

impl<R: ContactRepository> ContactService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all contacts in insertion order.
    pub fn list_contacts(&self) -> RepoResult<Vec<Contact>> {
        self.repo.list_contacts()
    }

    /// Gets one contact by id.
    pub fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        self.repo.get_contact(id)
    }

    /// Creates a contact and returns it with its assigned id.
    ///
    /// Returns `RepoError::DuplicateEmail` when the email is already taken;
    /// the table is left unchanged in that case.
    pub fn create_contact(&self, contact: &NewContact) -> RepoResult<Contact> {
        let result = self.repo.create_contact(contact);
        match &result {
            Ok(created) => info!(
                "event=contact_create module=service status=ok contact_id={}",
                created.id
            ),
            Err(err) => warn!(
                "event=contact_create module=service status=error error_code={}",
                error_code(err)
            ),
        }
        result
    }

    /// Applies a partial update to an existing contact.
    pub fn update_contact(&mut self, id: ContactId, patch: &ContactPatch) -> RepoResult<Contact> {
        let result = self.repo.update_contact(id, patch);
        match &result {
            Ok(_) => info!("event=contact_update module=service status=ok contact_id={id}"),
            Err(err) => warn!(
                "event=contact_update module=service status=error contact_id={id} error_code={}",
                error_code(err)
            ),
        }
        result
    }

    /// Hard-deletes a contact by id.
    pub fn delete_contact(&self, id: ContactId) -> RepoResult<()> {
        let result = self.repo.delete_contact(id);
        match &result {
            Ok(()) => info!("event=contact_delete module=service status=ok contact_id={id}"),
            Err(err) => warn!(
                "event=contact_delete module=service status=error contact_id={id} error_code={}",
                error_code(err)
            ),
        }
        result
    }
}

/// Stable, message-free code for a repository error.
pub fn error_code(err: &RepoError) -> &'static str {
    match err {
        RepoError::Validation(_) => "validation_failed",
        RepoError::Db(_) => "db_error",
        RepoError::NotFound(_) => "not_found",
        RepoError::DuplicateEmail(_) => "duplicate_email",
        RepoError::MissingRequiredTable(_) | RepoError::MissingRequiredColumn { .. } => {
            "schema_mismatch"
        }
    }
}
