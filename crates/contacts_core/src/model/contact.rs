//! Contact domain model.
//!
//! # Responsibility
//! - Define the persisted `Contact` record and its write-side inputs.
//! - Map the record to its external (camelCase) wire shape.
//!
//! # Invariants
//! - `id` is assigned by storage and never changes.
//! - `NewContact` values must pass `validate()` before insertion.
//! - Serialization is output-only; request parsing lives at the HTTP boundary.

use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned contact identifier.
pub type ContactId = i64;

/// One row of the `contacts` table.
///
/// Serializes as `{"id", "firstName", "lastName", "email"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Field values for a contact that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Validation failures for contact write inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactValidationError {
    /// A required field was empty.
    MissingField(&'static str),
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "{field} is required"),
        }
    }
}

impl Error for ContactValidationError {}

impl NewContact {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }

    /// Checks that every required field is non-empty.
    ///
    /// Fields are checked in `first_name`, `last_name`, `email` order and the
    /// first empty one is reported.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        for (field, value) in [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("email", &self.email),
        ] {
            if value.is_empty() {
                return Err(ContactValidationError::MissingField(field));
            }
        }
        Ok(())
    }

    /// Binds this input to a storage-assigned id.
    pub fn into_contact(self, id: ContactId) -> Contact {
        Contact {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
        }
    }
}

/// Partial update for an existing contact.
///
/// `None` keeps the stored value. `Some` overwrites it, including with an
/// empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl ContactPatch {
    /// Returns true when no field would change.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.email.is_none()
    }

    /// Returns `current` with every supplied field replaced.
    pub fn apply(&self, current: &Contact) -> Contact {
        Contact {
            id: current.id,
            first_name: self
                .first_name
                .clone()
                .unwrap_or_else(|| current.first_name.clone()),
            last_name: self
                .last_name
                .clone()
                .unwrap_or_else(|| current.last_name.clone()),
            email: self.email.clone().unwrap_or_else(|| current.email.clone()),
        }
    }
}
