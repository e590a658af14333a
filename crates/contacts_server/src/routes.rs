//! Contact HTTP routes.
//!
//! Endpoints:
//! - `GET /contacts` - list every contact
//! - `GET /contacts/:id` - fetch one contact
//! - `POST /create_contact` - create a contact
//! - `PATCH /update_contact/:id` - partial update
//! - `DELETE /delete_contact/:id` - delete a contact
//! - `GET /health` - liveness check

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
    Json, Router,
};
use contacts_core::{core_version, Contact, ContactId, ContactPatch, NewContact};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{ApiError, MessageResponse};
use crate::state::AppState;

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct ContactsResponse {
    pub contacts: Vec<Contact>,
}

/// Body of `POST /create_contact`. Presence is checked by the handler so a
/// missing field yields the fixed validation message, not a parser error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl CreateContactRequest {
    /// Returns the new contact when every field is present and non-empty.
    pub fn into_new_contact(self) -> Option<NewContact> {
        let required = |value: Option<String>| value.filter(|value| !value.is_empty());
        Some(NewContact {
            first_name: required(self.first_name)?,
            last_name: required(self.last_name)?,
            email: required(self.email)?,
        })
    }
}

/// Body of `PATCH /update_contact/:id`.
///
/// An absent (or `null`) key keeps the stored value; any string, including
/// `""`, overwrites it.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl From<UpdateContactRequest> for ContactPatch {
    fn from(value: UpdateContactRequest) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
        }
    }
}

// ==================
// Routes
// ==================

/// Builds the contact routes bound to `state`.
pub fn contact_routes(state: AppState) -> Router {
    Router::new()
        .route("/contacts", get(list_contacts))
        .route("/contacts/:id", get(get_contact))
        .route("/create_contact", post(create_contact))
        .route("/update_contact/:id", patch(update_contact))
        .route("/delete_contact/:id", delete(delete_contact))
        .with_state(state)
}

pub fn health_routes() -> Router {
    Router::new().route("/health", get(health))
}

// ==================
// Handlers
// ==================

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": core_version(),
    }))
}

async fn list_contacts(State(state): State<AppState>) -> Result<Json<ContactsResponse>, ApiError> {
    let contacts = state
        .run(|service| Ok(service.list_contacts()?))
        .await?;
    Ok(Json(ContactsResponse { contacts }))
}

async fn get_contact(
    State(state): State<AppState>,
    id: Result<Path<ContactId>, PathRejection>,
) -> Result<Json<Contact>, ApiError> {
    let id = contact_id(id)?;
    let contact = state
        .run(move |service| service.get_contact(id)?.ok_or(ApiError::ContactNotFound))
        .await?;
    Ok(Json(contact))
}

async fn create_contact(
    State(state): State<AppState>,
    payload: Result<Json<CreateContactRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(request) = payload?;
    let new_contact = request
        .into_new_contact()
        .ok_or(ApiError::MissingContactFields)?;

    state
        .run(move |service| Ok(service.create_contact(&new_contact)?))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User created")),
    ))
}

async fn update_contact(
    State(state): State<AppState>,
    id: Result<Path<ContactId>, PathRejection>,
    payload: Result<Json<UpdateContactRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = contact_id(id)?;

    state
        .run(move |service| {
            // Unknown ids are reported before the body is looked at.
            if service.get_contact(id)?.is_none() {
                return Err(ApiError::ContactNotFound);
            }
            let Json(request) = payload?;
            service.update_contact(id, &ContactPatch::from(request))?;
            Ok(())
        })
        .await?;

    Ok(Json(MessageResponse::new("User updated")))
}

async fn delete_contact(
    State(state): State<AppState>,
    id: Result<Path<ContactId>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = contact_id(id)?;

    state
        .run(move |service| Ok(service.delete_contact(id)?))
        .await?;

    Ok(Json(MessageResponse::new("User deleted")))
}

/// Non-integer ids cannot name a contact, so they read as not-found.
fn contact_id(id: Result<Path<ContactId>, PathRejection>) -> Result<ContactId, ApiError> {
    id.map(|Path(id)| id).map_err(|_| ApiError::ContactNotFound)
}
