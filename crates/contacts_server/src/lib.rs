//! HTTP surface for the contacts service.
//! Translates JSON requests into `contacts_core` service calls.

pub mod config;
pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{Cli, ServerConfig};
pub use error::{ApiError, MessageResponse};
pub use server::{build_router, serve, ServerError};
pub use state::AppState;
