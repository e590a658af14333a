//! Shared storage handle injected into every handler.
//!
//! # Invariants
//! - Exactly one SQLite connection per process, serialized behind a mutex.
//! - Storage work runs on the blocking pool, never on async worker threads.
//! - A panic while holding the lock does not take the store down; the next
//!   request reuses the connection.

use std::sync::{Arc, Mutex, PoisonError};

use contacts_core::db::{open_db, open_db_in_memory, DbResult};
use contacts_core::{ContactService, SqliteContactRepository};
use rusqlite::Connection;

use crate::config::ServerConfig;
use crate::error::ApiError;

/// Router state holding the contacts store.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Wraps a connection returned by `db::open_db*`.
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
        }
    }

    /// Opens the database named by `config`, creating its schema if absent.
    pub fn open(config: &ServerConfig) -> DbResult<Self> {
        let conn = if config.is_in_memory() {
            open_db_in_memory()?
        } else {
            open_db(&config.database)?
        };
        Ok(Self::new(conn))
    }

    /// Runs `op` against a request-scoped contact service.
    ///
    /// The connection lock is held for the whole of `op`, so a lookup and the
    /// write that follows it see no interleaved requests.
    pub async fn run<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&mut ContactService<SqliteContactRepository<'_>>) -> Result<T, ApiError>
            + Send
            + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let mut conn = db.lock().unwrap_or_else(PoisonError::into_inner);
            let repo = SqliteContactRepository::try_new(&mut conn)?;
            let mut service = ContactService::new(repo);
            op(&mut service)
        })
        .await
        .map_err(|err| ApiError::Internal(format!("storage task failed: {err}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::AppState;
    use contacts_core::db::open_db_in_memory;
    use contacts_core::NewContact;
    use std::sync::Arc;

    #[tokio::test]
    async fn run_recovers_connection_after_panic_while_locked() {
        let state = AppState::new(open_db_in_memory().expect("open in-memory db"));
        state
            .run(|service| {
                service
                    .create_contact(&NewContact::new("Ada", "Lovelace", "ada@example.com"))
                    .map_err(Into::into)
            })
            .await
            .expect("seed contact");

        let db = Arc::clone(&state.db);
        let joined = std::thread::spawn(move || {
            let _guard = db.lock().expect("first lock");
            panic!("handler panicked while holding the connection");
        })
        .join();
        assert!(joined.is_err());
        assert!(state.db.is_poisoned());

        let contacts = state
            .run(|service| service.list_contacts().map_err(Into::into))
            .await
            .expect("list after poisoned lock");
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].email, "ada@example.com");
    }
}
