//! SQLite connection handling for the contacts store.
//!
//! # Responsibility
//! - Open file or in-memory connections ready for repository use.
//! - Create the `contacts` table when it does not exist yet.
//!
//! # Invariants
//! - A returned connection always carries the `contacts` table.
//! - Schema creation is create-if-absent; existing rows are never touched.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod open;

pub use open::{open_db, open_db_in_memory};

/// `CREATE TABLE IF NOT EXISTS` statement for the contacts table.
pub const CONTACTS_SCHEMA_SQL: &str = include_str!("schema.sql");

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening a database or preparing its schema.
#[derive(Debug)]
pub enum DbError {
    /// The database file (or in-memory handle) could not be opened.
    Open {
        location: PathBuf,
        source: rusqlite::Error,
    },
    /// Pragmas or the contacts table could not be set up.
    Bootstrap(rusqlite::Error),
    /// Any later SQLite failure.
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { location, source } => {
                write!(f, "cannot open database `{}`: {source}", location.display())
            }
            Self::Bootstrap(err) => write!(f, "cannot prepare contacts schema: {err}"),
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Bootstrap(err) | Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
