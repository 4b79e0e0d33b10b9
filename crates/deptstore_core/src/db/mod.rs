//! SQLite connection bootstrap for department storage.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections for callers.
//! - Translate open failures into a typed error carrying the target.
//!
//! # Invariants
//! - Opening a connection never creates or alters application tables;
//!   schema lifecycle belongs to `DepartmentStore::create_table`/`drop_table`.
//! - Connections stay in SQLite auto-commit mode.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Open {
        target: String,
        source: rusqlite::Error,
    },
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { target, source } => {
                write!(f, "failed to open database `{target}`: {source}")
            }
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
