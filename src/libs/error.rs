//! Typed failures of the board core.
//!
//! Every operation that touches the store returns [`BoardResult`]:
//!
//! - **NotFound**: the entity is missing *or* owned by someone else. There is
//!   no separate "forbidden" error.
//! - **ValidationFailure**: malformed positions or incompatible references.
//! - **TransactionFailure**: the store refused to commit (lock timeout,
//!   constraint violation). Nothing from the failed transaction persists.
//! - **Database**: any other SQLite failure (I/O, schema drift).

use rusqlite::ErrorCode;
use std::fmt;
use thiserror::Error;

/// Result alias used throughout the board core.
pub type BoardResult<T> = Result<T, BoardError>;

/// Entity kinds that can be reported as missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Project,
    Category,
    Tag,
    Task,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::User => "user",
            EntityKind::Project => "project",
            EntityKind::Category => "category",
            EntityKind::Tag => "tag",
            EntityKind::Task => "task",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("{entity} not found with id {id}")]
    NotFound { entity: EntityKind, id: i64 },

    #[error("validation failed: {0}")]
    ValidationFailure(String),

    #[error("transaction failed: {0}")]
    TransactionFailure(String),

    #[error("database error: {0}")]
    Database(rusqlite::Error),
}

impl BoardError {
    pub fn not_found(entity: EntityKind, id: i64) -> Self {
        BoardError::NotFound { entity, id }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        BoardError::ValidationFailure(message.into())
    }

    /// True for failures a client may resolve by retrying with fresh state.
    pub fn is_transient(&self) -> bool {
        matches!(self, BoardError::TransactionFailure(_))
    }
}

impl From<rusqlite::Error> for BoardError {
    fn from(err: rusqlite::Error) -> Self {
        match err.sqlite_error_code() {
            Some(ErrorCode::DatabaseBusy) | Some(ErrorCode::DatabaseLocked) | Some(ErrorCode::ConstraintViolation) => {
                BoardError::TransactionFailure(err.to_string())
            }
            _ => BoardError::Database(err),
        }
    }
}
