use models::error::{RangeError, TransitionError};
use sea_orm::{ConnAcquireErr, DbErr, RuntimeErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A referenced entity id does not exist
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },
    /// Uniqueness violation, e.g. duplicate email
    #[error("conflict: {0}")]
    Conflict(String),
    #[error(transparent)]
    InvalidTransition(#[from] TransitionError),
    /// Time-range conflict between reservations or swing sections
    #[error("overlap: {0}")]
    Overlap(String),
    /// The entity is not in the state the operation requires
    #[error("precondition failed: {0}")]
    Precondition(String),
    #[error("validation error: {0}")]
    Validation(String),
    /// Deadline exceeded, or the store stayed unreachable after retries
    #[error("timed out: {0}")]
    Timeout(String),
    #[error(transparent)]
    Db(DbErr),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Whether the request layer can surface this to the caller as-is
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Timeout(_) | Self::Db(_))
    }

    /// Connectivity failures worth retrying at the pool boundary
    pub(crate) fn is_transient(err: &DbErr) -> bool {
        matches!(
            err,
            DbErr::ConnectionAcquire(_) | DbErr::Conn(RuntimeErr::SqlxError(_))
        )
    }
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => return Self::Conflict(detail),
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                return Self::NotFound {
                    entity: "referenced row",
                    id: detail,
                };
            }
            _ => {}
        }

        match err {
            DbErr::ConnectionAcquire(ConnAcquireErr::Timeout) => {
                Self::Timeout("no pooled connection became available".to_string())
            }
            DbErr::RecordNotFound(what) => Self::NotFound {
                entity: "record",
                id: what,
            },
            other => Self::Db(other),
        }
    }
}

impl From<RangeError> for StoreError {
    fn from(err: RangeError) -> Self {
        Self::Validation(err.to_string())
    }
}
