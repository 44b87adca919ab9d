use diesel::r2d2::{Error as R2D2Error, PoolError};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    /// A uniqueness guard found an existing row with the same value.
    #[error("Duplicate {entity} {field}")]
    Duplicate { entity: String, field: String },

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    pub fn duplicate(entity: &str, field: &str) -> Self {
        RepositoryError::Duplicate {
            entity: entity.to_string(),
            field: field.to_string(),
        }
    }
}

/// Extracts `(table, column)` from SQLite's `UNIQUE constraint failed: table.column`.
fn parse_unique_violation(message: &str) -> Option<(String, String)> {
    let columns = message.strip_prefix("UNIQUE constraint failed: ")?;
    // Composite indexes list every column; the last one is the distinguishing field.
    let last = columns.split(',').next_back()?.trim();
    let (table, column) = last.split_once('.')?;
    Some((table.to_string(), column.to_string()))
}

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => RepositoryError::NotFound,

            DieselError::DatabaseError(kind, info) => {
                let message = info.message().to_string();
                match kind {
                    DatabaseErrorKind::UniqueViolation => match parse_unique_violation(&message) {
                        Some((entity, field)) => RepositoryError::Duplicate { entity, field },
                        None => RepositoryError::ConstraintViolation(format!(
                            "Unique constraint violation: {message}"
                        )),
                    },
                    DatabaseErrorKind::ForeignKeyViolation => RepositoryError::ConstraintViolation(
                        format!("Foreign key constraint violation: {message}"),
                    ),
                    DatabaseErrorKind::NotNullViolation => RepositoryError::ConstraintViolation(
                        format!("Not null constraint violation: {message}"),
                    ),
                    DatabaseErrorKind::CheckViolation => RepositoryError::ConstraintViolation(
                        format!("Check constraint violation: {message}"),
                    ),
                    _ => RepositoryError::DatabaseError(message),
                }
            }

            DieselError::SerializationError(e) | DieselError::DeserializationError(e) => {
                RepositoryError::ValidationError(format!("Serialization error: {e}"))
            }

            DieselError::QueryBuilderError(e) => {
                RepositoryError::ValidationError(format!("Query builder error: {e}"))
            }

            DieselError::RollbackTransaction
            | DieselError::AlreadyInTransaction
            | DieselError::NotInTransaction
            | DieselError::BrokenTransactionManager => {
                RepositoryError::DatabaseError(format!("Transaction error: {err}"))
            }

            _ => RepositoryError::Unexpected(format!("Unexpected diesel error: {err}")),
        }
    }
}

impl From<R2D2Error> for RepositoryError {
    fn from(err: R2D2Error) -> Self {
        RepositoryError::ConnectionError(format!("Connection error: {err}"))
    }
}

impl From<PoolError> for RepositoryError {
    fn from(err: PoolError) -> Self {
        RepositoryError::ConnectionError(format!("Connection error: {err}"))
    }
}
