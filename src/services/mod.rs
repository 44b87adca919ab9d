//! Use cases shared by the API handlers.
//!
//! Every function is generic over the repository traits it needs so it can be
//! exercised against [`crate::repository::DieselRepository`] or a mock.

use thiserror::Error;

use crate::domain::types::ClientId;
use crate::repository::ClientReader;
use crate::repository::errors::RepositoryError;

pub mod addresses;
pub mod catalogs;
pub mod clients;
pub mod contacts;
#[cfg(feature = "web")]
pub mod frontend;
pub mod phones;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found")]
    NotFound,

    /// Request data was well-formed but refers to something invalid.
    #[error("{0}")]
    Form(String),

    #[error("{0}")]
    TypeConstraint(String),

    /// A uniqueness guard rejected the write.
    #[error("{0}")]
    Conflict(String),

    #[error("repository error: {0}")]
    Repository(RepositoryError),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Parses a path identifier, treating invalid values as a missing entity.
pub(crate) fn parse_id<T, F>(raw: i32, ctor: F) -> ServiceResult<T>
where
    F: FnOnce(i32) -> Result<T, crate::domain::types::TypeConstraintError>,
{
    ctor(raw).map_err(|_| ServiceError::NotFound)
}

/// Resolves the parent client of a nested resource.
pub(crate) fn require_client<R>(repo: &R, client_id: i32) -> ServiceResult<ClientId>
where
    R: ClientReader + ?Sized,
{
    let client_id = parse_id(client_id, ClientId::new)?;
    match repo.get_client_by_id(client_id)? {
        Some(_) => Ok(client_id),
        None => Err(ServiceError::NotFound),
    }
}
