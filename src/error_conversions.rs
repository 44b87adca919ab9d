//! Error conversion glue between layers.
//!
//! The domain layer must not depend on service/repository error types, so the
//! conversions out of [`TypeConstraintError`] and [`RepositoryError`] live here.

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

/// Singular, human readable entity name for a table.
fn entity_label(table: &str) -> &str {
    match table {
        "clients" => "client",
        "addresses" => "address",
        "phones" => "phone",
        "contacts" => "contact",
        other => other,
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::Duplicate { entity, field } => ServiceError::Conflict(format!(
                "{} with the same {} already exists",
                entity_label(&entity),
                field.replace('_', " ")
            )),
            other => ServiceError::Repository(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_becomes_conflict_with_readable_message() {
        let err: ServiceError = RepositoryError::duplicate("clients", "tax_id").into();
        match err {
            ServiceError::Conflict(message) => {
                assert_eq!(message, "client with the same tax id already exists")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn not_found_is_preserved() {
        let err: ServiceError = RepositoryError::NotFound.into();
        assert!(matches!(err, ServiceError::NotFound));
    }

    #[test]
    fn other_errors_are_wrapped() {
        let err: ServiceError = RepositoryError::DatabaseError("disk full".into()).into();
        assert!(matches!(err, ServiceError::Repository(_)));
    }
}
