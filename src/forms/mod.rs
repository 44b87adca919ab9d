//! Form definitions backing the front-end routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod client;
pub mod main;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("could not read the uploaded file: {0}")]
    Upload(#[from] std::io::Error),

    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("the uploaded file has no rows")]
    EmptyUpload,
}

/// Blank form fields are sent as empty strings; the API treats absence as `None`.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
