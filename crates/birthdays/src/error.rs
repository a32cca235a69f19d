use thiserror::Error;

use birthdays_core::birthday::{BirthdayError, RangeError};
use birthdays_core::storage::{repository_error_to_status_code, RepositoryError};

/// Input that was rejected before reaching storage.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error(transparent)]
    Birthday(#[from] BirthdayError),
    #[error(transparent)]
    Range(#[from] RangeError),
}

/// Errors returned by [`crate::service::BirthdayService`].
///
/// Cache failures never show up here; they are logged and absorbed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] RepositoryError),
}

impl From<BirthdayError> for ServiceError {
    fn from(err: BirthdayError) -> Self {
        Self::Validation(err.into())
    }
}

impl From<RangeError> for ServiceError {
    fn from(err: RangeError) -> Self {
        Self::Validation(err.into())
    }
}

/// Maps a service error to an HTTP status code.
pub fn service_error_status(err: &ServiceError) -> u16 {
    match err {
        ServiceError::Validation(_) => 400,
        ServiceError::Storage(repo_error) => repository_error_to_status_code(repo_error),
    }
}
