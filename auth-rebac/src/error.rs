use error_common::{codes, ClassifiedError, ErrorType};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthzError {
    #[error("Invalid relation: {0}")]
    InvalidRelation(String),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("Invalid type: {0}")]
    InvalidType(String),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Invalid object: {0}")]
    InvalidObject(String),

    #[error("Invalid subject: {0}")]
    InvalidSubject(String),

    #[error("Invalid patch objects: {0}")]
    InvalidPatchObject(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Batch of {size} transactions exceeds the limit of {max}")]
    BatchTooLarge { size: usize, max: usize },

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Deadline exceeded waiting for the authorization store")]
    DeadlineExceeded,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClassifiedError for AuthzError {
    fn error_type(&self) -> ErrorType {
        match self {
            AuthzError::InvalidRelation(_)
            | AuthzError::InvalidSelector(_)
            | AuthzError::InvalidType(_)
            | AuthzError::InvalidName(_)
            | AuthzError::InvalidObject(_)
            | AuthzError::InvalidSubject(_)
            | AuthzError::InvalidPatchObject(_)
            | AuthzError::InvalidPayload(_)
            | AuthzError::BatchTooLarge { .. } => ErrorType::InvalidInput,
            AuthzError::StorageError(_) => ErrorType::Unavailable,
            AuthzError::DeadlineExceeded => ErrorType::Timeout,
            AuthzError::InvalidConfig(_) | AuthzError::Internal(_) => ErrorType::Internal,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AuthzError::InvalidRelation(_) => codes::authorization::INVALID_RELATION,
            AuthzError::InvalidSelector(_) => codes::authorization::INVALID_SELECTOR,
            AuthzError::InvalidType(_) => codes::authorization::INVALID_TYPE,
            AuthzError::InvalidName(_) => codes::authorization::INVALID_NAME,
            AuthzError::InvalidObject(_) => codes::authorization::INVALID_OBJECT,
            AuthzError::InvalidSubject(_) => codes::authorization::INVALID_SUBJECT,
            AuthzError::InvalidPatchObject(_) => codes::authorization::INVALID_PATCH_OBJECTS,
            AuthzError::InvalidPayload(_) => codes::validation::INVALID_FORMAT,
            AuthzError::BatchTooLarge { .. } => codes::validation::LIMIT_EXCEEDED,
            AuthzError::StorageError(_) => codes::storage::UNAVAILABLE,
            AuthzError::DeadlineExceeded => codes::storage::DEADLINE_EXCEEDED,
            AuthzError::InvalidConfig(_) => codes::internal::INVALID_CONFIG,
            AuthzError::Internal(_) => codes::internal::CONTRACT_VIOLATION,
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthzError>;
