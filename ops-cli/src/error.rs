use auth_rebac::AuthzError;
use error_common::{codes, ClassifiedError, ErrorType};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Authz(#[from] AuthzError),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid grants file: {0}")]
    InvalidGrants(String),

    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

impl ClassifiedError for CliError {
    fn error_type(&self) -> ErrorType {
        match self {
            CliError::Authz(err) => err.error_type(),
            CliError::Read { .. } | CliError::InvalidGrants(_) => ErrorType::InvalidInput,
            CliError::Output(_) => ErrorType::Internal,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            CliError::Authz(err) => err.code(),
            CliError::Read { .. } => codes::validation::MISSING_REQUIRED_FIELD,
            CliError::InvalidGrants(_) => codes::validation::INVALID_FORMAT,
            CliError::Output(_) => codes::internal::INTERNAL,
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
