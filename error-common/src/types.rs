use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse classification shared by every domain error in the workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// The caller sent something we refuse to process
    InvalidInput,
    /// A referenced entity does not exist
    NotFound,
    /// A bug or a broken contract on our side
    Internal,
    /// A downstream collaborator failed
    Unavailable,
    /// A deadline expired before the work completed
    Timeout,
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::InvalidInput => "invalid_input",
            ErrorType::NotFound => "not_found",
            ErrorType::Internal => "internal",
            ErrorType::Unavailable => "unavailable",
            ErrorType::Timeout => "timeout",
        }
    }

    /// Status code a handler layer should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorType::InvalidInput => 400,
            ErrorType::NotFound => 404,
            ErrorType::Internal => 500,
            ErrorType::Unavailable => 503,
            ErrorType::Timeout => 504,
        }
    }

    /// Whether the caller, rather than the system, is at fault
    pub fn is_client_error(&self) -> bool {
        matches!(self, ErrorType::InvalidInput | ErrorType::NotFound)
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Implemented by every domain error enum so it can be classified, coded and
/// rendered without the caller knowing the concrete type
pub trait ClassifiedError: std::error::Error {
    fn error_type(&self) -> ErrorType;

    /// Stable machine-readable code, one of the constants in [`crate::codes`]
    fn code(&self) -> &'static str;
}
