// Error reporting utilities
// Wire rendering and class-aware logging for classified errors

use crate::types::{ClassifiedError, ErrorType};
use serde::{Deserialize, Serialize};

/// Error body returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: ErrorType,
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn from_error<E: ClassifiedError + ?Sized>(error: &E) -> Self {
        Self {
            error_type: error.error_type(),
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }

    pub fn status_code(&self) -> u16 {
        self.error_type.status_code()
    }
}

/// Log an error at a level matching its class: caller mistakes are warnings,
/// everything else is an error
pub fn log_error<E: ClassifiedError + ?Sized>(context: &str, error: &E) {
    let error_type = error.error_type();
    if error_type.is_client_error() {
        tracing::warn!(
            context = context,
            error_type = %error_type,
            error_code = error.code(),
            error = %error,
            "request rejected"
        );
    } else {
        tracing::error!(
            context = context,
            error_type = %error_type,
            error_code = error.code(),
            error = %error,
            "request failed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes;

    #[derive(Debug, thiserror::Error)]
    #[error("store is down")]
    struct StoreDown;

    impl ClassifiedError for StoreDown {
        fn error_type(&self) -> ErrorType {
            ErrorType::Unavailable
        }

        fn code(&self) -> &'static str {
            codes::storage::UNAVAILABLE
        }
    }

    #[test]
    fn test_error_response_shape() {
        let response = ErrorResponse::from_error(&StoreDown);
        assert_eq!(response.status_code(), 503);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["type"], "unavailable");
        assert_eq!(json["code"], "STORE_4001");
        assert_eq!(json["message"], "store is down");
    }

    #[test]
    fn test_log_error_does_not_panic_without_subscriber() {
        log_error("test", &StoreDown);
    }
}
