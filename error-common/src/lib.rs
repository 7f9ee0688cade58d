//! Common error handling utilities for the authorization workspace
//!
//! This crate provides the error classification shared by every crate in the
//! workspace. Each domain error enum stays local to its crate (built with
//! `thiserror`), and implements [`ClassifiedError`] so that callers can:
//!
//! - map it to a coarse [`ErrorType`] (invalid input, internal, timeout, ...)
//! - read a stable, machine-readable error code (see [`codes`])
//! - render it as a wire-facing [`ErrorResponse`]
//! - log it at a level matching its class with [`log_error`]
//!
//! # Error Categories
//!
//! - **InvalidInput**: malformed payloads, unknown relations, bad selectors
//! - **NotFound**: a referenced entity does not exist
//! - **Internal**: contract violations and invariant breaks
//! - **Unavailable**: a downstream collaborator (e.g. the tuple store) failed
//! - **Timeout**: a deadline expired before the downstream call completed
//!
//! # Example
//!
//! ```rust
//! use error_common::{ClassifiedError, ErrorResponse, ErrorType, codes};
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("relation {0} is not known")]
//! struct UnknownRelation(String);
//!
//! impl ClassifiedError for UnknownRelation {
//!     fn error_type(&self) -> ErrorType {
//!         ErrorType::InvalidInput
//!     }
//!
//!     fn code(&self) -> &'static str {
//!         codes::authorization::INVALID_RELATION
//!     }
//! }
//!
//! let response = ErrorResponse::from_error(&UnknownRelation("own".into()));
//! assert_eq!(response.error_type, ErrorType::InvalidInput);
//! assert_eq!(response.code, "AUTHZ_3003");
//! ```

pub mod codes;
pub mod reporting;
pub mod types;

pub use reporting::*;
pub use types::*;
