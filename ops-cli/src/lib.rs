//! Operator tooling for the relationship-based authorization core
//!
//! The `rebac` binary is a thin shell around these modules:
//! - `resources`: print the resource taxonomy and relation matrix
//! - `object`: parse canonical object strings and print their JSON form
//! - `check`: run a batch check against a local in-memory store seeded from a
//!   grants file and, optionally, the managed role defaults
//!
//! # Example Usage
//!
//! ```bash
//! rebac resources
//! rebac object "metaresource:organization/*/dashboard/team-a.*"
//! rebac check --org 0199c3a4-6f0e-7d2b-9a51-2f0c1d7e8b90 --user alice \
//!     --grants grants.json --bootstrap --input checks.json
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::panic, clippy::indexing_slicing))]

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;

pub use cli::*;
pub use error::*;
