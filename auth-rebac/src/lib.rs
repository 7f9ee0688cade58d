//! Relationship-based authorization core
//!
//! This crate models who may do what on which resource as relations between
//! subjects and typed, selector-addressed objects, and provides:
//! - A fixed resource taxonomy with relation/type validity matrices
//! - Per-type selector grammars and a canonical object string form
//! - Batch checks resolved with one store round trip, results in input order
//! - Grouped additions/deletions patches flattened into atomic store writes
//! - Default grants for the managed `admin`, `editor` and `viewer` roles
//!
//! # Core Concepts
//!
//! - **Object**: a resource (type + name) plus a selector addressing instances
//! - **Subject**: a user, or everyone assigned to a role, within an organization
//! - **Relation**: the verb (`read`, `update`, `assignee`, ...)
//! - **Transaction**: one check request, carrying a request-scoped correlation id
//!
//! # Example
//!
//! ```rust
//! use auth_rebac::{AuthorizationEngine, AuthzConfig, InMemoryAuthzStore, Object, Relation, Subject, Transaction};
//! use std::sync::Arc;
//! use uuid::Uuid;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = AuthorizationEngine::new(Arc::new(InMemoryAuthzStore::new()), AuthzConfig::default())?;
//!
//! let alice = Subject::user(Uuid::new_v4(), "alice")?;
//! let dashboard: Object = "metaresource:organization/*/dashboard/team-a.board".parse()?;
//!
//! let results = engine
//!     .check(&alice, &[Transaction::new(Relation::Read, dashboard)?])
//!     .await?;
//! assert!(!results[0].authorized);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing))]

pub mod check;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod object;
pub mod policy;
pub mod repository;
pub mod resource;
pub mod schema;
pub mod selector;
pub mod transaction;

pub use check::BatchChecker;
pub use config::AuthzConfig;
pub use engine::AuthorizationEngine;
pub use error::*;
pub use models::*;
pub use object::*;
pub use policy::ManagedRole;
pub use repository::{AuthzStore, InMemoryAuthzStore};
pub use resource::{Name, Resource, Type};
pub use schema::{GettableResources, Relation};
pub use selector::Selector;
pub use transaction::*;
