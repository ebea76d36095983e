//! The link store for the Lariat engine.
//!
//! This crate owns the record set and its policy: code uniqueness,
//! TTL expiry, click recording, and aggregate statistics. Durability is
//! delegated to an injected [`Persistence`](lariat_core::Persistence)
//! collaborator; code allocation to a
//! [`CodeRegistry`](lariat_registry::CodeRegistry).

pub mod error;
pub mod store;

pub use error::StoreError;
pub use store::{ClickOutcome, CreateParams, LinkStore};
