//! Short-code allocation for the Lariat engine.
//!
//! This crate provides the code registry: format validation, uniqueness
//! checking, and random generation of short codes. The registry is pure
//! policy over the code set the caller passes in; it never touches
//! storage itself.

pub mod error;
pub mod registry;

pub use error::RegistryError;
pub use registry::{CodeRegistry, RegistrySettings};
