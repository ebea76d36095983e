//! Persistence collaborators for the Lariat engine.
//!
//! The store hands its full record set to a
//! [`Persistence`](lariat_core::Persistence) collaborator after every
//! mutation; this crate provides the two reference implementations: an
//! in-memory snapshot for tests and embedding, and a whole-set JSON file.

pub mod json;
pub mod memory;

pub use json::JsonFilePersistence;
pub use memory::MemoryPersistence;
