//! Core types and traits for the Lariat short-link engine.
//!
//! This crate provides the shared vocabulary used by the code registry,
//! the link store, and the persistence collaborators.

pub mod clock;
pub mod error;
pub mod persistence;
pub mod record;
pub mod shortcode;

pub use clock::{Clock, SystemClock};
pub use error::{CoreError, PersistenceError};
pub use persistence::Persistence;
pub use record::{ClickContext, ClickEvent, LinkRecord, LinkStats, LinkSummary};
pub use shortcode::ShortCode;
