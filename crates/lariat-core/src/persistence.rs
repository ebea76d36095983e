use crate::error::PersistenceError;
use crate::record::LinkRecord;
use async_trait::async_trait;

/// A durability collaborator for the link store.
///
/// The store owns the authoritative in-memory record set; the collaborator
/// is asked for it once at startup and handed the full set after every
/// mutation. Saves carry replace semantics, not an incremental diff.
#[async_trait]
pub trait Persistence: Send + Sync + 'static {
    /// Loads the full record set. Called once when a store is opened.
    async fn load_all(&self) -> Result<Vec<LinkRecord>, PersistenceError>;

    /// Replaces the stored record set with `records`.
    async fn save_all(&self, records: &[LinkRecord]) -> Result<(), PersistenceError>;
}
