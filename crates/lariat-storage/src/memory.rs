use async_trait::async_trait;
use lariat_core::{LinkRecord, Persistence, PersistenceError};
use std::sync::{Arc, Mutex};

/// In-memory persistence collaborator.
///
/// Clones share the same underlying snapshot, so a store can be reopened
/// against the records a previous store persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    records: Arc<Mutex<Vec<LinkRecord>>>,
}

impl MemoryPersistence {
    /// Creates an empty collaborator.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Persistence for MemoryPersistence {
    async fn load_all(&self) -> Result<Vec<LinkRecord>, PersistenceError> {
        let records = self
            .records
            .lock()
            .map_err(|e| PersistenceError::Load(e.to_string()))?;
        Ok(records.clone())
    }

    async fn save_all(&self, records: &[LinkRecord]) -> Result<(), PersistenceError> {
        let mut slot = self
            .records
            .lock()
            .map_err(|e| PersistenceError::Save(e.to_string()))?;
        *slot = records.to_vec();
        Ok(())
    }
}
