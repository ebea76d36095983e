use async_trait::async_trait;
use lariat_core::{LinkRecord, Persistence, PersistenceError};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Whole-set JSON file persistence.
///
/// Saves rewrite the file through a sibling temp file and a rename, so a
/// crash mid-write leaves the previous set intact.
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this collaborator reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

#[async_trait]
impl Persistence for JsonFilePersistence {
    async fn load_all(&self) -> Result<Vec<LinkRecord>, PersistenceError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            // A missing file is just an empty store, not a failure.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no persisted records yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(PersistenceError::Load(e.to_string())),
        };

        serde_json::from_slice(&bytes).map_err(|e| PersistenceError::Load(e.to_string()))
    }

    async fn save_all(&self, records: &[LinkRecord]) -> Result<(), PersistenceError> {
        let bytes = serde_json::to_vec_pretty(records)
            .map_err(|e| PersistenceError::Save(e.to_string()))?;

        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|e| PersistenceError::Save(e.to_string()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| PersistenceError::Save(e.to_string()))?;

        debug!(path = %self.path.display(), count = records.len(), "saved link records");
        Ok(())
    }
}
