use lariat_core::PersistenceError;
use lariat_registry::RegistryError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors reported by the link store.
///
/// Missing and expired records are not errors: `resolve` reports absence
/// through `Option`, and `record_click` through
/// [`ClickOutcome`](crate::store::ClickOutcome).
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("ttl must be between 1 and 10080 minutes, got {0}")]
    InvalidTtl(i64),
    #[error("invalid short code: {0}")]
    InvalidCode(String),
    #[error("short code already in use: {0}")]
    CodeConflict(String),
    #[error("code generation exhausted after {attempts} attempts")]
    Exhausted { attempts: u32 },
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

impl From<RegistryError> for StoreError {
    fn from(value: RegistryError) -> Self {
        match value {
            RegistryError::InvalidCode(message) => Self::InvalidCode(message),
            RegistryError::Exhausted { attempts } => Self::Exhausted { attempts },
        }
    }
}
