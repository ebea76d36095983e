use thiserror::Error;

/// Errors related to the core types of the short-link engine.
pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
}

/// Errors reported by a [`Persistence`](crate::persistence::Persistence)
/// collaborator.
#[derive(Debug, Clone, Error)]
pub enum PersistenceError {
    #[error("failed to load records: {0}")]
    Load(String),
    #[error("failed to save records: {0}")]
    Save(String),
}
