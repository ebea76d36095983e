use lariat_core::CoreError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    #[error("invalid short code: {0}")]
    InvalidCode(String),
    #[error("code generation exhausted after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

impl From<CoreError> for RegistryError {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::InvalidShortCode(message) => Self::InvalidCode(message),
        }
    }
}
