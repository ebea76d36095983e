use crate::error::RegistryError;
use lariat_core::ShortCode;
use std::collections::HashSet;
use tracing::trace;
use typed_builder::TypedBuilder;

/// The 62-character alphabet generated codes are drawn from.
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

const DEFAULT_CODE_LENGTH: usize = 6;

/// Settings for a [`CodeRegistry`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct RegistrySettings {
    /// Length of generated codes. Custom codes may use the full 3-20
    /// validation window regardless of this value.
    #[builder(default = DEFAULT_CODE_LENGTH)]
    pub code_length: usize,
    /// Retry bound for generation. `None` retries until a free code
    /// turns up, which matches small deployments; bound it when the code
    /// space can run hot.
    #[builder(default)]
    pub max_attempts: Option<u32>,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Allocates and validates short codes.
///
/// The registry is a pure function of its settings, the caller-supplied
/// code set, and the process RNG. Uniqueness is judged against whatever
/// set the caller passes in; the store passes every known code, expired
/// records included, so codes are never recycled.
#[derive(Debug, Clone, Default)]
pub struct CodeRegistry {
    settings: RegistrySettings,
}

impl CodeRegistry {
    pub fn new(settings: RegistrySettings) -> Self {
        Self { settings }
    }

    /// Validates a caller-supplied code against the format rules.
    pub fn validate(&self, code: &str) -> Result<ShortCode, RegistryError> {
        Ok(ShortCode::new(code)?)
    }

    /// Whether `code` is unused among `existing`.
    pub fn is_unique(&self, code: &ShortCode, existing: &HashSet<&str>) -> bool {
        !existing.contains(code.as_str())
    }

    /// Draws random codes until one not present in `existing` is found.
    ///
    /// With `max_attempts` unset this loops until it succeeds, which
    /// terminates with overwhelming probability as long as the registry
    /// stays well below the 62^length code space.
    pub fn generate(&self, existing: &HashSet<&str>) -> Result<ShortCode, RegistryError> {
        let mut attempts: u32 = 0;
        loop {
            if let Some(max) = self.settings.max_attempts {
                if attempts >= max {
                    return Err(RegistryError::Exhausted { attempts });
                }
            }
            attempts += 1;

            let candidate = random_code(self.settings.code_length);
            if !existing.contains(candidate.as_str()) {
                trace!(code = %candidate, attempts, "generated short code");
                // The alphabet only contains valid characters.
                return Ok(ShortCode::new_unchecked(candidate));
            }
        }
    }
}

fn random_code(length: usize) -> String {
    std::iter::repeat_with(|| ALPHABET[rand::random_range(0..ALPHABET.len())] as char)
        .take(length)
        .collect()
}
