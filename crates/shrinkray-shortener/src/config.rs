use crate::error::ConfigError;
use shrinkray_cache::CacheConfig;
use shrinkray_core::ShortKey;
use shrinkray_generator::{AlphabetGenerator, DEFAULT_ALPHABET, DEFAULT_KEY_SIZE};
use shrinkray_store::LivenessConfig;
use typed_builder::TypedBuilder;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 100;

/// Immutable configuration for a [`LinkService`](crate::LinkService) and its
/// background tasks. Build once at startup and pass it to constructors.
#[derive(Debug, Clone, TypedBuilder)]
pub struct ShortenerConfig {
    #[builder(default = DEFAULT_KEY_SIZE)]
    pub key_size: usize,
    #[builder(default = DEFAULT_ALPHABET.to_string(), setter(into))]
    pub alphabet: String,
    /// Generation attempts before giving up with `Exhausted`.
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,
    #[builder(default)]
    pub cache: CacheConfig,
    #[builder(default)]
    pub liveness: LivenessConfig,
}

impl Default for ShortenerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ShortenerConfig {
    /// Rejects settings that would make the service unusable.
    ///
    /// Generated keys must also be resolvable, so the key size and every
    /// alphabet symbol have to satisfy the user-facing key format.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.alphabet.is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }
        if let Some(c) = self.alphabet.chars().find(|c| !ShortKey::is_key_char(*c)) {
            return Err(ConfigError::InvalidAlphabetSymbol(c));
        }
        if !(3..=10).contains(&self.key_size) {
            return Err(ConfigError::KeySizeOutOfRange(self.key_size));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        if self.cache.ttl.is_zero() {
            return Err(ConfigError::ZeroCacheTtl);
        }
        if self.cache.sweep_interval.is_zero() {
            return Err(ConfigError::ZeroSweepInterval);
        }
        if self.liveness.interval.is_zero() {
            return Err(ConfigError::ZeroLivenessSetting("interval"));
        }
        if self.liveness.base_threshold == 0 {
            return Err(ConfigError::ZeroLivenessSetting("base threshold"));
        }
        if self.liveness.multiple == 0 {
            return Err(ConfigError::ZeroLivenessSetting("multiple"));
        }
        Ok(())
    }

    /// Builds the key generator described by this configuration.
    pub fn generator(&self) -> Result<AlphabetGenerator, ConfigError> {
        self.validate()?;
        Ok(AlphabetGenerator::new(&self.alphabet, self.key_size)?)
    }
}
