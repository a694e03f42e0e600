use shrinkray_core::{KeyError, StoreError};
use shrinkray_generator::GeneratorError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum LinkError {
    #[error(transparent)]
    InvalidKey(#[from] KeyError),
    #[error("invalid link: {0}")]
    InvalidLink(String),
    #[error("key '{0}' is already taken")]
    KeyConflict(String),
    #[error("no free key found after {attempts} attempts")]
    Exhausted { attempts: u32 },
    #[error("no link stored under key '{0}'")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LinkError {
    /// Returns `true` if a requested custom key was already in use.
    pub fn is_conflict(&self) -> bool {
        matches!(self, LinkError::KeyConflict(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("alphabet must not be empty")]
    EmptyAlphabet,
    #[error("alphabet symbol {0:?} cannot appear in a key")]
    InvalidAlphabetSymbol(char),
    #[error("key size {0} is outside the valid key length 3..=10")]
    KeySizeOutOfRange(usize),
    #[error("max attempts must be greater than zero")]
    ZeroAttempts,
    #[error("cache ttl must be greater than zero")]
    ZeroCacheTtl,
    #[error("cache sweep interval must be greater than zero")]
    ZeroSweepInterval,
    #[error("liveness {0} must be greater than zero")]
    ZeroLivenessSetting(&'static str),
    #[error(transparent)]
    Generator(#[from] GeneratorError),
}
