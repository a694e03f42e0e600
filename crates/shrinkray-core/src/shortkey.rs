use crate::error::KeyError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

const MIN_LENGTH: usize = 3;
const MAX_LENGTH: usize = 10;

/// Upper bound on the raw length of a user-supplied key.
///
/// This gate runs before the format check, so a custom key longer than this
/// is reported as [`KeyError::TooLong`] rather than [`KeyError::Malformed`].
pub const CUSTOM_KEY_MAX_LENGTH: usize = 37;

/// A short identifier that stands in for a long URL.
///
/// Keys typed by users must be 3-10 characters long and contain only
/// ASCII alphanumerics or hyphens. Generated keys are trusted and skip
/// validation; their shape is governed by the generator's configuration.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortKey(String);

impl ShortKey {
    /// Parses a key received from a client, e.g. on the resolve path.
    pub fn parse(key: impl Into<String>) -> Result<Self, KeyError> {
        let key = key.into();
        Self::validate(&key)?;
        Ok(Self(key))
    }

    /// Validates a user-requested custom key.
    ///
    /// Applies the [`CUSTOM_KEY_MAX_LENGTH`] gate first, then the key format.
    pub fn custom(key: impl Into<String>) -> Result<Self, KeyError> {
        let key = key.into();
        Self::check_custom_length(&key)?;
        Self::validate(&key)?;
        Ok(Self(key))
    }

    /// Creates a `ShortKey` without validation.
    ///
    /// Use this only for keys produced by trusted internal sources
    /// (the key generator, or values read back from the store).
    pub fn new_unchecked(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Builds the public short URL for this key.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.0)
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the key and returns the inner string.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Returns `true` if `c` may appear in a user-supplied key.
    pub fn is_key_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '-'
    }

    fn check_custom_length(key: &str) -> Result<(), KeyError> {
        if key.len() > CUSTOM_KEY_MAX_LENGTH {
            return Err(KeyError::TooLong {
                len: key.len(),
                max: CUSTOM_KEY_MAX_LENGTH,
            });
        }
        Ok(())
    }

    fn validate(key: &str) -> Result<(), KeyError> {
        let len_ok = (MIN_LENGTH..=MAX_LENGTH).contains(&key.len());
        if !len_ok || !key.chars().all(Self::is_key_char) {
            return Err(KeyError::Malformed(key.to_string()));
        }
        Ok(())
    }
}

impl Display for ShortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ShortKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
