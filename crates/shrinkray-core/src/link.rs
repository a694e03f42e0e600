use crate::error::StoreError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sha2::{Digest, Sha256};

/// A URL together with its stored representation.
///
/// Links never reach the backing tables in plaintext: the store holds the
/// base64 form, and the deduplication index is keyed by the SHA-256 of that
/// encoded form. Two raw URLs that differ in whitespace or casing therefore
/// hash differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    raw: String,
    encoded: String,
}

impl Link {
    /// Encodes a raw URL for storage.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let encoded = Self::encode(&raw);
        Self { raw, encoded }
    }

    /// Rebuilds a link from its stored form.
    pub fn from_encoded(encoded: impl Into<String>) -> Result<Self, StoreError> {
        let encoded = encoded.into();
        let raw = Self::decode(&encoded)?;
        Ok(Self { raw, encoded })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    /// Digest used as the deduplication index key.
    pub fn content_hash(&self) -> String {
        Self::hash_encoded(&self.encoded)
    }

    /// Lowercase hex SHA-256 of an encoded link.
    pub fn hash_encoded(encoded: &str) -> String {
        format!("{:x}", Sha256::digest(encoded.as_bytes()))
    }

    pub fn encode(raw: &str) -> String {
        STANDARD.encode(raw.as_bytes())
    }

    /// Decodes a stored link back into the original URL.
    pub fn decode(encoded: &str) -> Result<String, StoreError> {
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| StoreError::InvalidData(format!("link is not valid base64: {e}")))?;
        String::from_utf8(bytes)
            .map_err(|e| StoreError::InvalidData(format!("link is not valid utf-8: {e}")))
    }
}
