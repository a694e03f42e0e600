use shrinkray_core::error::StoreResultExt;
use shrinkray_core::{ShortKey, StoreError, HASH_TO_KEY_TABLE};
use shrinkray_store::ConnectionSet;
use tracing::trace;

/// Maps the content hash of an encoded link to the key issued for it.
///
/// Reads use the getter connection and writes the pusher. Entries are never
/// removed.
#[derive(Debug, Clone)]
pub struct DedupIndex {
    connections: ConnectionSet,
}

impl DedupIndex {
    pub fn new(connections: ConnectionSet) -> Self {
        Self { connections }
    }

    pub async fn lookup(&self, hash: &str) -> Result<Option<ShortKey>, StoreError> {
        trace!(hash, "looking up link hash");
        let key = self
            .connections
            .getter()
            .hash_get(HASH_TO_KEY_TABLE, hash)
            .await
            .with_context(|| format!("looking up hash '{hash}' in '{HASH_TO_KEY_TABLE}'"))?;
        Ok(key.map(ShortKey::new_unchecked))
    }

    pub async fn record(&self, hash: &str, key: &ShortKey) -> Result<(), StoreError> {
        self.connections
            .pusher()
            .hash_set(HASH_TO_KEY_TABLE, hash, key.as_str())
            .await
            .with_context(|| format!("recording hash '{hash}' -> '{key}' in '{HASH_TO_KEY_TABLE}'"))
    }
}
