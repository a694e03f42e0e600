use crate::assign::KeyAssigner;
use crate::config::ShortenerConfig;
use crate::dedup::DedupIndex;
use crate::error::{ConfigError, LinkError};
use crate::table::KeyTable;
use shrinkray_core::{Link, LinkCache, ShortKey};
use shrinkray_generator::{AlphabetGenerator, Generator};
use shrinkray_store::ConnectionSet;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// Creates, resolves and exports links.
///
/// Creation is content-addressed: a link whose encoded form was shortened
/// before gets its existing key back, and any requested custom key is
/// ignored in that case.
///
/// The key table and the deduplication index are written one after the
/// other without a transaction. If the second write fails, the key still
/// resolves but the link is not recognized as a duplicate later. Two
/// concurrent creations of the same new link may likewise both miss the
/// index and receive different keys; the last index write wins.
pub struct LinkService<G> {
    dedup: DedupIndex,
    table: KeyTable,
    assigner: KeyAssigner<G>,
    cache: Arc<dyn LinkCache>,
}

impl LinkService<AlphabetGenerator> {
    /// Builds a service with the random generator described by `config`.
    pub fn from_config(
        config: &ShortenerConfig,
        connections: ConnectionSet,
        cache: Arc<dyn LinkCache>,
    ) -> Result<Self, ConfigError> {
        let generator = config.generator()?;
        Ok(Self::new(connections, generator, cache, config.max_attempts))
    }
}

impl<G: Generator> LinkService<G> {
    pub fn new(
        connections: ConnectionSet,
        generator: G,
        cache: Arc<dyn LinkCache>,
        max_attempts: u32,
    ) -> Self {
        let table = KeyTable::new(connections.clone());
        Self {
            dedup: DedupIndex::new(connections),
            assigner: KeyAssigner::new(table.clone(), generator, max_attempts),
            table,
            cache,
        }
    }

    /// Stores `link` and returns its key.
    ///
    /// A custom key is validated before anything touches the store, so a
    /// malformed key is rejected even when the link was shortened before.
    pub async fn create_link(
        &self,
        link: &Link,
        custom_key: Option<&str>,
    ) -> Result<ShortKey, LinkError> {
        let custom_key = custom_key.map(ShortKey::custom).transpose()?;
        let custom = custom_key.is_some();
        let hash = link.content_hash();

        if let Some(existing) = self.dedup.lookup(&hash).await? {
            debug!(key = %existing, "link already shortened");
            return Ok(existing);
        }

        let key = self.assigner.assign(custom_key).await?;

        self.table.insert(&key, link.encoded()).await?;
        if let Err(e) = self.dedup.record(&hash, &key).await {
            warn!(key = %key, error = %e, "link stored but not indexed for deduplication");
            return Err(e.into());
        }

        info!(key = %key, custom, "created link");
        Ok(key)
    }

    /// Returns the decoded URL stored under `key`.
    pub async fn resolve(&self, key: &str) -> Result<String, LinkError> {
        let key = ShortKey::parse(key)?;

        match self.cache.get(&key).await {
            Ok(Some(url)) => return Ok(url),
            Ok(None) => {}
            Err(e) => warn!(key = %key, error = %e, "cache read failed, falling back to store"),
        }

        trace!(key = %key, "resolving from store");
        let Some(encoded) = self.table.get(&key).await? else {
            return Err(LinkError::NotFound(key.into_string()));
        };
        let url = Link::decode(&encoded)
            .map_err(|e| e.context(format!("decoding link for key '{key}'")))?;

        if let Err(e) = self.cache.set(&key, &url).await {
            warn!(key = %key, error = %e, "failed to cache resolved link");
        }
        Ok(url)
    }

    /// Every stored `(key, encoded link)` pair, sorted by key.
    pub async fn export(&self) -> Result<Vec<(String, String)>, LinkError> {
        let mut entries: Vec<_> = self.table.all().await?.into_iter().collect();
        entries.sort_unstable();
        debug!(count = entries.len(), "exported links");
        Ok(entries)
    }
}
