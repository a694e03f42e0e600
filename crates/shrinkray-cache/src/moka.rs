use async_trait::async_trait;
use moka::future::Cache;
use shrinkray_core::{CacheError, LinkCache, ShortKey};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, trace};
use typed_builder::TypedBuilder;

pub type Result<T> = std::result::Result<T, CacheError>;

/// Settings for [`MokaLinkCache`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct CacheConfig {
    /// Lifetime of an entry, counted from its insertion.
    #[builder(default = Duration::from_secs(24 * 60 * 60))]
    pub ttl: Duration,
    #[builder(default = 100_000)]
    pub max_capacity: u64,
    /// How often the background sweeper evicts expired entries.
    #[builder(default = Duration::from_secs(60 * 60))]
    pub sweep_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// An in-memory, TTL-bounded cache of decoded links keyed by short key.
///
/// Expired entries are never returned, but their memory is only reclaimed
/// when moka runs its maintenance tasks, which the sweeper does on a fixed
/// interval.
#[derive(Debug, Clone)]
pub struct MokaLinkCache {
    cache: Cache<String, String>,
    sweep_interval: Duration,
}

impl MokaLinkCache {
    pub fn new(config: CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(config.ttl)
            .build();
        Self {
            cache,
            sweep_interval: config.sweep_interval,
        }
    }

    /// Creates a cache with the given TTL and default capacity.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self::new(CacheConfig::builder().ttl(ttl).build())
    }

    /// Approximate number of live entries.
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Evicts expired entries now.
    pub async fn sweep(&self) {
        self.cache.run_pending_tasks().await;
        trace!(entries = self.cache.entry_count(), "cache sweep finished");
    }

    /// Spawns a task that sweeps on the configured interval until aborted.
    pub fn spawn_sweeper(&self) -> JoinHandle<()> {
        let cache = self.clone();
        let period = self.sweep_interval;
        debug!(interval = ?period, "starting cache sweeper");
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // the first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                cache.sweep().await;
            }
        })
    }
}

impl Default for MokaLinkCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

#[async_trait]
impl LinkCache for MokaLinkCache {
    async fn get(&self, key: &ShortKey) -> Result<Option<String>> {
        match self.cache.get(key.as_str()).await {
            Some(url) => {
                debug!(key = %key, "cache hit");
                Ok(Some(url))
            }
            None => {
                trace!(key = %key, "cache miss");
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &ShortKey, url: &str) -> Result<()> {
        self.cache.insert(key.as_str().to_owned(), url.to_owned()).await;
        trace!(key = %key, "cached resolved link");
        Ok(())
    }
}
