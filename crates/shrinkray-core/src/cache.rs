use crate::error::CacheError;
use crate::shortkey::ShortKey;
use async_trait::async_trait;

/// A disposable read cache of resolved links.
///
/// Values are decoded URLs. Entries are derived data: losing one only costs
/// an extra store round-trip.
#[async_trait]
pub trait LinkCache: Send + Sync + 'static {
    /// Returns `Ok(None)` on a miss or an expired entry.
    async fn get(&self, key: &ShortKey) -> Result<Option<String>, CacheError>;

    /// Stores `url` under `key` with a fresh expiry, replacing any previous entry.
    async fn set(&self, key: &ShortKey, url: &str) -> Result<(), CacheError>;
}
