use async_trait::async_trait;
use dashmap::DashMap;
use shrinkray_core::{HashStore, StoreError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::trace;

type Table = DashMap<String, String>;

/// In-memory implementation of [`HashStore`] using DashMap.
///
/// Clones share both the tables and the online flag. [`connection`] opens a
/// second handle onto the same tables with its own flag, so a test can take
/// a single role offline while the others keep working.
///
/// [`connection`]: InMemoryHashStore::connection
#[derive(Debug, Clone)]
pub struct InMemoryHashStore {
    tables: Arc<DashMap<String, Table>>,
    online: Arc<AtomicBool>,
}

impl InMemoryHashStore {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(DashMap::new()),
            online: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Opens another handle onto the same tables.
    pub fn connection(&self) -> Self {
        Self {
            tables: Arc::clone(&self.tables),
            online: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Simulates losing (or regaining) this handle's connection.
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    /// Number of fields in `table`, zero if it does not exist.
    pub fn table_len(&self, table: &str) -> usize {
        self.tables.get(table).map_or(0, |t| t.len())
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.is_online() {
            Ok(())
        } else {
            Err(StoreError::Unavailable("in-memory store is offline".into()))
        }
    }
}

impl Default for InMemoryHashStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HashStore for InMemoryHashStore {
    async fn hash_get(&self, table: &str, field: &str) -> Result<Option<String>, StoreError> {
        self.ensure_online()?;
        trace!(table, field, "hget");
        Ok(self
            .tables
            .get(table)
            .and_then(|t| t.get(field).map(|v| v.value().clone())))
    }

    async fn hash_set(&self, table: &str, field: &str, value: &str) -> Result<(), StoreError> {
        self.ensure_online()?;
        trace!(table, field, "hset");
        self.tables
            .entry(table.to_owned())
            .or_default()
            .insert(field.to_owned(), value.to_owned());
        Ok(())
    }

    async fn hash_get_all(&self, table: &str) -> Result<HashMap<String, String>, StoreError> {
        self.ensure_online()?;
        trace!(table, "hgetall");
        Ok(self
            .tables
            .get(table)
            .map(|t| {
                t.iter()
                    .map(|e| (e.key().clone(), e.value().clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.ensure_online()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_missing_field_or_table_is_none() {
        let store = InMemoryHashStore::new();
        assert_eq!(store.hash_get("t", "f").await.unwrap(), None);

        store.hash_set("t", "other", "v").await.unwrap();
        assert_eq!(store.hash_get("t", "f").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_overwrites_and_get_all_returns_table() {
        let store = InMemoryHashStore::new();
        store.hash_set("t", "a", "1").await.unwrap();
        store.hash_set("t", "a", "2").await.unwrap();
        store.hash_set("t", "b", "3").await.unwrap();
        store.hash_set("u", "a", "x").await.unwrap();

        let all = store.hash_get_all("t").await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all["a"], "2");
        assert_eq!(all["b"], "3");
        assert!(store.hash_get_all("missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn connections_share_tables_but_not_availability() {
        let writer = InMemoryHashStore::new();
        let reader = writer.connection();

        writer.hash_set("t", "k", "v").await.unwrap();
        assert_eq!(reader.hash_get("t", "k").await.unwrap().as_deref(), Some("v"));

        reader.set_online(false);
        assert!(matches!(
            reader.hash_get("t", "k").await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(reader.ping().await.is_err());
        assert!(writer.ping().await.is_ok());
    }

    #[tokio::test]
    async fn clones_share_availability() {
        let store = InMemoryHashStore::new();
        let clone = store.clone();
        clone.set_online(false);
        assert!(!store.is_online());
    }
}
