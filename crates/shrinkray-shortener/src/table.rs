use shrinkray_core::error::StoreResultExt;
use shrinkray_core::{ShortKey, StoreError, KEY_TO_LINK_TABLE};
use shrinkray_store::ConnectionSet;
use std::collections::HashMap;

/// The key -> encoded link table.
#[derive(Debug, Clone)]
pub struct KeyTable {
    connections: ConnectionSet,
}

impl KeyTable {
    pub fn new(connections: ConnectionSet) -> Self {
        Self { connections }
    }

    pub async fn exists(&self, key: &ShortKey) -> Result<bool, StoreError> {
        Ok(self.get(key).await?.is_some())
    }

    /// Returns the encoded link stored under `key`.
    pub async fn get(&self, key: &ShortKey) -> Result<Option<String>, StoreError> {
        self.connections
            .getter()
            .hash_get(KEY_TO_LINK_TABLE, key.as_str())
            .await
            .with_context(|| format!("reading key '{key}' from '{KEY_TO_LINK_TABLE}'"))
    }

    pub async fn insert(&self, key: &ShortKey, encoded_link: &str) -> Result<(), StoreError> {
        self.connections
            .pusher()
            .hash_set(KEY_TO_LINK_TABLE, key.as_str(), encoded_link)
            .await
            .with_context(|| format!("writing key '{key}' to '{KEY_TO_LINK_TABLE}'"))
    }

    /// Every `key -> encoded link` pair.
    pub async fn all(&self) -> Result<HashMap<String, String>, StoreError> {
        self.connections
            .getter()
            .hash_get_all(KEY_TO_LINK_TABLE)
            .await
            .with_context(|| format!("reading all of '{KEY_TO_LINK_TABLE}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_then_get() {
        let table = KeyTable::new(ConnectionSet::in_memory());
        let key = ShortKey::new_unchecked("abc");

        assert!(!table.exists(&key).await.unwrap());

        table.insert(&key, "aHR0cDovL2EuYmM=").await.unwrap();

        assert!(table.exists(&key).await.unwrap());
        assert_eq!(
            table.get(&key).await.unwrap().as_deref(),
            Some("aHR0cDovL2EuYmM=")
        );
        assert_eq!(table.all().await.unwrap().len(), 1);
    }
}
