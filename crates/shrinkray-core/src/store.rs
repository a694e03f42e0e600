use crate::error::StoreError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Display;

/// Hash table holding `key -> base64 link`.
pub const KEY_TO_LINK_TABLE: &str = "keytob64";

/// Hash table holding `sha256(base64 link) -> key`, the deduplication index.
pub const HASH_TO_KEY_TABLE: &str = "linkhashes";

/// The purpose a store connection is opened for.
///
/// Each role gets its own connection so reads, writes and administrative
/// traffic can be health-checked independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Pusher,
    Getter,
}

impl Role {
    /// Every role, in the order the liveness monitor pings them.
    pub const ALL: [Role; 3] = [Role::Admin, Role::Getter, Role::Pusher];

    pub fn name(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Pusher => "pusher",
            Role::Getter => "getter",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A remote key-value backend exposing named hash tables.
#[async_trait]
pub trait HashStore: Send + Sync + 'static {
    /// Reads one field. Returns `Ok(None)` if the field or table is absent.
    async fn hash_get(&self, table: &str, field: &str) -> Result<Option<String>, StoreError>;

    /// Writes one field, replacing any previous value.
    async fn hash_set(&self, table: &str, field: &str, value: &str) -> Result<(), StoreError>;

    /// Reads every field of a table. A missing table yields an empty map.
    async fn hash_get_all(&self, table: &str) -> Result<HashMap<String, String>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

#[async_trait]
impl<S: HashStore + ?Sized> HashStore for std::sync::Arc<S> {
    async fn hash_get(&self, table: &str, field: &str) -> Result<Option<String>, StoreError> {
        (**self).hash_get(table, field).await
    }

    async fn hash_set(&self, table: &str, field: &str, value: &str) -> Result<(), StoreError> {
        (**self).hash_set(table, field, value).await
    }

    async fn hash_get_all(&self, table: &str) -> Result<HashMap<String, String>, StoreError> {
        (**self).hash_get_all(table).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        (**self).ping().await
    }
}
