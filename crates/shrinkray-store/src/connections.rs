use crate::memory::InMemoryHashStore;
use crate::redis::{RedisHashStore, RedisSettings};
use shrinkray_core::{HashStore, Role, StoreError};
use std::sync::Arc;

/// Three logical connections to one backend.
///
/// The admin connection is only used for health checks. Reads go through
/// the getter and writes through the pusher.
#[derive(Clone)]
pub struct ConnectionSet {
    admin: Arc<dyn HashStore>,
    pusher: Arc<dyn HashStore>,
    getter: Arc<dyn HashStore>,
}

impl ConnectionSet {
    pub fn new(
        admin: Arc<dyn HashStore>,
        pusher: Arc<dyn HashStore>,
        getter: Arc<dyn HashStore>,
    ) -> Self {
        Self {
            admin,
            pusher,
            getter,
        }
    }

    /// Three handles onto a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::from_in_memory(&InMemoryHashStore::new())
    }

    /// Three handles onto the tables of `store`, each with its own
    /// availability flag.
    pub fn from_in_memory(store: &InMemoryHashStore) -> Self {
        Self::new(
            Arc::new(store.connection()),
            Arc::new(store.connection()),
            Arc::new(store.connection()),
        )
    }

    /// Opens the admin, pusher and getter connections to Redis.
    ///
    /// Fails if any of them cannot be established.
    pub async fn connect_redis(settings: &RedisSettings) -> Result<Self, StoreError> {
        let client = settings.open()?;
        let admin = RedisHashStore::connect(&client, settings, Role::Admin).await?;
        let pusher = RedisHashStore::connect(&client, settings, Role::Pusher).await?;
        let getter = RedisHashStore::connect(&client, settings, Role::Getter).await?;
        Ok(Self::new(Arc::new(admin), Arc::new(pusher), Arc::new(getter)))
    }

    pub fn admin(&self) -> &Arc<dyn HashStore> {
        &self.admin
    }

    pub fn pusher(&self) -> &Arc<dyn HashStore> {
        &self.pusher
    }

    pub fn getter(&self) -> &Arc<dyn HashStore> {
        &self.getter
    }

    pub fn connection(&self, role: Role) -> &Arc<dyn HashStore> {
        match role {
            Role::Admin => &self.admin,
            Role::Pusher => &self.pusher,
            Role::Getter => &self.getter,
        }
    }
}

impl std::fmt::Debug for ConnectionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionSet").finish_non_exhaustive()
    }
}
