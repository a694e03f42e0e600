#![allow(dead_code)]

use async_trait::async_trait;
use shrinkray_core::{HashStore, StoreError};
use shrinkray_store::{ConnectionSet, InMemoryHashStore};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Barrier;

/// Wraps a store and counts the calls made through it.
#[derive(Default)]
pub struct CountingStore {
    inner: InMemoryHashStore,
    gets: AtomicUsize,
    sets: AtomicUsize,
    get_alls: AtomicUsize,
    /// When set, lookups in this table wait for every party to arrive.
    gate: Option<(&'static str, Arc<Barrier>)>,
    /// When set, writes to this table fail as if the store went away.
    failing_sets: Option<&'static str>,
}

impl CountingStore {
    pub fn new(inner: InMemoryHashStore) -> Self {
        Self {
            inner,
            ..Default::default()
        }
    }

    /// Lookups in `table` block until `parties` of them are in flight.
    pub fn gated(inner: InMemoryHashStore, table: &'static str, parties: usize) -> Self {
        Self {
            inner,
            gate: Some((table, Arc::new(Barrier::new(parties)))),
            ..Default::default()
        }
    }

    /// Writes to `table` fail with [`StoreError::Unavailable`].
    pub fn failing_sets(inner: InMemoryHashStore, table: &'static str) -> Self {
        Self {
            inner,
            failing_sets: Some(table),
            ..Default::default()
        }
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn sets(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    pub fn get_alls(&self) -> usize {
        self.get_alls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HashStore for CountingStore {
    async fn hash_get(&self, table: &str, field: &str) -> Result<Option<String>, StoreError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        let value = self.inner.hash_get(table, field).await?;
        if let Some((gated, barrier)) = &self.gate {
            if *gated == table {
                barrier.wait().await;
            }
        }
        Ok(value)
    }

    async fn hash_set(&self, table: &str, field: &str, value: &str) -> Result<(), StoreError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        if self.failing_sets == Some(table) {
            return Err(StoreError::Unavailable(format!("write to '{table}' dropped")));
        }
        self.inner.hash_set(table, field, value).await
    }

    async fn hash_get_all(&self, table: &str) -> Result<HashMap<String, String>, StoreError> {
        self.get_alls.fetch_add(1, Ordering::SeqCst);
        self.inner.hash_get_all(table).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }
}

/// A connection set whose getter and pusher are instrumented.
pub struct Instrumented {
    pub store: InMemoryHashStore,
    pub getter: Arc<CountingStore>,
    pub pusher: Arc<CountingStore>,
    pub connections: ConnectionSet,
}

impl Instrumented {
    pub fn new() -> Self {
        let store = InMemoryHashStore::new();
        let getter = Arc::new(CountingStore::new(store.connection()));
        Self::with_getter(store, getter)
    }

    pub fn with_getter(store: InMemoryHashStore, getter: Arc<CountingStore>) -> Self {
        let pusher = Arc::new(CountingStore::new(store.connection()));
        Self::with_parts(store, getter, pusher)
    }

    pub fn with_pusher(store: InMemoryHashStore, pusher: Arc<CountingStore>) -> Self {
        let getter = Arc::new(CountingStore::new(store.connection()));
        Self::with_parts(store, getter, pusher)
    }

    fn with_parts(
        store: InMemoryHashStore,
        getter: Arc<CountingStore>,
        pusher: Arc<CountingStore>,
    ) -> Self {
        let connections = ConnectionSet::new(
            Arc::new(store.connection()),
            pusher.clone(),
            getter.clone(),
        );
        Self {
            store,
            getter,
            pusher,
            connections,
        }
    }
}
