use crate::error::LinkError;
use crate::table::KeyTable;
use shrinkray_core::ShortKey;
use shrinkray_generator::Generator;
use tracing::{debug, trace};

/// Picks the key a new link will be stored under.
#[derive(Debug)]
pub struct KeyAssigner<G> {
    table: KeyTable,
    generator: G,
    max_attempts: u32,
}

impl<G: Generator> KeyAssigner<G> {
    pub fn new(table: KeyTable, generator: G, max_attempts: u32) -> Self {
        Self {
            table,
            generator,
            max_attempts,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns a key that is not yet present in the key table.
    ///
    /// A custom key must already be validated with [`ShortKey::custom`]. It
    /// is checked once; if taken, the call fails with
    /// [`LinkError::KeyConflict`]. Otherwise candidates are drawn from the
    /// generator until a free one is found or `max_attempts` is spent. A
    /// store error aborts immediately.
    pub async fn assign(&self, custom_key: Option<ShortKey>) -> Result<ShortKey, LinkError> {
        match custom_key {
            Some(custom) => self.claim_custom(custom).await,
            None => self.generate_free().await,
        }
    }

    async fn claim_custom(&self, key: ShortKey) -> Result<ShortKey, LinkError> {
        if self
            .table
            .exists(&key)
            .await
            .map_err(|e| e.context(format!("checking custom key '{key}'")))?
        {
            debug!(key = %key, "custom key already taken");
            return Err(LinkError::KeyConflict(key.into_string()));
        }
        Ok(key)
    }

    async fn generate_free(&self) -> Result<ShortKey, LinkError> {
        for attempt in 1..=self.max_attempts {
            let candidate = self.generator.generate();
            let taken = self.table.exists(&candidate).await.map_err(|e| {
                e.context(format!("attempt {attempt}, candidate '{candidate}'"))
            })?;
            if !taken {
                trace!(key = %candidate, attempt, "found free key");
                return Ok(candidate);
            }
            trace!(key = %candidate, attempt, "candidate collides");
        }
        debug!(attempts = self.max_attempts, "key space exhausted");
        Err(LinkError::Exhausted {
            attempts: self.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shrinkray_core::StoreError;
    use shrinkray_generator::ScriptedGenerator;
    use shrinkray_store::{ConnectionSet, InMemoryHashStore};
    use std::sync::Arc;

    async fn table_with(keys: &[&str]) -> KeyTable {
        let table = KeyTable::new(ConnectionSet::in_memory());
        for key in keys {
            table
                .insert(&ShortKey::new_unchecked(*key), "aHR0cDovL2EuYmM=")
                .await
                .unwrap();
        }
        table
    }

    #[tokio::test]
    async fn custom_key_is_returned_when_free() {
        let assigner = KeyAssigner::new(
            table_with(&[]).await,
            ScriptedGenerator::new(["zzz"]),
            10,
        );
        let key = assigner
            .assign(Some(ShortKey::custom("my-key").unwrap()))
            .await
            .unwrap();
        assert_eq!(key.as_str(), "my-key");
    }

    #[tokio::test]
    async fn taken_custom_key_conflicts_without_retry() {
        let generator = Arc::new(ScriptedGenerator::new(["zzz"]));
        let assigner = KeyAssigner::new(table_with(&["taken"]).await, generator.clone(), 10);

        let err = assigner
            .assign(Some(ShortKey::new_unchecked("taken")))
            .await
            .unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn skips_taken_candidates() {
        let generator = Arc::new(ScriptedGenerator::new(["aaa", "bbb", "ccc"]));
        let assigner =
            KeyAssigner::new(table_with(&["aaa", "bbb"]).await, generator.clone(), 10);

        assert_eq!(assigner.assign(None).await.unwrap().as_str(), "ccc");
        assert_eq!(generator.calls(), 3);
    }

    #[tokio::test]
    async fn exhausts_after_exactly_max_attempts() {
        let generator = Arc::new(ScriptedGenerator::new(["aaa", "bbb"]));
        let assigner =
            KeyAssigner::new(table_with(&["aaa", "bbb"]).await, generator.clone(), 7);

        let err = assigner.assign(None).await.unwrap_err();
        assert!(matches!(err, LinkError::Exhausted { attempts: 7 }));
        assert_eq!(generator.calls(), 7);
    }

    #[tokio::test]
    async fn store_error_aborts_the_loop() {
        let store = InMemoryHashStore::new();
        store.set_online(false);
        let table = KeyTable::new(ConnectionSet::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store),
        ));
        let generator = Arc::new(ScriptedGenerator::new(["aaa"]));
        let assigner = KeyAssigner::new(table, generator.clone(), 100);

        let err = assigner.assign(None).await.unwrap_err();
        let LinkError::Store(store_err) = err else {
            panic!("expected store error, got {err:?}");
        };
        assert!(store_err.to_string().starts_with("attempt 1, candidate 'aaa'"));
        assert!(matches!(store_err.root(), StoreError::Unavailable(_)));
        assert_eq!(generator.calls(), 1);
    }
}
