use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use shrinkray_core::{HashStore, Role, StoreError};
use std::collections::HashMap;
use tracing::{debug, trace, warn};
use typed_builder::TypedBuilder;

/// Password sent when a username is configured without one.
///
/// Users declared with the `nopass` ACL directive accept any password.
pub const NOPASS_PLACEHOLDER: &str = "any_password_will_work_with_nopass";

/// Connection settings for a Redis backend.
#[derive(Debug, Clone, TypedBuilder)]
pub struct RedisSettings {
    #[builder(default = String::from("127.0.0.1"), setter(into))]
    pub host: String,
    #[builder(default = 6379)]
    pub port: u16,
    #[builder(default = 0)]
    pub db: i64,
    #[builder(default, setter(strip_option, into))]
    pub username: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub password: Option<String>,
}

impl RedisSettings {
    /// Connection URL without credentials; those are sent with `AUTH`.
    pub fn url(&self) -> String {
        format!("redis://{}:{}/{}", self.host, self.port, self.db)
    }

    /// The `AUTH` arguments to send after connecting, if any.
    fn credentials(&self) -> Option<(Option<&str>, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (None, None) => None,
            (None, Some(password)) => Some((None, password)),
            (Some(username), Some(password)) => Some((Some(username), password)),
            (Some(username), None) => {
                warn!(username, "no redis password given, attempting nopass login");
                Some((Some(username), NOPASS_PLACEHOLDER))
            }
        }
    }

    pub fn open(&self) -> Result<redis::Client, StoreError> {
        redis::Client::open(self.url())
            .map_err(|e| map_redis_error("failed to open redis client", e))
    }
}

pub(crate) fn map_redis_error(operation: &str, err: redis::RedisError) -> StoreError {
    let message = format!("{operation}: {err}");
    if err.is_timeout() || message.to_ascii_lowercase().contains("timed out") {
        StoreError::Timeout(message)
    } else if err.is_connection_refusal() || err.is_connection_dropped() || err.is_io_error() {
        StoreError::Unavailable(message)
    } else {
        StoreError::Operation(message)
    }
}

/// A Redis-backed [`HashStore`] bound to one connection role.
///
/// Each instance owns its own multiplexed connection, named after its role
/// with `CLIENT SETNAME` so the three connections can be told apart in
/// `CLIENT LIST`.
#[derive(Clone)]
pub struct RedisHashStore {
    conn: MultiplexedConnection,
    role: Role,
}

impl std::fmt::Debug for RedisHashStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisHashStore")
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

impl RedisHashStore {
    /// Opens a dedicated connection for `role`, authenticates, names it, and
    /// verifies it with a ping.
    pub async fn connect(
        client: &redis::Client,
        settings: &RedisSettings,
        role: Role,
    ) -> Result<Self, StoreError> {
        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| map_redis_error("failed to connect to redis", e))
            .map_err(|e| e.context(format!("opening {role} connection")))?;

        if let Some((username, password)) = settings.credentials() {
            let mut auth = redis::cmd("AUTH");
            if let Some(username) = username {
                auth.arg(username);
            }
            auth.arg(password)
                .query_async::<()>(&mut conn)
                .await
                .map_err(|e| map_redis_error("failed to authenticate", e))
                .map_err(|e| e.context(format!("opening {role} connection")))?;
        }

        redis::cmd("CLIENT")
            .arg("SETNAME")
            .arg(role.name())
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| map_redis_error("failed to name connection", e))
            .map_err(|e| e.context(format!("opening {role} connection")))?;

        let store = Self { conn, role };
        store
            .ping()
            .await
            .map_err(|e| e.context(format!("opening {role} connection")))?;

        debug!(role = %role, url = %settings.url(), "redis connection established");
        Ok(store)
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

#[async_trait]
impl HashStore for RedisHashStore {
    async fn hash_get(&self, table: &str, field: &str) -> Result<Option<String>, StoreError> {
        trace!(role = %self.role, table, field, "HGET");
        let mut conn = self.conn.clone();
        conn.hget::<_, _, Option<String>>(table, field)
            .await
            .map_err(|e| map_redis_error("HGET failed", e))
    }

    async fn hash_set(&self, table: &str, field: &str, value: &str) -> Result<(), StoreError> {
        trace!(role = %self.role, table, field, "HSET");
        let mut conn = self.conn.clone();
        conn.hset::<_, _, _, ()>(table, field, value)
            .await
            .map_err(|e| map_redis_error("HSET failed", e))
    }

    async fn hash_get_all(&self, table: &str) -> Result<HashMap<String, String>, StoreError> {
        trace!(role = %self.role, table, "HGETALL");
        let mut conn = self.conn.clone();
        conn.hgetall::<_, HashMap<String, String>>(table)
            .await
            .map_err(|e| map_redis_error("HGETALL failed", e))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map(|_| ())
            .map_err(|e| map_redis_error("PING failed", e))
    }
}
