use crate::error::Result;
use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};

const REDIS_IMAGE: &str = "redis";
const REDIS_TAG: &str = "8.6.0";
const REDIS_PORT: u16 = 6379;

/// A standalone Redis server running in a container.
///
/// The container is removed when this value is dropped.
pub struct RedisServer {
    container: ContainerAsync<GenericImage>,
}

impl RedisServer {
    /// Starts a Redis server with no authentication.
    pub async fn start() -> Result<Self> {
        let container = GenericImage::new(REDIS_IMAGE, REDIS_TAG)
            .with_exposed_port(REDIS_PORT.tcp())
            .with_wait_for(WaitFor::message_on_stdout("Ready to accept connections"))
            .start()
            .await?;
        Ok(Self { container })
    }

    /// Starts a Redis server with an ACL user that may run any command.
    ///
    /// The default user is disabled, so every connection must `AUTH`.
    pub async fn start_with_user(username: &str, password: &str) -> Result<Self> {
        let user_rule = format!("user {username} on >{password} ~* &* +@all");
        let container = GenericImage::new(REDIS_IMAGE, REDIS_TAG)
            .with_exposed_port(REDIS_PORT.tcp())
            .with_wait_for(WaitFor::message_on_stdout("Ready to accept connections"))
            .with_cmd([
                "sh".to_string(),
                "-c".to_string(),
                format!(
                    "printf '%s\\nuser default off\\n' '{user_rule}' > /tmp/users.acl \
                     && exec redis-server --aclfile /tmp/users.acl"
                ),
            ])
            .start()
            .await?;
        Ok(Self { container })
    }

    pub async fn host(&self) -> Result<String> {
        let host = self.container.get_host().await?.to_string();
        Ok(match host.as_str() {
            "localhost" => String::from("127.0.0.1"),
            _ => host,
        })
    }

    pub async fn port(&self) -> Result<u16> {
        Ok(self.container.get_host_port_ipv4(REDIS_PORT).await?)
    }

    /// A `redis://` URL reaching this server from the host.
    pub async fn url(&self) -> Result<String> {
        Ok(format!("redis://{}:{}", self.host().await?, self.port().await?))
    }

    /// Opens a plain connection, bypassing any application code.
    pub async fn connection(&self) -> Result<redis::aio::MultiplexedConnection> {
        let client = redis::Client::open(self.url().await?)?;
        Ok(client.get_multiplexed_async_connection().await?)
    }

    /// Stops the container while keeping the handle alive.
    pub async fn stop(&self) -> Result<()> {
        Ok(self.container.stop().await?)
    }

    pub fn container(&self) -> &ContainerAsync<GenericImage> {
        &self.container
    }
}
