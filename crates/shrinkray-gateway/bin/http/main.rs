mod cli;

use crate::cli::{StorageBackendArg, CLI};
use clap::Parser;
use shrinkray_cache::{CacheConfig, MokaLinkCache};
use shrinkray_gateway::telemetry::init_tracing;
use shrinkray_gateway::{App, AppState};
use shrinkray_shortener::{LinkService, ShortenerConfig};
use shrinkray_store::{ConnectionSet, LivenessMonitor, RedisSettings};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CLI::try_parse()?;
    init_tracing(cli.log_format, "info")?;

    let config = ShortenerConfig::builder()
        .key_size(cli.key_size)
        .alphabet(cli.alphabet.clone())
        .max_attempts(cli.gen_tries)
        .cache(
            CacheConfig::builder()
                .ttl(Duration::from_secs(cli.cache_ttl_secs))
                .build(),
        )
        .build();
    config.validate()?;

    info!(
        listen_addr = %cli.listen_addr,
        base_url = %cli.base_url,
        storage_backend = %cli.storage,
        key_size = config.key_size,
        max_attempts = config.max_attempts,
        "starting shrinkray gateway"
    );

    let connections = match cli.storage {
        StorageBackendArg::InMemory => ConnectionSet::in_memory(),
        StorageBackendArg::Redis => {
            let mut settings = RedisSettings::builder()
                .host(cli.redis_host.clone())
                .port(cli.redis_port)
                .db(cli.redis_db)
                .build();
            settings.username = cli.redis_user.clone();
            settings.password = cli.redis_pass.clone();
            ConnectionSet::connect_redis(&settings).await?
        }
    };

    let monitor = LivenessMonitor::new(connections.clone(), config.liveness.clone());
    let health = monitor.subscribe();
    spawn_liveness(monitor);

    let cache = MokaLinkCache::new(config.cache.clone());
    let sweeper = cache.spawn_sweeper();

    let service = LinkService::from_config(&config, connections, Arc::new(cache))?;
    let state = AppState::new(Arc::new(service), cli.base_url, health);

    let listener = tokio::net::TcpListener::bind(cli.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "gateway listening");

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    info!("farewell");
    Ok(())
}

/// Runs the liveness monitor and exits the process once it gives up.
fn spawn_liveness(monitor: LivenessMonitor) {
    tokio::spawn(async move {
        if let Err(e) = monitor.run().await {
            error!(error = %e, "lost connection to the store, exiting");
            std::process::exit(1);
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for ctrl-c, graceful shutdown disabled");
        std::future::pending::<()>().await;
    }
}
