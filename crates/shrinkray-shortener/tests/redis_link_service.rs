use redis::AsyncCommands;
use shrinkray_cache::MokaLinkCache;
use shrinkray_core::{Link, Status, HASH_TO_KEY_TABLE, KEY_TO_LINK_TABLE};
use shrinkray_shortener::{LinkService, Operations, ShortenerConfig};
use shrinkray_store::{ConnectionSet, RedisSettings};
use shrinkray_test_infra::RedisServer;
use std::collections::HashMap;
use std::sync::Arc;

async fn redis_operations(server: &RedisServer) -> Arc<dyn Operations> {
    let settings = RedisSettings::builder()
        .host(server.host().await.expect("Failed to get Redis host"))
        .port(server.port().await.expect("Failed to get Redis port"))
        .build();
    let connections = ConnectionSet::connect_redis(&settings)
        .await
        .expect("Failed to connect to Redis");
    let service = LinkService::from_config(
        &ShortenerConfig::default(),
        connections,
        Arc::new(MokaLinkCache::default()),
    )
    .expect("default config is valid");
    Arc::new(service)
}

#[tokio::test]
async fn test_create_resolve_export_against_redis() {
    let server = RedisServer::start().await.expect("Failed to start Redis");
    let ops = redis_operations(&server).await;

    let key = ops
        .create_link("https://example.com/docs", None)
        .await
        .into_result()
        .unwrap();
    let again = ops
        .create_link("https://example.com/docs", None)
        .await
        .into_result()
        .unwrap();
    assert_eq!(key, again);

    let resolved = ops.resolve_key(key.as_str()).await;
    assert_eq!(resolved.status, Status::LinkFound);
    assert_eq!(resolved.into_result().unwrap(), "https://example.com/docs");

    let export = ops.export_all().await.into_result().unwrap();
    assert_eq!(
        export,
        vec![format!("{key},{}", Link::encode("https://example.com/docs"))]
    );
}

#[tokio::test]
async fn test_tables_use_documented_layout() {
    let server = RedisServer::start().await.expect("Failed to start Redis");
    let ops = redis_operations(&server).await;

    ops.create_link("https://example.com", Some("custom"))
        .await
        .into_result()
        .unwrap();

    let link = Link::new("https://example.com");
    let mut raw = server.connection().await.unwrap();

    let links: HashMap<String, String> = raw.hgetall(KEY_TO_LINK_TABLE).await.unwrap();
    assert_eq!(links.get("custom").map(String::as_str), Some(link.encoded()));

    let hashes: HashMap<String, String> = raw.hgetall(HASH_TO_KEY_TABLE).await.unwrap();
    assert_eq!(
        hashes.get(&link.content_hash()).map(String::as_str),
        Some("custom")
    );
}

#[tokio::test]
async fn test_resolves_links_written_by_other_clients() {
    let server = RedisServer::start().await.expect("Failed to start Redis");
    let ops = redis_operations(&server).await;

    let mut raw = server.connection().await.unwrap();
    let _: () = raw
        .hset(KEY_TO_LINK_TABLE, "legacy", Link::encode("https://old.example.com"))
        .await
        .unwrap();

    assert_eq!(
        ops.resolve_key("legacy").await.into_result().unwrap(),
        "https://old.example.com"
    );
}
