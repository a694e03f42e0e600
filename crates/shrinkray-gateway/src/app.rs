use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_link_handler, export_handler, health_handler, index_handler, resolve_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/", get(index_handler))
            .route("/create", post(create_link_handler))
            .route("/export", get(export_handler))
            .route("/health", get(health_handler))
            .route("/{key}", get(resolve_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use shrinkray_cache::MokaLinkCache;
    use shrinkray_core::Link;
    use shrinkray_generator::ScriptedGenerator;
    use shrinkray_shortener::LinkService;
    use shrinkray_store::{ConnectionSet, InMemoryHashStore, LivenessConfig, LivenessMonitor};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct TestApp {
        router: Router,
        _monitor: LivenessMonitor,
    }

    fn test_app() -> TestApp {
        let store = InMemoryHashStore::new();
        let connections = ConnectionSet::from_in_memory(&store);
        let monitor = LivenessMonitor::new(connections.clone(), LivenessConfig::default());
        let service = LinkService::new(
            connections,
            ScriptedGenerator::new(["abc", "def"]),
            Arc::new(MokaLinkCache::default()),
            10,
        );
        let state = AppState::new(Arc::new(service), "https://sh.rk/", monitor.subscribe());
        TestApp {
            router: App::router(state),
            _monitor: monitor,
        }
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn create(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri).body(Body::from(body.to_owned())).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn index_greets() {
        let app = test_app();
        let response = app.router.oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("shrinkray"));
    }

    #[tokio::test]
    async fn create_returns_short_url() {
        let app = test_app();
        let response = app
            .router
            .oneshot(create("/create", "https://example.com/long/path"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "https://sh.rk/abc");
    }

    #[tokio::test]
    async fn create_with_custom_key() {
        let app = test_app();
        let response = app
            .router
            .oneshot(create("/create?key=docs", "https://example.com/docs"))
            .await
            .unwrap();

        assert_eq!(body_text(response).await, "https://sh.rk/docs");
    }

    #[tokio::test]
    async fn empty_key_parameter_means_no_custom_key() {
        let app = test_app();
        let response = app
            .router
            .oneshot(create("/create?key=", "https://example.com/plain"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "https://sh.rk/abc");
    }

    #[tokio::test]
    async fn create_rejects_bad_input() {
        let app = test_app();

        let response = app
            .router
            .clone()
            .oneshot(create("/create", "not a link"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(response).await.starts_with("bad_link"));

        let response = app
            .router
            .oneshot(create("/create?key=a", "https://example.com"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(response).await.starts_with("bad_key"));
    }

    #[tokio::test]
    async fn resolve_redirects_permanently() {
        let app = test_app();
        app.router
            .clone()
            .oneshot(create("/create", "https://example.com/target"))
            .await
            .unwrap();

        let response = app.router.oneshot(get("/abc")).await.unwrap();
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(
            response.headers()[header::LOCATION],
            "https://example.com/target"
        );
    }

    #[tokio::test]
    async fn resolve_unknown_key_is_404() {
        let app = test_app();
        let response = app.router.oneshot(get("/zzz")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn store_outage_is_500() {
        let store = InMemoryHashStore::new();
        store.set_online(false);
        let connections = ConnectionSet::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store),
        );
        let monitor = LivenessMonitor::new(connections.clone(), LivenessConfig::default());
        let service = LinkService::new(
            connections,
            ScriptedGenerator::new(["abc"]),
            Arc::new(MokaLinkCache::default()),
            10,
        );
        let router = App::router(AppState::new(
            Arc::new(service),
            "https://sh.rk",
            monitor.subscribe(),
        ));

        let response = router.oneshot(get("/abc")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_text(response).await.starts_with("retrieval_error"));
    }

    #[tokio::test]
    async fn export_lists_mappings() {
        let app = test_app();
        app.router
            .clone()
            .oneshot(create("/create", "https://example.com"))
            .await
            .unwrap();

        let response = app.router.oneshot(get("/export")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_text(response).await,
            format!("abc,{}", Link::encode("https://example.com"))
        );
    }

    #[tokio::test]
    async fn health_reports_liveness() {
        let app = test_app();
        let response = app.router.oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["state"], "healthy");
        assert_eq!(json["consecutive_failures"], 0);
    }
}
