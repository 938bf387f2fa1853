//! Router-level tests for the /dev surface.
//!
//! Tests verify:
//! - Allow path: 200, snapshot echo, identity headers
//! - Deny path: engine status, fixed body, no identity headers
//! - Fallback: uniform 404 for unmatched paths and methods
//! - Request isolation under concurrency

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use authco::api::dev::response::{X_AUTH_GROUPS, X_AUTH_USER};
use authco::app::{build_router, build_state};
use authco::config::{Config, EngineKind};
use authco::services::decision::{AuthDecision, DecisionEngine, parse_token_table};
use authco::services::inspect::{RequestInspector, RequestSnapshot, TracingSink};
use authco::state::AppState;

// =============================================================================
// Helpers
// =============================================================================

struct DenyEngine(StatusCode);

#[async_trait]
impl DecisionEngine for DenyEngine {
    fn name(&self) -> &'static str {
        "deny"
    }

    async fn decide(&self, _snapshot: &RequestSnapshot) -> AuthDecision {
        AuthDecision::deny_with(self.0)
    }
}

fn default_router() -> Router {
    let config = Config::default();
    build_router(build_state(&config), &config)
}

fn router_with_engine(engine: Arc<dyn DecisionEngine>) -> Router {
    let config = Config::default();
    let inspector = RequestInspector::new(Arc::new(TracingSink), config.body_limit);
    let state = AppState::new(inspector, engine, config.identity.clone());
    build_router(state, &config)
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::HOST, "auth.local")
        .body(Body::empty())
        .unwrap()
}

fn not_found_body() -> serde_json::Value {
    serde_json::json!({"detail": "Not Found", "status_code": 404})
}

// =============================================================================
// Allow path
// =============================================================================

#[tokio::test]
async fn test_auth_allows_with_identity_headers() {
    let request = Request::builder()
        .uri("/dev/auth/")
        .header(header::HOST, "auth.local")
        .header(header::AUTHORIZATION, "Bearer whatever")
        .header(header::COOKIE, "session=abc")
        .body(Body::from("ignored"))
        .unwrap();

    let response = default_router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[&X_AUTH_USER], "test");
    assert_eq!(response.headers()[&X_AUTH_GROUPS], "test");
}

#[tokio::test]
async fn test_ping_echoes_query_headers_and_cookies() {
    let request = Request::builder()
        .uri("/dev/ping/?x=1&x=2&name=a%20b")
        .header(header::HOST, "auth.local")
        .header("X-Original-URI", "/protected/page")
        .header(header::COOKIE, "a=1; b=\"two\"")
        .body(Body::empty())
        .unwrap();

    let response = default_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["method"], "GET");
    assert_eq!(json["url"], "http://auth.local/dev/ping/?x=1&x=2&name=a%20b");
    assert_eq!(json["base_url"], "http://auth.local/");
    assert_eq!(
        json["query_params"],
        serde_json::json!({"x": "2", "name": "a b"})
    );
    assert_eq!(
        json["headers"],
        serde_json::json!({
            "host": "auth.local",
            "x-original-uri": "/protected/page",
            "cookie": "a=1; b=\"two\"",
        })
    );
    assert_eq!(json["cookies"], serde_json::json!({"a": "1", "b": "two"}));
    assert!(json["client"].is_null());
    assert!(json.get("body").is_none());
}

#[tokio::test]
async fn test_index_and_ping_share_behavior() {
    for uri in ["/dev/", "/dev/ping/"] {
        let response = default_router().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        assert!(response.headers().contains_key(&X_AUTH_USER), "{uri}");
    }
}

#[tokio::test]
async fn test_signin_accepts_invalid_utf8_body() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/dev/signin/")
        .header(header::HOST, "auth.local")
        .body(Body::from(b"\xff\xfeabc".to_vec()))
        .unwrap();

    let response = default_router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[&X_AUTH_USER], "test");
    let json = json_body(response).await;
    assert_eq!(json["method"], "POST");
}

#[tokio::test]
async fn test_oversized_body_fails_with_json_shape() {
    let config = Config {
        body_limit: 8,
        ..Config::default()
    };
    let router = build_router(build_state(&config), &config);

    for declare_length in [true, false] {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri("/dev/signin/")
            .header(header::HOST, "auth.local");
        if declare_length {
            builder = builder.header(header::CONTENT_LENGTH, "32");
        }
        let request = builder.body(Body::from(vec![b'a'; 32])).unwrap();

        let response = router.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        assert!(!response.headers().contains_key(&X_AUTH_USER));
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"detail": "Internal Server Error", "status_code": 500})
        );
    }
}

#[tokio::test]
async fn test_client_address_is_echoed() {
    let addr: SocketAddr = "198.51.100.4:5123".parse().unwrap();
    let request = Request::builder()
        .uri("/dev/ping/")
        .extension(ConnectInfo(addr))
        .body(Body::empty())
        .unwrap();

    let response = default_router().oneshot(request).await.unwrap();
    let json = json_body(response).await;

    assert_eq!(json["client"], serde_json::json!(["198.51.100.4", 5123]));
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let request = Request::builder()
        .uri("/dev/ping/")
        .header("x-request-id", "req-42")
        .body(Body::empty())
        .unwrap();

    let response = default_router().oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-42");
}

// =============================================================================
// Deny path
// =============================================================================

#[tokio::test]
async fn test_auth_deny_returns_engine_status_without_identity() {
    let router = router_with_engine(Arc::new(DenyEngine(StatusCode::FORBIDDEN)));

    let response = router.oneshot(get("/dev/auth/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(!response.headers().contains_key(&X_AUTH_USER));
    assert!(!response.headers().contains_key(&X_AUTH_GROUPS));
    assert_eq!(
        json_body(response).await,
        serde_json::json!({"detail": "Not Found", "status_code": 403})
    );
}

#[tokio::test]
async fn test_deny_engine_does_not_affect_fixed_endpoints() {
    let router = router_with_engine(Arc::new(DenyEngine(StatusCode::FORBIDDEN)));

    let response = router.oneshot(get("/dev/ping/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[&X_AUTH_USER], "test");
}

#[tokio::test]
async fn test_token_engine_from_config() {
    let config = Config {
        engine: EngineKind::TokenTable,
        tokens: parse_token_table("s3cret=alice:admin,dev").unwrap(),
        ..Config::default()
    };
    let router = build_router(build_state(&config), &config);

    let allowed = Request::builder()
        .uri("/dev/auth/")
        .header(header::AUTHORIZATION, "Bearer s3cret")
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(allowed).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[&X_AUTH_USER], "alice");
    assert_eq!(response.headers()[&X_AUTH_GROUPS], "admin,dev");

    let response = router.oneshot(get("/dev/auth/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(!response.headers().contains_key(&X_AUTH_USER));
}

// =============================================================================
// Fallback
// =============================================================================

#[tokio::test]
async fn test_unmatched_paths_return_fixed_404() {
    for uri in ["/", "/nope", "/dev", "/dev/ping", "/dev/auth", "/dev/unknown/"] {
        let response = default_router().oneshot(get(uri)).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        assert!(!response.headers().contains_key(&X_AUTH_USER), "{uri}");
        assert_eq!(json_body(response).await, not_found_body(), "{uri}");
    }
}

#[tokio::test]
async fn test_wrong_method_is_normalized_to_404() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/dev/auth/")
        .body(Body::from("payload"))
        .unwrap();

    let response = default_router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await, not_found_body());

    let request = Request::builder()
        .uri("/dev/signin/")
        .body(Body::empty())
        .unwrap();
    let response = default_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_see_only_their_own_client() {
    let router = default_router();

    let handles: Vec<_> = (0..32u16)
        .map(|i| {
            let router = router.clone();
            tokio::spawn(async move {
                let addr = SocketAddr::from(([10, 0, 0, (i % 250) as u8 + 1], 20_000 + i));
                let request = Request::builder()
                    .uri(format!("/dev/ping/?n={i}"))
                    .extension(ConnectInfo(addr))
                    .body(Body::empty())
                    .unwrap();
                let response = router.oneshot(request).await.unwrap();
                (addr, i, json_body(response).await)
            })
        })
        .collect();

    for handle in handles {
        let (addr, i, json) = handle.await.unwrap();
        assert_eq!(
            json["client"],
            serde_json::json!([addr.ip().to_string(), addr.port()])
        );
        assert_eq!(json["query_params"]["n"], i.to_string());
    }
}

// =============================================================================
// Static mount
// =============================================================================

#[tokio::test]
async fn test_static_files_are_served_without_identity() {
    let dir = std::env::temp_dir().join(format!("authco-static-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("hello.txt"), "hello").unwrap();

    let config = Config {
        static_dir: dir.clone(),
        ..Config::default()
    };
    let router = build_router(build_state(&config), &config);

    let response = router.oneshot(get("/static/hello.txt")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!response.headers().contains_key(&X_AUTH_USER));
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"hello");

    std::fs::remove_dir_all(&dir).ok();
}
