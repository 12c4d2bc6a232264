use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::tempdir;
use tower::ServiceExt;

use xgw_gateway::identity::InMemoryUserStore;
use xgw_gateway::{app, AppState, GatewayConfig};
use xgw_ring::RingRegistry;

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn test_state() -> (tempfile::TempDir, AppState) {
    let dir = tempdir().expect("tempdir");
    let mut config = GatewayConfig::from_env();
    config.spool_dir = dir.path().to_string_lossy().to_string();
    config.jwt_ttl = Duration::from_secs(3600);

    let paths = config.ring_paths();
    RingRegistry::bootstrap(&paths).unwrap();
    let registry = RingRegistry::init_all(&paths).unwrap();
    let state = AppState::new(config, registry, Arc::new(InMemoryUserStore::default()));
    (dir, state)
}

async fn login(app: axum::Router, username: &str) -> String {
    let resp = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/oauth2/token")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "username": username, "password": "hunter2" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    body["access_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn login_of_a_new_user_enqueues_an_add_user_query() {
    let (_dir, state) = test_state().await;
    let rings = Arc::clone(&state.rings);
    let router = app(state);

    let _token = login(router, "alice").await;

    assert_eq!(rings.queries.depth(), 1);
}

#[tokio::test]
async fn login_of_a_returning_user_does_not_enqueue_again() {
    let (_dir, state) = test_state().await;
    let rings = Arc::clone(&state.rings);
    let router = app(state);

    let _t1 = login(router.clone(), "bob").await;
    let _t2 = login(router, "bob").await;

    assert_eq!(rings.queries.depth(), 1);
}

#[tokio::test]
async fn happy_path_limit_order_is_accepted_and_enqueued() {
    let (_dir, state) = test_state().await;
    let rings = Arc::clone(&state.rings);
    let router = app(state);

    let token = login(router.clone(), "trader").await;

    let resp = router
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/order")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::from(
                    json!({
                        "order_id": 3,
                        "price": 100,
                        "timestamp": 1,
                        "shares_qty": 10,
                        "symbol": 42,
                        "side": 0,
                        "order_type": 1
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(rings.incoming_orders.depth(), 1);
    let body = body_json(resp).await;
    assert_eq!(body["order_id"], 3);
}

#[tokio::test]
async fn market_order_with_zero_price_is_accepted() {
    let (_dir, state) = test_state().await;
    let rings = Arc::clone(&state.rings);
    let router = app(state);

    let token = login(router.clone(), "trader2").await;

    let resp = router
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/order")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::from(
                    json!({
                        "order_id": 4,
                        "price": 0,
                        "timestamp": 1,
                        "shares_qty": 10,
                        "symbol": 42,
                        "side": 1,
                        "order_type": 0
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(rings.incoming_orders.depth(), 1);
}

#[tokio::test]
async fn limit_order_with_zero_price_is_rejected() {
    let (_dir, state) = test_state().await;
    let rings = Arc::clone(&state.rings);
    let router = app(state);

    let token = login(router.clone(), "trader3").await;

    let resp = router
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/order")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::from(
                    json!({
                        "order_id": 5,
                        "price": 0,
                        "timestamp": 1,
                        "shares_qty": 10,
                        "symbol": 42,
                        "side": 0,
                        "order_type": 1
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(rings.incoming_orders.depth(), 0);
}

#[tokio::test]
async fn order_without_a_bearer_token_is_unauthorized() {
    let (_dir, state) = test_state().await;
    let router = app(state);

    let resp = router
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/order")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "order_id": 6,
                        "price": 100,
                        "timestamp": 1,
                        "shares_qty": 10,
                        "symbol": 42,
                        "side": 0,
                        "order_type": 1
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn cancel_path_enqueues_a_cancel_record_with_the_authenticated_user() {
    let (_dir, state) = test_state().await;
    let rings = Arc::clone(&state.rings);
    let router = app(state);

    let token = login(router.clone(), "canceller").await;

    let resp = router
        .oneshot(
            Request::builder()
                .method(Method::DELETE)
                .uri("/api/cancel/7")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::from(json!({ "order_id": 7, "symbol": 42 }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(rings.cancel_orders.depth(), 1);
}

#[tokio::test]
async fn balance_query_is_rejected_for_a_mismatched_path_user_id() {
    let (_dir, state) = test_state().await;
    let router = app(state);

    let token = login(router.clone(), "queryer").await;

    let resp = router
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/api/balance/999999")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::from(json!({ "query_id": 1 }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn balance_query_echoes_the_caller_supplied_query_id() {
    let (_dir, state) = test_state().await;
    let rings = Arc::clone(&state.rings);
    let router = app(state);

    let token = login(router.clone(), "balancer").await;

    let resp = router
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/api/balance/1")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::from(json!({ "query_id": 42 }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(rings.queries.depth(), 2); // add-user-on-login + this query
    let body = body_json(resp).await;
    assert_eq!(body["query_id"], 42);
}
