//! Integration tests for the authenticated gateway.
//!
//! Covers:
//! - Credential injection and header precedence
//! - Query string construction
//! - Fail-closed behaviour without a credential
//! - Forced logout on 401
//! - Content-type guard and transport errors

mod common;

use admin_core::{
    ApiGateway, CallOutcome, GatewayError, Navigator, RequestOptions, Session, SIGN_IN_ROUTE,
};
use common::TestHarness;
use serde_json::{json, Value};
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

// ============================================================================
// Credential handling
// ============================================================================

#[tokio::test]
async fn test_call_sends_bearer_token_and_returns_envelope() {
    let h = TestHarness::signed_in("tok-1", "/users").await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/count"))
        .and(header("authorization", "Bearer tok-1"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 200,
            "message": "ok",
            "data": 42
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    let outcome = h
        .gateway
        .call::<u64>("/api/v1/users/count", RequestOptions::get())
        .await
        .unwrap();

    let envelope = outcome.into_envelope().expect("envelope");
    assert_eq!(envelope.status, 200);
    assert_eq!(envelope.data, Some(42));
    assert!(h.auth.is_authenticated().await);
}

#[tokio::test]
async fn test_caller_header_cannot_override_authorization() {
    let h = TestHarness::signed_in("real-token", "/users").await;

    Mock::given(method("GET"))
        .and(path("/coupon/all"))
        .and(header("authorization", "Bearer real-token"))
        .and(header("x-request-source", "console"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 200, "message": "", "data": []
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    let options = RequestOptions::get()
        .header("Authorization", "Bearer forged")
        .header("X-Request-Source", "console");

    let outcome = h
        .gateway
        .call::<Vec<Value>>("/coupon/all", options)
        .await
        .unwrap();
    assert!(matches!(outcome, CallOutcome::Envelope(_)));
}

// Scenario: no stored credential, page asks for the user count
#[tokio::test]
async fn test_call_without_credential_fails_closed() {
    let h = TestHarness::signed_out(SIGN_IN_ROUTE).await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&h.server)
        .await;

    let result = h
        .gateway
        .fetch::<u64>("/api/v1/users/count", RequestOptions::get())
        .await
        .unwrap();

    assert!(result.is_none());
    assert!(!h.auth.is_authenticated().await);
    assert_eq!(h.request_count().await, 0);
}

#[tokio::test]
async fn test_credential_removed_mid_session_signs_out_before_sending() {
    let h = TestHarness::signed_in("tok", "/orders").await;
    h.auth.logout().await;
    assert_eq!(h.navigator.current_route(), SIGN_IN_ROUTE);

    let outcome = h
        .gateway
        .call::<Value>("/api/v1/order/all/web/0/20", RequestOptions::get())
        .await
        .unwrap();

    assert!(outcome.is_signed_out());
    assert_eq!(h.request_count().await, 0);
}

// ============================================================================
// Session invalidation
// ============================================================================

#[tokio::test]
async fn test_unauthorized_response_logs_out_and_redirects() {
    let h = TestHarness::signed_in("expired", "/products").await;
    assert!(h.auth.is_authenticated().await);

    Mock::given(method("GET"))
        .and(path("/api/v1/products/all/0/20"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "status": 401, "message": "Token expired", "data": null
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    let outcome = h
        .gateway
        .call::<Value>("/api/v1/products/all/0/20", RequestOptions::get())
        .await
        .unwrap();

    assert!(outcome.is_signed_out());
    assert_eq!(h.stored_token(), None);
    assert_eq!(h.auth.session().await, Session::default());
    assert_eq!(h.navigator.current_route(), SIGN_IN_ROUTE);
}

#[tokio::test]
async fn test_unauthorized_on_write_also_logs_out() {
    let h = TestHarness::signed_in("expired", "/offers/coupons").await;

    Mock::given(method("POST"))
        .and(path("/coupon/create"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&h.server)
        .await;

    let options = RequestOptions::post().body(json!({ "code": "X" }));
    let outcome = h
        .gateway
        .call::<Value>("/coupon/create", options)
        .await
        .unwrap();

    assert!(outcome.is_signed_out());
    assert_eq!(h.stored_token(), None);
    assert!(!h.auth.is_authenticated().await);
}

// ============================================================================
// Request construction
// ============================================================================

#[tokio::test]
async fn test_query_params_are_appended_in_order() {
    let h = TestHarness::signed_in("tok", "/orders").await;

    Mock::given(method("GET"))
        .and(path("/api/v1/items"))
        .and(query_param("a", "1"))
        .and(query_param("b", "x"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 200, "message": "", "data": null
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    let options = RequestOptions::get().query("a", 1).query("b", "x");
    h.gateway
        .call::<Value>("/api/v1/items", options)
        .await
        .unwrap();

    let requests = h.server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("a=1&b=x"));
}

#[tokio::test]
async fn test_body_is_sent_for_post_only() {
    let h = TestHarness::signed_in("tok", "/offers/coupons").await;

    Mock::given(method("POST"))
        .and(path("/coupon/create"))
        .and(body_json(json!({ "code": "SAVE5" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "status": 201, "message": "Created", "data": null
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/coupon/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 200, "message": "", "data": []
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    let post = RequestOptions::post().body(json!({ "code": "SAVE5" }));
    let created = h
        .gateway
        .fetch::<Value>("/coupon/create", post)
        .await
        .unwrap()
        .unwrap();
    assert!(created.is_success());

    let get = RequestOptions::get().body(json!({ "ignored": true }));
    h.gateway.fetch::<Value>("/coupon/all", get).await.unwrap();

    let requests = h.server.received_requests().await.unwrap();
    let get_request = requests
        .iter()
        .find(|r| r.url.path() == "/coupon/all")
        .unwrap();
    assert!(get_request.body.is_empty());
}

// ============================================================================
// Response handling
// ============================================================================

#[tokio::test]
async fn test_non_json_response_is_reported_as_unexpected_content_type() {
    let h = TestHarness::signed_in("tok", "/users").await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/count"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html>Bad gateway</html>", "text/html; charset=utf-8"),
        )
        .mount(&h.server)
        .await;

    let outcome = h
        .gateway
        .call::<u64>("/api/v1/users/count", RequestOptions::get())
        .await
        .unwrap();

    match outcome {
        CallOutcome::UnexpectedContentType(content_type) => {
            assert!(content_type.starts_with("text/html"));
        }
        other => panic!("expected content-type mismatch, got {:?}", other),
    }
    // Not an auth failure: the session survives
    assert!(h.auth.is_authenticated().await);
    assert_eq!(h.stored_token().as_deref(), Some("tok"));
}

#[tokio::test]
async fn test_error_status_keeps_message_and_drops_data() {
    let h = TestHarness::signed_in("tok", "/users").await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/all/0/20"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "Database unavailable",
            "data": { "content": [] }
        })))
        .mount(&h.server)
        .await;

    let envelope = h
        .gateway
        .fetch::<Value>("/api/v1/users/all/0/20", RequestOptions::get())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(envelope.status, 500);
    assert_eq!(envelope.message, "Database unavailable");
    assert_eq!(envelope.data, None);
}

#[tokio::test]
async fn test_error_status_with_mismatched_data_keeps_message() {
    let h = TestHarness::signed_in("tok", "/users").await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/count"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "status": 422,
            "message": "Bad filter",
            "data": { "field": "role" }
        })))
        .mount(&h.server)
        .await;

    let envelope = h
        .gateway
        .fetch::<u64>("/api/v1/users/count", RequestOptions::get())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(envelope.status, 422);
    assert_eq!(envelope.message, "Bad filter");
    assert_eq!(envelope.data, None);
}

#[tokio::test]
async fn test_origin_path_prefix_is_kept() {
    let h = TestHarness::signed_in("tok", "/users").await;

    Mock::given(method("GET"))
        .and(path("/backend/api/v1/users/count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 200, "message": "", "data": 7
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    let origin = Url::parse(&format!("{}/backend", h.server.uri())).unwrap();
    let gateway = ApiGateway::new(origin, h.auth.clone());

    let envelope = gateway
        .fetch::<u64>("/api/v1/users/count", RequestOptions::get())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(envelope.data, Some(7));
}

#[tokio::test]
async fn test_transport_failure_propagates_as_error() {
    let h = TestHarness::signed_in("tok", "/users").await;
    // Nothing listens on port 1
    let gateway = ApiGateway::new(Url::parse("http://127.0.0.1:1").unwrap(), h.auth.clone());

    let result = gateway
        .call::<Value>("/api/v1/users/count", RequestOptions::get())
        .await;

    assert!(matches!(result, Err(GatewayError::Network(_))));
    // A transport failure is not a session failure
    assert!(h.auth.is_authenticated().await);
}
