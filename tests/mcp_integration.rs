//! Integration tests for the MCP server dispatcher
//!
//! These tests drive the full router without a network socket and verify:
//! - Request parsing and the invalid_request path
//! - Schema validation (unknown method, missing/mistyped params)
//! - Routing to the weather provider and result shapes
//! - Error mapping from provider failures to wire codes
//! - The capabilities endpoint

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::StubProvider;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot`
use weather_mcp_rust::error::WeatherError;
use weather_mcp_rust::mcp::handlers::dispatch;
use weather_mcp_rust::mcp::models::McpRequest;

/// Helper to send a protocol request and get the response
async fn send_mcp_request(
    app: &axum::Router,
    method: &str,
    params: Value,
    request_id: &str,
) -> (StatusCode, Value) {
    let body = json!({
        "method": method,
        "params": params,
        "request_id": request_id,
    });
    send_raw_request(app, serde_json::to_string(&body).unwrap()).await
}

/// Helper to send an arbitrary body to POST /mcp
async fn send_raw_request(app: &axum::Router, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(json!({}));

    (status, body)
}

#[tokio::test]
async fn test_get_current_weather_success() {
    let provider = Arc::new(StubProvider::ok());
    let app = common::test_app(provider.clone());

    let params = json!({ "city": "London", "country_code": "GB" });
    let (status, body) = send_mcp_request(&app, "weather/get_current", params, "req-42").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["request_id"], "req-42");
    assert!(body.get("error_code").is_none());

    let result = &body["result"];
    assert_eq!(result["city"], "London");
    assert_eq!(result["country"], "GB");
    assert_eq!(result["temperature"], 18.0);
    assert_eq!(result["humidity"], 72);
    assert_eq!(result["condition"], "scattered clouds");
    assert!(result["wind_speed"].as_f64().unwrap().is_finite());
    assert!(result["pressure"].as_u64().is_some());

    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_get_forecast_default_days() {
    let app = common::test_app(Arc::new(StubProvider::ok()));

    let params = json!({ "city": "London" });
    let (status, body) = send_mcp_request(&app, "weather/get_forecast", params, "req-1").await;

    assert_eq!(status, StatusCode::OK);
    let days = body["result"]["days"].as_array().unwrap();
    assert_eq!(days.len(), 5, "omitted days falls back to the default");
    assert_eq!(days[0]["date"], "2024-07-01");
    assert_eq!(days[0]["condition"], "light rain");
}

#[tokio::test]
async fn test_get_forecast_days_clamped() {
    let app = common::test_app(Arc::new(StubProvider::ok()));

    let params = json!({ "city": "London", "days": 10 });
    let (status, body) = send_mcp_request(&app, "weather/get_forecast", params, "req-2").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.get("error_code").is_none(), "clamping is not an error");
    assert_eq!(body["result"]["days"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_get_forecast_explicit_days() {
    let app = common::test_app(Arc::new(StubProvider::ok()));

    let params = json!({ "city": "London", "days": 2 });
    let (_, body) = send_mcp_request(&app, "weather/get_forecast", params, "req-3").await;

    assert_eq!(body["result"]["days"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_forecast_zero_days_rejected() {
    let provider = Arc::new(StubProvider::ok());
    let app = common::test_app(provider.clone());

    let params = json!({ "city": "London", "days": 0 });
    let (status, body) = send_mcp_request(&app, "weather/get_forecast", params, "req-4").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["request_id"], "req-4");
    assert_eq!(body["error_code"], "invalid_params");
    assert_eq!(provider.call_count(), 0, "rejected before the provider");
}

#[tokio::test]
async fn test_unknown_method() {
    let provider = Arc::new(StubProvider::ok());
    let app = common::test_app(provider.clone());

    let (status, body) =
        send_mcp_request(&app, "weather/get_alerts", json!({ "city": "London" }), "req-5").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["request_id"], "req-5");
    assert_eq!(body["error_code"], "method_not_found");
    assert_eq!(provider.call_count(), 0, "unknown methods never reach the provider");
}

#[tokio::test]
async fn test_missing_required_param() {
    let provider = Arc::new(StubProvider::ok());
    let app = common::test_app(provider.clone());

    let (status, body) =
        send_mcp_request(&app, "weather/get_current", json!({ "country_code": "GB" }), "req-6")
            .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error_code"], "invalid_params");
    assert!(body["message"].as_str().unwrap().contains("city"));
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_wrong_param_type() {
    let app = common::test_app(Arc::new(StubProvider::ok()));

    let (_, body) =
        send_mcp_request(&app, "weather/get_current", json!({ "city": 123 }), "req-7").await;

    assert_eq!(body["error_code"], "invalid_params");
    assert!(body["message"].as_str().unwrap().contains("string"));
}

#[tokio::test]
async fn test_invalid_json_body() {
    let app = common::test_app(Arc::new(StubProvider::ok()));

    let (status, body) = send_raw_request(&app, "not json {{{".to_string()).await;

    // Protocol-level error: HTTP still succeeds, the envelope carries the code.
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["request_id"], Value::Null);
    assert_eq!(body["error_code"], "invalid_request");
}

#[tokio::test]
async fn test_missing_envelope_fields() {
    let app = common::test_app(Arc::new(StubProvider::ok()));

    // Well-formed JSON, but not a protocol envelope (no request_id).
    let body = json!({ "method": "weather/get_current", "params": {} }).to_string();
    let (status, body) = send_raw_request(&app, body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error_code"], "invalid_request");
}

#[tokio::test]
async fn test_city_not_found_mapping() {
    let provider = Arc::new(StubProvider::failing(WeatherError::NotFound(
        "InvalidCityXYZ".to_string(),
    )));
    let app = common::test_app(provider);

    let (status, body) =
        send_mcp_request(&app, "weather/get_current", json!({ "city": "InvalidCityXYZ" }), "req-8")
            .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["request_id"], "req-8");
    assert_eq!(body["error_code"], "not_found");
    assert!(body["message"].as_str().unwrap().contains("InvalidCityXYZ"));
}

#[tokio::test]
async fn test_upstream_auth_mapping() {
    let provider = Arc::new(StubProvider::failing(WeatherError::UpstreamAuth(
        "provider returned 401 Unauthorized".to_string(),
    )));
    let app = common::test_app(provider);

    let (_, body) =
        send_mcp_request(&app, "weather/get_current", json!({ "city": "London" }), "req-9").await;

    assert_eq!(body["error_code"], "upstream_auth_error");
}

#[tokio::test]
async fn test_upstream_failure_mapping() {
    let provider = Arc::new(StubProvider::failing(WeatherError::Upstream(
        "provider request timed out".to_string(),
    )));
    let app = common::test_app(provider);

    let (_, body) =
        send_mcp_request(&app, "weather/get_forecast", json!({ "city": "London" }), "req-10").await;

    assert_eq!(body["error_code"], "upstream_error");
    assert!(body["message"].as_str().unwrap().contains("timed out"));
}

#[tokio::test]
async fn test_capabilities_endpoint() {
    let app = common::test_app(Arc::new(StubProvider::ok()));

    let request = Request::builder()
        .method("GET")
        .uri("/capabilities")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap();

    let methods = body["methods"].as_object().unwrap();
    assert_eq!(methods.len(), 2);

    let current = &methods["weather/get_current"];
    assert_eq!(current["parameters"]["city"]["type"], "string");
    assert_eq!(current["parameters"]["city"]["required"], true);
    assert_eq!(current["parameters"]["country_code"]["required"], false);

    let forecast = &methods["weather/get_forecast"];
    assert_eq!(forecast["parameters"]["days"]["type"], "integer");
    assert_eq!(forecast["parameters"]["days"]["required"], false);
}

#[tokio::test]
async fn test_request_round_trip() {
    // A request built the way the client builds it must come back out of
    // the dispatcher with the same method, params and request_id.
    let raw = json!({
        "method": "weather/get_current",
        "params": { "city": "Paris", "country_code": "FR" },
        "request_id": "round-trip-1",
    });

    let parsed: McpRequest = serde_json::from_value(raw.clone()).unwrap();
    assert_eq!(parsed.method, raw["method"].as_str().unwrap());
    assert_eq!(parsed.request_id, raw["request_id"].as_str().unwrap());
    assert_eq!(parsed.params["city"], raw["params"]["city"]);

    let (state, _) = common::test_state(Arc::new(StubProvider::ok()));
    let response = dispatch(&state, parsed).await;
    let encoded = serde_json::to_value(&response).unwrap();
    assert_eq!(encoded["request_id"], "round-trip-1");
    assert_eq!(encoded["result"]["city"], "Paris");
    assert_eq!(encoded["result"]["country"], "FR");
}
