//! MCP route handlers
//!
//! This module implements the server-side protocol dispatcher. Each
//! request runs the pipeline parse → validate → route → execute →
//! respond, dropping straight to an error envelope at the first failed
//! step. It exports `dispatch` publicly so tests can drive the pipeline
//! without going through HTTP.

use super::models::{ErrorCode, McpRequest, McpResponse, METHOD_GET_CURRENT, METHOD_GET_FORECAST};
use super::schema;
use crate::error::WeatherError;
use crate::state::{AppState, SharedState};
use crate::weather::helpers::normalize_days;
use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{Map, Value};
use tracing::{info, warn};

/// Creates routes for the protocol endpoints
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/mcp", post(handle_mcp))
        .route("/capabilities", get(handle_capabilities))
}

/// Endpoint: POST /mcp
/// Handles a protocol request. Protocol-level failures are reported
/// inside the envelope with HTTP 200; only transport problems outside
/// this layer surface as non-2xx.
async fn handle_mcp(
    State(state): State<SharedState>,
    body: Result<Json<McpRequest>, axum::extract::rejection::JsonRejection>,
) -> impl IntoResponse {
    // Parse. A body that is not a protocol envelope never reaches the
    // dispatcher; there is no id to echo, so the error carries null.
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "rejected malformed MCP request");
            return Json(McpResponse::error(
                Value::Null,
                ErrorCode::InvalidRequest,
                format!("malformed request: {}", rejection.body_text()),
            ));
        }
    };

    info!(method = %req.method, request_id = %req.request_id, "MCP call");
    Json(dispatch(&state, req).await)
}

/// Endpoint: GET /capabilities
/// Serves the immutable capabilities descriptor. No side effects.
async fn handle_capabilities(State(state): State<SharedState>) -> impl IntoResponse {
    Json(state.capabilities.clone())
}

/// Runs a parsed request through validation, routing and execution.
///
/// Every adapter failure is converted into an error envelope here;
/// nothing propagates past this function.
pub async fn dispatch(state: &AppState, req: McpRequest) -> McpResponse {
    // Validate. The schema check runs before any provider call, so a
    // malformed request never costs an upstream round trip.
    let spec = match schema::validate_params(&req.method, &req.params) {
        Ok(spec) => spec,
        Err(violation) => {
            warn!(method = %req.method, %violation, "request failed validation");
            return McpResponse::error(req.request_id, violation.error_code(), violation.to_string());
        }
    };

    // Route + execute.
    let outcome = match spec.name {
        METHOD_GET_CURRENT => execute_get_current(state, &req.params).await,
        METHOD_GET_FORECAST => execute_get_forecast(state, &req.params).await,
        other => Err(WeatherError::Upstream(format!(
            "no executor registered for method {other}"
        ))),
    };

    // Respond, echoing the originating id in either shape.
    match outcome {
        Ok(result) => McpResponse::success(req.request_id, result),
        Err(err) => {
            warn!(method = %req.method, error = %err, "method execution failed");
            McpResponse::error(req.request_id, err.error_code(), err.to_string())
        }
    }
}

// =============================================================================
// Method Executors
// =============================================================================

/// Executes `weather/get_current` against the configured provider.
async fn execute_get_current(
    state: &AppState,
    params: &Map<String, Value>,
) -> Result<Value, WeatherError> {
    let city = string_param(params, "city");
    let country_code = opt_string_param(params, "country_code");

    let current = state.provider.current(&city, country_code.as_deref()).await?;
    encode_result(current)
}

/// Executes `weather/get_forecast` against the configured provider.
async fn execute_get_forecast(
    state: &AppState,
    params: &Map<String, Value>,
) -> Result<Value, WeatherError> {
    let city = string_param(params, "city");
    let country_code = opt_string_param(params, "country_code");
    let days = normalize_days(params.get("days").and_then(Value::as_i64))?;

    let forecast = state
        .provider
        .forecast(&city, country_code.as_deref(), days)
        .await?;
    encode_result(forecast)
}

/// Reads a string parameter the schema check already proved present.
fn string_param(params: &Map<String, Value>, name: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Reads an optional string parameter.
fn opt_string_param(params: &Map<String, Value>, name: &str) -> Option<String> {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn encode_result(result: impl serde::Serialize) -> Result<Value, WeatherError> {
    serde_json::to_value(result)
        .map_err(|e| WeatherError::Upstream(format!("failed to encode result: {e}")))
}
