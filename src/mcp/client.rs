//! MCP Client
//!
//! Builds protocol requests, sends them over HTTP and decodes responses
//! into typed results or typed errors. The client is stateless between
//! calls: it holds only an HTTP connection pool and the server address,
//! so one instance can be shared freely or rebuilt per call.

use super::models::{McpRequest, McpResponse, METHOD_GET_CURRENT, METHOD_GET_FORECAST};
use super::schema;
use crate::error::ClientError;
use crate::weather::models::{CurrentWeather, Forecast};
use serde_json::{json, Map, Value};
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

/// Default bound on a single call, connect time included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for a weather MCP server.
#[derive(Debug, Clone)]
pub struct McpClient {
    http: reqwest::Client,
    base_url: String,
}

impl McpClient {
    /// Creates a client for the server at `base_url` with an explicit
    /// per-call timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: trim_trailing_slash(base_url.into()),
        })
    }

    /// Creates a client with the default timeout.
    pub fn connect(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::new(base_url, DEFAULT_TIMEOUT)
    }

    /// Invokes `method` with `params` and returns the raw result payload.
    ///
    /// Parameters are checked against the same schema table the server
    /// enforces, so a missing or mistyped parameter fails here without a
    /// network round trip. No retries are performed; the caller owns any
    /// retry policy.
    pub async fn call(&self, method: &str, params: Map<String, Value>) -> Result<Value, ClientError> {
        schema::validate_params(method, &params).map_err(|violation| ClientError::Protocol {
            code: violation.error_code(),
            message: violation.to_string(),
        })?;

        let request = McpRequest {
            method: method.to_string(),
            params,
            request_id: Uuid::new_v4().to_string(),
        };
        debug!(method = %request.method, request_id = %request.request_id, "sending MCP request");

        let response = self
            .http
            .post(format!("{}/mcp", self.base_url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        // Protocol errors ride in the envelope with HTTP 200, but a
        // misbehaving server may pair an error body with a non-2xx
        // status; decode the envelope either way and keep its code.
        let decoded: McpResponse = match serde_json::from_slice(&body) {
            Ok(decoded) => decoded,
            Err(_) if !status.is_success() => {
                return Err(ClientError::MalformedResponse(format!(
                    "server error: HTTP {status}"
                )));
            }
            Err(e) => return Err(ClientError::MalformedResponse(e.to_string())),
        };

        match decoded {
            McpResponse::Error {
                error_code,
                message,
                ..
            } => Err(ClientError::Protocol {
                code: error_code,
                message,
            }),
            McpResponse::Success { request_id, result } => {
                if request_id != request.request_id {
                    return Err(ClientError::CorrelationMismatch {
                        sent: request.request_id,
                        received: request_id,
                    });
                }
                Ok(result)
            }
        }
    }

    /// Gets current weather for a city.
    pub async fn get_current_weather(
        &self,
        city: &str,
        country_code: Option<&str>,
    ) -> Result<CurrentWeather, ClientError> {
        let result = self
            .call(METHOD_GET_CURRENT, location_params(city, country_code, None))
            .await?;
        decode_result(result)
    }

    /// Gets a daily forecast for a city. `days` falls back to the server
    /// default when `None`.
    pub async fn get_forecast(
        &self,
        city: &str,
        country_code: Option<&str>,
        days: Option<u32>,
    ) -> Result<Forecast, ClientError> {
        let result = self
            .call(METHOD_GET_FORECAST, location_params(city, country_code, days))
            .await?;
        decode_result(result)
    }

    /// Fetches the server's capabilities descriptor.
    pub async fn capabilities(&self) -> Result<Value, ClientError> {
        let response = self
            .http
            .get(format!("{}/capabilities", self.base_url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::MalformedResponse(format!(
                "server error: HTTP {status}"
            )));
        }
        Ok(response.json().await?)
    }
}

/// Builds the shared `city`/`country_code`/`days` parameter map, leaving
/// optional entries out entirely rather than sending nulls.
fn location_params(city: &str, country_code: Option<&str>, days: Option<u32>) -> Map<String, Value> {
    let mut params = Map::new();
    params.insert("city".to_string(), json!(city));
    if let Some(code) = country_code {
        params.insert("country_code".to_string(), json!(code));
    }
    if let Some(days) = days {
        params.insert("days".to_string(), json!(days));
    }
    params
}

fn decode_result<T: serde::de::DeserializeOwned>(result: Value) -> Result<T, ClientError> {
    serde_json::from_value(result)
        .map_err(|e| ClientError::MalformedResponse(format!("unexpected result shape: {e}")))
}

fn trim_trailing_slash(mut base_url: String) -> String {
    while base_url.ends_with('/') {
        base_url.pop();
    }
    base_url
}
