//! MCP Protocol Models and Constants
//!
//! This module contains the wire envelope types and constants for the
//! weather MCP protocol: a single fixed schema with two methods, a typed
//! request envelope, and a tagged success/error response.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

// =============================================================================
// Protocol Constants
// =============================================================================

/// Method name for current-weather lookups
pub const METHOD_GET_CURRENT: &str = "weather/get_current";
/// Method name for forecast lookups
pub const METHOD_GET_FORECAST: &str = "weather/get_forecast";
/// Server identifier
pub const SERVER_NAME: &str = "weather-mcp-rust";

// =============================================================================
// Protocol Envelopes
// =============================================================================

/// Protocol request envelope, sent as the body of `POST /mcp`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpRequest {
    /// Method name to invoke (one of the enumerated method constants)
    pub method: String,

    /// Named scalar parameters for the method
    pub params: Map<String, Value>,

    /// Opaque correlation token, echoed verbatim in the response
    pub request_id: String,
}

/// Protocol response envelope: exactly one of the two shapes.
///
/// Errors cannot cross the process boundary as exceptions, so failures
/// travel as an explicit tagged variant with an enumerated code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum McpResponse {
    /// Failure payload; `request_id` is JSON `null` when the incoming
    /// body was too malformed to recover an id from.
    Error {
        request_id: Value,
        error_code: ErrorCode,
        message: String,
    },

    /// Success payload carrying the method's normalized result.
    Success { request_id: String, result: Value },
}

impl McpResponse {
    /// Builds a success envelope echoing the originating request id.
    pub fn success(request_id: String, result: Value) -> Self {
        McpResponse::Success { request_id, result }
    }

    /// Builds an error envelope.
    ///
    /// # Arguments
    ///
    /// * `request_id` – The originating request id, or `Value::Null` when
    ///   the request could not be parsed.
    /// * `code` – The enumerated error kind.
    /// * `message` – Human-readable description of the failure.
    pub fn error(request_id: impl Into<Value>, code: ErrorCode, message: impl Into<String>) -> Self {
        McpResponse::Error {
            request_id: request_id.into(),
            error_code: code,
            message: message.into(),
        }
    }
}

// =============================================================================
// Error Codes
// =============================================================================

/// Enumerated wire-level error kinds.
///
/// `transport_error` is only ever produced client-side, when no response
/// was received at all; the server never serializes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Malformed protocol envelope
    InvalidRequest,
    /// Unknown method name
    MethodNotFound,
    /// Parameter schema violation
    InvalidParams,
    /// Upstream reports no such location
    NotFound,
    /// Upstream credential or quota failure
    UpstreamAuthError,
    /// Any other upstream failure or timeout
    UpstreamError,
    /// Client could not reach the server at all
    TransportError,
}

impl ErrorCode {
    /// Wire spelling of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidRequest => "invalid_request",
            ErrorCode::MethodNotFound => "method_not_found",
            ErrorCode::InvalidParams => "invalid_params",
            ErrorCode::NotFound => "not_found",
            ErrorCode::UpstreamAuthError => "upstream_auth_error",
            ErrorCode::UpstreamError => "upstream_error",
            ErrorCode::TransportError => "transport_error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
