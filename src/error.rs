//! Error types for the weather MCP crate
//!
//! Three error families live here:
//! - `WeatherError`: raised by the weather adapter, mapped by the
//!   dispatcher into wire-level error envelopes
//! - `ClientError`: raised by the MCP client when a call fails
//! - `ConfigError`: raised at startup when the environment is unusable
//!
//! The wire-level `ErrorCode` enum itself lives in `mcp::models` next to
//! the envelope types it is serialized with.

use crate::mcp::models::ErrorCode;
use thiserror::Error;

/// Failures raised by a weather provider.
///
/// Each variant corresponds to exactly one wire `error_code`, so the
/// dispatcher can translate mechanically via [`WeatherError::error_code`].
#[derive(Debug, Clone, Error)]
pub enum WeatherError {
    /// The caller passed a value the provider cannot work with.
    #[error("invalid parameter: {0}")]
    Validation(String),

    /// The provider does not know the requested location.
    #[error("location not found: {0}")]
    NotFound(String),

    /// The provider rejected our credentials or quota.
    #[error("weather provider rejected the request: {0}")]
    UpstreamAuth(String),

    /// Any other provider failure, including timeouts.
    #[error("weather provider failure: {0}")]
    Upstream(String),
}

impl WeatherError {
    /// Wire-level code this error serializes as.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            WeatherError::Validation(_) => ErrorCode::InvalidParams,
            WeatherError::NotFound(_) => ErrorCode::NotFound,
            WeatherError::UpstreamAuth(_) => ErrorCode::UpstreamAuthError,
            WeatherError::Upstream(_) => ErrorCode::UpstreamError,
        }
    }
}

/// Failures raised by the MCP client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server could not be reached at all (connect failure, timeout).
    #[error("could not reach MCP server: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with an error envelope, or the call failed the
    /// client-side schema check before any network round trip.
    #[error("{code}: {message}")]
    Protocol { code: ErrorCode, message: String },

    /// The success envelope did not echo the request id we sent.
    #[error("correlation mismatch: sent {sent}, received {received}")]
    CorrelationMismatch { sent: String, received: String },

    /// The response body was not a valid protocol envelope.
    #[error("malformed server response: {0}")]
    MalformedResponse(String),
}

impl ClientError {
    /// Wire-level code for presenting this failure uniformly to callers.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            ClientError::Transport(_) => ErrorCode::TransportError,
            ClientError::Protocol { code, .. } => *code,
            ClientError::CorrelationMismatch { .. } | ClientError::MalformedResponse(_) => {
                ErrorCode::InvalidRequest
            }
        }
    }
}

/// Startup configuration failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is absent.
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    /// An environment variable is present but unparseable.
    #[error("environment variable {name} has invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}
