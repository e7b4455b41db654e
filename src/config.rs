//! Environment configuration
//!
//! All knobs come from environment variables (a `.env` file is honored by
//! the binary entry point). The chat-model key used by the conversational
//! frontend is deliberately not read here; this crate only needs the
//! weather provider credentials and the server address.

use crate::error::ConfigError;
use std::env;
use std::time::Duration;

/// Default bind/connect host.
pub const DEFAULT_HOST: &str = "localhost";
/// Default server port.
pub const DEFAULT_PORT: u16 = 8000;
/// Default bound on the single upstream call per request, in seconds.
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// Runtime configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Host the server binds to (`MCP_SERVER_HOST`).
    pub host: String,

    /// Port the server binds to (`MCP_SERVER_PORT`).
    pub port: u16,

    /// OpenWeatherMap API key (`OPENWEATHER_API_KEY`, required).
    pub api_key: String,

    /// Timeout for outbound provider calls (`UPSTREAM_TIMEOUT_SECS`).
    pub upstream_timeout: Duration,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// The server refuses to start without a provider API key; every
    /// other variable has a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("MCP_SERVER_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());

        let port = match env::var("MCP_SERVER_PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "MCP_SERVER_PORT",
                value: raw,
            })?,
            Err(_) => DEFAULT_PORT,
        };

        let api_key =
            env::var("OPENWEATHER_API_KEY").map_err(|_| ConfigError::Missing("OPENWEATHER_API_KEY"))?;

        let upstream_timeout = match env::var("UPSTREAM_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|_| ConfigError::Invalid {
                    name: "UPSTREAM_TIMEOUT_SECS",
                    value: raw,
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        };

        Ok(Self {
            host,
            port,
            api_key,
            upstream_timeout,
        })
    }
}
