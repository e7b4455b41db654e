//! Application State
//!
//! The only state shared between requests: the weather provider handle
//! and the pre-rendered capabilities document. Both are immutable after
//! startup, so no locking is needed anywhere in the request path.

use crate::mcp::schema::capabilities_descriptor;
use crate::weather::adapter::WeatherProvider;
use serde_json::Value;
use std::sync::Arc;

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Read-only state handed to every request handler.
pub struct AppState {
    /// Weather provider the dispatcher routes to; stubbed out in tests.
    pub provider: Arc<dyn WeatherProvider>,

    /// Capabilities descriptor, computed once here and served as-is.
    pub capabilities: Value,
}

impl AppState {
    /// Creates the state around an explicitly constructed provider.
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self {
            provider,
            capabilities: capabilities_descriptor(),
        }
    }
}
