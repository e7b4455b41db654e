//! Model Context Protocol (MCP) Module
//!
//! This module contains the whole protocol layer, including:
//! - Wire envelope models (McpRequest, McpResponse, ErrorCode)
//! - The declarative method schema table and capabilities descriptor
//! - The server-side dispatcher (parse, validate, route, respond)
//! - The client-side request builder and response decoder

pub mod client;
pub mod handlers;
pub mod models;
pub mod schema;

// Re-export commonly used types and functions
pub use client::McpClient;
pub use handlers::routes;
