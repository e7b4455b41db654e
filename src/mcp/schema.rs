//! Method Schemas and the Capabilities Descriptor
//!
//! A single declarative table describes every supported method and its
//! parameters. The dispatcher validates inbound requests against it, the
//! client validates outbound calls against it (fail fast, no round trip),
//! and the capabilities endpoint renders it as JSON. Keeping all three in
//! one place guarantees they can never disagree.

use super::models::{ErrorCode, METHOD_GET_CURRENT, METHOD_GET_FORECAST, SERVER_NAME};
use serde_json::{json, Map, Value};
use thiserror::Error;

// =============================================================================
// Schema Table
// =============================================================================

/// Primitive parameter types accepted on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Integer,
}

impl ParamKind {
    /// Whether `value` inhabits this primitive type.
    fn matches(&self, value: &Value) -> bool {
        match self {
            ParamKind::String => value.is_string(),
            ParamKind::Integer => value.is_i64() || value.is_u64(),
        }
    }

    /// Wire spelling used in the capabilities descriptor.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Integer => "integer",
        }
    }
}

/// Declared parameter of a method.
#[derive(Debug)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    pub description: &'static str,
}

/// Declared method with its parameter schema.
#[derive(Debug)]
pub struct MethodSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub params: &'static [ParamSpec],
}

/// The fixed method table. There is no protocol versioning; this is the
/// single schema both halves speak.
pub const METHODS: &[MethodSpec] = &[
    MethodSpec {
        name: METHOD_GET_CURRENT,
        description: "Get current weather for a city",
        params: &[
            ParamSpec {
                name: "city",
                kind: ParamKind::String,
                required: true,
                description: "City name",
            },
            ParamSpec {
                name: "country_code",
                kind: ParamKind::String,
                required: false,
                description: "Optional country code (e.g. 'US', 'GB')",
            },
        ],
    },
    MethodSpec {
        name: METHOD_GET_FORECAST,
        description: "Get weather forecast for a city",
        params: &[
            ParamSpec {
                name: "city",
                kind: ParamKind::String,
                required: true,
                description: "City name",
            },
            ParamSpec {
                name: "country_code",
                kind: ParamKind::String,
                required: false,
                description: "Optional country code (e.g. 'US', 'GB')",
            },
            ParamSpec {
                name: "days",
                kind: ParamKind::Integer,
                required: false,
                description: "Number of days (1-5, default 5; larger values are clamped)",
            },
        ],
    },
];

/// Looks up a method in the table.
pub fn method_spec(name: &str) -> Option<&'static MethodSpec> {
    METHODS.iter().find(|method| method.name == name)
}

// =============================================================================
// Validation
// =============================================================================

/// A request's failure to satisfy the schema table.
#[derive(Debug, Error)]
pub enum SchemaViolation {
    #[error("unknown method: {0}")]
    UnknownMethod(String),

    #[error("missing required parameter {name:?}")]
    MissingParam { name: &'static str },

    #[error("parameter {name:?} must be of type {expected}")]
    WrongType {
        name: &'static str,
        expected: &'static str,
    },
}

impl SchemaViolation {
    /// Wire-level code this violation serializes as.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            SchemaViolation::UnknownMethod(_) => ErrorCode::MethodNotFound,
            SchemaViolation::MissingParam { .. } | SchemaViolation::WrongType { .. } => {
                ErrorCode::InvalidParams
            }
        }
    }
}

/// Checks `params` against the schema declared for `method`.
///
/// Unknown extra parameters are ignored. Returns the matched spec so the
/// caller can route without a second lookup.
pub fn validate_params(
    method: &str,
    params: &Map<String, Value>,
) -> Result<&'static MethodSpec, SchemaViolation> {
    let spec =
        method_spec(method).ok_or_else(|| SchemaViolation::UnknownMethod(method.to_string()))?;

    for param in spec.params {
        match params.get(param.name) {
            None => {
                if param.required {
                    return Err(SchemaViolation::MissingParam { name: param.name });
                }
            }
            Some(value) => {
                if !param.kind.matches(value) {
                    return Err(SchemaViolation::WrongType {
                        name: param.name,
                        expected: param.kind.as_str(),
                    });
                }
            }
        }
    }

    Ok(spec)
}

// =============================================================================
// Capabilities Descriptor
// =============================================================================

/// Renders the schema table as the capabilities document.
///
/// Computed once at server start, held immutably in the application
/// state, and served read-only by `GET /capabilities`.
pub fn capabilities_descriptor() -> Value {
    let mut methods = Map::new();
    for method in METHODS {
        let mut parameters = Map::new();
        for param in method.params {
            parameters.insert(
                param.name.to_string(),
                json!({
                    "type": param.kind.as_str(),
                    "required": param.required,
                    "description": param.description,
                }),
            );
        }
        methods.insert(
            method.name.to_string(),
            json!({
                "description": method.description,
                "parameters": parameters,
            }),
        );
    }

    json!({
        "server": SERVER_NAME,
        "methods": methods,
    })
}
