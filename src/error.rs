//! Crate-wide error types.
//!
//! The mapping engine distinguishes three failure classes:
//!
//! - [`MappingError`]: a transform function failed while deriving a field.
//!   No partial object is returned.
//! - [`ValidationError`]: the fully assembled object failed schema
//!   conformance. Carries the offending path and the reason.
//! - [`ProviderError`]: an upstream source failed (network, non-success
//!   status, not found). Owned by the adapters; the engine never retries,
//!   it only reports the failure unchanged to its caller.
//!
//! All three roll up into [`Error`] for callers that don't care which
//! subsystem failed. "No result" is not an error anywhere in this crate:
//! an empty-but-valid response is a successful call with empty content.

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error aggregating all subsystems.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// A transform function failed while deriving a field.
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// The assembled object failed schema validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An external provider call failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// A transform raised an error while deriving an internal path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("transform failed at `{path}`: {message}")]
pub struct MappingError {
    /// Internal path the failing transform was registered against.
    pub path: String,
    /// What the transform reported.
    pub message: String,
}

impl MappingError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// The assembled object does not satisfy its domain schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("validation failed at `{path}`: {reason}")]
pub struct ValidationError {
    /// Dot-delimited path of the violating field, relative to the object root.
    pub path: String,
    /// The contract that was violated.
    pub reason: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// A required field is absent.
    pub fn missing(path: impl Into<String>) -> Self {
        Self::new(path, "required field is missing")
    }

    /// A field holds a value of the wrong kind.
    pub fn expected(path: impl Into<String>, expected: &str, got: &serde_json::Value) -> Self {
        Self::new(path, format!("expected {expected}, got {}", kind_of(got)))
    }
}

fn kind_of(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "sequence",
        serde_json::Value::Object(_) => "mapping",
    }
}

/// Failure reported by an external data source.
///
/// Adapters translate transport-level failures into this type and surface
/// them unchanged; retry/backoff decisions belong to the calling workflow.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    /// Transport-level failure (DNS, TLS, timeout, connection reset).
    #[error("network error: {0}")]
    Network(String),

    /// Upstream returned a non-success status with an error payload.
    #[error("API request failed: {0}")]
    Api(String),

    /// Response body could not be parsed as JSON.
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// Upstream has no record for the requested entity.
    #[error("no {entity} found for `{query}`")]
    NotFound {
        entity: &'static str,
        query: String,
    },

    /// Upstream asked us to slow down.
    #[error("rate limited - try again later")]
    RateLimited,
}

impl ProviderError {
    pub fn not_found(entity: &'static str, query: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            query: query.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn validation_error_names_the_path() {
        let err = ValidationError::missing("title");
        assert_eq!(err.path, "title");
        assert!(err.to_string().contains("`title`"));
    }

    #[test]
    fn expected_reports_both_kinds() {
        let err = ValidationError::expected("duration_ms", "integer", &json!("abc"));
        assert!(err.reason.contains("integer"));
        assert!(err.reason.contains("string"));
    }

    #[test]
    fn mapping_and_validation_stay_distinct() {
        let mapping: Error = MappingError::new("metadata", "boom").into();
        let validation: Error = ValidationError::missing("name").into();
        assert!(matches!(mapping, Error::Mapping(_)));
        assert!(matches!(validation, Error::Validation(_)));
    }

    #[test]
    fn provider_not_found_display() {
        let err = ProviderError::not_found("album", "abc123");
        assert!(err.to_string().contains("album"));
        assert!(err.to_string().contains("abc123"));
    }
}
