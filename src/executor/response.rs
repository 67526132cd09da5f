//! Execution response and error entries
//!
//! A response always carries both keys: `data` (possibly null) and `errors`
//! (possibly empty). Partial data alongside errors is expected and correct.

use serde::Serialize;
use serde_json::Value;

use crate::core::error::FieldError;

/// A step along the response tree, for error reporting
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

/// Machine-readable error metadata
#[derive(Debug, Clone, Serialize)]
pub struct ErrorExtensions {
    pub code: String,
}

/// One entry in the response's `errors` sequence
///
/// Entries appear in the order the executor encountered them during
/// traversal.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionError {
    pub message: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<PathSegment>,

    pub extensions: ErrorExtensions,
}

impl ExecutionError {
    pub fn new(message: impl Into<String>, code: impl Into<String>, path: Vec<PathSegment>) -> Self {
        Self {
            message: message.into(),
            path,
            extensions: ErrorExtensions { code: code.into() },
        }
    }

    /// A recoverable per-field failure from a resolution step
    pub fn from_field_error(err: &FieldError, path: Vec<PathSegment>) -> Self {
        Self::new(err.to_string(), err.error_code(), path)
    }

    /// The query text could not be parsed
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::new(message, "GRAPHQL_PARSE_ERROR", vec![])
    }

    /// The query references something the schema does not define
    pub fn validation(message: impl Into<String>, path: Vec<PathSegment>) -> Self {
        Self::new(message, "GRAPHQL_VALIDATION_FAILED", path)
    }

    /// The document's operation kind is outside this engine's read model
    pub fn operation_not_supported(message: impl Into<String>) -> Self {
        Self::new(message, "OPERATION_NOT_SUPPORTED", vec![])
    }

    /// A non-nullable field resolved to null without a recorded cause
    pub fn non_null_violation(type_name: &str, path: Vec<PathSegment>) -> Self {
        Self::new(
            format!("Cannot return null for non-nullable type '{}'", type_name),
            "NON_NULL_VIOLATION",
            path,
        )
    }
}

/// The result of executing one query document
#[derive(Debug, Serialize)]
pub struct ExecutionResponse {
    pub data: Value,
    pub errors: Vec<ExecutionError>,
}

impl ExecutionResponse {
    /// A response for a request-fatal failure: null data, a single error
    pub fn request_failed(error: ExecutionError) -> Self {
        Self {
            data: Value::Null,
            errors: vec![error],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_path_segments_serialize_flat() {
        let path = vec![
            PathSegment::Field("user".to_string()),
            PathSegment::Field("tasks".to_string()),
            PathSegment::Index(1),
        ];
        assert_eq!(
            serde_json::to_value(&path).unwrap(),
            json!(["user", "tasks", 1])
        );
    }

    #[test]
    fn test_error_serializes_with_code_extension() {
        let err = ExecutionError::new(
            "Unauthorized: Request is not authenticated",
            "UNAUTHORIZED",
            vec![PathSegment::Field("user".to_string())],
        );
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({
                "message": "Unauthorized: Request is not authenticated",
                "path": ["user"],
                "extensions": {"code": "UNAUTHORIZED"}
            })
        );
    }

    #[test]
    fn test_request_level_error_omits_empty_path() {
        let err = ExecutionError::parse_error("bad query");
        let value = serde_json::to_value(&err).unwrap();
        assert!(value.get("path").is_none());
    }

    #[test]
    fn test_response_always_has_both_keys() {
        let response = ExecutionResponse {
            data: json!({"ok": true}),
            errors: vec![],
        };
        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("data").is_some());
        assert_eq!(value.get("errors"), Some(&json!([])));
    }
}
