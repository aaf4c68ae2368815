use serde_json::Value;
use thiserror::Error;

/// Convenience alias for fallible results in this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Unified error type surfaced by the model core.
///
/// Errors are raised only at typed-access time or by an explicit
/// [`validate`](crate::ApiModel::validate) call. Deserializing syntactically
/// valid JSON never fails, so a client can decode a payload it only partially
/// understands and still use the parts it does.
#[derive(Debug, Error)]
pub enum Error {
    /// A required field was absent (or JSON-null where null is not allowed).
    #[error("missing required field `{field}`")]
    MissingField { field: String },

    /// A present value could not be coerced to the target type.
    #[error("field `{field}`: expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: String,
    },

    /// Explicit validation rejected a structurally valid value, e.g. an enum
    /// string outside the known variant table.
    #[error("invalid data: {message}")]
    InvalidData { message: String },

    /// The payload was not syntactically valid JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub fn missing_field(field: impl Into<String>) -> Self {
        Error::MissingField {
            field: field.into(),
        }
    }

    /// Type mismatch describing the JSON shape actually found.
    pub fn type_mismatch(field: impl Into<String>, expected: &'static str, found: &Value) -> Self {
        Error::TypeMismatch {
            field: field.into(),
            expected,
            found: json_type_name(found).to_string(),
        }
    }

    pub fn invalid_data(message: impl Into<String>) -> Self {
        Error::InvalidData {
            message: message.into(),
        }
    }
}

/// JSON type name used in diagnostics.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
