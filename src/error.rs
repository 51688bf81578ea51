//! Error types for the rule engine

use thiserror::Error;

/// Main error type for the rule engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleEngineError {
    #[error("Malformed rule: {0}")]
    MalformedRule(String),

    #[error("Type mismatch on '{attribute}': rule expects {expected}, record holds {actual}")]
    TypeMismatch {
        attribute: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Record decode error: {0}")]
    RecordDecode(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

#[cfg(feature = "python")]
impl From<RuleEngineError> for pyo3::PyErr {
    fn from(err: RuleEngineError) -> pyo3::PyErr {
        use pyo3::exceptions::{PyTypeError, PyValueError};

        match err {
            RuleEngineError::TypeMismatch { .. } => PyTypeError::new_err(err.to_string()),
            RuleEngineError::MalformedRule(_)
            | RuleEngineError::RecordDecode(_)
            | RuleEngineError::InvalidConfig(_) => PyValueError::new_err(err.to_string()),
        }
    }
}

/// Result type alias for the rule engine
pub type Result<T> = std::result::Result<T, RuleEngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = RuleEngineError::MalformedRule("no operand found in 'ANDAND'".to_string());
        assert_eq!(err.to_string(), "Malformed rule: no operand found in 'ANDAND'");

        let err = RuleEngineError::TypeMismatch {
            attribute: "age".to_string(),
            expected: "number",
            actual: "text",
        };
        assert_eq!(
            err.to_string(),
            "Type mismatch on 'age': rule expects number, record holds text"
        );
    }
}
