//! Error types for the Term contract library.
//!
//! Two kinds of failure live here. [`ContractError`](crate::core::ContractError)
//! is the *expected* outcome of validating a table that breaks its schema and
//! carries every violation found. [`TermError`] covers everything else: bad
//! schema declarations, tables that cannot be adapted, I/O and the errors of
//! the Arrow/DataFusion collaborators.

use crate::core::ContractError;
use thiserror::Error;

/// The main error type for the Term contract library.
#[derive(Error, Debug)]
pub enum TermError {
    /// A table violated its schema.
    #[error("Contract violated:\n{0}")]
    Contract(#[from] ContractError),

    /// Error in a schema declaration or other configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A table could not be built or adapted (ragged columns, bad index, ...).
    #[error("Invalid table: {0}")]
    InvalidTable(String),

    /// A source column has a type the contract value model cannot represent.
    #[error("Column '{column}' has unsupported type {data_type}")]
    UnsupportedType { column: String, data_type: String },

    /// Error from I/O operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from JSON (de)serialization.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error from Arrow operations.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Error from DataFusion operations.
    #[error("DataFusion error: {0}")]
    DataFusion(#[from] datafusion::error::DataFusionError),

    /// Generic internal error for unexpected conditions.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A type alias for `Result<T, TermError>`.
pub type Result<T> = std::result::Result<T, TermError>;

impl TermError {
    /// Creates a new configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates a new invalid table error.
    pub fn invalid_table(message: impl Into<String>) -> Self {
        Self::InvalidTable(message.into())
    }

    /// Creates a new unsupported type error.
    pub fn unsupported_type(column: impl Into<String>, data_type: impl ToString) -> Self {
        Self::UnsupportedType {
            column: column.into(),
            data_type: data_type.to_string(),
        }
    }

    /// Returns the contract violations if this error is a [`TermError::Contract`].
    pub fn as_contract(&self) -> Option<&ContractError> {
        match self {
            TermError::Contract(err) => Some(err),
            _ => None,
        }
    }
}

/// Extension trait for adding context to errors.
pub trait ErrorContext<T> {
    /// Adds context to an error.
    fn context(self, msg: &str) -> Result<T>;

    /// Adds context with a lazy message.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<TermError>,
{
    fn context(self, msg: &str) -> Result<T> {
        self.with_context(|| msg.to_string())
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let msg = f();
            match e.into() {
                TermError::Configuration(inner) => {
                    TermError::Configuration(format!("{msg}: {inner}"))
                }
                TermError::InvalidTable(inner) => TermError::InvalidTable(format!("{msg}: {inner}")),
                TermError::Json(inner) => TermError::Configuration(format!("{msg}: {inner}")),
                TermError::Io(inner) => {
                    TermError::Io(std::io::Error::new(inner.kind(), format!("{msg}: {inner}")))
                }
                TermError::Internal(inner) => TermError::Internal(format!("{msg}: {inner}")),
                other => TermError::Internal(format!("{msg}: {other}")),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{RowId, ValidationRecord, Value, ViolationKind};

    #[test]
    fn test_configuration_error() {
        let err = TermError::configuration("unknown column type");
        assert_eq!(err.to_string(), "Configuration error: unknown column type");
    }

    #[test]
    fn test_unsupported_type() {
        let err = TermError::unsupported_type("tags", "List(Utf8)");
        assert_eq!(err.to_string(), "Column 'tags' has unsupported type List(Utf8)");
    }

    #[test]
    fn test_contract_error_conversion() {
        let contract = ContractError::new(vec![ValidationRecord::cell(
            "age",
            ViolationKind::DisallowedValue,
            RowId::Position(3),
            Value::Integer(7),
        )]);
        let err: TermError = contract.into();
        assert_eq!(err.as_contract().map(ContractError::len), Some(1));
        assert!(err.to_string().contains("Column 'age' has invalid value"));
    }

    #[test]
    fn test_error_context() {
        fn failing_operation() -> Result<()> {
            Err(TermError::configuration("min is not a number"))
        }

        let err = failing_operation().context("column 'age'").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: column 'age': min is not a number"
        );
    }

    #[test]
    fn test_error_context_wraps_foreign_errors() {
        let io: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "schema.json",
        ));
        let err = io.with_context(|| "loading schema".to_string()).unwrap_err();
        assert!(matches!(err, TermError::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound));
        assert_eq!(err.to_string(), "IO error: loading schema: schema.json");
    }

    #[test]
    fn test_error_context_turns_json_errors_into_configuration() {
        let json: std::result::Result<serde_json::Value, _> = serde_json::from_str("{ nope");
        let err = json.context("parsing schema file s.json").unwrap_err();
        assert!(matches!(err, TermError::Configuration(_)));
        assert!(err
            .to_string()
            .starts_with("Configuration error: parsing schema file s.json: "));
    }

    #[test]
    fn test_error_context_wraps_other_errors_as_internal() {
        let unsupported: Result<()> = Err(TermError::unsupported_type("tags", "List(Utf8)"));
        let err = unsupported.context("adapting batch").unwrap_err();
        assert!(matches!(err, TermError::Internal(_)));
    }
}
