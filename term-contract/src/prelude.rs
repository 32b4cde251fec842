//! Prelude for commonly used types and traits in term-contract.

pub use crate::core::{ColumnRule, ContractError, DataType, Schema, Table, Value};
pub use crate::error::{ErrorContext, Result, TermError};
pub use crate::logging::LogConfig;
