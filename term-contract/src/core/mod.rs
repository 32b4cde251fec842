//! Core contract types: values, column rules, schemas and violation records.
//!
//! ## Overview
//!
//! - **[`Schema`]**: a named, ordered set of [`ColumnRule`]s that validates tables
//! - **[`ColumnRule`]**: the expected [`DataType`] of a column plus optional
//!   minimum, maximum and allowed values
//! - **[`Table`]**: the read-only access a schema needs from a table
//! - **[`ContractError`]**: every [`ValidationRecord`] found by a failed validation
//!
//! ## Evaluation order
//!
//! ```text
//! Schema
//!     ├── rule "age"     existence → type → min → max → allowed
//!     └── rule "status"  existence → type → min → max → allowed
//! ```
//!
//! Each check sweeps the column in row order, so the records of a failed
//! validation are ordered by rule, then check, then row. A missing column
//! produces one record and skips the remaining checks of its rule.

mod record;
mod rule;
mod schema;
mod table;
mod value;

pub use record::{ContractError, ValidationRecord, ViolationKind};
pub use rule::ColumnRule;
pub use schema::{Schema, SchemaBuilder};
pub use table::{Cell, RowId, Table};
pub use value::{DataType, Value};
