//! Violation records and the aggregate error produced by a failed validation.

use super::{DataType, RowId, Value};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// What kind of rule a record violates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    /// The declared column is not in the table
    MissingColumn,
    /// The cell is not an instance of the expected type
    WrongType { expected: DataType },
    /// The cell orders below the declared minimum
    BelowMin { min: Value },
    /// The cell orders above the declared maximum
    AboveMax { max: Value },
    /// The cell is not in the declared allowed set
    DisallowedValue,
}

impl ViolationKind {
    /// Returns the stable identifier of this kind.
    pub fn code(&self) -> &'static str {
        match self {
            ViolationKind::MissingColumn => "missing_column",
            ViolationKind::WrongType { .. } => "wrong_type",
            ViolationKind::BelowMin { .. } => "below_min",
            ViolationKind::AboveMax { .. } => "above_max",
            ViolationKind::DisallowedValue => "disallowed_value",
        }
    }
}

/// One discovered violation.
///
/// Column-level records (missing columns) carry neither row nor value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationRecord {
    pub column: String,
    #[serde(flatten)]
    pub kind: ViolationKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<RowId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl ValidationRecord {
    /// Creates the record for a declared column that the table lacks.
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            kind: ViolationKind::MissingColumn,
            row: None,
            value: None,
        }
    }

    /// Creates a record for one offending cell.
    pub fn cell(column: impl Into<String>, kind: ViolationKind, row: RowId, value: Value) -> Self {
        Self {
            column: column.into(),
            kind,
            row: Some(row),
            value: Some(value),
        }
    }

    /// Renders the record as a single line.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ValidationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let column = &self.column;
        match &self.kind {
            ViolationKind::MissingColumn => return write!(f, "Missing column: {column}"),
            ViolationKind::WrongType { expected } => {
                write!(f, "Column '{column}' has wrong type, expected {expected}")?
            }
            ViolationKind::BelowMin { min } => write!(f, "Column '{column}' below min {min}")?,
            ViolationKind::AboveMax { max } => write!(f, "Column '{column}' above max {max}")?,
            ViolationKind::DisallowedValue => write!(f, "Column '{column}' has invalid value")?,
        }
        if let (Some(row), Some(value)) = (&self.row, &self.value) {
            write!(f, " (row {row}, value={value})")?;
        }
        Ok(())
    }
}

/// Every violation found by one validation, in emission order.
///
/// The records are grouped by rule in schema order, then by check (type,
/// min, max, allowed), then by row. They are never deduplicated or truncated.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("{}", render(.records))]
pub struct ContractError {
    records: Vec<ValidationRecord>,
}

fn render(records: &[ValidationRecord]) -> String {
    records
        .iter()
        .map(ValidationRecord::message)
        .collect::<Vec<_>>()
        .join("\n")
}

impl ContractError {
    pub fn new(records: Vec<ValidationRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ValidationRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ValidationRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the first violation found.
    pub fn first(&self) -> Option<&ValidationRecord> {
        self.records.first()
    }

    /// Counts the records whose kind has the given [`ViolationKind::code`].
    pub fn count_by_kind(&self, code: &str) -> usize {
        self.records.iter().filter(|r| r.kind.code() == code).count()
    }

    /// Iterates over the records of one column.
    pub fn for_column<'a>(
        &'a self,
        column: &'a str,
    ) -> impl Iterator<Item = &'a ValidationRecord> + 'a {
        self.records.iter().filter(move |r| r.column == column)
    }

    /// Serializes the records as a JSON array.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.records)
    }
}

impl IntoIterator for ContractError {
    type Item = ValidationRecord;
    type IntoIter = std::vec::IntoIter<ValidationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
