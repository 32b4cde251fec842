//! The read-only table contract validation runs against.

use super::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Identifies a row within a table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    /// Zero-based position
    Position(usize),
    /// Label from a named index
    Label(String),
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Position(pos) => write!(f, "{pos}"),
            RowId::Label(label) => f.write_str(label),
        }
    }
}

impl From<usize> for RowId {
    fn from(pos: usize) -> Self {
        RowId::Position(pos)
    }
}

impl From<&str> for RowId {
    fn from(label: &str) -> Self {
        RowId::Label(label.to_string())
    }
}

impl From<String> for RowId {
    fn from(label: String) -> Self {
        RowId::Label(label)
    }
}

/// One value of a column together with the row it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub row: RowId,
    pub value: Value,
}

impl Cell {
    pub fn new(row: impl Into<RowId>, value: impl Into<Value>) -> Self {
        Self {
            row: row.into(),
            value: value.into(),
        }
    }
}

/// Read access to a table, the only capability validation needs.
///
/// Implementations must return cells in row order and must not change
/// between calls while a validation is running.
///
/// # Examples
///
/// ```rust
/// use term_contract::core::{Cell, Table};
///
/// struct Ages(Vec<i64>);
///
/// impl Table for Ages {
///     fn has_column(&self, name: &str) -> bool {
///         name == "age"
///     }
///
///     fn column_cells(&self, name: &str) -> Vec<Cell> {
///         if !self.has_column(name) {
///             return Vec::new();
///         }
///         self.0.iter().enumerate().map(|(row, age)| Cell::new(row, *age)).collect()
///     }
/// }
///
/// let table = Ages(vec![30, 41]);
/// assert_eq!(table.column_cells("age").len(), 2);
/// ```
pub trait Table {
    /// Returns true if the table has a column called `name`.
    fn has_column(&self, name: &str) -> bool;

    /// Returns the cells of column `name` in row order, empty if it is absent.
    fn column_cells(&self, name: &str) -> Vec<Cell>;
}

impl<T: Table + ?Sized> Table for &T {
    fn has_column(&self, name: &str) -> bool {
        (**self).has_column(name)
    }

    fn column_cells(&self, name: &str) -> Vec<Cell> {
        (**self).column_cells(name)
    }
}

impl<T: Table + ?Sized> Table for Box<T> {
    fn has_column(&self, name: &str) -> bool {
        (**self).has_column(name)
    }

    fn column_cells(&self, name: &str) -> Vec<Cell> {
        (**self).column_cells(name)
    }
}

impl<T: Table + ?Sized> Table for Arc<T> {
    fn has_column(&self, name: &str) -> bool {
        (**self).has_column(name)
    }

    fn column_cells(&self, name: &str) -> Vec<Cell> {
        (**self).column_cells(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_id_display() {
        assert_eq!(RowId::Position(7).to_string(), "7");
        assert_eq!(RowId::from("cust-9").to_string(), "cust-9");
    }

    #[test]
    fn test_row_id_serde_untagged() {
        assert_eq!(serde_json::to_string(&RowId::Position(2)).unwrap(), "2");
        assert_eq!(
            serde_json::to_string(&RowId::from("a")).unwrap(),
            "\"a\""
        );
    }
}
