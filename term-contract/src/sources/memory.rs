//! In-memory tables.

use crate::core::{Cell, RowId, Table, Value};
use crate::prelude::*;

/// A column-oriented table held in memory.
///
/// Rows are identified by position unless a labelled index is supplied.
#[derive(Debug, Clone, Default)]
pub struct MemoryTable {
    columns: Vec<(String, Vec<Value>)>,
    index: Vec<RowId>,
}

impl MemoryTable {
    pub fn builder() -> MemoryTableBuilder {
        MemoryTableBuilder::default()
    }

    pub fn num_rows(&self) -> usize {
        self.index.len()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// Returns the values of column `name`.
    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns
            .iter()
            .find(|(declared, _)| declared == name)
            .map(|(_, values)| values.as_slice())
    }

    pub fn row_ids(&self) -> &[RowId] {
        &self.index
    }
}

impl Table for MemoryTable {
    fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    fn column_cells(&self, name: &str) -> Vec<Cell> {
        self.column(name)
            .map(|values| {
                self.index
                    .iter()
                    .zip(values)
                    .map(|(row, value)| Cell {
                        row: row.clone(),
                        value: value.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Builder for [`MemoryTable`].
#[derive(Debug, Default)]
pub struct MemoryTableBuilder {
    columns: Vec<(String, Vec<Value>)>,
    index: Option<Vec<RowId>>,
}

impl MemoryTableBuilder {
    /// Adds a column.
    pub fn column(mut self, name: impl Into<String>, values: Vec<Value>) -> Self {
        self.columns.push((name.into(), values));
        self
    }

    /// Adds a column from anything convertible into values.
    pub fn column_from<I, V>(self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.column(name, values.into_iter().map(Into::into).collect())
    }

    /// Sets the row identifiers, replacing the positional default.
    pub fn index<I, R>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<RowId>,
    {
        self.index = Some(rows.into_iter().map(Into::into).collect());
        self
    }

    /// Builds the table, rejecting duplicate names and columns of unequal length.
    pub fn build(self) -> Result<MemoryTable> {
        let num_rows = match (&self.index, self.columns.first()) {
            (Some(index), _) => index.len(),
            (None, Some((_, values))) => values.len(),
            (None, None) => 0,
        };

        for (i, (name, values)) in self.columns.iter().enumerate() {
            if self.columns[..i].iter().any(|(other, _)| other == name) {
                return Err(TermError::invalid_table(format!(
                    "duplicate column '{name}'"
                )));
            }
            if values.len() != num_rows {
                return Err(TermError::invalid_table(format!(
                    "column '{name}' has {} values, expected {num_rows}",
                    values.len()
                )));
            }
        }

        let index = self
            .index
            .unwrap_or_else(|| (0..num_rows).map(RowId::Position).collect());

        Ok(MemoryTable {
            columns: self.columns,
            index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_index_by_default() {
        let table = MemoryTable::builder()
            .column_from("age", [25, 30])
            .build()
            .unwrap();
        assert_eq!(table.num_rows(), 2);
        assert_eq!(
            table.column_cells("age"),
            vec![Cell::new(0usize, 25), Cell::new(1usize, 30)]
        );
    }

    #[test]
    fn test_labelled_index() {
        let table = MemoryTable::builder()
            .column_from("status", ["A", "C"])
            .index(["first", "second"])
            .build()
            .unwrap();
        let cells = table.column_cells("status");
        assert_eq!(cells[1].row, RowId::from("second"));
        assert_eq!(cells[1].value, Value::from("C"));
    }

    #[test]
    fn test_missing_column() {
        let table = MemoryTable::builder()
            .column_from("a", [1])
            .build()
            .unwrap();
        assert!(table.has_column("a"));
        assert!(!table.has_column("b"));
        assert!(table.column_cells("b").is_empty());
    }

    #[test]
    fn test_ragged_columns_rejected() {
        let err = MemoryTable::builder()
            .column_from("a", [1, 2])
            .column_from("b", [1])
            .build()
            .unwrap_err();
        assert!(matches!(err, TermError::InvalidTable(_)));
        assert!(err.to_string().contains("column 'b' has 1 values, expected 2"));
    }

    #[test]
    fn test_index_length_mismatch_rejected() {
        let err = MemoryTable::builder()
            .column_from("a", [1, 2])
            .index([0usize])
            .build()
            .unwrap_err();
        assert!(matches!(err, TermError::InvalidTable(_)));
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let err = MemoryTable::builder()
            .column_from("a", [1])
            .column_from("a", [2])
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("duplicate column 'a'"));
    }

    #[test]
    fn test_column_names_in_order() {
        let table = MemoryTable::builder()
            .column_from("z", [true])
            .column_from("a", [false])
            .build()
            .unwrap();
        assert_eq!(table.column_names().collect::<Vec<_>>(), vec!["z", "a"]);
        assert_eq!(table.num_columns(), 2);
    }
}
