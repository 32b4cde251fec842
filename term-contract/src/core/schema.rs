//! Schemas and the validation algorithm.

use super::{
    Cell, ColumnRule, ContractError, DataType, Table, ValidationRecord, Value, ViolationKind,
};
use crate::logging::{truncate_field, LogConfig};
use crate::prelude::*;
use std::cmp::Ordering;
use tracing::{debug, info, instrument, warn};

/// A named, ordered set of column rules.
///
/// A schema is immutable once built and can validate any number of tables,
/// from any number of threads.
///
/// # Examples
///
/// ```rust
/// use term_contract::core::{ColumnRule, DataType, Schema};
/// use term_contract::sources::MemoryTable;
///
/// let schema = Schema::builder("people")
///     .column("age", ColumnRule::new(DataType::Integer).with_min(0).with_max(120))
///     .build();
///
/// let table = MemoryTable::builder()
///     .column("age", vec![25.into(), (-5).into(), "x".into(), 150.into()])
///     .build()
///     .unwrap();
///
/// let err = schema.validate(&table).unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "Column 'age' has wrong type, expected integer (row 2, value=x)\n\
///      Column 'age' below min 0 (row 1, value=-5)\n\
///      Column 'age' above max 120 (row 3, value=150)"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    columns: Vec<(String, ColumnRule)>,
    log_config: LogConfig,
}

impl Schema {
    /// Creates a new builder for a schema with the given name.
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Iterates over the declared columns in declaration order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &ColumnRule)> {
        self.columns.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    /// Returns the rule declared for `name`.
    pub fn column(&self, name: &str) -> Option<&ColumnRule> {
        self.columns
            .iter()
            .find(|(declared, _)| declared == name)
            .map(|(_, rule)| rule)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Evaluates every rule against `table` and returns all violations.
    ///
    /// Rules run in declaration order. For each rule the table is asked for
    /// the column; a missing column yields a single record and no further
    /// checks. Otherwise every cell is checked for type, then minimum, then
    /// maximum, then allowed values, each check sweeping the rows in order.
    /// A bound is only satisfied by a cell that provably compares on the
    /// right side of it. Cells of the expected type that cannot be ordered
    /// against the bound (a `NaN` float, or a bound of another type) are
    /// reported as out of range; cells already reported with the wrong type
    /// (nulls, strings in a numeric column) only get a range record when they
    /// do compare.
    #[instrument(skip(self, table), fields(schema = %self.name, columns = self.columns.len()))]
    pub fn check<T: Table + ?Sized>(&self, table: &T) -> Vec<ValidationRecord> {
        let mut records = Vec::new();

        for (name, rule) in &self.columns {
            let before = records.len();
            self.evaluate_column(name, rule, table, &mut records);
            debug!(
                column = %name,
                expected_type = %rule.expected_type(),
                violations = records.len() - before,
                "Evaluated column rule"
            );
        }

        if records.is_empty() {
            debug!(schema = %self.name, "Table satisfies schema");
        } else {
            info!(
                schema = %self.name,
                violations = records.len(),
                "Table violates schema"
            );
        }

        records
    }

    /// Validates `table`, failing with every violation if there is any.
    pub fn validate<T: Table + ?Sized>(&self, table: &T) -> std::result::Result<(), ContractError> {
        let records = self.check(table);
        if records.is_empty() {
            Ok(())
        } else {
            Err(ContractError::new(records))
        }
    }

    /// Same as [`Schema::validate`], with the failure as a [`TermError::Contract`].
    pub fn ensure_valid<T: Table + ?Sized>(&self, table: &T) -> Result<()> {
        self.validate(table).map_err(TermError::from)
    }

    fn evaluate_column<T: Table + ?Sized>(
        &self,
        name: &str,
        rule: &ColumnRule,
        table: &T,
        records: &mut Vec<ValidationRecord>,
    ) {
        if !table.has_column(name) {
            self.emit(records, ValidationRecord::missing_column(name));
            return;
        }

        let cells = table.column_cells(name);
        let expected = rule.expected_type();

        for cell in cells.iter().filter(|c| !c.value.satisfies(expected)) {
            self.emit_cell(records, name, ViolationKind::WrongType { expected }, cell);
        }

        if let Some(min) = rule.min() {
            for cell in cells
                .iter()
                .filter(|c| out_of_range(&c.value, min, Ordering::Less, expected))
            {
                let kind = ViolationKind::BelowMin { min: min.clone() };
                self.emit_cell(records, name, kind, cell);
            }
        }

        if let Some(max) = rule.max() {
            for cell in cells
                .iter()
                .filter(|c| out_of_range(&c.value, max, Ordering::Greater, expected))
            {
                let kind = ViolationKind::AboveMax { max: max.clone() };
                self.emit_cell(records, name, kind, cell);
            }
        }

        if rule.allowed().is_some() {
            for cell in cells.iter().filter(|c| !rule.permits(&c.value)) {
                self.emit_cell(records, name, ViolationKind::DisallowedValue, cell);
            }
        }
    }

    fn emit_cell(
        &self,
        records: &mut Vec<ValidationRecord>,
        column: &str,
        kind: ViolationKind,
        cell: &Cell,
    ) {
        let record = ValidationRecord::cell(column, kind, cell.row.clone(), cell.value.clone());
        self.emit(records, record);
    }

    fn emit(&self, records: &mut Vec<ValidationRecord>, record: ValidationRecord) {
        crate::log_violation!(
            self.log_config,
            column = %record.column,
            kind = record.kind.code(),
            message = %truncate_field(&record.message(), self.log_config.max_field_length),
            "Contract violation"
        );
        records.push(record);
    }
}

/// Returns true if `value` lies on the `beyond` side of `bound`, or cannot be
/// ordered against it despite having the expected type.
fn out_of_range(value: &Value, bound: &Value, beyond: Ordering, expected: DataType) -> bool {
    match value.partial_cmp(bound) {
        Some(ordering) => ordering == beyond,
        None => value.satisfies(expected),
    }
}

/// Builder for [`Schema`].
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    columns: Vec<(String, ColumnRule)>,
    log_config: LogConfig,
}

impl SchemaBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            log_config: LogConfig::default(),
        }
    }

    /// Declares a column rule.
    ///
    /// Declaring a name twice replaces the earlier rule but keeps its position.
    pub fn column(mut self, name: impl Into<String>, rule: ColumnRule) -> Self {
        let name = name.into();
        match self.columns.iter_mut().find(|(declared, _)| *declared == name) {
            Some(existing) => {
                debug!(schema = %self.name, column = %name, "Replacing column rule");
                existing.1 = rule;
            }
            None => self.columns.push((name, rule)),
        }
        self
    }

    /// Declares several column rules in order.
    pub fn columns<I, S>(self, columns: I) -> Self
    where
        I: IntoIterator<Item = (S, ColumnRule)>,
        S: Into<String>,
    {
        columns
            .into_iter()
            .fold(self, |builder, (name, rule)| builder.column(name, rule))
    }

    /// Sets the logging behaviour of validations run with this schema.
    pub fn log_config(mut self, config: LogConfig) -> Self {
        self.log_config = config;
        self
    }

    /// Builds the schema, logging a warning for every inconsistent rule.
    pub fn build(self) -> Schema {
        for (name, rule) in &self.columns {
            for note in rule.inconsistencies() {
                warn!(schema = %self.name, column = %name, "Inconsistent column rule: {note}");
            }
        }

        Schema {
            name: self.name,
            columns: self.columns,
            log_config: self.log_config,
        }
    }
}
