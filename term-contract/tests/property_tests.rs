//! Property-based tests for schema validation.
//!
//! Tables are generated as columns of mixed cells (in-range integers,
//! out-of-range integers, strings, nulls) so that every check fires with
//! some probability, and the expected records are computed independently of
//! the validator.

use proptest::prelude::*;
use term_contract::core::{
    ColumnRule, DataType, RowId, Schema, ValidationRecord, Value, ViolationKind,
};
use term_contract::sources::MemoryTable;

const MIN: i64 = 0;
const MAX: i64 = 100;

fn cell_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        6 => (MIN..=MAX).prop_map(Value::Integer),
        2 => (-50i64..MIN).prop_map(Value::Integer),
        2 => (MAX + 1..200i64).prop_map(Value::Integer),
        1 => "[a-z]{1,4}".prop_map(Value::String),
        1 => Just(Value::Null),
    ]
}

fn column_strategy() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(cell_strategy(), 0..40)
}

fn clean_column_strategy() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec((MIN..=MAX).prop_map(Value::Integer), 0..40)
}

fn ranged_rule() -> ColumnRule {
    ColumnRule::new(DataType::Integer).with_min(MIN).with_max(MAX)
}

fn table_of(columns: Vec<(&str, Vec<Value>)>) -> MemoryTable {
    columns
        .into_iter()
        .fold(MemoryTable::builder(), |b, (name, values)| b.column(name, values))
        .build()
        .unwrap()
}

/// Computes the records a ranged integer rule should produce, check by check.
fn expected_records(column: &str, values: &[Value]) -> Vec<ValidationRecord> {
    let cell = |kind: ViolationKind, row: usize, value: &Value| {
        ValidationRecord::cell(column, kind, RowId::Position(row), value.clone())
    };
    let mut records = Vec::new();

    for (row, value) in values.iter().enumerate() {
        if !matches!(value, Value::Integer(_)) {
            records.push(cell(
                ViolationKind::WrongType {
                    expected: DataType::Integer,
                },
                row,
                value,
            ));
        }
    }
    for (row, value) in values.iter().enumerate() {
        if let Value::Integer(v) = value {
            if *v < MIN {
                records.push(cell(
                    ViolationKind::BelowMin {
                        min: Value::Integer(MIN),
                    },
                    row,
                    value,
                ));
            }
        }
    }
    for (row, value) in values.iter().enumerate() {
        if let Value::Integer(v) = value {
            if *v > MAX {
                records.push(cell(
                    ViolationKind::AboveMax {
                        max: Value::Integer(MAX),
                    },
                    row,
                    value,
                ));
            }
        }
    }

    records
}

proptest! {
    #[test]
    fn prop_clean_tables_pass(a in clean_column_strategy(), b in clean_column_strategy()) {
        let schema = Schema::builder("s")
            .column("a", ranged_rule())
            .column("b", ranged_rule())
            .build();
        let rows = a.len().min(b.len());
        let table = table_of(vec![("a", a[..rows].to_vec()), ("b", b[..rows].to_vec())]);

        prop_assert!(schema.validate(&table).is_ok());
        prop_assert!(schema.check(&table).is_empty());
    }

    #[test]
    fn prop_records_match_independent_computation(values in column_strategy()) {
        let schema = Schema::builder("s").column("n", ranged_rule()).build();
        let table = table_of(vec![("n", values.clone())]);

        prop_assert_eq!(schema.check(&table), expected_records("n", &values));
    }

    #[test]
    fn prop_wrong_type_records_one_per_offending_row(values in column_strategy()) {
        let schema = Schema::builder("s")
            .column("n", ColumnRule::new(DataType::Integer))
            .build();
        let table = table_of(vec![("n", values.clone())]);

        let offending: Vec<RowId> = values
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.satisfies(DataType::Integer))
            .map(|(row, _)| RowId::Position(row))
            .collect();
        let reported: Vec<RowId> = schema
            .check(&table)
            .into_iter()
            .map(|r| r.row.expect("cell records carry a row"))
            .collect();

        prop_assert_eq!(reported, offending);
    }

    #[test]
    fn prop_missing_column_yields_exactly_one_record(values in column_strategy()) {
        let schema = Schema::builder("s")
            .column("absent", ranged_rule().with_allowed([1, 2, 3]))
            .build();
        let table = table_of(vec![("present", values)]);

        let records = schema.check(&table);
        prop_assert_eq!(records, vec![ValidationRecord::missing_column("absent")]);
    }

    #[test]
    fn prop_records_grouped_by_rule_order(a in column_strategy(), b in column_strategy()) {
        let schema = Schema::builder("s")
            .column("b", ranged_rule())
            .column("a", ranged_rule())
            .build();
        let rows = a.len().min(b.len());
        let table = table_of(vec![("a", a[..rows].to_vec()), ("b", b[..rows].to_vec())]);

        let columns: Vec<String> = schema.check(&table).into_iter().map(|r| r.column).collect();
        let first_a = columns.iter().position(|c| c == "a").unwrap_or(columns.len());
        prop_assert!(columns[first_a..].iter().all(|c| c == "a"));
    }

    #[test]
    fn prop_allowed_check_flags_every_non_member(values in column_strategy()) {
        let allowed = [Value::Integer(1), Value::Integer(2), Value::Null];
        let schema = Schema::builder("s")
            .column("n", ColumnRule::new(DataType::Integer).with_allowed(allowed.clone()))
            .build();
        let table = table_of(vec![("n", values.clone())]);

        let expected = values.iter().filter(|v| !allowed.contains(v)).count();
        let actual = schema
            .validate(&table)
            .err()
            .map_or(0, |e| e.count_by_kind("disallowed_value"));
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_validation_is_idempotent(values in column_strategy()) {
        let schema = Schema::builder("s").column("n", ranged_rule()).build();
        let table = table_of(vec![("n", values)]);

        prop_assert_eq!(schema.validate(&table), schema.validate(&table));
    }
}
