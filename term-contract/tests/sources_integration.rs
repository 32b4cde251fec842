//! Validating data held in Arrow batches and DataFusion sessions.

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::record_batch::RecordBatch;
use datafusion::prelude::SessionContext;
use std::sync::Arc;
use term_contract::prelude::*;
use term_contract::sources::{table_from_batches, table_from_context, table_from_dataframe};

fn orders_batch() -> RecordBatch {
    RecordBatch::try_from_iter(vec![
        (
            "order_id",
            Arc::new(Int64Array::from(vec![1, 2, 3, 4])) as ArrayRef,
        ),
        (
            "status",
            Arc::new(StringArray::from(vec![
                Some("open"),
                Some("shipped"),
                None,
                Some("lost"),
            ])) as ArrayRef,
        ),
        (
            "amount",
            Arc::new(Float64Array::from(vec![19.99, -5.0, 250.0, 1200.0])) as ArrayRef,
        ),
    ])
    .unwrap()
}

fn orders_schema() -> Schema {
    Schema::builder("orders")
        .column("order_id", ColumnRule::new(DataType::Integer).with_min(1))
        .column(
            "status",
            ColumnRule::new(DataType::String).with_allowed(["open", "shipped", "closed"]),
        )
        .column(
            "amount",
            ColumnRule::new(DataType::Float).with_min(0.0).with_max(1000.0),
        )
        .column("customer_id", ColumnRule::new(DataType::Integer))
        .build()
}

const EXPECTED: &[&str] = &[
    "Column 'status' has wrong type, expected string (row 2, value=null)",
    "Column 'status' has invalid value (row 2, value=null)",
    "Column 'status' has invalid value (row 3, value=lost)",
    "Column 'amount' below min 0 (row 1, value=-5)",
    "Column 'amount' above max 1000 (row 3, value=1200)",
    "Missing column: customer_id",
];

#[test]
fn test_validate_record_batches() {
    let table = table_from_batches(&[orders_batch()]).unwrap();
    let err = orders_schema().validate(&table).unwrap_err();
    assert_eq!(err.to_string(), EXPECTED.join("\n"));
}

#[tokio::test]
async fn test_validate_registered_table() {
    let ctx = SessionContext::new();
    ctx.register_batch("orders", orders_batch()).unwrap();

    let table = table_from_context(&ctx, "orders").await.unwrap();
    let err = orders_schema().validate(&table).unwrap_err();

    assert_eq!(err.to_string(), EXPECTED.join("\n"));
}

#[tokio::test]
async fn test_validate_query_result() {
    let ctx = SessionContext::new();
    ctx.register_batch("orders", orders_batch()).unwrap();

    let df = ctx
        .sql("SELECT order_id, status FROM orders WHERE status IN ('open', 'shipped') ORDER BY order_id")
        .await
        .unwrap();
    let table = table_from_dataframe(df).await.unwrap();

    let schema = Schema::builder("open_orders")
        .column("order_id", ColumnRule::new(DataType::Integer).with_min(1))
        .column(
            "status",
            ColumnRule::new(DataType::String).with_allowed(["open", "shipped"]),
        )
        .build();

    assert!(schema.validate(&table).is_ok());
}

#[tokio::test]
async fn test_schema_from_json_against_datafusion() {
    let ctx = SessionContext::new();
    ctx.register_batch("orders", orders_batch()).unwrap();

    let schema = Schema::from_json_str(
        r#"{
            "name": "orders",
            "columns": [
                { "name": "amount", "type": "float", "max": 500 }
            ]
        }"#,
    )
    .unwrap();

    let table = table_from_context(&ctx, "orders").await.unwrap();
    let err = schema.ensure_valid(&table).unwrap_err();
    let contract = err.as_contract().unwrap();

    assert_eq!(contract.len(), 1);
    assert_eq!(
        contract.records()[0].message(),
        "Column 'amount' above max 500 (row 3, value=1200)"
    );
}
