//! Arrow record batches as contract tables.

use super::MemoryTable;
use crate::core::Value;
use crate::prelude::*;
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{
    DataType as ArrowDataType, Date32Type, Float64Type, Int64Type, TimeUnit,
    TimestampMicrosecondType, UInt64Type,
};
use arrow::record_batch::RecordBatch;
use tracing::{debug, instrument};

/// Converts record batches into a [`MemoryTable`].
///
/// Rows are numbered by position, continuing across batches. Dictionary
/// columns are unpacked to their value type and decimals become floats. All batches
/// must share the schema of the first one; an empty slice yields an empty
/// table with no columns.
#[instrument(skip(batches), fields(batch_count = batches.len()))]
pub fn table_from_batches(batches: &[RecordBatch]) -> Result<MemoryTable> {
    let Some(first) = batches.first() else {
        return Ok(MemoryTable::default());
    };
    let schema = first.schema();

    if let Some(pos) = batches.iter().position(|b| b.schema() != schema) {
        return Err(TermError::invalid_table(format!(
            "batch {pos} does not match the schema of the first batch"
        )));
    }

    let num_rows: usize = batches.iter().map(RecordBatch::num_rows).sum();
    let mut builder = MemoryTable::builder();

    for (i, field) in schema.fields().iter().enumerate() {
        let mut values = Vec::with_capacity(num_rows);
        for batch in batches {
            append_values(field.name(), batch.column(i), &mut values)?;
        }
        builder = builder.column(field.name().as_str(), values);
    }

    debug!(
        rows = num_rows,
        columns = schema.fields().len(),
        "Converted record batches"
    );
    builder.build()
}

fn append_values(column: &str, array: &ArrayRef, out: &mut Vec<Value>) -> Result<()> {
    match array.data_type() {
        ArrowDataType::Null => out.extend((0..array.len()).map(|_| Value::Null)),
        ArrowDataType::Boolean => {
            out.extend(array.as_boolean().iter().map(Value::from));
        }
        ArrowDataType::Int8
        | ArrowDataType::Int16
        | ArrowDataType::Int32
        | ArrowDataType::Int64
        | ArrowDataType::UInt8
        | ArrowDataType::UInt16
        | ArrowDataType::UInt32 => {
            let ints = cast(array, &ArrowDataType::Int64)?;
            out.extend(ints.as_primitive::<Int64Type>().iter().map(Value::from));
        }
        ArrowDataType::UInt64 => {
            for v in array.as_primitive::<UInt64Type>().iter() {
                let value = match v {
                    Some(v) => Value::Integer(i64::try_from(v).map_err(|_| {
                        TermError::invalid_table(format!(
                            "column '{column}' value {v} does not fit in a 64-bit signed integer"
                        ))
                    })?),
                    None => Value::Null,
                };
                out.push(value);
            }
        }
        ArrowDataType::Float16 | ArrowDataType::Float32 | ArrowDataType::Float64 => {
            let floats = cast(array, &ArrowDataType::Float64)?;
            out.extend(floats.as_primitive::<Float64Type>().iter().map(Value::from));
        }
        ArrowDataType::Utf8 | ArrowDataType::LargeUtf8 | ArrowDataType::Utf8View => {
            let strings = cast(array, &ArrowDataType::Utf8)?;
            out.extend(strings.as_string::<i32>().iter().map(Value::from));
        }
        ArrowDataType::Date32 | ArrowDataType::Date64 => {
            let dates = cast(array, &ArrowDataType::Date32)?;
            let dates = dates.as_primitive::<Date32Type>();
            out.extend((0..dates.len()).map(|i| {
                if dates.is_null(i) {
                    Value::Null
                } else {
                    dates.value_as_date(i).into()
                }
            }));
        }
        ArrowDataType::Timestamp(_, _) => {
            let micros = cast(
                array,
                &ArrowDataType::Timestamp(TimeUnit::Microsecond, None),
            )?;
            let micros = micros.as_primitive::<TimestampMicrosecondType>();
            out.extend((0..micros.len()).map(|i| {
                if micros.is_null(i) {
                    Value::Null
                } else {
                    micros.value_as_datetime(i).into()
                }
            }));
        }
        ArrowDataType::Decimal128(_, _) | ArrowDataType::Decimal256(_, _) => {
            let floats = cast(array, &ArrowDataType::Float64)?;
            out.extend(floats.as_primitive::<Float64Type>().iter().map(Value::from));
        }
        ArrowDataType::Dictionary(_, value_type) => {
            let values = cast(array, value_type)?;
            append_values(column, &values, out)?;
        }
        other => return Err(TermError::unsupported_type(column, other)),
    }
    Ok(())
}
