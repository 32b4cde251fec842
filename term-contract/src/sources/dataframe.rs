//! DataFusion query results as contract tables.

use super::{table_from_batches, MemoryTable};
use crate::prelude::*;
use datafusion::prelude::{DataFrame, SessionContext};
use tracing::{debug, instrument};

/// Executes `df` and converts the collected batches into a [`MemoryTable`].
pub async fn table_from_dataframe(df: DataFrame) -> Result<MemoryTable> {
    let batches = df.collect().await?;
    table_from_batches(&batches)
}

/// Reads the table registered as `table_name` in `ctx`.
///
/// # Examples
///
/// ```rust
/// use datafusion::prelude::*;
/// use term_contract::core::{ColumnRule, DataType, Schema};
/// use term_contract::sources::table_from_context;
///
/// # async fn example() -> term_contract::prelude::Result<()> {
/// let ctx = SessionContext::new();
/// ctx.register_csv("orders", "orders.csv", CsvReadOptions::new()).await?;
///
/// let schema = Schema::builder("orders")
///     .column("status", ColumnRule::new(DataType::String).with_allowed(["open", "closed"]))
///     .build();
/// schema.ensure_valid(&table_from_context(&ctx, "orders").await?)?;
/// # Ok(())
/// # }
/// ```
#[instrument(skip(ctx))]
pub async fn table_from_context(ctx: &SessionContext, table_name: &str) -> Result<MemoryTable> {
    let df = ctx.table(table_name).await?;
    let table = table_from_dataframe(df).await?;
    debug!(
        table.name = %table_name,
        table.rows = table.num_rows(),
        "Collected table for validation"
    );
    Ok(table)
}
