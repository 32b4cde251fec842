//! Adapters exposing concrete table representations through [`Table`](crate::core::Table).
//!
//! Loading data from files or databases is left to the caller; these
//! adapters only wrap data that is already in memory or in a DataFusion
//! session:
//!
//! - [`MemoryTable`]: columns of [`Value`](crate::core::Value)s, positional or labelled rows
//! - [`table_from_batches`]: Arrow record batches
//! - [`table_from_dataframe`] / [`table_from_context`]: DataFusion results

mod dataframe;
mod memory;
mod record_batch;

pub use dataframe::{table_from_context, table_from_dataframe};
pub use memory::{MemoryTable, MemoryTableBuilder};
pub use record_batch::table_from_batches;
