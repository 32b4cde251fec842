//! # Term Contract - Column-level data contracts for Rust
//!
//! Term Contract checks tables against a declared schema: for every named
//! column, an expected type and optional minimum, maximum and allowed values.
//! A validation never stops at the first problem. It walks the whole table
//! and reports every violation at once, each tagged with its column, row and
//! offending value.
//!
//! ## Quick Start
//!
//! ```rust
//! use term_contract::prelude::*;
//! use term_contract::sources::MemoryTable;
//!
//! let schema = Schema::builder("orders")
//!     .column("quantity", ColumnRule::new(DataType::Integer).with_min(1))
//!     .column("status", ColumnRule::new(DataType::String).with_allowed(["open", "closed"]))
//!     .build();
//!
//! let table = MemoryTable::builder()
//!     .column_from("quantity", [3, 0])
//!     .column_from("status", ["open", "lost"])
//!     .build()?;
//!
//! match schema.validate(&table) {
//!     Ok(()) => println!("contract holds"),
//!     Err(violations) => {
//!         assert_eq!(violations.len(), 2);
//!         for record in violations.records() {
//!             println!("{record}");
//!         }
//!     }
//! }
//! # Ok::<(), TermError>(())
//! ```
//!
//! ## Architecture
//!
//! - **`core`**: values, [`ColumnRule`](core::ColumnRule), [`Schema`](core::Schema),
//!   the [`Table`](core::Table) access trait and the violation records
//! - **`sources`**: adapters for in-memory, Arrow and DataFusion tables
//! - **`config`**: JSON schema definitions
//! - **`logging`**: `tracing` configuration helpers
//! - **`error`**: the crate error type
//!
//! ## Validating Arrow and DataFusion data
//!
//! ```rust
//! use arrow::array::{ArrayRef, Int64Array};
//! use arrow::record_batch::RecordBatch;
//! use std::sync::Arc;
//! use term_contract::prelude::*;
//! use term_contract::sources::table_from_batches;
//!
//! let batch = RecordBatch::try_from_iter(vec![(
//!     "age",
//!     Arc::new(Int64Array::from(vec![Some(30), None])) as ArrayRef,
//! )])?;
//!
//! let schema = Schema::builder("people")
//!     .column("age", ColumnRule::new(DataType::Integer))
//!     .build();
//!
//! let err = schema.validate(&table_from_batches(&[batch])?).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "Column 'age' has wrong type, expected integer (row 1, value=null)"
//! );
//! # Ok::<(), TermError>(())
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod prelude;
pub mod sources;
