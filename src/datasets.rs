//! Dataset discovery for an interactive session.
//!
//! Datasets come from two places: the embedded DuckDB catalog and dataframes
//! bound to session variables. Both are described with the same
//! [`DataTable`] shape, with every column's native type reduced to a
//! [`ColumnType`].
//!
//! ## Usage
//!
//! ```no_run
//! use duckdb::Connection;
//! use polars::prelude::*;
//! use std::any::Any;
//! use tablescout::datasets::DatasetCatalog;
//!
//! # fn example() -> anyhow::Result<()> {
//! let conn = Connection::open_in_memory()?;
//! let df = df!("id" => &[1, 2, 3])?;
//! let mut catalog = DatasetCatalog::default();
//!
//! let sql = "CREATE TABLE cars (name TEXT)";
//! catalog.observe_statement(sql);
//! conn.execute_batch(sql)?;
//!
//! for table in &catalog.snapshot(&conn, [("df", &df as &dyn Any)])?.tables {
//!     println!("{} ({} columns)", table.name(), table.num_columns());
//! }
//! # Ok(())
//! # }
//! ```

pub mod canonical;
pub mod catalog;
pub mod service;
pub mod statements;
pub mod types;
pub mod variables;

pub use canonical::{NativeType, SqlType, canonicalize_dtype, canonicalize_sql};
pub use catalog::{CatalogIntrospector, datasets_from_duckdb};
pub use service::{CatalogSnapshot, DatasetCatalog, collect_datasets};
pub use statements::{CatalogVerb, has_updates_to_datasource, mutating_verbs};
pub use types::{ColumnType, DataTable, DataTableColumn, MEMORY_SOURCE, SourceType};
pub use variables::{DataFrameLike, Probe, VariableIntrospector, datasets_from_variables, probe};
