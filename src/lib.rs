//! # Tablescout - Dataset Discovery for Interactive Sessions
//!
//! Tablescout finds the tabular datasets available to a session and
//! describes them uniformly: name, origin, row and column counts, and for
//! each column a canonical type plus the native type label.
//!
//! ## Core Modules
//!
//! - [`datasets`]: Discovery from DuckDB and session variables
//!   - [`datasets::canonical`]: Native type to canonical kind mapping
//!   - [`datasets::statements`]: Detection of catalog-mutating SQL
//! - [`config`]: Introspection settings
//! - [`error`]: Error types and handling utilities
//! - [`logging`]: Tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```no_run
//! use tablescout::datasets::{datasets_from_duckdb, has_updates_to_datasource};
//!
//! # fn example() -> anyhow::Result<()> {
//! let conn = duckdb::Connection::open_in_memory()?;
//! conn.execute_batch("CREATE TABLE cars (name TEXT, price DOUBLE)")?;
//!
//! for table in datasets_from_duckdb(&conn)? {
//!     for col in table.columns() {
//!         println!("{}.{}: {} ({})", table.name(), col.name, col.kind, col.external_type);
//!     }
//! }
//!
//! assert!(has_updates_to_datasource("DROP TABLE cars"));
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod datasets;
pub mod error;
pub mod logging;
