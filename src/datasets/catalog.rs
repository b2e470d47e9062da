//! Discovery of tables in an embedded DuckDB catalog.

use super::canonical::SqlType;
use super::types::{DataTable, DataTableColumn};
use crate::config::IntrospectionConfig;
use crate::error::{Result, ResultExt as _};
use duckdb::{Connection, params};

const TABLES_QUERY: &str = "SELECT table_catalog, table_schema, table_name, table_type \
     FROM information_schema.tables \
     ORDER BY table_catalog, table_schema, table_name";

const COLUMNS_QUERY: &str = "SELECT column_name, data_type \
     FROM information_schema.columns \
     WHERE table_catalog = ? AND table_schema = ? AND table_name = ? \
     ORDER BY ordinal_position";

#[derive(Debug, Clone, PartialEq, Eq)]
struct TableRef {
    catalog: String,
    schema: String,
    name: String,
    is_view: bool,
}

/// Lists every user table visible to a DuckDB connection.
///
/// Each pass is all-or-nothing: if any catalog query fails the whole pass
/// returns [`crate::error::DatasetError::Introspection`].
pub struct CatalogIntrospector<'a> {
    conn: &'a Connection,
    config: &'a IntrospectionConfig,
}

impl<'a> CatalogIntrospector<'a> {
    pub fn new(conn: &'a Connection, config: &'a IntrospectionConfig) -> Self {
        Self { conn, config }
    }

    /// One [`DataTable`] per table, ordered by catalog, schema and name.
    ///
    /// Row counts are not computed; `num_rows` is always `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection is unusable or any metadata query
    /// fails. No partial list is returned.
    pub fn datasets(&self) -> Result<Vec<DataTable>> {
        let tables = self.list_tables()?;

        let datasets = tables
            .iter()
            .map(|table| {
                let columns = self.list_columns(table)?;
                tracing::debug!(
                    catalog = %table.catalog,
                    schema = %table.schema,
                    table = %table.name,
                    columns = columns.len(),
                    "Introspected table"
                );
                Ok(DataTable::sql_engine(
                    &table.catalog,
                    &table.schema,
                    &table.name,
                    columns,
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(tables = datasets.len(), "Catalog introspection complete");
        Ok(datasets)
    }

    fn list_tables(&self) -> Result<Vec<TableRef>> {
        let mut stmt = self
            .conn
            .prepare(TABLES_QUERY)
            .context("Failed to prepare table listing")?;

        let rows = stmt
            .query_map([], |row| {
                let table_type: String = row.get(3)?;
                Ok(TableRef {
                    catalog: row.get(0)?,
                    schema: row.get(1)?,
                    name: row.get(2)?,
                    is_view: table_type.eq_ignore_ascii_case("VIEW"),
                })
            })
            .context("Failed to list tables")?
            .collect::<duckdb::Result<Vec<_>>>()
            .context("Failed to read table listing")?;

        Ok(rows
            .into_iter()
            .filter(|t| self.config.include_views || !t.is_view)
            .filter(|t| !self.config.is_catalog_excluded(&t.catalog))
            .filter(|t| !self.config.is_schema_excluded(&t.schema))
            .collect())
    }

    fn list_columns(&self, table: &TableRef) -> Result<Vec<DataTableColumn>> {
        let qualified = || format!("{}.{}.{}", table.catalog, table.schema, table.name);

        let mut stmt = self
            .conn
            .prepare(COLUMNS_QUERY)
            .with_context(|| format!("Failed to prepare column listing for {}", qualified()))?;

        let columns = stmt
            .query_map(params![table.catalog, table.schema, table.name], |row| {
                let name: String = row.get(0)?;
                let data_type: String = row.get(1)?;
                Ok(DataTableColumn::from_native(name, &SqlType(&data_type)))
            })
            .with_context(|| format!("Failed to list columns of {}", qualified()))?
            .collect::<duckdb::Result<Vec<_>>>()
            .with_context(|| format!("Failed to read columns of {}", qualified()))?;

        Ok(columns)
    }
}

/// [`CatalogIntrospector::datasets`] with the default configuration.
///
/// # Errors
///
/// See [`CatalogIntrospector::datasets`].
pub fn datasets_from_duckdb(conn: &Connection) -> Result<Vec<DataTable>> {
    let config = IntrospectionConfig::default();
    CatalogIntrospector::new(conn, &config).datasets()
}
