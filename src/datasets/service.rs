//! Orchestration of one discovery pass and snapshot invalidation.

use super::catalog::CatalogIntrospector;
use super::statements::mutating_verbs;
use super::types::DataTable;
use super::variables::VariableIntrospector;
use crate::config::IntrospectionConfig;
use crate::error::Result;
use chrono::{DateTime, Utc};
use duckdb::Connection;
use serde::{Deserialize, Serialize};
use std::any::Any;

/// SQL datasets first, in catalog order, then variable datasets in the
/// order the variables were given.
///
/// # Errors
///
/// Fails if catalog introspection fails. Variables never cause an error.
pub fn collect_datasets<'a, I>(
    conn: &Connection,
    variables: I,
    config: &IntrospectionConfig,
    introspector: &VariableIntrospector,
) -> Result<Vec<DataTable>>
where
    I: IntoIterator<Item = (&'a str, &'a dyn Any)>,
{
    let mut tables = if config.include_sql_engine {
        CatalogIntrospector::new(conn, config).datasets()?
    } else {
        Vec::new()
    };

    if config.include_variables {
        tables.extend(introspector.datasets(variables));
    }

    Ok(tables)
}

/// One complete discovery result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub tables: Vec<DataTable>,
    pub captured_at: DateTime<Utc>,
}

/// Holds the latest snapshot and decides when it must be rebuilt.
///
/// Callers report each SQL statement through [`Self::observe_statement`]
/// before running it; the next [`Self::snapshot`] call then refreshes if
/// that statement could have changed the catalog.
pub struct DatasetCatalog {
    config: IntrospectionConfig,
    introspector: VariableIntrospector,
    current: Option<CatalogSnapshot>,
    stale: bool,
}

impl Default for DatasetCatalog {
    fn default() -> Self {
        Self::new(IntrospectionConfig::default())
    }
}

impl DatasetCatalog {
    pub fn new(config: IntrospectionConfig) -> Self {
        Self {
            config,
            introspector: VariableIntrospector::default(),
            current: None,
            stale: true,
        }
    }

    pub fn with_introspector(mut self, introspector: VariableIntrospector) -> Self {
        self.introspector = introspector;
        self
    }

    pub fn config(&self) -> &IntrospectionConfig {
        &self.config
    }

    /// The last successful snapshot, without refreshing.
    pub fn current(&self) -> Option<&CatalogSnapshot> {
        self.current.as_ref()
    }

    pub fn is_stale(&self) -> bool {
        self.stale || self.current.is_none()
    }

    /// Marks the snapshot stale if `sql` could mutate the catalog.
    /// Returns whether it did.
    pub fn observe_statement(&mut self, sql: &str) -> bool {
        let verbs = mutating_verbs(sql);
        if verbs.is_empty() {
            return false;
        }
        tracing::debug!(?verbs, "Statement invalidates dataset snapshot");
        self.stale = true;
        true
    }

    /// Marks the snapshot stale, e.g. after session variables changed.
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    /// The current snapshot, refreshed first if stale or missing.
    ///
    /// # Errors
    ///
    /// See [`Self::refresh`].
    pub fn snapshot<'a, I>(&mut self, conn: &Connection, variables: I) -> Result<&CatalogSnapshot>
    where
        I: IntoIterator<Item = (&'a str, &'a dyn Any)>,
    {
        if self.is_stale() {
            self.refresh(conn, variables)
        } else {
            self.current
                .as_ref()
                .ok_or_else(|| crate::error::DatasetError::Other("No snapshot captured".to_owned()))
        }
    }

    /// Runs a full discovery pass and replaces the snapshot.
    ///
    /// # Errors
    ///
    /// On failure the previous snapshot is kept, still marked stale, and the
    /// error is returned.
    pub fn refresh<'a, I>(&mut self, conn: &Connection, variables: I) -> Result<&CatalogSnapshot>
    where
        I: IntoIterator<Item = (&'a str, &'a dyn Any)>,
    {
        let tables = collect_datasets(conn, variables, &self.config, &self.introspector)
            .inspect_err(|e| tracing::error!(error = %e, "Dataset discovery failed"))?;

        tracing::info!(tables = tables.len(), "Dataset snapshot refreshed");
        self.stale = false;
        Ok(&*self.current.insert(CatalogSnapshot {
            tables,
            captured_at: Utc::now(),
        }))
    }
}
