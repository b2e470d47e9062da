//! Introspection settings.
//!
//! Persisted as JSON. Missing fields take their defaults so older config
//! files keep loading.

use crate::error::{DatasetError, Result, ResultExt as _};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntrospectionConfig {
    /// Whether to list tables from the SQL engine's catalog
    pub include_sql_engine: bool,
    /// Whether to list dataframes bound to session variables
    pub include_variables: bool,
    /// Whether SQL views are listed alongside base tables
    pub include_views: bool,
    /// Catalogs never listed (matched case-insensitively)
    pub excluded_catalogs: Vec<String>,
    /// Schemas never listed (matched case-insensitively)
    pub excluded_schemas: Vec<String>,
}

impl Default for IntrospectionConfig {
    fn default() -> Self {
        Self {
            include_sql_engine: true,
            include_variables: true,
            include_views: true,
            excluded_catalogs: vec!["system".to_owned()],
            excluded_schemas: vec!["information_schema".to_owned(), "pg_catalog".to_owned()],
        }
    }
}

impl IntrospectionConfig {
    /// Default location: `<config dir>/tablescout/config.json`.
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DatasetError::Config("Failed to get config directory".to_owned()))?;
        Ok(config_dir.join("tablescout").join("config.json"))
    }

    /// Load from the default location, or defaults if no file exists.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        serde_json::from_str::<Self>(&contents)
            .with_context(|| format!("Failed to parse config JSON in {}", path.display()))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    pub fn is_catalog_excluded(&self, catalog: &str) -> bool {
        self.excluded_catalogs
            .iter()
            .any(|c| c.eq_ignore_ascii_case(catalog))
    }

    pub fn is_schema_excluded(&self, schema: &str) -> bool {
        self.excluded_schemas
            .iter()
            .any(|s| s.eq_ignore_ascii_case(schema))
    }
}
