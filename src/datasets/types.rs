//! Dataset descriptions shared by every introspection source.

use super::canonical::NativeType;
use crate::error::{DatasetError, Result};
use serde::{Deserialize, Serialize};

/// Semantic kind of a column, independent of where it came from.
#[derive(Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash, Debug)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Boolean,
    Integer,
    Number,
    String,
    Date,
    Time,
    #[serde(rename = "datetime")]
    DateTime,
    Unknown,
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "datetime",
            Self::Unknown => "unknown",
        }
    }
}

/// Where a dataset was found.
#[derive(Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash, Debug)]
pub enum SourceType {
    /// A table or view in the embedded SQL engine's catalog.
    #[serde(rename = "duckdb")]
    SqlEngine,
    /// A dataframe bound to a session variable.
    #[serde(rename = "local")]
    Local,
}

/// Source name used for in-process data.
pub const MEMORY_SOURCE: &str = "memory";

/// One column within a [`DataTable`].
#[derive(Clone, Deserialize, Serialize, PartialEq, Eq, Debug)]
pub struct DataTableColumn {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ColumnType,
    /// Native type label exactly as the origin reported it.
    pub external_type: String,
}

impl DataTableColumn {
    pub fn new(name: impl Into<String>, kind: ColumnType, external_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            external_type: external_type.into(),
        }
    }

    /// Builds a column from any native type descriptor, canonicalizing it.
    pub fn from_native(name: impl Into<String>, native: &dyn NativeType) -> Self {
        Self::new(name, native.canonical(), native.label())
    }
}

/// A discovered dataset.
///
/// Snapshots are rebuilt wholesale on each pass; nothing here is mutated in
/// place, so the fields stay private and `num_columns` cannot drift from
/// `columns`. Deserialization checks the same invariants.
#[derive(Clone, Deserialize, Serialize, PartialEq, Eq, Debug)]
#[serde(try_from = "RawDataTable")]
pub struct DataTable {
    name: String,
    source_type: SourceType,
    source: String,
    num_rows: Option<usize>,
    num_columns: usize,
    variable_name: Option<String>,
    columns: Vec<DataTableColumn>,
}

#[derive(Deserialize)]
struct RawDataTable {
    name: String,
    source_type: SourceType,
    source: String,
    num_rows: Option<usize>,
    num_columns: usize,
    variable_name: Option<String>,
    columns: Vec<DataTableColumn>,
}

impl TryFrom<RawDataTable> for DataTable {
    type Error = DatasetError;

    fn try_from(raw: RawDataTable) -> Result<Self> {
        if raw.name.is_empty() {
            return Err(DatasetError::DataProcessing(
                "Table name must not be empty".to_owned(),
            ));
        }
        if raw.num_columns != raw.columns.len() {
            return Err(DatasetError::DataProcessing(format!(
                "Table {} declares {} columns but lists {}",
                raw.name,
                raw.num_columns,
                raw.columns.len()
            )));
        }
        if raw.columns.iter().any(|c| c.name.is_empty()) {
            return Err(DatasetError::DataProcessing(format!(
                "Table {} has a column with an empty name",
                raw.name
            )));
        }

        Ok(Self {
            name: raw.name,
            source_type: raw.source_type,
            source: raw.source,
            num_rows: raw.num_rows,
            num_columns: raw.num_columns,
            variable_name: raw.variable_name,
            columns: raw.columns,
        })
    }
}

impl DataTable {
    /// A table from the SQL engine, named `catalog.schema.table`.
    pub fn sql_engine(
        catalog: &str,
        schema: &str,
        table: &str,
        columns: Vec<DataTableColumn>,
    ) -> Self {
        Self {
            name: format!("{catalog}.{schema}.{table}"),
            source_type: SourceType::SqlEngine,
            source: catalog.to_owned(),
            num_rows: None,
            num_columns: columns.len(),
            variable_name: None,
            columns,
        }
    }

    /// A dataframe bound to the session variable `variable_name`.
    pub fn local(
        variable_name: &str,
        num_rows: Option<usize>,
        columns: Vec<DataTableColumn>,
    ) -> Self {
        Self {
            name: variable_name.to_owned(),
            source_type: SourceType::Local,
            source: MEMORY_SOURCE.to_owned(),
            num_rows,
            num_columns: columns.len(),
            variable_name: Some(variable_name.to_owned()),
            columns,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source_type(&self) -> SourceType {
        self.source_type
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn num_rows(&self) -> Option<usize> {
        self.num_rows
    }

    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    pub fn variable_name(&self) -> Option<&str> {
        self.variable_name.as_deref()
    }

    pub fn columns(&self) -> &[DataTableColumn] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&DataTableColumn> {
        self.columns.iter().find(|c| c.name == name)
    }
}
