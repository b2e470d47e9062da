//! Error types for dataset discovery.
//!
//! Only two things can go wrong during a pass: the SQL engine refuses a
//! catalog query, or a caller-supplied configuration cannot be read. Native
//! types that are not understood and session variables that are not tables
//! are never errors; they degrade to `unknown` or are skipped.
//!
//! ```
//! use tablescout::error::DatasetError;
//!
//! fn describe(err: &DatasetError) -> &'static str {
//!     match err {
//!         DatasetError::Introspection(_) => "catalog pass failed",
//!         DatasetError::Config(_) => "bad configuration",
//!         _ => "other",
//!     }
//! }
//! ```

use std::fmt;

/// Main error type for tablescout operations.
#[derive(Debug)]
pub enum DatasetError {
    /// The SQL engine connection or one of its catalog queries failed.
    /// Aborts the whole introspection pass.
    Introspection(String),

    /// Dataframe schema resolution errors (Polars)
    DataProcessing(String),

    /// Configuration errors
    Config(String),

    /// I/O errors
    Io(std::io::Error),

    /// Generic error with context
    Other(String),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Introspection(msg) => write!(f, "Catalog introspection failed: {msg}"),
            Self::DataProcessing(msg) => write!(f, "Data processing error: {msg}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DatasetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<duckdb::Error> for DatasetError {
    fn from(err: duckdb::Error) -> Self {
        Self::Introspection(err.to_string())
    }
}

impl From<polars::error::PolarsError> for DatasetError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

impl From<anyhow::Error> for DatasetError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(format!("{err:#}"))
    }
}

/// Result type alias for tablescout operations.
pub type Result<T> = std::result::Result<T, DatasetError>;

/// Extension trait to add context to results.
///
/// Context keeps the category of the underlying error, so a failed catalog
/// query stays an [`DatasetError::Introspection`] after being annotated.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<DatasetError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| prefix(e.into(), &msg.into()))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| prefix(e.into(), &f()))
    }
}

fn prefix(err: DatasetError, msg: &str) -> DatasetError {
    match err {
        DatasetError::Introspection(inner) => DatasetError::Introspection(format!("{msg}: {inner}")),
        DatasetError::DataProcessing(inner) => {
            DatasetError::DataProcessing(format!("{msg}: {inner}"))
        }
        DatasetError::Config(inner) => DatasetError::Config(format!("{msg}: {inner}")),
        other => DatasetError::Other(format!("{msg}: {other}")),
    }
}
