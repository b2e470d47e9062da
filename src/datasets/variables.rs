//! Discovery of dataframes bound to session variables.
//!
//! A value counts as a table when it exposes the [`DataFrameLike`]
//! capabilities: named columns, a native dtype per column, and optionally a
//! cheap row count. Values are matched by runtime probes over `&dyn Any`
//! rather than by a fixed list of types, so eager, lazy and single-column
//! frames from different libraries can sit side by side in one session.
//!
//! ```
//! use polars::prelude::*;
//! use std::any::Any;
//! use tablescout::datasets::datasets_from_variables;
//!
//! let df = df!("A" => &[1, 2, 3], "B" => &["a", "a", "a"])?;
//! let answer = 42_i64;
//! let tables = datasets_from_variables([
//!     ("my_df", &df as &dyn Any),
//!     ("answer", &answer as &dyn Any),
//! ]);
//! assert_eq!(tables.len(), 1);
//! # Ok::<(), PolarsError>(())
//! ```

use super::types::{DataTable, DataTableColumn};
use crate::error::Result;
use polars::prelude::*;
use std::any::Any;
use std::sync::Arc;

/// The capability set that makes a value introspectable as a table.
pub trait DataFrameLike {
    /// Columns in declaration order, with native dtypes canonicalized.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be resolved, e.g. a lazy plan
    /// that references a missing column.
    fn columns(&self) -> Result<Vec<DataTableColumn>>;

    /// Row count, if it can be known without materializing data.
    fn num_rows(&self) -> Option<usize>;
}

impl DataFrameLike for DataFrame {
    fn columns(&self) -> Result<Vec<DataTableColumn>> {
        Ok(self
            .get_columns()
            .iter()
            .map(|c| DataTableColumn::from_native(c.name().as_str(), c.dtype()))
            .collect())
    }

    fn num_rows(&self) -> Option<usize> {
        Some(self.height())
    }
}

impl DataFrameLike for LazyFrame {
    fn columns(&self) -> Result<Vec<DataTableColumn>> {
        // Resolving the schema walks the plan but reads no data.
        let schema = self.clone().collect_schema()?;
        Ok(schema
            .iter()
            .map(|(name, dtype)| DataTableColumn::from_native(name.as_str(), dtype))
            .collect())
    }

    fn num_rows(&self) -> Option<usize> {
        None
    }
}

impl DataFrameLike for Series {
    fn columns(&self) -> Result<Vec<DataTableColumn>> {
        Ok(vec![DataTableColumn::from_native(
            self.name().as_str(),
            self.dtype(),
        )])
    }

    fn num_rows(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<T: DataFrameLike + ?Sized> DataFrameLike for Box<T> {
    fn columns(&self) -> Result<Vec<DataTableColumn>> {
        (**self).columns()
    }

    fn num_rows(&self) -> Option<usize> {
        (**self).num_rows()
    }
}

impl<T: DataFrameLike + ?Sized> DataFrameLike for Arc<T> {
    fn columns(&self) -> Result<Vec<DataTableColumn>> {
        (**self).columns()
    }

    fn num_rows(&self) -> Option<usize> {
        (**self).num_rows()
    }
}

/// Recognizes one concrete representation of a dataframe.
pub type Probe = fn(&dyn Any) -> Option<&dyn DataFrameLike>;

/// Probe for any concrete `T` implementing [`DataFrameLike`].
pub fn probe<T: DataFrameLike + 'static>(value: &dyn Any) -> Option<&dyn DataFrameLike> {
    value.downcast_ref::<T>().map(|v| v as &dyn DataFrameLike)
}

/// Turns session variables into [`DataTable`]s.
#[derive(Clone)]
pub struct VariableIntrospector {
    probes: Vec<Probe>,
}

impl Default for VariableIntrospector {
    fn default() -> Self {
        Self {
            probes: vec![
                probe::<DataFrame>,
                probe::<LazyFrame>,
                probe::<Series>,
                probe::<Box<dyn DataFrameLike>>,
                probe::<Arc<dyn DataFrameLike>>,
                probe::<Box<dyn DataFrameLike + Send + Sync>>,
                probe::<Arc<dyn DataFrameLike + Send + Sync>>,
            ],
        }
    }
}

impl VariableIntrospector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an extra probe, tried after the built-in ones.
    pub fn with_probe(mut self, probe: Probe) -> Self {
        self.probes.push(probe);
        self
    }

    /// Returns the value's table capabilities, if any probe recognizes it.
    pub fn recognize<'v>(&self, value: &'v dyn Any) -> Option<&'v dyn DataFrameLike> {
        self.probes.iter().find_map(|probe| probe(value))
    }

    /// One [`DataTable`] per dataframe-like variable, in input order.
    ///
    /// Values that are not tables are skipped. A table whose schema cannot
    /// be resolved, or that has an empty variable or column name, is logged
    /// and skipped as well.
    pub fn datasets<'a, I>(&self, variables: I) -> Vec<DataTable>
    where
        I: IntoIterator<Item = (&'a str, &'a dyn Any)>,
    {
        variables
            .into_iter()
            .filter_map(|(name, value)| self.describe(name, value))
            .collect()
    }

    fn describe(&self, name: &str, value: &dyn Any) -> Option<DataTable> {
        let frame = self.recognize(value)?;
        if name.is_empty() {
            tracing::warn!("Skipping dataframe bound to an empty variable name");
            return None;
        }
        match frame.columns() {
            Ok(columns) if columns.iter().any(|c| c.name.is_empty()) => {
                tracing::warn!(variable = name, "Skipping dataframe with an unnamed column");
                None
            }
            Ok(columns) => {
                tracing::debug!(variable = name, columns = columns.len(), "Found dataframe");
                Some(DataTable::local(name, frame.num_rows(), columns))
            }
            Err(e) => {
                tracing::warn!(variable = name, error = %e, "Skipping dataframe with unresolvable schema");
                None
            }
        }
    }
}

/// [`VariableIntrospector::datasets`] with the default probes.
pub fn datasets_from_variables<'a, I>(variables: I) -> Vec<DataTable>
where
    I: IntoIterator<Item = (&'a str, &'a dyn Any)>,
{
    VariableIntrospector::default().datasets(variables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets::types::{ColumnType, SourceType};
    use anyhow::Result;

    fn sample_df() -> Result<DataFrame> {
        Ok(df!(
            "A" => &[1_i64, 2, 3],
            "B" => &["a", "a", "a"]
        )?)
    }

    fn assert_sample_table(table: &DataTable) {
        assert_eq!(table.name(), "my_df");
        assert_eq!(table.source_type(), SourceType::Local);
        assert_eq!(table.source(), "memory");
        assert_eq!(table.variable_name(), Some("my_df"));
        assert_eq!(table.num_columns(), 2);
        assert!(matches!(table.num_rows(), None | Some(3)));
        assert_eq!(table.columns()[0].name, "A");
        assert_eq!(table.columns()[0].kind, ColumnType::Integer);
        assert_eq!(table.columns()[1].name, "B");
        assert_eq!(table.columns()[1].kind, ColumnType::String);
    }

    #[test]
    fn test_eager_dataframe() -> Result<()> {
        let df = sample_df()?;
        let non_df = 123_i32;

        let tables = datasets_from_variables([
            ("my_df", &df as &dyn Any),
            ("non_df", &non_df as &dyn Any),
        ]);

        assert_eq!(tables.len(), 1);
        assert_sample_table(&tables[0]);
        assert_eq!(tables[0].num_rows(), Some(3));
        assert_eq!(tables[0].columns()[0].external_type, "i64");
        assert_eq!(tables[0].columns()[1].external_type, "str");
        Ok(())
    }

    #[test]
    fn test_lazy_frame_has_unknown_row_count() -> Result<()> {
        let lf = sample_df()?.lazy();
        let non_df = "not a table".to_owned();

        let tables = datasets_from_variables([
            ("my_df", &lf as &dyn Any),
            ("non_df", &non_df as &dyn Any),
        ]);

        assert_eq!(tables.len(), 1);
        assert_sample_table(&tables[0]);
        assert_eq!(tables[0].num_rows(), None);
        Ok(())
    }

    #[test]
    fn test_series_is_single_column_table() {
        let s = Series::new("price".into(), &[1.5_f64, 2.5]);

        let tables = datasets_from_variables([("prices", &s as &dyn Any)]);

        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].num_rows(), Some(2));
        assert_eq!(tables[0].num_columns(), 1);
        assert_eq!(tables[0].columns()[0].name, "price");
        assert_eq!(tables[0].columns()[0].kind, ColumnType::Number);
    }

    #[test]
    fn test_unresolvable_lazy_schema_is_skipped() -> Result<()> {
        let broken = sample_df()?.lazy().select([col("missing")]);
        let df = sample_df()?;

        let tables = datasets_from_variables([
            ("broken", &broken as &dyn Any),
            ("my_df", &df as &dyn Any),
        ]);

        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].name(), "my_df");
        Ok(())
    }

    struct Grid {
        headers: Vec<(&'static str, &'static str)>,
    }

    impl DataFrameLike for Grid {
        fn columns(&self) -> crate::error::Result<Vec<DataTableColumn>> {
            Ok(self
                .headers
                .iter()
                .map(|(name, ty)| {
                    DataTableColumn::from_native(*name, &crate::datasets::canonical::SqlType(*ty))
                })
                .collect())
        }

        fn num_rows(&self) -> Option<usize> {
            None
        }
    }

    #[test]
    fn test_foreign_library_via_trait_object() {
        let grid: Arc<dyn DataFrameLike> = Arc::new(Grid {
            headers: vec![("id", "BIGINT"), ("seen", "DATE")],
        });

        let tables = datasets_from_variables([("grid", &grid as &dyn Any)]);

        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].columns()[1].kind, ColumnType::Date);
    }

    #[test]
    fn test_foreign_library_via_registered_probe() {
        let grid = Grid {
            headers: vec![("flag", "BOOLEAN")],
        };

        assert!(VariableIntrospector::default().recognize(&grid).is_none());

        let introspector = VariableIntrospector::new().with_probe(probe::<Grid>);
        let tables = introspector.datasets([("grid", &grid as &dyn Any)]);

        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].columns()[0].kind, ColumnType::Boolean);
    }

    #[test]
    fn test_empty_names_are_skipped() -> Result<()> {
        let df = sample_df()?;
        let unnamed_column: Arc<dyn DataFrameLike> = Arc::new(Grid {
            headers: vec![("id", "BIGINT"), ("", "VARCHAR")],
        });

        let tables = datasets_from_variables([
            ("", &df as &dyn Any),
            ("grid", &unnamed_column as &dyn Any),
            ("my_df", &df as &dyn Any),
        ]);

        assert_eq!(tables.len(), 1);
        assert_sample_table(&tables[0]);
        Ok(())
    }

    #[test]
    fn test_variable_order_is_preserved() -> Result<()> {
        let first = sample_df()?;
        let second = sample_df()?.lazy();

        let tables = datasets_from_variables([
            ("zeta", &first as &dyn Any),
            ("alpha", &second as &dyn Any),
        ]);

        let names: Vec<&str> = tables.iter().map(DataTable::name).collect();
        assert_eq!(names, ["zeta", "alpha"]);
        Ok(())
    }
}
