//! Integration tests for a full discovery pass
//!
//! These tests run against a real in-memory DuckDB connection and real
//! Polars frames, and check the descriptions callers receive.

use duckdb::Connection;
use polars::prelude::*;
use std::any::Any;
use tablescout::datasets::{
    ColumnType, DataTable, DataTableColumn, DatasetCatalog, SourceType, datasets_from_duckdb,
    datasets_from_variables, has_updates_to_datasource,
};

#[test]
fn test_has_updates_to_datasource() {
    assert!(!has_updates_to_datasource("hello"));
    assert!(has_updates_to_datasource("ATTACH 'marimo.db'"));
    assert!(has_updates_to_datasource("DETACH marimo"));
    assert!(has_updates_to_datasource("CREATE TABLE cars (name TEXT)"));
    assert!(!has_updates_to_datasource("SELECT 1"));
}

#[test]
fn test_all_duckdb_types() -> anyhow::Result<()> {
    let conn = Connection::open_in_memory()?;
    assert_eq!(datasets_from_duckdb(&conn)?, Vec::<DataTable>::new());

    conn.execute_batch(
        "CREATE TABLE all_types (
            col_boolean BOOLEAN,
            col_tinyint TINYINT,
            col_smallint SMALLINT,
            col_integer INTEGER,
            col_bigint BIGINT,
            col_hugeint HUGEINT,
            col_utinyint UTINYINT,
            col_usmallint USMALLINT,
            col_uinteger UINTEGER,
            col_ubigint UBIGINT,
            col_float FLOAT,
            col_double DOUBLE,
            col_decimal DECIMAL(18,3),
            col_varchar VARCHAR,
            col_date DATE,
            col_time TIME,
            col_timestamp TIMESTAMP,
            col_interval INTERVAL,
            col_blob BLOB,
            col_bit BIT,
            col_uuid UUID,
            col_json JSON
        )",
    )?;

    let expected = [
        ("col_boolean", ColumnType::Boolean, "BOOLEAN"),
        ("col_tinyint", ColumnType::Integer, "TINYINT"),
        ("col_smallint", ColumnType::Integer, "SMALLINT"),
        ("col_integer", ColumnType::Integer, "INTEGER"),
        ("col_bigint", ColumnType::Integer, "BIGINT"),
        ("col_hugeint", ColumnType::Integer, "HUGEINT"),
        ("col_utinyint", ColumnType::Integer, "UTINYINT"),
        ("col_usmallint", ColumnType::Integer, "USMALLINT"),
        ("col_uinteger", ColumnType::Integer, "UINTEGER"),
        ("col_ubigint", ColumnType::Integer, "UBIGINT"),
        ("col_float", ColumnType::Number, "FLOAT"),
        ("col_double", ColumnType::Number, "DOUBLE"),
        ("col_decimal", ColumnType::Number, "DECIMAL(18,3)"),
        ("col_varchar", ColumnType::String, "VARCHAR"),
        ("col_date", ColumnType::Date, "DATE"),
        ("col_time", ColumnType::Time, "TIME"),
        ("col_timestamp", ColumnType::DateTime, "TIMESTAMP"),
        ("col_interval", ColumnType::DateTime, "INTERVAL"),
        ("col_blob", ColumnType::String, "BLOB"),
        ("col_bit", ColumnType::String, "BIT"),
        ("col_uuid", ColumnType::String, "UUID"),
        ("col_json", ColumnType::Unknown, "JSON"),
    ]
    .into_iter()
    .map(|(name, kind, external)| DataTableColumn::new(name, kind, external))
    .collect();

    assert_eq!(
        datasets_from_duckdb(&conn)?,
        vec![DataTable::sql_engine("memory", "main", "all_types", expected)]
    );

    let tables = datasets_from_duckdb(&conn)?;
    let table = tables.first().expect("one table");
    assert_eq!(table.num_columns(), 22);
    assert_eq!(table.num_rows(), None);
    assert_eq!(table.variable_name(), None);
    Ok(())
}

fn frames() -> anyhow::Result<Vec<Box<dyn Any>>> {
    let df = df!("A" => &[1_i64, 2, 3], "B" => &["a", "a", "a"])?;
    let eager: Box<dyn Any> = Box::new(df.clone());
    let lazy: Box<dyn Any> = Box::new(df.lazy());
    Ok(vec![eager, lazy])
}

#[test]
fn test_get_datasets_from_variables() -> anyhow::Result<()> {
    let non_df = 123_i64;

    for frame in frames()? {
        let tables = datasets_from_variables([
            ("my_df", frame.as_ref()),
            ("non_df", &non_df as &dyn Any),
        ]);

        let table = tables.first().expect("dataframe recognized");
        assert_eq!(tables.len(), 1);

        let rows = table.num_rows();
        assert!(rows.is_none() || rows == Some(3));

        // External dtype labels are library-specific and not compared.
        let columns: Vec<(String, ColumnType)> = table
            .columns()
            .iter()
            .map(|c| (c.name.clone(), c.kind))
            .collect();

        assert_eq!(table.name(), "my_df");
        assert_eq!(table.source_type(), SourceType::Local);
        assert_eq!(table.source(), "memory");
        assert_eq!(table.variable_name(), Some("my_df"));
        assert_eq!(table.num_columns(), 2);
        assert_eq!(
            columns,
            vec![
                ("A".to_owned(), ColumnType::Integer),
                ("B".to_owned(), ColumnType::String),
            ]
        );
    }
    Ok(())
}

#[test]
fn test_session_pass_end_to_end() -> anyhow::Result<()> {
    let conn = Connection::open_in_memory()?;
    let mut catalog = DatasetCatalog::default();

    let events = df!(
        "at" => &[1_i64, 2],
        "ok" => &[true, false]
    )?;
    let vars: [(&str, &dyn Any); 1] = [("events", &events)];

    assert_eq!(catalog.snapshot(&conn, vars)?.tables.len(), 1);

    let sql = "-- load\nCREATE TABLE cars (name TEXT, price DOUBLE); SELECT * FROM cars";
    assert!(catalog.observe_statement(sql));
    conn.execute_batch(sql)?;

    let snapshot = catalog.snapshot(&conn, vars)?;
    let names: Vec<&str> = snapshot.tables.iter().map(DataTable::name).collect();
    assert_eq!(names, ["memory.main.cars", "events"]);

    for table in &snapshot.tables {
        assert_eq!(table.num_columns(), table.columns().len());
    }
    Ok(())
}
