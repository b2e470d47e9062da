//! Mapping from native type vocabularies to [`ColumnType`].
//!
//! Two vocabularies are understood: DuckDB SQL type names, as reported by
//! `information_schema.columns`, and Polars dtypes. Both mappings are total;
//! anything not recognised becomes [`ColumnType::Unknown`].

use super::types::ColumnType;
use polars::prelude::DataType;

/// A native type descriptor that can be shown to users and canonicalized.
pub trait NativeType {
    /// Label preserved verbatim as the column's `external_type`.
    fn label(&self) -> String;

    fn canonical(&self) -> ColumnType;
}

/// A SQL type name as reported by the engine, e.g. `DECIMAL(18,3)`.
#[derive(Clone, Copy, Debug)]
pub struct SqlType<'a>(pub &'a str);

impl NativeType for SqlType<'_> {
    fn label(&self) -> String {
        self.0.to_owned()
    }

    fn canonical(&self) -> ColumnType {
        canonicalize_sql(self.0)
    }
}

impl NativeType for DataType {
    fn label(&self) -> String {
        self.to_string()
    }

    fn canonical(&self) -> ColumnType {
        canonicalize_dtype(self)
    }
}

#[derive(Clone, Copy, Debug)]
enum Matcher {
    Exact(&'static str),
    Prefix(&'static str),
}

impl Matcher {
    fn matches(self, type_name: &str) -> bool {
        match self {
            Self::Exact(s) => type_name == s,
            Self::Prefix(s) => type_name.starts_with(s),
        }
    }
}

use Matcher::{Exact, Prefix};

/// Checked in order; the first match wins. Names are upper-case.
const SQL_TYPE_RULES: &[(Matcher, ColumnType)] = &[
    (Exact("BOOLEAN"), ColumnType::Boolean),
    (Exact("BOOL"), ColumnType::Boolean),
    (Exact("LOGICAL"), ColumnType::Boolean),
    (Exact("TINYINT"), ColumnType::Integer),
    (Exact("INT1"), ColumnType::Integer),
    (Exact("SMALLINT"), ColumnType::Integer),
    (Exact("INT2"), ColumnType::Integer),
    (Exact("SHORT"), ColumnType::Integer),
    (Exact("INTEGER"), ColumnType::Integer),
    (Exact("INT"), ColumnType::Integer),
    (Exact("INT4"), ColumnType::Integer),
    (Exact("SIGNED"), ColumnType::Integer),
    (Exact("BIGINT"), ColumnType::Integer),
    (Exact("INT8"), ColumnType::Integer),
    (Exact("LONG"), ColumnType::Integer),
    (Exact("HUGEINT"), ColumnType::Integer),
    (Exact("INT128"), ColumnType::Integer),
    (Exact("UTINYINT"), ColumnType::Integer),
    (Exact("USMALLINT"), ColumnType::Integer),
    (Exact("UINTEGER"), ColumnType::Integer),
    (Exact("UBIGINT"), ColumnType::Integer),
    (Exact("UHUGEINT"), ColumnType::Integer),
    (Exact("VARINT"), ColumnType::Integer),
    (Exact("BIGNUM"), ColumnType::Integer),
    (Exact("FLOAT"), ColumnType::Number),
    (Exact("FLOAT4"), ColumnType::Number),
    (Exact("REAL"), ColumnType::Number),
    (Exact("DOUBLE"), ColumnType::Number),
    (Exact("DOUBLE PRECISION"), ColumnType::Number),
    (Exact("FLOAT8"), ColumnType::Number),
    // Parameterized: DECIMAL(18,3), NUMERIC(10,2)
    (Prefix("DECIMAL"), ColumnType::Number),
    (Prefix("NUMERIC"), ColumnType::Number),
    (Prefix("VARCHAR"), ColumnType::String),
    (Prefix("CHAR"), ColumnType::String),
    (Exact("BPCHAR"), ColumnType::String),
    (Exact("TEXT"), ColumnType::String),
    (Exact("STRING"), ColumnType::String),
    (Prefix("ENUM"), ColumnType::String),
    (Exact("BLOB"), ColumnType::String),
    (Exact("BYTEA"), ColumnType::String),
    (Exact("BINARY"), ColumnType::String),
    (Exact("VARBINARY"), ColumnType::String),
    (Prefix("BIT"), ColumnType::String),
    (Exact("UUID"), ColumnType::String),
    (Exact("DATE"), ColumnType::Date),
    (Exact("TIME"), ColumnType::Time),
    (Exact("TIMETZ"), ColumnType::Time),
    (Exact("TIME WITH TIME ZONE"), ColumnType::Time),
    (Prefix("TIMESTAMP"), ColumnType::DateTime),
    (Exact("DATETIME"), ColumnType::DateTime),
    (Prefix("INTERVAL"), ColumnType::DateTime),
    (Exact("JSON"), ColumnType::Unknown),
];

const NESTED_PREFIXES: &[&str] = &["STRUCT", "MAP", "UNION", "LIST"];

/// Canonicalizes a DuckDB type name. Case-insensitive.
pub fn canonicalize_sql(type_name: &str) -> ColumnType {
    let normalized = type_name.trim().to_ascii_uppercase();

    // `INTEGER[]` and `INTEGER[3]` are lists/arrays, not integers.
    if normalized.ends_with(']') || NESTED_PREFIXES.iter().any(|p| normalized.starts_with(p)) {
        return ColumnType::Unknown;
    }

    SQL_TYPE_RULES
        .iter()
        .find(|(matcher, _)| matcher.matches(&normalized))
        .map_or(ColumnType::Unknown, |(_, kind)| *kind)
}

/// Canonicalizes a Polars dtype.
pub fn canonicalize_dtype(dtype: &DataType) -> ColumnType {
    match dtype {
        DataType::Boolean => ColumnType::Boolean,
        d if d.is_integer() => ColumnType::Integer,
        d if d.is_float() => ColumnType::Number,
        DataType::Decimal(..) => ColumnType::Number,
        DataType::String
        | DataType::Binary
        | DataType::Categorical(..)
        | DataType::Enum(..)
        | DataType::Object(..) => ColumnType::String,
        DataType::Date => ColumnType::Date,
        DataType::Time => ColumnType::Time,
        DataType::Datetime(..) | DataType::Duration(..) => ColumnType::DateTime,
        _ => ColumnType::Unknown,
    }
}
