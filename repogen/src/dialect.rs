//! Dialect profiles and database type normalization
//!
//! A [`Dialect`] bundles everything that differs between backends: the raw
//! type table, the default schema and the metadata query. Canonical types are
//! shared by every profile, so the nullable table is too.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::{GenError, Result};

/// Fallback for any raw type a profile does not know
pub const BYTES_TYPE: &str = "Vec<u8>";

type TypeTable = HashMap<&'static str, &'static str>;

static POSTGRES_TYPES: Lazy<TypeTable> = Lazy::new(|| {
    HashMap::from([
        ("bigint", "i64"),
        ("bigserial", "i64"),
        ("int", "i64"),
        ("int2", "i64"),
        ("int4", "i64"),
        ("int8", "i64"),
        ("integer", "i64"),
        ("serial", "i64"),
        ("smallint", "i64"),
        ("smallserial", "i64"),
        ("unsigned big int", "u64"),
        ("decimal", "Decimal"),
        ("numeric", "Decimal"),
        ("double precision", "f64"),
        ("float", "f64"),
        ("float4", "f64"),
        ("float8", "f64"),
        ("real", "f64"),
        ("bool", "bool"),
        ("boolean", "bool"),
        ("bpchar", "String"),
        ("char", "String"),
        ("character", "String"),
        ("character varying", "String"),
        ("citext", "String"),
        ("text", "String"),
        ("varchar", "String"),
        ("varying character", "String"),
        ("date", "NaiveDate"),
        ("time", "NaiveTime"),
        ("time with time zone", "NaiveTime"),
        ("time without time zone", "NaiveTime"),
        ("timetz", "NaiveTime"),
        ("timestamp", "NaiveDateTime"),
        ("timestamp without time zone", "NaiveDateTime"),
        ("timestamp with time zone", "DateTime<Utc>"),
        ("timestamptz", "DateTime<Utc>"),
        ("uuid", "Uuid"),
        ("json", "JsonValue"),
        ("jsonb", "JsonValue"),
        ("bytea", "Vec<u8>"),
    ])
});

static MYSQL_TYPES: Lazy<TypeTable> = Lazy::new(|| {
    HashMap::from([
        ("bigint", "i64"),
        ("int", "i64"),
        ("integer", "i64"),
        ("mediumint", "i64"),
        ("smallint", "i64"),
        ("tinyint", "i64"),
        ("year", "i64"),
        ("unsigned big int", "u64"),
        ("decimal", "Decimal"),
        ("numeric", "Decimal"),
        ("double", "f64"),
        ("double precision", "f64"),
        ("float", "f64"),
        ("real", "f64"),
        ("bool", "bool"),
        ("boolean", "bool"),
        ("char", "String"),
        ("character", "String"),
        ("enum", "String"),
        ("longtext", "String"),
        ("mediumtext", "String"),
        ("set", "String"),
        ("text", "String"),
        ("tinytext", "String"),
        ("varchar", "String"),
        ("varying character", "String"),
        ("date", "NaiveDate"),
        ("time", "NaiveTime"),
        ("datetime", "NaiveDateTime"),
        ("timestamp", "DateTime<Utc>"),
        ("json", "JsonValue"),
        ("binary", "Vec<u8>"),
        ("blob", "Vec<u8>"),
        ("longblob", "Vec<u8>"),
        ("mediumblob", "Vec<u8>"),
        ("tinyblob", "Vec<u8>"),
        ("varbinary", "Vec<u8>"),
    ])
});

/// Canonical type to its nullable wrapper. `Vec<u8>` has none.
static NULLABLE_TYPES: Lazy<TypeTable> = Lazy::new(|| {
    HashMap::from([
        ("i64", "Option<i64>"),
        ("u64", "Option<u64>"),
        ("f64", "Option<f64>"),
        ("bool", "Option<bool>"),
        ("String", "Option<String>"),
        ("Decimal", "Option<Decimal>"),
        ("NaiveDate", "Option<NaiveDate>"),
        ("NaiveTime", "Option<NaiveTime>"),
        ("NaiveDateTime", "Option<NaiveDateTime>"),
        ("DateTime<Utc>", "Option<DateTime<Utc>>"),
        ("Uuid", "Option<Uuid>"),
        ("JsonValue", "Option<JsonValue>"),
    ])
});

const POSTGRES_COLUMNS_QUERY: &str = r#"
    SELECT
        c.column_name::text AS column_name,
        c.data_type::text AS data_type,
        c.is_nullable::text AS is_nullable
    FROM information_schema.columns c
    WHERE c.table_schema = $1 AND c.table_name = $2
    ORDER BY c.ordinal_position
"#;

// An empty schema selects the connection's current database
const MYSQL_COLUMNS_QUERY: &str = r#"
    SELECT
        CAST(c.COLUMN_NAME AS CHAR) AS column_name,
        CAST(c.DATA_TYPE AS CHAR) AS data_type,
        CAST(c.IS_NULLABLE AS CHAR) AS is_nullable
    FROM information_schema.columns c
    WHERE c.TABLE_SCHEMA = COALESCE(NULLIF(?, ''), DATABASE()) AND c.TABLE_NAME = ?
    ORDER BY c.ORDINAL_POSITION
"#;

/// Supported backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    #[serde(alias = "postgresql")]
    Postgres,
    #[serde(alias = "mariadb")]
    MySql,
}

impl DialectKind {
    /// Detect the backend from a connection URL scheme
    pub fn from_url(url: &str) -> Result<Self> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Ok(DialectKind::Postgres)
        } else if url.starts_with("mysql://") || url.starts_with("mariadb://") {
            Ok(DialectKind::MySql)
        } else {
            Err(GenError::UnsupportedDatabase(url.to_string()))
        }
    }
}

impl FromStr for DialectKind {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(DialectKind::Postgres),
            "mysql" | "mariadb" => Ok(DialectKind::MySql),
            other => Err(GenError::UnsupportedDatabase(other.to_string())),
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DialectKind::Postgres => write!(f, "postgres"),
            DialectKind::MySql => write!(f, "mysql"),
        }
    }
}

/// Named dialect profile
#[derive(Debug, Clone)]
pub struct Dialect {
    kind: DialectKind,
    default_schema: String,
    columns_query: &'static str,
    types: &'static TypeTable,
}

impl Dialect {
    /// PostgreSQL profile, defaulting to the `public` schema
    pub fn postgres() -> Self {
        Self {
            kind: DialectKind::Postgres,
            default_schema: "public".to_string(),
            columns_query: POSTGRES_COLUMNS_QUERY,
            types: &POSTGRES_TYPES,
        }
    }

    /// MySQL profile, defaulting to the connection's current database
    pub fn mysql() -> Self {
        Self {
            kind: DialectKind::MySql,
            default_schema: String::new(),
            columns_query: MYSQL_COLUMNS_QUERY,
            types: &MYSQL_TYPES,
        }
    }

    pub fn for_kind(kind: DialectKind) -> Self {
        match kind {
            DialectKind::Postgres => Self::postgres(),
            DialectKind::MySql => Self::mysql(),
        }
    }

    /// Override the schema used for unqualified table names
    pub fn with_default_schema(mut self, schema: impl Into<String>) -> Self {
        self.default_schema = schema.into();
        self
    }

    pub fn kind(&self) -> DialectKind {
        self.kind
    }

    pub fn name(&self) -> String {
        self.kind.to_string()
    }

    pub fn default_schema(&self) -> &str {
        &self.default_schema
    }

    /// Metadata query binding `(schema, table)` and yielding
    /// `column_name`, `data_type`, `is_nullable`
    pub fn columns_query(&self) -> &'static str {
        self.columns_query
    }

    /// Map a raw database type name to its canonical Rust type
    pub fn map_type(&self, raw_type: &str, nullable: bool) -> String {
        let normalized = normalize_raw_type(raw_type);
        let canonical = self
            .types
            .get(normalized.as_str())
            .copied()
            .unwrap_or(BYTES_TYPE);

        if nullable {
            NULLABLE_TYPES
                .get(canonical)
                .copied()
                .unwrap_or(canonical)
                .to_string()
        } else {
            canonical.to_string()
        }
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::postgres()
    }
}

/// Map a raw database type name through `dialect`
pub fn map_type(dialect: &Dialect, raw_type: &str, nullable: bool) -> String {
    dialect.map_type(raw_type, nullable)
}

/// Lower-case, trim and drop any `(length)` or `(precision,scale)` suffix
fn normalize_raw_type(raw_type: &str) -> String {
    let lowered = raw_type.trim().to_lowercase();
    match lowered.find('(') {
        Some(open) => {
            let close = lowered[open..].find(')').map(|i| open + i + 1);
            let mut base = lowered[..open].trim_end().to_string();
            if let Some(close) = close {
                // keep modifiers that follow the suffix, e.g. `timestamp(3) with time zone`
                let rest = lowered[close..].trim();
                if !rest.is_empty() {
                    base.push(' ');
                    base.push_str(rest);
                }
            }
            base
        }
        None => lowered,
    }
}
