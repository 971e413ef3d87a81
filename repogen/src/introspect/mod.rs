//! Database introspection
//!
//! The generator only needs one capability from a backend: run the dialect's
//! metadata query for a `(schema, table)` pair and scan each row into a
//! [`ColumnDescriptor`]. [`SchemaReader`] turns those rows into typed fields.

#[cfg(feature = "mysql")]
pub mod mysql;
#[cfg(feature = "postgres")]
pub mod postgres;

use async_trait::async_trait;

use crate::dialect::{Dialect, DialectKind};
use crate::{ColumnDescriptor, FieldDescriptor, GenError, Result};

#[cfg(feature = "mysql")]
pub use self::mysql::MySqlDatabase;
#[cfg(feature = "postgres")]
pub use self::postgres::PgDatabase;

/// Query executor for metadata catalogs
#[async_trait]
pub trait Database: Send + Sync {
    /// Run `query` with `schema` and `table` bound in that order
    async fn fetch_columns(
        &self,
        query: &str,
        schema: &str,
        table: &str,
    ) -> std::result::Result<Vec<ColumnDescriptor>, sqlx::Error>;
}

#[async_trait]
impl<T: Database + ?Sized> Database for Box<T> {
    async fn fetch_columns(
        &self,
        query: &str,
        schema: &str,
        table: &str,
    ) -> std::result::Result<Vec<ColumnDescriptor>, sqlx::Error> {
        (**self).fetch_columns(query, schema, table).await
    }
}

/// Open a connection for `database_url`, picking the backend from its scheme
pub async fn connect(database_url: &str) -> Result<Box<dyn Database>> {
    match DialectKind::from_url(database_url)? {
        #[cfg(feature = "postgres")]
        DialectKind::Postgres => Ok(Box::new(PgDatabase::connect(database_url).await?)),
        #[cfg(feature = "mysql")]
        DialectKind::MySql => Ok(Box::new(MySqlDatabase::connect(database_url).await?)),
        #[allow(unreachable_patterns)]
        kind => Err(GenError::UnsupportedDatabase(format!(
            "{} support is not compiled in",
            kind
        ))),
    }
}

/// Split `schema.table` on the first `.`, falling back to `default_schema`
pub fn split_table_name<'a>(table_name: &'a str, default_schema: &'a str) -> (&'a str, &'a str) {
    match table_name.split_once('.') {
        Some((schema, table)) => (schema, table),
        None => (default_schema, table_name),
    }
}

/// Reads a table's columns and maps their types
pub struct SchemaReader<D> {
    database: D,
    dialect: Dialect,
}

impl<D: Database> SchemaReader<D> {
    pub fn new(database: D, dialect: Dialect) -> Self {
        Self { database, dialect }
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Fetch the typed fields of `table_name`, in catalog order
    pub async fn fetch_fields(&self, table_name: &str) -> Result<Vec<FieldDescriptor>> {
        let (schema, table) = split_table_name(table_name, self.dialect.default_schema());

        log::debug!(
            "Fetching columns of '{}' (schema '{}', dialect {})",
            table,
            schema,
            self.dialect.kind()
        );

        let columns = self
            .database
            .fetch_columns(self.dialect.columns_query(), schema, table)
            .await?;

        if columns.is_empty() {
            return Err(GenError::TableNotFound(table_name.to_string()));
        }

        let fields = columns
            .into_iter()
            .map(|column| {
                let resolved_type = self.dialect.map_type(&column.raw_type, column.nullable);
                log::debug!(
                    "Column '{}': {}{} -> {}",
                    column.name,
                    column.raw_type,
                    if column.nullable { " NULL" } else { "" },
                    resolved_type
                );
                FieldDescriptor::new(column.name, resolved_type)
            })
            .collect();

        Ok(fields)
    }
}
