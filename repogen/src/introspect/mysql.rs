//! MySQL metadata access

use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::Row;

use super::Database;
use crate::{ColumnDescriptor, Result};

pub struct MySqlDatabase {
    pool: MySqlPool,
}

impl MySqlDatabase {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await?;

        log::debug!("Connected to MySQL");
        Ok(Self { pool })
    }

    pub fn from_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Database for MySqlDatabase {
    async fn fetch_columns(
        &self,
        query: &str,
        schema: &str,
        table: &str,
    ) -> std::result::Result<Vec<ColumnDescriptor>, sqlx::Error> {
        let rows = sqlx::query(query)
            .bind(schema)
            .bind(table)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(column_from_row).collect()
    }
}

// information_schema text columns may come back as VARBINARY on older servers
fn text_column(row: &MySqlRow, column: &str) -> std::result::Result<String, sqlx::Error> {
    match row.try_get::<String, _>(column) {
        Ok(value) => Ok(value),
        Err(_) => {
            let bytes: Vec<u8> = row.try_get(column)?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}

fn column_from_row(row: &MySqlRow) -> std::result::Result<ColumnDescriptor, sqlx::Error> {
    let name = text_column(row, "column_name")?;
    let data_type = text_column(row, "data_type")?;
    let is_nullable = text_column(row, "is_nullable")?;

    Ok(ColumnDescriptor::new(
        name,
        data_type,
        is_nullable.eq_ignore_ascii_case("YES"),
    ))
}
