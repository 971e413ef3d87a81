//! PostgreSQL metadata access

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use super::Database;
use crate::{ColumnDescriptor, Result};

pub struct PgDatabase {
    pool: PgPool,
}

impl PgDatabase {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await?;

        log::debug!("Connected to PostgreSQL");
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Database for PgDatabase {
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

fn column_from_row(row: &PgRow) -> std::result::Result<ColumnDescriptor, sqlx::Error> {
    let name: String = row.try_get("column_name")?;
    let data_type: String = row.try_get("data_type")?;
    let is_nullable: String = row.try_get("is_nullable")?;

    Ok(ColumnDescriptor::new(
        name,
        data_type,
        is_nullable.eq_ignore_ascii_case("YES"),
    ))
}
