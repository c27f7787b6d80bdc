use crate::*;
use sqlx::{MySqlPool, mysql::MySqlPoolOptions};

/// Live schema source querying `information_schema` on every lookup.
#[derive(Debug, Clone)]
pub struct MySqlSchema {
    pool: MySqlPool,
}

impl MySqlSchema {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn connect(url: &str) -> Result<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(3)
            .connect(url)
            .await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

impl SchemaSource for MySqlSchema {
    async fn tables(&self, schema: Option<&str>) -> Result<Vec<String>> {
        let tables = sqlx::query_scalar(
            "SELECT CAST(TABLE_NAME AS CHAR) FROM information_schema.tables
             WHERE TABLE_SCHEMA = COALESCE(?, DATABASE())
             ORDER BY TABLE_NAME",
        )
        .bind(schema)
        .fetch_all(&self.pool)
        .await?;
        Ok(tables)
    }

    async fn columns(&self, schema: Option<&str>, table: &str) -> Result<Vec<String>> {
        let columns = sqlx::query_scalar(
            "SELECT CAST(COLUMN_NAME AS CHAR) FROM information_schema.columns
             WHERE TABLE_SCHEMA = COALESCE(?, DATABASE()) AND TABLE_NAME = ?
             ORDER BY ORDINAL_POSITION",
        )
        .bind(schema)
        .bind(table)
        .fetch_all(&self.pool)
        .await?;
        Ok(columns)
    }
}
