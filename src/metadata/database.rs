use super::*;
use crate::*;
use sqlx::MySqlPool;

/// Schemas the server creates for itself; never loaded.
const SYSTEM_SCHEMAS: &[&str] = &["mysql", "information_schema", "performance_schema", "sys"];

#[derive(Debug)]
pub struct Database {
    pub name: String,
    pub schemas: Data<Schema>,
    /// Schema that unqualified names resolve against, like `USE db`. When unset every
    /// schema is searched.
    pub current_schema: Option<String>,
}

impl Database {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schemas: Data::new(HashMap::new()),
            current_schema: None,
        }
    }

    pub fn with_current_schema(mut self, schema: impl Into<String>) -> Self {
        self.current_schema = Some(schema.into());
        self
    }

    /// Add (or create) schema/table and insert the column.
    pub async fn insert_column(&mut self, schema_name: &str, table_name: &str, column: Column) {
        let mut schemas = self.schemas.write().await;
        let mut tables = schemas
            .entry(schema_name.to_string())
            .or_insert_with(|| Schema::new(schema_name)) // Create/return schema
            .tables
            .write()
            .await;
        tables
            .entry(table_name.to_string())
            .or_insert_with(|| Table::new(table_name)) // Create/return table
            .insert_column(column)
            .await;
    }

    /// Add (or create) schema and insert the table.
    pub async fn insert_table(&mut self, schema_name: &str, table: Table) {
        let mut schemas = self.schemas.write().await;
        schemas
            .entry(schema_name.to_string())
            .or_insert_with(|| Schema::new(schema_name)) // Create/return schema
            .tables
            .write()
            .await
            .insert(table.name.clone(), table); // Insert / overwrite table
    }

    /// Insert (or overwrite) a schema.
    pub async fn insert_schema(&mut self, schema: Schema) {
        self.schemas
            .write()
            .await
            .insert(schema.name.clone(), schema);
    }

    /// Snapshot every user schema visible to `pool`, with the connection's default
    /// database as the current schema.
    pub async fn load(pool: &MySqlPool) -> Result<Self> {
        let current: Option<String> = sqlx::query_scalar("SELECT DATABASE()")
            .fetch_one(pool)
            .await?;
        let rows: Vec<(String, String, String, String)> = sqlx::query_as(
            "SELECT CAST(TABLE_SCHEMA AS CHAR), CAST(TABLE_NAME AS CHAR),
                    CAST(COLUMN_NAME AS CHAR), CAST(COLUMN_TYPE AS CHAR)
             FROM information_schema.columns
             ORDER BY TABLE_SCHEMA, TABLE_NAME, ORDINAL_POSITION",
        )
        .fetch_all(pool)
        .await?;

        let mut database = Database::new(current.clone().unwrap_or_else(|| "mysql".to_string()));
        database.current_schema = current;
        let mut loaded = 0usize;
        for (schema, table, column, data_type) in rows {
            if SYSTEM_SCHEMAS.contains(&schema.to_ascii_lowercase().as_str()) {
                continue;
            }
            database
                .insert_column(&schema, &table, Column::new(column, data_type))
                .await;
            loaded += 1;
        }
        debug!(
            columns = loaded,
            current = ?database.current_schema,
            "loaded schema metadata"
        );
        Ok(database)
    }

    /// Schema names `schema` resolves to: the named one, else the current one, else all.
    async fn resolve(&self, schema: Option<&str>) -> Vec<String> {
        match schema.or(self.current_schema.as_deref()) {
            Some(name) => vec![name.to_string()],
            None => {
                let mut names: Vec<String> = self.schemas.read().await.keys().cloned().collect();
                names.sort();
                names
            }
        }
    }
}

impl SchemaSource for Database {
    async fn tables(&self, schema: Option<&str>) -> Result<Vec<String>> {
        let wanted = self.resolve(schema).await;
        let schemas = self.schemas.read().await;
        let mut out = Vec::new();
        for name in &wanted {
            let found = schemas
                .get(name)
                .or_else(|| schemas.values().find(|s| s.name.eq_ignore_ascii_case(name)));
            if let Some(found) = found {
                out.extend(found.table_names().await);
            }
        }
        out.sort();
        out.dedup();
        Ok(out)
    }

    async fn columns(&self, schema: Option<&str>, table: &str) -> Result<Vec<String>> {
        let wanted = self.resolve(schema).await;
        let schemas = self.schemas.read().await;
        for name in &wanted {
            let Some(found) = schemas.get(name) else {
                continue;
            };
            if let Some(columns) = found.column_names(table).await {
                return Ok(columns);
            }
        }
        Ok(Vec::new())
    }
}
