use super::*;

#[derive(Debug)]
pub struct Schema {
    pub name: String,
    pub tables: Data<Table>,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: Data::new(HashMap::new()),
        }
    }

    /// Table names, sorted.
    pub async fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.read().await.keys().cloned().collect();
        names.sort();
        names
    }

    /// Ordered column names of `table`, matching the name exactly first and then
    /// ignoring ASCII case. `None` when the table is unknown.
    pub async fn column_names(&self, table: &str) -> Option<Vec<String>> {
        let tables = self.tables.read().await;
        let found = tables.get(table).or_else(|| {
            tables
                .values()
                .find(|t| t.name.eq_ignore_ascii_case(table))
        })?;
        Some(found.column_names().await)
    }
}
