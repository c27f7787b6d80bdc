use super::*;

#[derive(Debug, Default)]
pub struct Table {
    pub name: String,
    pub columns: Data<Column>,
    // Preserve insertion order of columns, the way the server lists them.
    pub column_order: Vec<String>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Construct a table with an explicit ordered list of (name, type) pairs.
    pub fn new_with_ordered(
        name: impl Into<String>,
        columns: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        let mut map = HashMap::new();
        let mut order = Vec::new();
        for (column, data_type) in columns {
            let column = Column::new(column, data_type);
            if map.insert(column.name.clone(), column.clone()).is_none() {
                order.push(column.name);
            }
        }
        Self {
            name: name.into(),
            columns: Data::new(map),
            column_order: order,
        }
    }

    /// Insert or overwrite a column, keeping the position of one already present.
    pub async fn insert_column(&mut self, column: Column) {
        let previous = self
            .columns
            .write()
            .await
            .insert(column.name.clone(), column.clone());
        if previous.is_none() {
            self.column_order.push(column.name);
        }
    }

    /// Columns in preserved order.
    pub async fn ordered_columns(&self) -> Vec<Column> {
        let guard = self.columns.read().await;
        self.column_order
            .iter()
            .filter_map(|n| guard.get(n).cloned())
            .collect()
    }

    pub async fn column_names(&self) -> Vec<String> {
        self.ordered_columns()
            .await
            .into_iter()
            .map(|c| c.name)
            .collect()
    }
}
