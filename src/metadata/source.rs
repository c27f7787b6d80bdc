use crate::*;
use std::future::Future;

/// Where autocomplete looks up names that are not written in the statement itself.
///
/// `schema` of `None` means the connection's current schema.
pub trait SchemaSource: Send + Sync {
    fn tables(&self, schema: Option<&str>) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// Column names of `table` in definition order. Unknown tables have none.
    fn columns(
        &self,
        schema: Option<&str>,
        table: &str,
    ) -> impl Future<Output = Result<Vec<String>>> + Send;
}

impl<S: SchemaSource> SchemaSource for std::sync::Arc<S> {
    fn tables(&self, schema: Option<&str>) -> impl Future<Output = Result<Vec<String>>> + Send {
        S::tables(self, schema)
    }

    fn columns(
        &self,
        schema: Option<&str>,
        table: &str,
    ) -> impl Future<Output = Result<Vec<String>>> + Send {
        S::columns(self, schema, table)
    }
}
