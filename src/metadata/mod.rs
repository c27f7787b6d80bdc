//! In-memory schema model and the sources autocomplete reads table and column names from.

crate::reexport!(column);
crate::reexport!(table);
crate::reexport!(schema);
crate::reexport!(database);
crate::reexport!(source);
crate::reexport!(mysql);

use std::collections::HashMap;
use tokio::sync::RwLock;

pub type Data<T> = RwLock<HashMap<String, T>>;
