//! Schema types: column types, cell values and table schemas.

mod table;
mod types;

pub use table::TableSchema;
pub use types::{ColumnType, Value};
