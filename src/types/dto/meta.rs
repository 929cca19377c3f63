use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::schema::ColumnDescriptor;

/// Column metadata for dynamic form rendering
///
/// Shaped like a MySQL DESCRIBE row, but answered from the schema registry.
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ColumnMeta {
    /// Column name
    pub field: String,

    /// Declared type string, e.g. "varchar(255)" or "decimal"
    #[oai(rename = "type")]
    pub column_type: String,

    /// Whether NULL is accepted
    pub nullable: bool,

    /// Default value, if any
    pub default: Option<String>,

    /// Extra flags, e.g. "auto_increment"
    pub extra: String,
}

impl From<&ColumnDescriptor> for ColumnMeta {
    fn from(column: &ColumnDescriptor) -> Self {
        Self {
            field: column.name.to_string(),
            column_type: column.declared_type(),
            nullable: column.nullable,
            default: column.default_value.map(str::to_string),
            extra: column.extra().to_string(),
        }
    }
}
