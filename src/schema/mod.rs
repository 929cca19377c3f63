// Canonical schema layer - registry, column metadata and value coercion
pub mod coerce;
pub mod column;
pub mod registry;

pub use column::{ColumnDescriptor, ColumnType};
pub use registry::{ResourceDescriptor, SchemaRegistry};
