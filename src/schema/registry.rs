use std::collections::HashMap;

use super::column::{ColumnDescriptor, ColumnType};

/// Maps a logical resource name to its backing table, primary key and columns
#[derive(Debug, Clone)]
pub struct ResourceDescriptor {
    pub name: &'static str,
    pub table: &'static str,
    pub primary_key: &'static str,
    pub columns: Vec<ColumnDescriptor>,
}

impl ResourceDescriptor {
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Columns that must be supplied on create
    pub fn required_columns(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns.iter().filter(|c| c.required())
    }
}

/// Canonical schema for every CRUD resource, built once at startup
///
/// No runtime introspection: the registry is the single source of truth,
/// declared alongside the migrations that create the tables, and passed to
/// request handlers by `Arc`.
pub struct SchemaRegistry {
    resources: HashMap<&'static str, ResourceDescriptor>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        let mut resources = HashMap::new();
        for descriptor in build_descriptors() {
            resources.insert(descriptor.name, descriptor);
        }
        Self { resources }
    }

    pub fn resource(&self, logical_name: &str) -> Option<&ResourceDescriptor> {
        self.resources.get(logical_name)
    }

    /// Resolve a logical name to its table name
    ///
    /// Unknown names resolve to themselves; callers that need a hard failure
    /// go through `resource()` instead.
    pub fn resolve_table_name<'a>(&'a self, logical_name: &'a str) -> &'a str {
        match self.resources.get(logical_name) {
            Some(descriptor) => descriptor.table,
            None => logical_name,
        }
    }

    /// Column metadata for a table, keyed by the *table* name
    pub fn describe_columns(&self, table: &str) -> Option<&[ColumnDescriptor]> {
        self.resources
            .values()
            .find(|d| d.table == table)
            .map(|d| d.columns.as_slice())
    }

    pub fn resource_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.resources.keys().copied()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn build_descriptors() -> Vec<ResourceDescriptor> {
    use ColumnType::*;

    vec![
        ResourceDescriptor {
            name: "usuarios",
            table: "usuarios",
            primary_key: "idusuario",
            columns: vec![
                ColumnDescriptor::new("idusuario", Integer)
                    .not_null()
                    .auto_increment(),
                ColumnDescriptor::new("nombre", Text).not_null().len(255),
                ColumnDescriptor::new("email", Text).not_null().len(255),
                ColumnDescriptor::new("password_hash", Text)
                    .not_null()
                    .len(255)
                    .sensitive(),
                ColumnDescriptor::new("secret", Text).len(30).sensitive(),
                ColumnDescriptor::new("tipo_id", Integer),
                ColumnDescriptor::new("is_admin", Bool).not_null().default("0"),
                ColumnDescriptor::new("created_at", Timestamp)
                    .not_null()
                    .default("CURRENT_TIMESTAMP"),
            ],
        },
        ResourceDescriptor {
            name: "presupuestos",
            table: "presupuestos",
            primary_key: "idpresupuesto",
            columns: vec![
                ColumnDescriptor::new("idpresupuesto", Integer)
                    .not_null()
                    .auto_increment(),
                ColumnDescriptor::new("nombre", Text).not_null().len(255),
                ColumnDescriptor::new("anno", Integer).not_null(),
                ColumnDescriptor::new("fecha_ini", Date).not_null(),
                ColumnDescriptor::new("fecha_fin", Date).not_null(),
                ColumnDescriptor::new("status", Text).len(40),
                ColumnDescriptor::new("descripcion", Text),
                ColumnDescriptor::new("tipo_cambio", Decimal),
                ColumnDescriptor::new("factor_inflacion", Decimal),
                ColumnDescriptor::new("observaciones", Text),
            ],
        },
        ResourceDescriptor {
            name: "gastos",
            table: "gastos",
            primary_key: "idgasto",
            columns: vec![
                ColumnDescriptor::new("idgasto", Integer)
                    .not_null()
                    .auto_increment(),
                ColumnDescriptor::new("nombre", Text).not_null().len(255),
                ColumnDescriptor::new("anno", Integer).not_null(),
                ColumnDescriptor::new("fecha", Date).not_null(),
                ColumnDescriptor::new("proveedor", Text).len(255),
                ColumnDescriptor::new("monto", Decimal).not_null(),
                ColumnDescriptor::new("moneda", Text).len(10),
                ColumnDescriptor::new("tipo_cambio", Decimal),
                ColumnDescriptor::new("monto_base", Decimal),
                ColumnDescriptor::new("status", Text).len(40),
                ColumnDescriptor::new("categoria", Text).len(80),
                ColumnDescriptor::new("idusuario", Integer),
                ColumnDescriptor::new("idcuenta", Integer),
                ColumnDescriptor::new("idplanta", Integer),
                ColumnDescriptor::new("idpresupuesto", Integer),
            ],
        },
        ResourceDescriptor {
            name: "conceptos",
            table: "conceptos",
            primary_key: "idconcepto",
            columns: vec![
                ColumnDescriptor::new("idconcepto", Integer)
                    .not_null()
                    .auto_increment(),
                ColumnDescriptor::new("nombre", Text).not_null().len(255),
                ColumnDescriptor::new("descripcion", Text),
            ],
        },
        ResourceDescriptor {
            name: "cuentas",
            table: "cuentas",
            primary_key: "idcuenta",
            columns: vec![
                ColumnDescriptor::new("idcuenta", Integer)
                    .not_null()
                    .auto_increment(),
                ColumnDescriptor::new("nombre", Text).not_null().len(255),
                ColumnDescriptor::new("codigo", Text).len(40),
                ColumnDescriptor::new("descripcion", Text),
            ],
        },
        ResourceDescriptor {
            name: "partidas",
            table: "partidas",
            primary_key: "idpartida",
            columns: vec![
                ColumnDescriptor::new("idpartida", Integer)
                    .not_null()
                    .auto_increment(),
                ColumnDescriptor::new("nombre", Text).not_null().len(255),
                ColumnDescriptor::new("monto", Decimal),
                ColumnDescriptor::new("idcuenta", Integer),
                ColumnDescriptor::new("idpresupuesto", Integer),
                ColumnDescriptor::new("descripcion", Text),
            ],
        },
        ResourceDescriptor {
            name: "plantas",
            table: "plantas",
            primary_key: "idplanta",
            columns: vec![
                ColumnDescriptor::new("idplanta", Integer)
                    .not_null()
                    .auto_increment(),
                ColumnDescriptor::new("nombre", Text).not_null().len(255),
                ColumnDescriptor::new("ubicacion", Text).len(255),
            ],
        },
    ]
}
