use std::sync::Arc;

use sea_orm::{
    ConnectionTrait, DatabaseConnection, FromQueryResult, JsonValue, Statement, Value,
};
use serde_json::{Map, Value as Json};

use crate::errors::ResourceError;
use crate::schema::{coerce, ColumnDescriptor, ColumnType, ResourceDescriptor, SchemaRegistry};
use crate::services::PasswordService;
use crate::stores::TipoUsuarioStore;

/// Rows returned by a list call
const LIST_LIMIT: u32 = 1000;

/// Generic CRUD engine for the registered resources
///
/// Every operation is driven by the schema registry: payload keys are
/// filtered to declared columns, values are normalized per column type, and
/// the SQL is parameterized throughout. Rows travel as JSON objects; the
/// registry supplies the typing the JSON lacks.
pub struct RecordStore {
    db: DatabaseConnection,
    registry: Arc<SchemaRegistry>,
    tipo_store: Arc<TipoUsuarioStore>,
    password_service: Arc<PasswordService>,
}

impl RecordStore {
    pub fn new(
        db: DatabaseConnection,
        registry: Arc<SchemaRegistry>,
        tipo_store: Arc<TipoUsuarioStore>,
        password_service: Arc<PasswordService>,
    ) -> Self {
        Self {
            db,
            registry,
            tipo_store,
            password_service,
        }
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// List up to LIST_LIMIT rows of a resource
    ///
    /// No filtering or pagination; row order follows primary-key insertion
    /// order on the backends we target, but that is not a contract.
    pub async fn list(&self, resource: &str) -> Result<Vec<Json>, ResourceError> {
        let descriptor = self.descriptor(resource)?;

        let sql = format!(
            "SELECT * FROM `{}` LIMIT {}",
            descriptor.table, LIST_LIMIT
        );
        let statement = Statement::from_string(self.db.get_database_backend(), sql);
        let mut rows = JsonValue::find_by_statement(statement)
            .all(&self.db)
            .await
            .map_err(|e| self.read_error("list", resource, e))?;

        for row in &mut rows {
            strip_sensitive(descriptor, row);
        }
        Ok(rows)
    }

    /// Fetch a single row by primary key
    pub async fn get(&self, resource: &str, id: &str) -> Result<Json, ResourceError> {
        let descriptor = self.descriptor(resource)?;
        self.fetch_by_pk(descriptor, id)
            .await?
            .ok_or_else(ResourceError::not_found)
    }

    /// Create a row from a JSON payload and return it as stored
    pub async fn create(&self, resource: &str, payload: Json) -> Result<Json, ResourceError> {
        let descriptor = self.descriptor(resource)?;
        let mut payload = into_object(payload)?;

        self.apply_usuarios_rules(resource, &mut payload).await?;

        // the primary key is never taken from the client
        payload.remove(descriptor.primary_key);

        let columns = known_columns(descriptor, &payload);
        if columns.is_empty() {
            return Err(ResourceError::no_valid_data());
        }

        let missing = coerce::missing_required(descriptor, &payload);
        if !missing.is_empty() {
            return Err(ResourceError::missing_fields(missing));
        }

        let mut names = Vec::with_capacity(columns.len());
        let mut values: Vec<Value> = Vec::with_capacity(columns.len());
        for column in &columns {
            let raw = payload.get(column.name).cloned().unwrap_or(Json::Null);
            let normalized = coerce::normalize(column, raw);
            names.push(format!("`{}`", column.name));
            values.push(bind_value(column, &normalized));
        }
        let placeholders = vec!["?"; names.len()].join(", ");

        let sql = format!(
            "INSERT INTO `{}` ({}) VALUES ({})",
            descriptor.table,
            names.join(", "),
            placeholders
        );
        let statement =
            Statement::from_sql_and_values(self.db.get_database_backend(), sql, values);
        let result = self
            .db
            .execute(statement)
            .await
            .map_err(|e| self.write_error("insert", resource, e))?;

        let new_id = result.last_insert_id().to_string();
        self.fetch_by_pk(descriptor, &new_id)
            .await?
            .ok_or_else(|| {
                ResourceError::internal_error("Inserted row could not be re-fetched".to_string())
            })
    }

    /// Partial update: only the supplied keys are written
    pub async fn update(
        &self,
        resource: &str,
        id: &str,
        payload: Json,
    ) -> Result<Json, ResourceError> {
        let descriptor = self.descriptor(resource)?;
        let mut payload = into_object(payload)?;

        self.apply_usuarios_rules(resource, &mut payload).await?;
        payload.remove(descriptor.primary_key);

        let columns = known_columns(descriptor, &payload);
        if columns.is_empty() {
            return Err(ResourceError::no_valid_data());
        }

        let mut assignments = Vec::with_capacity(columns.len());
        let mut values: Vec<Value> = Vec::with_capacity(columns.len() + 1);
        for column in &columns {
            let raw = payload.get(column.name).cloned().unwrap_or(Json::Null);
            let normalized = coerce::normalize(column, raw);
            assignments.push(format!("`{}` = ?", column.name));
            values.push(bind_value(column, &normalized));
        }
        values.push(pk_value(id));

        let sql = format!(
            "UPDATE `{}` SET {} WHERE `{}` = ?",
            descriptor.table,
            assignments.join(", "),
            descriptor.primary_key
        );
        let statement =
            Statement::from_sql_and_values(self.db.get_database_backend(), sql, values);
        self.db
            .execute(statement)
            .await
            .map_err(|e| self.write_error("update", resource, e))?;

        self.fetch_by_pk(descriptor, id)
            .await?
            .ok_or_else(ResourceError::not_found)
    }

    /// Delete a row by primary key
    pub async fn delete(&self, resource: &str, id: &str) -> Result<(), ResourceError> {
        let descriptor = self.descriptor(resource)?;

        let sql = format!(
            "DELETE FROM `{}` WHERE `{}` = ?",
            descriptor.table, descriptor.primary_key
        );
        let statement = Statement::from_sql_and_values(
            self.db.get_database_backend(),
            sql,
            [pk_value(id)],
        );
        let result = self
            .db
            .execute(statement)
            .await
            .map_err(|e| self.write_error("delete", resource, e))?;

        if result.rows_affected() == 0 {
            return Err(ResourceError::not_found());
        }
        Ok(())
    }

    fn descriptor(&self, resource: &str) -> Result<&ResourceDescriptor, ResourceError> {
        self.registry
            .resource(resource)
            .ok_or_else(|| ResourceError::resource_not_found(resource))
    }

    async fn fetch_by_pk(
        &self,
        descriptor: &ResourceDescriptor,
        id: &str,
    ) -> Result<Option<Json>, ResourceError> {
        let sql = format!(
            "SELECT * FROM `{}` WHERE `{}` = ?",
            descriptor.table, descriptor.primary_key
        );
        let statement = Statement::from_sql_and_values(
            self.db.get_database_backend(),
            sql,
            [pk_value(id)],
        );
        let row = JsonValue::find_by_statement(statement)
            .one(&self.db)
            .await
            .map_err(|e| self.read_error("get", descriptor.name, e))?;

        Ok(row.map(|mut r| {
            strip_sensitive(descriptor, &mut r);
            r
        }))
    }

    /// Resource-specific pre-rules for usuarios
    ///
    /// A plaintext `password` is hashed into `password_hash` (a
    /// client-supplied hash is dropped), and a legacy `tipo` value is
    /// resolved to `tipo_id` against the lookup table. An unrecognized tipo
    /// rejects the request with the accepted entries; it never creates one.
    async fn apply_usuarios_rules(
        &self,
        resource: &str,
        payload: &mut Map<String, Json>,
    ) -> Result<(), ResourceError> {
        if resource != "usuarios" {
            return Ok(());
        }

        payload.remove("password_hash");
        if let Some(Json::String(password)) = payload.remove("password") {
            if !password.is_empty() {
                let hash = self.password_service.hash(&password).map_err(|e| {
                    tracing::error!(error = %e, "password hashing failed");
                    ResourceError::internal_error("Failed to hash password".to_string())
                })?;
                payload.insert("password_hash".to_string(), Json::String(hash));
            }
        }

        let tipo = match payload.remove("tipo") {
            None | Some(Json::Null) => return Ok(()),
            Some(Json::String(s)) => s,
            Some(other) => other.to_string(),
        };

        match self.tipo_store.resolve(&tipo).await? {
            Some(tipo_id) => {
                payload.insert("tipo_id".to_string(), Json::from(tipo_id));
                Ok(())
            }
            None => {
                let allowed = self.tipo_store.list().await?;
                tracing::warn!(provided = %tipo, "rejected unrecognized tipo value");
                Err(ResourceError::invalid_tipo(&tipo, allowed))
            }
        }
    }

    fn read_error(&self, operation: &str, resource: &str, e: sea_orm::DbErr) -> ResourceError {
        tracing::error!(error = %e, operation, resource, "database read failed");
        ResourceError::internal_error("Database error".to_string())
    }

    /// Distinguish data-shaped rejections (400) from infrastructure failures
    /// (500, raw cause logged only)
    fn write_error(&self, operation: &str, resource: &str, e: sea_orm::DbErr) -> ResourceError {
        let message = e.to_string();
        let lower = message.to_lowercase();
        if lower.contains("truncat") || lower.contains("too long") || lower.contains("out of range")
        {
            tracing::warn!(error = %e, operation, resource, "rejected payload value");
            return ResourceError::invalid_data(
                "Invalid data for one or more columns".to_string(),
            );
        }
        tracing::error!(error = %e, operation, resource, "database write failed");
        ResourceError::internal_error("Database error".to_string())
    }
}

fn into_object(payload: Json) -> Result<Map<String, Json>, ResourceError> {
    match payload {
        Json::Object(map) => Ok(map),
        _ => Err(ResourceError::no_valid_data()),
    }
}

/// Payload keys that are declared columns, in declaration order
fn known_columns<'a>(
    descriptor: &'a ResourceDescriptor,
    payload: &Map<String, Json>,
) -> Vec<&'a ColumnDescriptor> {
    descriptor
        .columns
        .iter()
        .filter(|c| payload.contains_key(c.name))
        .collect()
}

fn strip_sensitive(descriptor: &ResourceDescriptor, row: &mut Json) {
    if let Json::Object(map) = row {
        for column in descriptor.columns.iter().filter(|c| c.sensitive) {
            map.remove(column.name);
        }
    }
}

fn pk_value(id: &str) -> Value {
    match id.trim().parse::<i64>() {
        Ok(n) => Value::BigInt(Some(n)),
        Err(_) => Value::String(Some(Box::new(id.to_string()))),
    }
}

/// Convert a normalized JSON value into a typed bind parameter
fn bind_value(column: &ColumnDescriptor, value: &Json) -> Value {
    match value {
        Json::Null => null_value(column.ty),
        Json::Bool(b) => Value::Bool(Some(*b)),
        Json::Number(n) => match column.ty {
            ColumnType::Integer => match n.as_i64() {
                Some(i) => Value::BigInt(Some(i)),
                None => Value::Double(n.as_f64()),
            },
            ColumnType::Decimal => Value::Double(n.as_f64()),
            ColumnType::Bool => Value::Bool(Some(n.as_i64().unwrap_or(0) != 0)),
            _ => Value::String(Some(Box::new(n.to_string()))),
        },
        Json::String(s) => Value::String(Some(Box::new(s.clone()))),
        other => Value::String(Some(Box::new(other.to_string()))),
    }
}

fn null_value(ty: ColumnType) -> Value {
    match ty {
        ColumnType::Integer => Value::BigInt(None),
        ColumnType::Decimal => Value::Double(None),
        ColumnType::Bool => Value::Bool(None),
        _ => Value::String(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;
    use serde_json::json;

    async fn setup() -> RecordStore {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let registry = Arc::new(SchemaRegistry::new());
        let tipo_store = Arc::new(TipoUsuarioStore::new(db.clone()));
        let password_service = Arc::new(PasswordService::new("test-pepper".to_string()));
        RecordStore::new(db, registry, tipo_store, password_service)
    }

    fn gasto_payload() -> Json {
        json!({
            "nombre": "Licencias",
            "anno": "2025",
            "fecha": "15/06/2025",
            "monto": "1,234.50",
            "proveedor": "Proveedor SA",
            "status": ""
        })
    }

    #[tokio::test]
    async fn unknown_resource_is_not_found() {
        let store = setup().await;
        match store.list("facturas").await {
            Err(ResourceError::NotFound(_)) => {}
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn create_normalizes_dates_and_numbers() {
        let store = setup().await;
        let created = store.create("gastos", gasto_payload()).await.unwrap();

        assert_eq!(created["fecha"], json!("2025-06-15"));
        assert_eq!(created["anno"], json!(2025));
        assert_eq!(created["monto"].as_f64().unwrap(), 1234.50);
        // empty string to null for a nullable column
        assert_eq!(created["status"], Json::Null);
    }

    #[tokio::test]
    async fn create_then_get_roundtrip() {
        let store = setup().await;
        let created = store.create("gastos", gasto_payload()).await.unwrap();
        let id = created["idgasto"].as_i64().unwrap().to_string();

        let fetched = store.get("gastos", &id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn missing_required_columns_are_listed_exactly() {
        let store = setup().await;
        let result = store
            .create("presupuestos", json!({ "nombre": "Q1", "anno": 2025 }))
            .await;

        match result {
            Err(ref e @ ResourceError::MissingFields(_)) => {
                assert_eq!(e.missing().unwrap(), ["fecha_ini", "fecha_fin"]);
            }
            other => panic!("expected MissingFields, got {:?}", other),
        }

        // nothing was inserted
        assert!(store.list("presupuestos").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn payload_without_known_columns_is_rejected() {
        let store = setup().await;
        let result = store
            .create("plantas", json!({ "unknown": 1, "also_unknown": "x" }))
            .await;
        match result {
            Err(ResourceError::NoValidData(_)) => {}
            other => panic!("expected NoValidData, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn client_supplied_primary_key_is_ignored() {
        let store = setup().await;
        let created = store
            .create("cuentas", json!({ "idcuenta": 999, "nombre": "Caja chica" }))
            .await
            .unwrap();
        assert_eq!(created["idcuenta"], json!(1));
    }

    #[tokio::test]
    async fn unknown_payload_keys_are_dropped_silently() {
        let store = setup().await;
        let created = store
            .create(
                "plantas",
                json!({ "nombre": "Planta Norte", "superficie": 1200 }),
            )
            .await
            .unwrap();
        assert_eq!(created["nombre"], json!("Planta Norte"));
        assert!(created.get("superficie").is_none());
    }

    #[tokio::test]
    async fn update_is_partial() {
        let store = setup().await;
        let created = store.create("gastos", gasto_payload()).await.unwrap();
        let id = created["idgasto"].as_i64().unwrap().to_string();

        let updated = store
            .update("gastos", &id, json!({ "monto": "2,500.00" }))
            .await
            .unwrap();

        assert_eq!(updated["monto"].as_f64().unwrap(), 2500.0);
        // unspecified fields keep their stored values
        assert_eq!(updated["nombre"], json!("Licencias"));
        assert_eq!(updated["fecha"], json!("2025-06-15"));
        assert_eq!(updated["proveedor"], json!("Proveedor SA"));
    }

    #[tokio::test]
    async fn update_of_missing_row_is_not_found() {
        let store = setup().await;
        match store.update("gastos", "42", json!({ "monto": 10 })).await {
            Err(ResourceError::NotFound(_)) => {}
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn delete_of_missing_row_is_not_found() {
        let store = setup().await;
        match store.delete("gastos", "42").await {
            Err(ResourceError::NotFound(_)) => {}
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let store = setup().await;
        let created = store.create("gastos", gasto_payload()).await.unwrap();
        let id = created["idgasto"].as_i64().unwrap().to_string();

        store.delete("gastos", &id).await.unwrap();
        match store.get("gastos", &id).await {
            Err(ResourceError::NotFound(_)) => {}
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    fn usuario_payload(tipo: &str) -> Json {
        json!({
            "nombre": "Ana Martinez",
            "email": format!("ana+{}@example.com", tipo),
            "password": "1234",
            "tipo": tipo
        })
    }

    #[tokio::test]
    async fn usuario_tipo_resolves_by_code_and_by_name() {
        let store = setup().await;
        let by_code = store
            .create("usuarios", usuario_payload("1"))
            .await
            .unwrap();
        let by_name = store
            .create("usuarios", usuario_payload("Interno"))
            .await
            .unwrap();
        assert_eq!(by_code["tipo_id"], by_name["tipo_id"]);
        assert_eq!(by_code["tipo_id"], json!(1));
    }

    #[tokio::test]
    async fn unrecognized_tipo_is_rejected_without_creating_an_entry() {
        let store = setup().await;
        let result = store.create("usuarios", usuario_payload("Becario")).await;

        match result {
            Err(ResourceError::InvalidTipo(json)) => {
                let allowed = json.0.allowed.as_ref().unwrap();
                assert_eq!(allowed.len(), 2);
            }
            other => panic!("expected InvalidTipo, got {:?}", other),
        }

        // no user row and no new lookup entry as side effects
        assert!(store.list("usuarios").await.unwrap().is_empty());
        assert_eq!(store.tipo_store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn usuario_rows_never_expose_credential_columns() {
        let store = setup().await;
        let created = store
            .create("usuarios", usuario_payload("1"))
            .await
            .unwrap();
        assert!(created.get("password_hash").is_none());
        assert!(created.get("secret").is_none());
        assert!(created.get("password").is_none());

        let rows = store.list("usuarios").await.unwrap();
        assert!(rows[0].get("password_hash").is_none());
        assert!(rows[0].get("secret").is_none());
    }

    #[tokio::test]
    async fn usuario_password_is_stored_hashed() {
        let store = setup().await;
        let created = store
            .create("usuarios", usuario_payload("1"))
            .await
            .unwrap();
        let id = created["idusuario"].as_i64().unwrap().to_string();

        // read the raw row to inspect the stored hash
        let statement = Statement::from_sql_and_values(
            store.db.get_database_backend(),
            "SELECT * FROM `usuarios` WHERE `idusuario` = ?",
            [pk_value(&id)],
        );
        let raw = JsonValue::find_by_statement(statement)
            .one(&store.db)
            .await
            .unwrap()
            .unwrap();
        let stored = raw["password_hash"].as_str().unwrap();
        assert_ne!(stored, "1234");
        assert!(stored.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn update_can_change_tipo_by_name() {
        let store = setup().await;
        let created = store
            .create("usuarios", usuario_payload("1"))
            .await
            .unwrap();
        let id = created["idusuario"].as_i64().unwrap().to_string();

        let updated = store
            .update("usuarios", &id, json!({ "tipo": "Externo" }))
            .await
            .unwrap();
        assert_eq!(updated["tipo_id"], json!(2));
        assert_eq!(updated["nombre"], json!("Ana Martinez"));
    }
}
