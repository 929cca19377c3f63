use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::errors::ResourceError;
use crate::types::db::tipo_usuario::{self, Entity as TipoUsuario};
use crate::types::dto::tipo_usuario::TipoUsuarioDto;

/// Read/write access to the tipo_usuario lookup table
///
/// The lookup exists to migrate the legacy free-text `tipo` field on users
/// to a foreign key. Resolution never creates entries: an unrecognized value
/// is a client error, reported together with the accepted entries.
pub struct TipoUsuarioStore {
    db: DatabaseConnection,
}

impl TipoUsuarioStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Resolve a legacy `tipo` value to a lookup id
    ///
    /// Numeric-looking values are matched against `codigo` first; any value
    /// is then matched against `codigo` or `nombre`.
    pub async fn resolve(&self, value: &str) -> Result<Option<i32>, ResourceError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        if trimmed.chars().all(|c| c.is_ascii_digit()) {
            let by_code = TipoUsuario::find()
                .filter(tipo_usuario::Column::Codigo.eq(trimmed))
                .one(&self.db)
                .await
                .map_err(db_error("resolve_tipo_by_codigo"))?;
            if let Some(entry) = by_code {
                return Ok(Some(entry.idtipo));
            }
        }

        let by_code_or_name = TipoUsuario::find()
            .filter(
                Condition::any()
                    .add(tipo_usuario::Column::Codigo.eq(trimmed))
                    .add(tipo_usuario::Column::Nombre.eq(trimmed)),
            )
            .one(&self.db)
            .await
            .map_err(db_error("resolve_tipo"))?;

        Ok(by_code_or_name.map(|entry| entry.idtipo))
    }

    /// All lookup entries, in id order
    pub async fn list(&self) -> Result<Vec<TipoUsuarioDto>, ResourceError> {
        let entries = TipoUsuario::find()
            .order_by_asc(tipo_usuario::Column::Idtipo)
            .all(&self.db)
            .await
            .map_err(db_error("list_tipo_usuario"))?;

        Ok(entries.into_iter().map(TipoUsuarioDto::from).collect())
    }

    /// Create a new lookup entry (admin-gated at the API layer)
    pub async fn create(&self, codigo: &str, nombre: &str) -> Result<TipoUsuarioDto, ResourceError> {
        let existing = TipoUsuario::find()
            .filter(tipo_usuario::Column::Codigo.eq(codigo))
            .one(&self.db)
            .await
            .map_err(db_error("check_tipo_codigo"))?;
        if existing.is_some() {
            return Err(ResourceError::conflict(format!(
                "tipo_usuario codigo '{}' already exists",
                codigo
            )));
        }

        let entry = tipo_usuario::ActiveModel {
            codigo: Set(codigo.to_string()),
            nombre: Set(nombre.to_string()),
            ..Default::default()
        };

        let model = entry.insert(&self.db).await.map_err(|e| {
            if e.to_string().contains("UNIQUE") || e.to_string().contains("Duplicate") {
                ResourceError::conflict(format!("tipo_usuario codigo '{}' already exists", codigo))
            } else {
                tracing::error!(error = %e, "insert_tipo_usuario failed");
                ResourceError::internal_error("Database error".to_string())
            }
        })?;

        Ok(TipoUsuarioDto::from(model))
    }
}

fn db_error(operation: &'static str) -> impl Fn(sea_orm::DbErr) -> ResourceError {
    move |e| {
        tracing::error!(error = %e, operation, "database error");
        ResourceError::internal_error("Database error".to_string())
    }
}
