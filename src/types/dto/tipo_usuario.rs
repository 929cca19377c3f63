use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::tipo_usuario;

/// A tipo_usuario lookup entry
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct TipoUsuarioDto {
    /// Lookup id (idtipo)
    pub idtipo: i32,

    /// Short code, e.g. "1"
    pub codigo: String,

    /// Display name, e.g. "Interno"
    pub nombre: String,
}

impl From<tipo_usuario::Model> for TipoUsuarioDto {
    fn from(model: tipo_usuario::Model) -> Self {
        Self {
            idtipo: model.idtipo,
            codigo: model.codigo,
            nombre: model.nombre,
        }
    }
}

/// Request model for creating a lookup entry (admin only)
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateTipoUsuarioRequest {
    /// Short code (unique)
    pub codigo: String,

    /// Display name
    pub nombre: String,
}
