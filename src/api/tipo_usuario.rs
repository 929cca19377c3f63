use poem_openapi::{auth::Bearer, payload::Json, ApiResponse, OpenApi, SecurityScheme, Tags};
use std::sync::Arc;

use crate::errors::ResourceError;
use crate::services::TokenService;
use crate::stores::TipoUsuarioStore;
use crate::types::dto::tipo_usuario::{CreateTipoUsuarioRequest, TipoUsuarioDto};
use crate::types::internal::auth::Claims;

/// Lookup table API for user types
///
/// Reading the lookup is open; adding entries is reserved for admins, since
/// CRUD writes never create lookup entries as a side effect.
pub struct TipoUsuarioApi {
    tipo_store: Arc<TipoUsuarioStore>,
    token_service: Arc<TokenService>,
}

impl TipoUsuarioApi {
    pub fn new(tipo_store: Arc<TipoUsuarioStore>, token_service: Arc<TokenService>) -> Self {
        Self {
            tipo_store,
            token_service,
        }
    }

    fn require_admin(&self, auth: &BearerAuth) -> Result<Claims, ResourceError> {
        let claims = self
            .token_service
            .validate_jwt(&auth.0.token)
            .map_err(|_| ResourceError::unauthorized())?;
        if !claims.admin {
            return Err(ResourceError::admin_required());
        }
        Ok(claims)
    }
}

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    key_name = "Authorization",
    key_in = "header",
    bearer_format = "JWT"
)]
pub struct BearerAuth(pub Bearer);

/// API tags for lookup endpoints
#[derive(Tags)]
enum LookupTags {
    /// User type lookup endpoints
    Lookups,
}

/// Successful lookup creation response
#[derive(ApiResponse)]
pub enum TipoUsuarioCreated {
    /// Entry created
    #[oai(status = 201)]
    Created(Json<TipoUsuarioDto>),
}

#[OpenApi]
impl TipoUsuarioApi {
    /// List user type lookup entries
    #[oai(path = "/tipo_usuario", method = "get", tag = "LookupTags::Lookups")]
    async fn list(&self) -> Result<Json<Vec<TipoUsuarioDto>>, ResourceError> {
        let entries = self.tipo_store.list().await?;
        Ok(Json(entries))
    }

    /// Add a lookup entry (admin only)
    #[oai(path = "/tipo_usuario", method = "post", tag = "LookupTags::Lookups")]
    async fn create(
        &self,
        auth: BearerAuth,
        body: Json<CreateTipoUsuarioRequest>,
    ) -> Result<TipoUsuarioCreated, ResourceError> {
        let claims = self.require_admin(&auth)?;

        let codigo = body.codigo.trim();
        let nombre = body.nombre.trim();
        let mut missing = Vec::new();
        if codigo.is_empty() {
            missing.push("codigo".to_string());
        }
        if nombre.is_empty() {
            missing.push("nombre".to_string());
        }
        if !missing.is_empty() {
            return Err(ResourceError::missing_fields(missing));
        }

        let created = self.tipo_store.create(codigo, nombre).await?;
        tracing::info!(admin = %claims.email, codigo, "lookup entry added");
        Ok(TipoUsuarioCreated::Created(Json(created)))
    }
}
