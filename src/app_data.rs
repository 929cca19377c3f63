use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::Settings;
use crate::schema::SchemaRegistry;
use crate::services::{PasswordService, TokenService};
use crate::stores::{RecordStore, TipoUsuarioStore, UserStore};

/// Centralized application data
///
/// All dependencies are created once here and shared across the API structs,
/// so no store or service is constructed twice and nothing lives in globals.
pub struct AppData {
    pub db: DatabaseConnection,
    pub registry: Arc<SchemaRegistry>,
    pub password_service: Arc<PasswordService>,
    pub token_service: Arc<TokenService>,
    pub tipo_usuario_store: Arc<TipoUsuarioStore>,
    pub user_store: Arc<UserStore>,
    pub record_store: Arc<RecordStore>,
}

impl AppData {
    /// Initialize all application data
    ///
    /// The database connection should be established and migrated before
    /// calling this.
    pub fn init(db: DatabaseConnection, settings: &Settings) -> Self {
        tracing::info!("Initializing AppData...");

        let registry = Arc::new(SchemaRegistry::new());
        tracing::debug!(
            resources = registry.resource_names().count(),
            "schema registry built"
        );

        let password_service = Arc::new(PasswordService::new(settings.password_pepper.clone()));
        let token_service = Arc::new(TokenService::new(settings.jwt_secret.clone()));

        let tipo_usuario_store = Arc::new(TipoUsuarioStore::new(db.clone()));
        let user_store = Arc::new(UserStore::new(db.clone(), password_service.clone()));
        let record_store = Arc::new(RecordStore::new(
            db.clone(),
            registry.clone(),
            tipo_usuario_store.clone(),
            password_service.clone(),
        ));

        tracing::info!("AppData initialization complete");
        Self {
            db,
            registry,
            password_service,
            token_service,
            tipo_usuario_store,
            user_store,
            record_store,
        }
    }
}
