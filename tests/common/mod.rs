// Common test utilities for integration tests

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use std::sync::Arc;

use altex_ppto_backend::schema::SchemaRegistry;
use altex_ppto_backend::services::{PasswordService, TokenService};
use altex_ppto_backend::stores::{RecordStore, TipoUsuarioStore, UserStore};

/// Creates a test database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Fully wired backend over an in-memory database
pub struct TestBackend {
    pub db: DatabaseConnection,
    pub record_store: Arc<RecordStore>,
    pub user_store: Arc<UserStore>,
    pub tipo_usuario_store: Arc<TipoUsuarioStore>,
    pub token_service: Arc<TokenService>,
}

pub async fn setup_backend() -> TestBackend {
    let db = setup_test_db().await;

    let registry = Arc::new(SchemaRegistry::new());
    let password_service = Arc::new(PasswordService::new("test-pepper".to_string()));
    let token_service = Arc::new(TokenService::new(
        "test-secret-key-minimum-32-characters-long".to_string(),
    ));
    let tipo_usuario_store = Arc::new(TipoUsuarioStore::new(db.clone()));
    let user_store = Arc::new(UserStore::new(db.clone(), password_service.clone()));
    let record_store = Arc::new(RecordStore::new(
        db.clone(),
        registry,
        tipo_usuario_store.clone(),
        password_service,
    ));

    TestBackend {
        db,
        record_store,
        user_store,
        tipo_usuario_store,
        token_service,
    }
}
