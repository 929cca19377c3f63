use std::sync::Arc;

use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use subtle::ConstantTimeEq;

use crate::errors::AuthError;
use crate::services::PasswordService;
use crate::types::db::usuario::{self, Entity as Usuario};

/// Account management for the auth endpoints
///
/// The generic CRUD layer can also write usuarios rows; this store covers
/// the credential-sensitive paths (register, login, reset) where the email
/// lookup and hash verification live.
pub struct UserStore {
    db: DatabaseConnection,
    password_service: Arc<PasswordService>,
}

impl UserStore {
    pub fn new(db: DatabaseConnection, password_service: Arc<PasswordService>) -> Self {
        Self {
            db,
            password_service,
        }
    }

    /// Register a new user
    ///
    /// The password is stored as an Argon2id hash and a fresh reset secret
    /// is generated for the out-of-band reset flow.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        nombre: Option<String>,
    ) -> Result<usuario::Model, AuthError> {
        let existing = self
            .find_by_email(email)
            .await?;
        if existing.is_some() {
            return Err(AuthError::duplicate_email());
        }

        let password_hash = self
            .password_service
            .hash(password)
            .map_err(|e| AuthError::internal_error(e.to_string()))?;
        let secret = self.password_service.generate_reset_secret();

        let new_user = usuario::ActiveModel {
            nombre: Set(nombre.unwrap_or_default()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash),
            secret: Set(Some(secret)),
            ..Default::default()
        };

        new_user.insert(&self.db).await.map_err(|e| {
            if e.to_string().contains("UNIQUE") || e.to_string().contains("Duplicate") {
                AuthError::duplicate_email()
            } else {
                tracing::error!(error = %e, "insert_usuario failed");
                AuthError::internal_error("Database error".to_string())
            }
        })
    }

    /// Verify email/password and return the user on success
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<usuario::Model, AuthError> {
        let user = self
            .find_by_email(email)
            .await?
            .ok_or_else(AuthError::invalid_credentials)?;

        let matches = self
            .password_service
            .verify(password, &user.password_hash)
            .map_err(|e| AuthError::internal_error(e.to_string()))?;
        if !matches {
            return Err(AuthError::invalid_credentials());
        }

        Ok(user)
    }

    /// Verify the email/secret pair of the reset flow
    ///
    /// Failure never reveals whether the email exists.
    pub async fn verify_reset_secret(
        &self,
        email: &str,
        secret: &str,
    ) -> Result<usuario::Model, AuthError> {
        let user = self
            .find_by_email(email)
            .await?
            .ok_or_else(AuthError::invalid_reset_secret)?;

        let stored = user.secret.as_deref().unwrap_or("").trim();
        // constant-time comparison, leaking only the length
        let matches: bool = stored.as_bytes().ct_eq(secret.trim().as_bytes()).into();
        if stored.is_empty() || !matches {
            return Err(AuthError::invalid_reset_secret());
        }

        Ok(user)
    }

    /// Verify the email/secret pair and commit a new password hash
    pub async fn reset_password(
        &self,
        email: &str,
        secret: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let user = self.verify_reset_secret(email, secret).await?;

        let password_hash = self
            .password_service
            .hash(new_password)
            .map_err(|e| AuthError::internal_error(e.to_string()))?;

        let mut active: usuario::ActiveModel = user.into();
        active.password_hash = Set(password_hash);
        active.update(&self.db).await.map_err(|e| {
            tracing::error!(error = %e, "update_password failed");
            AuthError::internal_error("Database error".to_string())
        })?;

        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<usuario::Model>, AuthError> {
        Usuario::find()
            .filter(usuario::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "find_usuario_by_email failed");
                AuthError::internal_error("Database error".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn setup() -> UserStore {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");
        let password_service = Arc::new(PasswordService::new("test-pepper".to_string()));
        UserStore::new(db, password_service)
    }

    #[tokio::test]
    async fn register_then_login() {
        let store = setup().await;
        let user = store
            .register("ana@example.com", "1234", Some("Ana Martinez".to_string()))
            .await
            .unwrap();
        assert_eq!(user.email, "ana@example.com");
        assert_eq!(user.nombre, "Ana Martinez");
        assert!(user.secret.is_some());
        // stored hash is never the plaintext
        assert_ne!(user.password_hash, "1234");

        let verified = store
            .verify_credentials("ana@example.com", "1234")
            .await
            .unwrap();
        assert_eq!(verified.idusuario, user.idusuario);
    }

    #[tokio::test]
    async fn login_with_wrong_password_fails() {
        let store = setup().await;
        store
            .register("ana@example.com", "1234", None)
            .await
            .unwrap();

        match store.verify_credentials("ana@example.com", "9999").await {
            Err(AuthError::InvalidCredentials(_)) => {}
            other => panic!("expected InvalidCredentials, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn login_with_unknown_email_fails() {
        let store = setup().await;
        match store.verify_credentials("nadie@example.com", "1234").await {
            Err(AuthError::InvalidCredentials(_)) => {}
            other => panic!("expected InvalidCredentials, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = setup().await;
        store
            .register("ana@example.com", "1234", None)
            .await
            .unwrap();

        match store.register("ana@example.com", "5678", None).await {
            Err(AuthError::DuplicateEmail(_)) => {}
            other => panic!("expected DuplicateEmail, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn reset_flow_verifies_then_commits() {
        let store = setup().await;
        let user = store
            .register("ana@example.com", "1234", None)
            .await
            .unwrap();
        let secret = user.secret.clone().unwrap();

        // verification step alone does not change the password
        store
            .verify_reset_secret("ana@example.com", &secret)
            .await
            .unwrap();
        store
            .verify_credentials("ana@example.com", "1234")
            .await
            .unwrap();

        // commit step replaces the password
        store
            .reset_password("ana@example.com", &secret, "nueva")
            .await
            .unwrap();
        store
            .verify_credentials("ana@example.com", "nueva")
            .await
            .unwrap();
        match store.verify_credentials("ana@example.com", "1234").await {
            Err(AuthError::InvalidCredentials(_)) => {}
            other => panic!("expected InvalidCredentials, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn reset_with_wrong_secret_fails_without_revealing_email() {
        let store = setup().await;
        store
            .register("ana@example.com", "1234", None)
            .await
            .unwrap();

        let wrong_secret = store
            .verify_reset_secret("ana@example.com", "not-the-secret")
            .await;
        let wrong_email = store
            .verify_reset_secret("nadie@example.com", "whatever")
            .await;

        for outcome in [wrong_secret, wrong_email] {
            match outcome {
                Err(AuthError::InvalidResetSecret(_)) => {}
                other => panic!("expected InvalidResetSecret, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn account_without_a_stored_secret_never_verifies() {
        let store = setup().await;
        let user = store
            .register("ana@example.com", "1234", None)
            .await
            .unwrap();

        let mut active: usuario::ActiveModel = user.into();
        active.secret = Set(None);
        active.update(&store.db).await.unwrap();

        // an empty supplied secret must not match an absent stored one
        for supplied in ["", "  ", "anything"] {
            match store.verify_reset_secret("ana@example.com", supplied).await {
                Err(AuthError::InvalidResetSecret(_)) => {}
                other => panic!("expected InvalidResetSecret, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn reset_secret_comparison_tolerates_whitespace() {
        let store = setup().await;
        let user = store
            .register("ana@example.com", "1234", None)
            .await
            .unwrap();
        let secret = format!("  {}  ", user.secret.unwrap());

        store
            .verify_reset_secret("ana@example.com", &secret)
            .await
            .unwrap();
    }
}
