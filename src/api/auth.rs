use poem_openapi::{payload::Json, ApiResponse, OpenApi, Tags};
use std::sync::Arc;

use crate::errors::AuthError;
use crate::services::TokenService;
use crate::stores::UserStore;
use crate::types::dto::auth::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, ResetPasswordRequest,
    ResetPasswordResponse, UserInfo,
};

/// Authentication API endpoints
pub struct AuthApi {
    user_store: Arc<UserStore>,
    token_service: Arc<TokenService>,
}

impl AuthApi {
    pub fn new(user_store: Arc<UserStore>, token_service: Arc<TokenService>) -> Self {
        Self {
            user_store,
            token_service,
        }
    }
}

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

/// Successful registration response
#[derive(ApiResponse)]
pub enum RegisterCreated {
    /// User created
    #[oai(status = 201)]
    Created(Json<RegisterResponse>),
}

#[OpenApi]
impl AuthApi {
    /// Login with email and password to receive a JWT
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(&self, body: Json<LoginRequest>) -> Result<Json<LoginResponse>, AuthError> {
        if body.email.trim().is_empty() || body.password.is_empty() {
            return Err(AuthError::missing_fields("Email and password are required"));
        }

        let user = self
            .user_store
            .verify_credentials(&body.email, &body.password)
            .await?;

        let token =
            self.token_service
                .generate_jwt(user.idusuario, &user.email, user.is_admin)?;

        tracing::info!(user_id = user.idusuario, "user logged in");
        Ok(Json(LoginResponse {
            token,
            user: UserInfo {
                id: user.idusuario,
                email: user.email,
                nombre: user.nombre,
            },
        }))
    }

    /// Register a new user account
    #[oai(path = "/register", method = "post", tag = "AuthTags::Authentication")]
    async fn register(&self, body: Json<RegisterRequest>) -> Result<RegisterCreated, AuthError> {
        if body.email.trim().is_empty() || body.password.is_empty() {
            return Err(AuthError::missing_fields("Email and password are required"));
        }

        let user = self
            .user_store
            .register(&body.email, &body.password, body.nombre.clone())
            .await?;

        tracing::info!(user_id = user.idusuario, "user registered");
        Ok(RegisterCreated::Created(Json(RegisterResponse {
            id: user.idusuario,
            email: user.email,
            nombre: Some(user.nombre),
        })))
    }

    /// Two-step password reset
    ///
    /// Without `newPassword` the email/secret pair is only verified; with it
    /// the password is replaced. Failures never reveal whether the email
    /// exists.
    #[oai(
        path = "/reset-password",
        method = "post",
        tag = "AuthTags::Authentication"
    )]
    async fn reset_password(
        &self,
        body: Json<ResetPasswordRequest>,
    ) -> Result<Json<ResetPasswordResponse>, AuthError> {
        if body.email.trim().is_empty() || body.secret.trim().is_empty() {
            return Err(AuthError::missing_fields("Email and secret are required"));
        }

        match body.new_password.as_deref() {
            None | Some("") => {
                self.user_store
                    .verify_reset_secret(&body.email, &body.secret)
                    .await?;
                Ok(Json(ResetPasswordResponse {
                    verified: true,
                    message: None,
                }))
            }
            Some(new_password) => {
                self.user_store
                    .reset_password(&body.email, &body.secret, new_password)
                    .await?;
                tracing::info!("password reset completed");
                Ok(Json(ResetPasswordResponse {
                    verified: true,
                    message: Some("Password updated".to_string()),
                }))
            }
        }
    }
}
