use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Request model for user login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email for authentication
    pub email: String,

    /// Password for authentication
    pub password: String,
}

/// Public view of a user, as returned by auth endpoints
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UserInfo {
    /// User id (idusuario)
    pub id: i32,

    /// Email address
    pub email: String,

    /// Display name
    pub nombre: String,
}

/// Response model for login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// JWT access token (HS256, 8 hour expiry)
    pub token: String,

    /// The authenticated user
    pub user: UserInfo,
}

/// Request model for registration
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Email address (must be unique)
    pub email: String,

    /// Plaintext password, stored as an Argon2id hash
    pub password: String,

    /// Optional display name
    pub nombre: Option<String>,
}

/// Response model for registration
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Id of the created user
    pub id: i32,

    /// Email address
    pub email: String,

    /// Display name
    pub nombre: Option<String>,
}

/// Request model for the two-step password reset
///
/// Without `new_password` the call only verifies the email/secret pair;
/// with it, the password is updated after verification.
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    /// Email of the account
    pub email: String,

    /// Out-of-band reset secret
    pub secret: String,

    /// New password; omit to only verify the secret
    #[oai(rename = "newPassword")]
    #[serde(rename = "newPassword")]
    pub new_password: Option<String>,
}

/// Response model for password reset
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ResetPasswordResponse {
    /// The email/secret pair matched
    pub verified: bool,

    /// Present once the password was actually updated
    pub message: Option<String>,
}
