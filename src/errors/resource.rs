use poem_openapi::{payload::Json, ApiResponse, Object};
use std::fmt;

use crate::types::dto::tipo_usuario::TipoUsuarioDto;

/// Standardized error response for CRUD endpoints
#[derive(Object, Debug)]
pub struct ResourceErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,

    /// Required columns absent from the payload (missing-fields errors only)
    pub missing: Option<Vec<String>>,

    /// Accepted lookup entries (invalid-tipo errors only)
    pub allowed: Option<Vec<TipoUsuarioDto>>,
}

impl ResourceErrorResponse {
    fn new(error: &str, message: String, status_code: u16) -> Self {
        Self {
            error: error.to_string(),
            message,
            status_code,
            missing: None,
            allowed: None,
        }
    }
}

/// CRUD operation error types
///
/// Client input errors (missing fields, unknown resource, invalid lookup)
/// are distinguishable from infrastructure failures, which surface as 500
/// with a stable code while the raw database error goes to the logs.
#[derive(ApiResponse, Debug)]
pub enum ResourceError {
    /// Resource or row not found
    #[oai(status = 404)]
    NotFound(Json<ResourceErrorResponse>),

    /// Payload contained no usable columns
    #[oai(status = 400)]
    NoValidData(Json<ResourceErrorResponse>),

    /// Required NOT NULL columns were not supplied
    #[oai(status = 400)]
    MissingFields(Json<ResourceErrorResponse>),

    /// A legacy `tipo` value did not match any lookup entry
    #[oai(status = 400)]
    InvalidTipo(Json<ResourceErrorResponse>),

    /// Database rejected a value (e.g. too long for its column)
    #[oai(status = 400)]
    InvalidData(Json<ResourceErrorResponse>),

    /// A duplicate value violated a unique constraint
    #[oai(status = 409)]
    Conflict(Json<ResourceErrorResponse>),

    /// Missing or invalid bearer token
    #[oai(status = 401)]
    Unauthorized(Json<ResourceErrorResponse>),

    /// Admin role required
    #[oai(status = 403)]
    AdminRequired(Json<ResourceErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ResourceErrorResponse>),
}

impl ResourceError {
    pub fn resource_not_found(resource: &str) -> Self {
        ResourceError::NotFound(Json(ResourceErrorResponse::new(
            "resource_not_found",
            format!("Unknown resource '{}'", resource),
            404,
        )))
    }

    pub fn not_found() -> Self {
        ResourceError::NotFound(Json(ResourceErrorResponse::new(
            "not_found",
            "Not found".to_string(),
            404,
        )))
    }

    pub fn no_valid_data() -> Self {
        ResourceError::NoValidData(Json(ResourceErrorResponse::new(
            "no_valid_data",
            "No valid data provided".to_string(),
            400,
        )))
    }

    pub fn missing_fields(missing: Vec<String>) -> Self {
        let mut response = ResourceErrorResponse::new(
            "missing_required_fields",
            format!("Missing required fields: {}", missing.join(", ")),
            400,
        );
        response.missing = Some(missing);
        ResourceError::MissingFields(Json(response))
    }

    pub fn invalid_tipo(provided: &str, allowed: Vec<TipoUsuarioDto>) -> Self {
        let mut response = ResourceErrorResponse::new(
            "invalid_tipo",
            format!("Invalid tipo value '{}'", provided),
            400,
        );
        response.allowed = Some(allowed);
        ResourceError::InvalidTipo(Json(response))
    }

    pub fn invalid_data(message: String) -> Self {
        ResourceError::InvalidData(Json(ResourceErrorResponse::new(
            "invalid_data",
            message,
            400,
        )))
    }

    pub fn conflict(message: String) -> Self {
        ResourceError::Conflict(Json(ResourceErrorResponse::new("conflict", message, 409)))
    }

    pub fn unauthorized() -> Self {
        ResourceError::Unauthorized(Json(ResourceErrorResponse::new(
            "unauthorized",
            "Valid bearer token required".to_string(),
            401,
        )))
    }

    pub fn admin_required() -> Self {
        ResourceError::AdminRequired(Json(ResourceErrorResponse::new(
            "admin_required",
            "Admin role required".to_string(),
            403,
        )))
    }

    pub fn internal_error(message: String) -> Self {
        ResourceError::InternalError(Json(ResourceErrorResponse::new(
            "internal_error",
            message,
            500,
        )))
    }

    pub fn message(&self) -> &str {
        match self {
            ResourceError::NotFound(json)
            | ResourceError::NoValidData(json)
            | ResourceError::MissingFields(json)
            | ResourceError::InvalidTipo(json)
            | ResourceError::InvalidData(json)
            | ResourceError::Conflict(json)
            | ResourceError::Unauthorized(json)
            | ResourceError::AdminRequired(json)
            | ResourceError::InternalError(json) => &json.0.message,
        }
    }

    /// Required columns reported by a missing-fields error
    pub fn missing(&self) -> Option<&[String]> {
        match self {
            ResourceError::MissingFields(json) => json.0.missing.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
