// API layer - HTTP endpoints
pub mod auth;
pub mod health;
pub mod resources;
pub mod tipo_usuario;

pub use auth::AuthApi;
pub use health::HealthApi;
pub use resources::ResourcesApi;
pub use tipo_usuario::TipoUsuarioApi;
