// Request/response models for the HTTP surface
pub mod auth;
pub mod common;
pub mod meta;
pub mod tipo_usuario;
