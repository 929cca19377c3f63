// Database entities - SeaORM models
pub mod tipo_usuario;
pub mod usuario;
