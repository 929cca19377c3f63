pub mod record_store;
pub mod tipo_usuario_store;
pub mod user_store;

pub use record_store::RecordStore;
pub use tipo_usuario_store::TipoUsuarioStore;
pub use user_store::UserStore;
