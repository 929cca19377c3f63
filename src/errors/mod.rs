// Error types - API-visible enums plus the internal infrastructure error
pub mod auth;
pub mod internal;
pub mod resource;

pub use auth::AuthError;
pub use internal::InternalError;
pub use resource::ResourceError;
