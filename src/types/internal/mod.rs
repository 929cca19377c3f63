// Internal (non-API) data structures
pub mod auth;
