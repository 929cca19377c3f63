use thiserror::Error;

/// Infrastructure error type for startup and configuration paths
///
/// Not exposed via the API. Endpoints convert failures to `AuthError` or
/// `ResourceError` with stable error codes; the raw cause stays in the logs.
#[derive(Error, Debug)]
pub enum InternalError {
    /// Database connection or migration failed
    #[error("Database error: {operation} failed: {source}")]
    Database {
        operation: String,
        #[source]
        source: sea_orm::DbErr,
    },

    /// A required configuration value is missing or malformed
    #[error("Config error: {key}: {message}")]
    Config { key: String, message: String },

    /// Cryptographic operation failed (hashing, verification)
    #[error("Crypto error: {operation} failed: {message}")]
    Crypto { operation: String, message: String },
}

impl InternalError {
    pub fn database(operation: impl Into<String>, source: sea_orm::DbErr) -> Self {
        Self::Database {
            operation: operation.into(),
            source,
        }
    }

    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn crypto(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Crypto {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_message_names_the_key() {
        let err = InternalError::config("JWT_SECRET", "must be set");
        assert_eq!(err.to_string(), "Config error: JWT_SECRET: must be set");
    }

    #[test]
    fn crypto_error_message_names_the_operation() {
        let err = InternalError::crypto("hash_password", "bad params");
        assert_eq!(
            err.to_string(),
            "Crypto error: hash_password failed: bad params"
        );
    }
}
