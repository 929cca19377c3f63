use std::env;

use crate::errors::InternalError;

/// Application settings loaded from the environment
///
/// A full `DATABASE_URL` wins; otherwise the URL is composed from the
/// individual `DB_*` variables. The JWT secret and password pepper have no
/// defaults, startup fails without them.
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub jwt_secret: String,
    pub password_pepper: String,
    pub host: String,
    pub port: u16,
}

impl Settings {
    pub fn from_env() -> Result<Self, InternalError> {
        let database_url = match env::var("DATABASE_URL") {
            Ok(url) if !url.is_empty() => url,
            _ => compose_database_url()?,
        };

        let jwt_secret = required("JWT_SECRET")?;
        let password_pepper = required("PASSWORD_PEPPER")?;

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3001".to_string())
            .parse::<u16>()
            .map_err(|_| InternalError::config("PORT", "must be a port number"))?;

        Ok(Self {
            database_url,
            jwt_secret,
            password_pepper,
            host,
            port,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn required(key: &'static str) -> Result<String, InternalError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(InternalError::config(key, "must be set and non-empty")),
    }
}

fn compose_database_url() -> Result<String, InternalError> {
    let host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = env::var("DB_PORT").unwrap_or_else(|_| "3306".to_string());
    let user = required("DB_USER")?;
    let password = env::var("DB_PASS").unwrap_or_default();
    let name = required("DB_NAME")?;

    let ssl = env::var("DB_SSL_ENABLED")
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(false);
    let suffix = if ssl { "?ssl-mode=REQUIRED" } else { "" };

    Ok(format!(
        "mysql://{}:{}@{}:{}/{}{}",
        user, password, host, port, name, suffix
    ))
}
