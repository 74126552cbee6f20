//! Process configuration loaded from the environment.
//!
//! The server consumes a base URL for the PocketBase instance and, optionally,
//! administrator credentials used as a fallback when an elevated operation is
//! requested without explicit credentials.

use std::env;
use thiserror::Error;

/// Environment variable naming the PocketBase base URL.
pub const POCKETBASE_URL: &str = "POCKETBASE_URL";
/// Environment variable for the fallback admin email.
pub const POCKETBASE_ADMIN_EMAIL: &str = "POCKETBASE_ADMIN_EMAIL";
/// Environment variable for the fallback admin password.
pub const POCKETBASE_ADMIN_PASSWORD: &str = "POCKETBASE_ADMIN_PASSWORD";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    MissingVar(&'static str),
}

/// Administrator credentials used when `authenticate_user` is invoked with
/// `isAdmin` and no explicit email/password.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Base URL of the PocketBase instance, e.g. `http://127.0.0.1:8090`.
    pub base_url: String,
    /// Optional fallback admin email.
    pub admin_email: Option<String>,
    /// Optional fallback admin password.
    pub admin_password: Option<String>,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// `POCKETBASE_URL` is required; admin credentials are optional and only
    /// used as a fallback for elevated authentication.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url =
            env::var(POCKETBASE_URL).map_err(|_| ConfigError::MissingVar(POCKETBASE_URL))?;

        Ok(Self {
            base_url,
            admin_email: env::var(POCKETBASE_ADMIN_EMAIL).ok(),
            admin_password: env::var(POCKETBASE_ADMIN_PASSWORD).ok(),
        })
    }

    /// The admin credential pair, if both halves are configured.
    pub fn admin_credentials(&self) -> Option<AdminCredentials> {
        match (&self.admin_email, &self.admin_password) {
            (Some(email), Some(password)) => Some(AdminCredentials {
                email: email.clone(),
                password: password.clone(),
            }),
            _ => None,
        }
    }
}
