//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_JWT_EXPIRE_DAYS, DEFAULT_JWT_ISSUER, MIN_JWT_KEY_LENGTH,
};

/// Token signing configuration.
///
/// Built once at startup and handed to the token issuer and the auth
/// middleware by reference. The signing key never appears in logs.
#[derive(Clone)]
pub struct JwtConfig {
    /// Issuer value; also used as the expected audience
    pub issuer: String,
    key: String,
    /// Token lifetime in days
    pub expire_days: i64,
}

impl JwtConfig {
    pub fn new(issuer: String, key: String, expire_days: i64) -> Self {
        Self {
            issuer,
            key,
            expire_days,
        }
    }

    /// Get signing key bytes for token signing/verification.
    pub fn key_bytes(&self) -> &[u8] {
        self.key.as_bytes()
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("issuer", &self.issuer)
            .field("key", &"[REDACTED]")
            .field("expire_days", &self.expire_days)
            .finish()
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt: JwtConfig,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt", &self.jwt)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if JWT_KEY is not set or is too short (security requirement).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let key = env::var("JWT_KEY").unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                // Development mode: use default but warn
                tracing::warn!("JWT_KEY not set, using insecure default for development");
                "dev-signing-key-minimum-32-chars!!".to_string()
            } else {
                // Production mode: panic
                panic!("JWT_KEY environment variable must be set in production");
            }
        });

        // Validate signing key length
        if key.len() < MIN_JWT_KEY_LENGTH {
            panic!(
                "JWT_KEY must be at least {} characters long",
                MIN_JWT_KEY_LENGTH
            );
        }

        let jwt = JwtConfig::new(
            env::var("JWT_ISSUER").unwrap_or_else(|_| DEFAULT_JWT_ISSUER.to_string()),
            key,
            env::var("JWT_EXPIRE_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_JWT_EXPIRE_DAYS),
        );

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            jwt,
        }
    }
}
