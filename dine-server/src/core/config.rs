use std::path::PathBuf;

use crate::auth::JwtConfig;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | /var/lib/dine | working directory (database, logs) |
/// | STAFF_PORT | 3000 | staff listener port |
/// | PROVIDER_PORT | 3100 | provider listener port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | LOG_LEVEL | info | tracing level filter |
/// | NOTIFY_URL | (unset) | webhook for order notifications |
/// | VERIFICATION_ROTATE_HOURS | 12 | registration code rotation interval |
/// | JWT_SECRET | (generated) | staff token signing secret |
/// | JWT_EXPIRATION_MINUTES | 1440 | staff token lifetime |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/dine STAFF_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding the database and log files
    pub work_dir: String,
    /// Staff (authenticated) listener port
    pub staff_port: u16,
    /// Provider (anonymous) listener port
    pub provider_port: u16,
    /// JWT configuration for staff tokens
    pub jwt: JwtConfig,
    /// development | staging | production
    pub environment: String,
    /// Tracing level filter
    pub log_level: String,
    /// Webhook endpoint for order notifications; log-only when unset
    pub notify_url: Option<String>,
    /// Registration verification code rotation interval, in hours
    pub verification_rotate_hours: u64,
}

impl Config {
    /// Load the configuration from environment variables, falling back
    /// to defaults.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/dine".into()),
            staff_port: std::env::var("STAFF_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            provider_port: std::env::var("PROVIDER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3100),
            jwt: JwtConfig::from_env(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            notify_url: std::env::var("NOTIFY_URL").ok().filter(|v| !v.is_empty()),
            verification_rotate_hours: std::env::var("VERIFICATION_ROTATE_HOURS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(12),
        }
    }

    /// Override the paths and ports, for tests.
    pub fn with_overrides(
        work_dir: impl Into<String>,
        staff_port: u16,
        provider_port: u16,
    ) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.staff_port = staff_port;
        config.provider_port = provider_port;
        config
    }

    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// Create the work directory layout if it is missing.
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
