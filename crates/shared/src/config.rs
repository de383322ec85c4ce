//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtSettings,
    /// Login security configuration.
    #[serde(default)]
    pub security: SecurityConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

/// JWT configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Token expiration in hours.
    #[serde(default = "default_token_expiry_hours")]
    pub token_expiry_hours: i64,
}

fn default_token_expiry_hours() -> i64 {
    24
}

/// Login brute-force protection configuration.
///
/// The defaults implement the house policy: 5 failures within a
/// 30-minute trailing window lock the username (and independently the
/// source address) for 15 minutes; attempts older than an hour are
/// purged.
#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// Failed attempts within the window that trigger a lockout.
    #[serde(default = "default_max_failed_attempts")]
    pub max_failed_attempts: u64,
    /// Trailing window over failed attempts, in minutes.
    #[serde(default = "default_failure_window_minutes")]
    pub failure_window_minutes: i64,
    /// Lockout duration once triggered, in minutes.
    #[serde(default = "default_lockout_minutes")]
    pub lockout_minutes: i64,
    /// Retention horizon for login attempt records, in minutes.
    #[serde(default = "default_attempt_retention_minutes")]
    pub attempt_retention_minutes: i64,
    /// Minimum accepted password length.
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
}

fn default_max_failed_attempts() -> u64 {
    5
}

fn default_failure_window_minutes() -> i64 {
    30
}

fn default_lockout_minutes() -> i64 {
    15
}

fn default_attempt_retention_minutes() -> i64 {
    60
}

fn default_min_password_length() -> usize {
    8
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_failed_attempts: default_max_failed_attempts(),
            failure_window_minutes: default_failure_window_minutes(),
            lockout_minutes: default_lockout_minutes(),
            attempt_retention_minutes: default_attempt_retention_minutes(),
            min_password_length: default_min_password_length(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("STRAFENKASSE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_security_defaults_match_house_policy() {
        let cfg = SecurityConfig::default();
        assert_eq!(cfg.max_failed_attempts, 5);
        assert_eq!(cfg.failure_window_minutes, 30);
        assert_eq!(cfg.lockout_minutes, 15);
        assert_eq!(cfg.attempt_retention_minutes, 60);
        assert_eq!(cfg.min_password_length, 8);
    }
}
