use std::path::PathBuf;

use gamezone_core::search::MatchMode;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory holding uploaded cover images (default: `storage/covers`).
    pub covers_dir: PathBuf,
    /// How search terms are compared against names (default: case-insensitive).
    pub search_match: MatchMode,
}

/// Failure to read a configuration value.
#[derive(Debug, thiserror::Error)]
#[error("{var} must be {expected}, got '{value}'")]
pub struct ConfigError {
    pub var: &'static str,
    pub expected: &'static str,
    pub value: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                    |
    /// |---------------------------|----------------------------|
    /// | `HOST`                    | `0.0.0.0`                  |
    /// | `PORT`                    | `3000`                     |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                       |
    /// | `COVERS_DIR`              | `storage/covers`           |
    /// | `SEARCH_CASE_INSENSITIVE` | `true`                     |
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env_or("HOST", "0.0.0.0");

        let port: u16 = parse_env("PORT", "3000", "a valid u16")?;

        let cors_origins: Vec<String> = env_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 =
            parse_env("REQUEST_TIMEOUT_SECS", "30", "a valid u64")?;

        let covers_dir = PathBuf::from(env_or("COVERS_DIR", "storage/covers"));

        let case_insensitive: bool =
            parse_env("SEARCH_CASE_INSENSITIVE", "true", "true or false")?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            covers_dir,
            search_match: MatchMode::from_case_insensitive(case_insensitive),
        })
    }
}

fn env_or(var: &str, default: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| default.into())
}

fn parse_env<T: std::str::FromStr>(
    var: &'static str,
    default: &str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    let value = env_or(var, default);
    value.trim().parse().map_err(|_| ConfigError {
        var,
        expected,
        value,
    })
}
