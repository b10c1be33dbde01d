use std::path::PathBuf;
use std::str::FromStr;

use kennel_core::uploads::DEFAULT_MAX_UPLOAD_BYTES;

/// Error raised when an environment variable holds an unusable value.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} is not set")]
    Missing { name: &'static str },

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Log output format selected by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Unsigned-upload settings for a Cloudinary-compatible image CDN.
#[derive(Debug, Clone)]
pub struct CdnConfig {
    pub cloud_name: String,
    pub upload_preset: String,
    /// API root, e.g. `https://api.cloudinary.com/v1_1`.
    pub base_url: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields except `database_url` have defaults suitable for local
/// development. In production, override via environment variables.
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
    /// How long to wait for in-flight requests on shutdown (default: `30`).
    pub shutdown_timeout_secs: u64,
    pub database_url: String,
    /// Pool size (default: `10`).
    pub db_max_connections: u32,
    /// Directory for locally stored uploads (default: `uploads`).
    pub upload_dir: PathBuf,
    /// URL prefix the upload directory is served under (default: `/uploads`).
    pub upload_url_prefix: String,
    /// Largest accepted upload in bytes (default: 10 MiB).
    pub max_upload_bytes: usize,
    /// Image CDN; photos go to the local upload directory when unset.
    pub cdn: Option<CdnConfig>,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                             |
    /// |-------------------------|-------------------------------------|
    /// | `HOST`                  | `0.0.0.0`                           |
    /// | `PORT`                  | `3000`                              |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`             |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                                |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                                |
    /// | `DATABASE_URL`          | required                            |
    /// | `DB_MAX_CONNECTIONS`    | `10`                                |
    /// | `UPLOAD_DIR`            | `uploads`                           |
    /// | `UPLOAD_URL_PREFIX`     | `/uploads`                          |
    /// | `MAX_UPLOAD_BYTES`      | `10485760`                          |
    /// | `CDN_CLOUD_NAME`        | unset (CDN disabled)                |
    /// | `CDN_UPLOAD_PRESET`     | unset (CDN disabled)                |
    /// | `CDN_BASE_URL`          | `https://api.cloudinary.com/v1_1`   |
    /// | `LOG_FORMAT`            | `pretty` (`json` for JSON lines)    |
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = var_or("HOST", "0.0.0.0");
        let port = parse_var("PORT", 3000u16)?;

        let cors_origins: Vec<String> = var_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        for origin in &cors_origins {
            if origin.parse::<axum::http::HeaderValue>().is_err() {
                return Err(ConfigError::Invalid {
                    name: "CORS_ORIGINS",
                    value: origin.clone(),
                });
            }
        }

        let request_timeout_secs = parse_var("REQUEST_TIMEOUT_SECS", 30u64)?;
        let shutdown_timeout_secs = parse_var("SHUTDOWN_TIMEOUT_SECS", 30u64)?;

        let database_url = std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing {
            name: "DATABASE_URL",
        })?;
        let db_max_connections = parse_var("DB_MAX_CONNECTIONS", 10u32)?;

        let upload_dir = PathBuf::from(var_or("UPLOAD_DIR", "uploads"));
        let upload_url_prefix = var_or("UPLOAD_URL_PREFIX", "/uploads")
            .trim_end_matches('/')
            .to_string();
        let max_upload_bytes = parse_var("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?;

        let cdn = match (
            optional_var("CDN_CLOUD_NAME"),
            optional_var("CDN_UPLOAD_PRESET"),
        ) {
            (Some(cloud_name), Some(upload_preset)) => Some(CdnConfig {
                cloud_name,
                upload_preset,
                base_url: var_or("CDN_BASE_URL", "https://api.cloudinary.com/v1_1")
                    .trim_end_matches('/')
                    .to_string(),
            }),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::Missing { name: "CDN_UPLOAD_PRESET" }),
            (None, Some(_)) => return Err(ConfigError::Missing { name: "CDN_CLOUD_NAME" }),
        };

        let log_format = match var_or("LOG_FORMAT", "pretty").to_ascii_lowercase().as_str() {
            "pretty" | "text" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            other => {
                return Err(ConfigError::Invalid {
                    name: "LOG_FORMAT",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            database_url,
            db_max_connections,
            upload_dir,
            upload_url_prefix,
            max_upload_bytes,
            cdn,
            log_format,
        })
    }
}

fn var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}
