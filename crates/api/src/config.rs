use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;
use crate::media::MediaBackendKind;

/// Default maximum multipart request size: 100 MiB.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Server configuration loaded from environment variables.
///
/// All fields except the database URL and JWT secret have defaults suitable
/// for local development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Base URL under which stored media files are publicly reachable.
    pub public_base_url: String,
    /// Which media storage backend is active for this deployment.
    pub media_backend: MediaBackendKind,
    /// Root directory for the disk/blob backends and the static mounts.
    pub media_root: PathBuf,
    /// Maximum accepted multipart body size in bytes.
    pub max_upload_bytes: usize,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                  |
    /// |------------------------|--------------------------|
    /// | `HOST`                 | `0.0.0.0`                |
    /// | `PORT`                 | `3000`                   |
    /// | `CORS_ORIGINS`         | `http://localhost:9001`  |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                     |
    /// | `PUBLIC_BASE_URL`      | `http://localhost:3000`  |
    /// | `MEDIA_BACKEND`        | `inline`                 |
    /// | `MEDIA_ROOT`           | `media`                  |
    /// | `MAX_UPLOAD_BYTES`     | `104857600`              |
    ///
    /// # Panics
    ///
    /// Panics on unparseable values or an unknown `MEDIA_BACKEND` --
    /// misconfiguration should fail fast at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:9001".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".into());

        let media_backend = std::env::var("MEDIA_BACKEND")
            .unwrap_or_else(|_| "inline".into())
            .parse()
            .unwrap_or_else(|e| panic!("Invalid MEDIA_BACKEND: {e}"));

        let media_root = PathBuf::from(std::env::var("MEDIA_ROOT").unwrap_or_else(|_| "media".into()));

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            public_base_url,
            media_backend,
            media_root,
            max_upload_bytes,
            jwt,
        }
    }
}
