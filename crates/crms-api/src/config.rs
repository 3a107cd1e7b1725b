//! Server configuration

use std::str::FromStr;

/// Application configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub upload_dir: String,
    pub max_upload_size: usize,
    pub bind_addr: String,
    pub token_ttl_secs: i64,
    /// Prefix of evidence URLs handed back to clients.
    pub public_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: env_or("DATABASE_URL", "postgres://localhost/crcrms".to_string()),
            jwt_secret: env_or(
                "JWT_SECRET",
                "development-secret-change-in-production".to_string(),
            ),
            upload_dir: env_or("UPLOAD_DIR", "./data/evidence".to_string()),
            max_upload_size: env_or("MAX_UPLOAD_SIZE", 50 * 1024 * 1024), // 50MB
            bind_addr: env_or("BIND_ADDR", "0.0.0.0:3000".to_string()),
            token_ttl_secs: env_or("TOKEN_TTL_SECS", 3600),
            public_base_url: env_or("PUBLIC_BASE_URL", "/files".to_string()),
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
