use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
    pub limits: LimitsConfig,
    /// Session token configuration
    pub jwt: JwtAuthConfig,
    /// Upload storage configuration
    #[serde(default)]
    pub uploads: UploadsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Public base URL used when building invite links.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

impl DatabaseConfig {
    /// Pool knobs for `persistence::db::create_pool`.
    pub fn pool_settings(&self) -> persistence::db::PoolSettings {
        persistence::db::PoolSettings {
            max_connections: self.max_connections,
            min_connections: self.min_connections,
            acquire_timeout_secs: self.connect_timeout_secs,
            idle_timeout_secs: self.idle_timeout_secs,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,

    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtAuthConfig {
    /// HMAC secret for signing session tokens
    pub secret: String,

    /// Session token lifetime in seconds (default: 30 days)
    #[serde(default = "default_token_expiry")]
    pub token_expiry_secs: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadsConfig {
    /// Root directory for stored files; avatars/ and posts/ live under it.
    #[serde(default = "default_upload_dir")]
    pub dir: String,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            dir: default_upload_dir(),
        }
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    5001
}
fn default_request_timeout() -> u64 {
    30
}
fn default_base_url() -> String {
    "http://localhost:5001".to_string()
}
fn default_max_connections() -> u32 {
    20
}
fn default_min_connections() -> u32 {
    5
}
fn default_connect_timeout() -> u64 {
    10
}
fn default_idle_timeout() -> u64 {
    600
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}
fn default_min_password_length() -> usize {
    6
}
fn default_max_upload_bytes() -> usize {
    5 * 1024 * 1024
}
fn default_token_expiry() -> i64 {
    shared::jwt::DEFAULT_TOKEN_EXPIRY_SECS
}
fn default_upload_dir() -> String {
    "uploads".to_string()
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with FC__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("FC").separator("__"))
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Build a config entirely from embedded defaults plus overrides,
    /// without touching the filesystem. Used by tests.
    pub fn load_from_defaults(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let defaults = r#"
            [server]
            host = "0.0.0.0"
            port = 5001
            request_timeout_secs = 30
            base_url = "http://localhost:5001"

            [database]
            url = ""
            max_connections = 20
            min_connections = 5
            connect_timeout_secs = 10
            idle_timeout_secs = 600

            [logging]
            level = "info"
            format = "json"

            [security]
            cors_origins = []

            [limits]
            min_password_length = 6
            max_upload_bytes = 5242880

            [jwt]
            secret = "test-session-secret"
            token_expiry_secs = 2592000

            [uploads]
            dir = "uploads"
        "#;

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(defaults, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Socket address the server binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .expect("Invalid host/port configuration")
    }

    fn validate(&self) -> Result<(), String> {
        if self.database.url.is_empty() {
            return Err("database.url is required".to_string());
        }
        if self.jwt.secret.is_empty() {
            return Err("jwt.secret is required".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_defaults() {
        let config = Config::load_from_defaults(&[]).unwrap();
        assert_eq!(config.server.port, 5001);
        assert_eq!(config.limits.min_password_length, 6);
        assert_eq!(config.uploads.dir, "uploads");
    }

    #[test]
    fn test_load_from_defaults_with_overrides() {
        let config = Config::load_from_defaults(&[
            ("server.port", "8181"),
            ("jwt.secret", "override-secret"),
        ])
        .unwrap();
        assert_eq!(config.server.port, 8181);
        assert_eq!(config.jwt.secret, "override-secret");
    }

    #[test]
    fn test_pool_settings_follow_database_section() {
        let config = Config::load_from_defaults(&[
            ("database.max_connections", "3"),
            ("database.connect_timeout_secs", "2"),
        ])
        .unwrap();
        let settings = config.database.pool_settings();
        assert_eq!(settings.max_connections, 3);
        assert_eq!(settings.acquire_timeout_secs, 2);
        assert_eq!(settings.min_connections, 5);
        assert_eq!(settings.idle_timeout_secs, 600);
    }

    #[test]
    fn test_socket_addr() {
        let config = Config::load_from_defaults(&[("server.host", "127.0.0.1")]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:5001");
    }
}
