//! Configuration for the registration service.

use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Service configuration.
///
/// Read from the environment (and `.env`). Nested keys use `__`, e.g.
/// `DATABASE__URL`; the listen port is plain `PORT`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Deployment mode. Anything other than "production" enables debug logging.
    #[serde(default = "default_app_env")]
    pub app_env: String,

    /// Document store configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL (`ws://`, `http://`, `mem://`)
    #[serde(default = "default_database_url")]
    pub url: String,

    /// SurrealDB namespace
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// SurrealDB database name
    #[serde(default = "default_database_name")]
    pub name: String,

    /// Root username, if the server requires sign-in
    #[serde(default)]
    pub username: Option<String>,

    /// Root password
    #[serde(default)]
    pub password: Option<SecretString>,

    /// Upper bound on a single registration write
    #[serde(default = "default_write_timeout_ms")]
    pub write_timeout_ms: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogConfig {
    /// Explicit log filter; overrides the mode-derived default
    #[serde(default)]
    pub level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            listen_addr: default_listen_addr(),
            app_env: default_app_env(),
            database: DatabaseConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            namespace: default_namespace(),
            name: default_database_name(),
            username: None,
            password: None,
            write_timeout_ms: default_write_timeout_ms(),
        }
    }
}

impl DatabaseConfig {
    /// In-process database, for tests and throwaway runs.
    pub fn in_memory() -> Self {
        Self {
            url: "mem://".into(),
            ..Self::default()
        }
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }
}

// Default value functions
fn default_port() -> u16 {
    5000
}

fn default_listen_addr() -> String {
    "0.0.0.0".into()
}

fn default_app_env() -> String {
    "development".into()
}

fn default_database_url() -> String {
    "ws://localhost:8000".into()
}

fn default_namespace() -> String {
    "squid_game".into()
}

fn default_database_name() -> String {
    "registration".into()
}

fn default_write_timeout_ms() -> u64 {
    5000
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Whether the service runs in production mode.
    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    /// Default tracing filter when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> String {
        match &self.log.level {
            Some(level) => level.clone(),
            None if self.is_production() => "info".into(),
            None => "info,event_registration=debug,tower_http=debug".into(),
        }
    }

    /// Address to bind the HTTP listener to.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .listen_addr
            .parse()
            .with_context(|| format!("Invalid listen address: {}", self.listen_addr))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
