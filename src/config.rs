use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite://users.db";
const DEFAULT_PORT: u16 = 5000;

/// Errors raised while reading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid HOST {0:?}: expected an IP address")]
    InvalidHost(String),

    #[error("Invalid PORT {0:?}: expected a number between 0 and 65535")]
    InvalidPort(String),
}

/// Runtime configuration, read from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    /// Verbose logging
    pub debug: bool,
    default_database: bool,
}

impl AppConfig {
    /// Reads configuration from process environment variables
    ///
    /// Call `dotenv::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let (database_url, default_database) = match lookup("DATABASE_URL") {
            Some(url) => (url, false),
            None => (DEFAULT_DATABASE_URL.to_string(), true),
        };

        let host = match lookup("HOST") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidHost(raw))?,
            None => IpAddr::V4(Ipv4Addr::LOCALHOST),
        };

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let debug = lookup("APP_DEBUG").map_or(false, |raw| is_truthy(&raw));

        Ok(Self {
            database_url,
            host,
            port,
            debug,
            default_database,
        })
    }

    /// True when `DATABASE_URL` was unset and the default file is used
    pub fn uses_default_database(&self) -> bool {
        self.default_database
    }

    /// Address the HTTP server binds to
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn is_truthy(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
