//! Service configuration read from the environment.
use anyhow::{anyhow, Context, Result};
use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::str::FromStr;

pub const BIND_ADDR_VAR: &str = "BANK_BIND_ADDR";
pub const STORAGE_VAR: &str = "BANK_STORAGE";
pub const DATABASE_URL_VAR: &str = "BANK_DATABASE_URL";
pub const CORS_ORIGIN_VAR: &str = "BANK_CORS_ORIGIN";

/// Which storage backend the domain services run on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Sqlite,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(StorageBackend::Sqlite),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(anyhow!("Unknown storage backend '{}', expected 'sqlite' or 'memory'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub storage: StorageBackend,
    pub database_url: String,
    pub cors_origin: HeaderValue,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            storage: StorageBackend::Sqlite,
            database_url: "sqlite:backoffice.db".to_string(),
            cors_origin: HeaderValue::from_static("http://localhost:8080"),
        }
    }
}

impl AppConfig {
    /// Load the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the configuration through `lookup`; unset variables keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = lookup(BIND_ADDR_VAR) {
            config.bind_addr = addr
                .parse()
                .with_context(|| format!("{} is not a socket address: {}", BIND_ADDR_VAR, addr))?;
        }
        if let Some(storage) = lookup(STORAGE_VAR) {
            config.storage = storage.parse().with_context(|| format!("Invalid {}", STORAGE_VAR))?;
        }
        if let Some(url) = lookup(DATABASE_URL_VAR) {
            if url.trim().is_empty() {
                return Err(anyhow!("{} cannot be empty", DATABASE_URL_VAR));
            }
            config.database_url = url;
        }
        if let Some(origin) = lookup(CORS_ORIGIN_VAR) {
            config.cors_origin = HeaderValue::from_str(&origin)
                .with_context(|| format!("{} is not a valid origin: {}", CORS_ORIGIN_VAR, origin))?;
        }

        Ok(config)
    }
}
