//! Runtime configuration read from the environment.

use std::env;

/// Default upload cap: 10 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    /// Build the configuration from environment variables.
    ///
    /// Recognized vars:
    /// - HOST: bind address (default "0.0.0.0")
    /// - PORT: bind port (default 3000)
    /// - MAX_UPLOAD_BYTES: largest accepted document upload
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let host = lookup("HOST").unwrap_or(defaults.host);
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid port number, got {raw:?}"))?,
            None => defaults.port,
        };
        let max_upload_bytes = match lookup("MAX_UPLOAD_BYTES") {
            Some(raw) => raw.parse().map_err(|_| {
                anyhow::anyhow!("MAX_UPLOAD_BYTES must be a byte count, got {raw:?}")
            })?,
            None => defaults.max_upload_bytes,
        };

        Ok(Self {
            host,
            port,
            max_upload_bytes,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
