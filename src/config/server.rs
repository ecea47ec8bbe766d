use crate::core::{AppError, Result};

use super::{parse_or, Lookup};

/// Server configuration for HTTP server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self {
            host,
            port,
            workers: default_workers(),
        }
    }

    pub(super) fn from_lookup(lookup: &Lookup<'_>) -> Result<Self> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(lookup, "PORT", 3002u16)?;
        let workers = parse_or(lookup, "WORKERS", default_workers())?;

        if workers == 0 {
            return Err(AppError::configuration("WORKERS must be greater than 0"));
        }

        Ok(Self { host, port, workers })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
