//! Command line and environment configuration for the webserver binary

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use shared::config::{DEFAULT_BASE_CURRENCY, DEFAULT_COUNTRIES_URL, DEFAULT_RATES_URL};
use shared::CatalogConfig;

use crate::error::{WebServerError, WebServerResult};

/// Every flag can also be supplied through the named environment variable
#[derive(Parser, Debug, Clone)]
#[command(name = "webserver")]
#[command(about = "Country catalog HTTP server")]
pub struct Args {
    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port for HTTP server
    #[arg(long, env = "PORT", default_value = "3000")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Country directory endpoint
    #[arg(long, env = "COUNTRIES_URL", default_value = DEFAULT_COUNTRIES_URL)]
    pub countries_url: String,

    /// Exchange rate endpoint prefix
    #[arg(long, env = "RATES_URL", default_value = DEFAULT_RATES_URL)]
    pub rates_url: String,

    #[arg(long, env = "BASE_CURRENCY", default_value = DEFAULT_BASE_CURRENCY)]
    pub base_currency: String,

    /// Per-request timeout for feed calls, in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "15")]
    pub request_timeout_secs: u64,

    /// Maximum in-flight upserts per refresh
    #[arg(long, env = "UPSERT_CONCURRENCY", default_value = "16")]
    pub upsert_concurrency: usize,

    /// Directory for the rendered summary image
    #[arg(long, env = "CACHE_DIR", default_value = "cache")]
    pub cache_dir: PathBuf,

    /// JSON snapshot backing the catalog (in-memory only when omitted)
    #[arg(long, env = "SNAPSHOT_PATH")]
    pub snapshot_path: Option<PathBuf>,

    /// Refresh in the background every N seconds (disabled when omitted)
    #[arg(long, env = "REFRESH_INTERVAL_SECS")]
    pub refresh_interval_secs: Option<u64>,
}

impl Args {
    pub fn bind_address(&self) -> WebServerResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| WebServerError::config(format!("Invalid bind address {}:{}: {}", self.host, self.port, e)))
    }

    pub fn catalog_config(&self) -> WebServerResult<CatalogConfig> {
        let config = CatalogConfig {
            countries_url: self.countries_url.clone(),
            rates_url: self.rates_url.clone(),
            base_currency: self.base_currency.trim().to_uppercase(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            upsert_concurrency: self.upsert_concurrency,
            cache_dir: self.cache_dir.clone(),
            snapshot_path: self.snapshot_path.clone(),
            refresh_interval: self.refresh_interval_secs.map(Duration::from_secs),
        };
        config.validate()?;
        Ok(config)
    }
}
