//! Runtime configuration for the catalog services

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::errors::{SharedError, SharedResult};

pub const DEFAULT_COUNTRIES_URL: &str =
    "https://restcountries.com/v2/all?fields=name,capital,region,population,flag,currencies";
pub const DEFAULT_RATES_URL: &str = "https://open.er-api.com/v6/latest";
pub const DEFAULT_BASE_CURRENCY: &str = "USD";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Country directory endpoint
    pub countries_url: String,
    /// Rate endpoint prefix; the base currency is appended as the last path segment
    pub rates_url: String,
    pub base_currency: String,
    pub request_timeout: Duration,
    /// Upper bound on in-flight upserts during one refresh
    pub upsert_concurrency: usize,
    /// Directory holding the rendered summary artifact
    pub cache_dir: PathBuf,
    /// JSON snapshot backing the store; in-memory only when unset
    pub snapshot_path: Option<PathBuf>,
    /// Background refresh period; disabled when unset
    pub refresh_interval: Option<Duration>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            countries_url: DEFAULT_COUNTRIES_URL.to_string(),
            rates_url: DEFAULT_RATES_URL.to_string(),
            base_currency: DEFAULT_BASE_CURRENCY.to_string(),
            request_timeout: Duration::from_secs(15),
            upsert_concurrency: 16,
            cache_dir: PathBuf::from("cache"),
            snapshot_path: None,
            refresh_interval: None,
        }
    }
}

impl CatalogConfig {
    pub fn validate(&self) -> SharedResult<()> {
        parse_url("countries_url", &self.countries_url)?;
        parse_url("rates_url", &self.rates_url)?;

        let base = self.base_currency.trim();
        if base.is_empty() || !base.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid("base_currency", &self.base_currency));
        }
        if self.upsert_concurrency == 0 {
            return Err(invalid("upsert_concurrency", "0"));
        }
        if self.request_timeout.is_zero() {
            return Err(invalid("request_timeout", "0s"));
        }
        if matches!(self.refresh_interval, Some(interval) if interval.is_zero()) {
            return Err(invalid("refresh_interval", "0s"));
        }
        Ok(())
    }
}

fn parse_url(field: &str, value: &str) -> SharedResult<Url> {
    let url = Url::parse(value).map_err(|_| invalid(field, value))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(invalid(field, value)),
    }
}

fn invalid(field: &str, value: &str) -> SharedError {
    SharedError::InvalidConfig {
        field: field.to_string(),
        value: value.to_string(),
    }
}
