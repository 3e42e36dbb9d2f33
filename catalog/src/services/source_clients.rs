//! HTTP clients for the country directory and exchange-rate feeds

use std::time::Duration;
use async_trait::async_trait;
use serde::Deserialize;

use shared::{component_debug, component_warn, CatalogConfig, Component, RateTable, RawCountry};
use crate::error::{CatalogError, CatalogResult};
use crate::traits::{DirectorySource, RateSource};

const DIRECTORY_FEED: &str = "country directory";
const RATE_FEED: &str = "exchange rates";

fn build_client(timeout: Duration) -> CatalogResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| CatalogError::Config {
            message: format!("Failed to build HTTP client: {e}"),
        })
}

/// GET `url` and decode the JSON body, mapping every failure to `SourceUnavailable`
async fn get_json<T>(client: &reqwest::Client, feed: &str, url: &str) -> CatalogResult<T>
where
    T: serde::de::DeserializeOwned,
{
    let response = client
        .get(url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| CatalogError::source_unavailable(feed, e.to_string()))?;

    if !response.status().is_success() {
        return Err(CatalogError::source_unavailable(
            feed,
            format!("HTTP {}", response.status()),
        ));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| CatalogError::source_unavailable(feed, format!("Failed to parse response: {e}")))
}

/// Country directory client (restcountries v2 shape)
#[derive(Clone)]
pub struct RestCountriesClient {
    client: reqwest::Client,
    url: String,
}

impl RestCountriesClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> CatalogResult<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            url: url.into(),
        })
    }

    pub fn from_config(config: &CatalogConfig) -> CatalogResult<Self> {
        Self::new(config.countries_url.clone(), config.request_timeout)
    }
}

#[async_trait]
impl DirectorySource for RestCountriesClient {
    async fn fetch_directory(&self) -> CatalogResult<Vec<RawCountry>> {
        // Decode element-wise so one malformed entry does not sink the feed
        let entries: Vec<serde_json::Value> = get_json(&self.client, DIRECTORY_FEED, &self.url).await?;
        let total = entries.len();

        let countries: Vec<RawCountry> = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value::<RawCountry>(entry) {
                Ok(country) => Some(country),
                Err(e) => {
                    component_warn!(Component::Sources, "Dropping malformed directory entry #{}: {}", index, e);
                    None
                }
            })
            .collect();

        component_debug!(Component::Sources, "Directory feed: {}/{} entries decoded", countries.len(), total);
        Ok(countries)
    }
}

#[derive(Deserialize)]
struct RateFeed {
    rates: RateTable,
}

/// Exchange-rate client (open.er-api shape: `{ "rates": { code: rate } }`)
#[derive(Clone)]
pub struct ExchangeRateClient {
    client: reqwest::Client,
    base_url: String,
}

impl ExchangeRateClient {
    /// `base_url` is the endpoint prefix; the base currency is appended per request
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> CatalogResult<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(config: &CatalogConfig) -> CatalogResult<Self> {
        Self::new(config.rates_url.clone(), config.request_timeout)
    }

    fn endpoint(&self, base: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), base)
    }
}

#[async_trait]
impl RateSource for ExchangeRateClient {
    async fn fetch_rates(&self, base: &str) -> CatalogResult<RateTable> {
        let feed: RateFeed = get_json(&self.client, RATE_FEED, &self.endpoint(base)).await?;
        component_debug!(Component::Sources, "Rate feed: {} rates against {}", feed.rates.len(), base);
        Ok(feed.rates)
    }
}
