//! Core shared types for the country catalog

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Logical component emitting a log event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Component {
    Sources,
    Refresh,
    Store,
    Query,
    Summary,
    WebServer,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Sources => write!(f, "sources"),
            Component::Refresh => write!(f, "refresh"),
            Component::Store => write!(f, "store"),
            Component::Query => write!(f, "query"),
            Component::Summary => write!(f, "summary"),
            Component::WebServer => write!(f, "webserver"),
        }
    }
}

/// Currency entry as delivered by the country directory feed
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCurrency {
    #[serde(default)]
    pub code: Option<String>,
}

/// One country object as delivered by the country directory feed
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCountry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub capital: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "lenient_population")]
    pub population: Option<u64>,
    #[serde(default)]
    pub flag: Option<String>,
    #[serde(default)]
    pub currencies: Option<Vec<RawCurrency>>,
}

impl RawCountry {
    /// Minimal record carrying only a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PopulationValue {
    Whole(u64),
    Real(f64),
    Other(serde::de::IgnoredAny),
}

/// Accept any JSON number: fractions truncate, negatives clamp to 0.
/// Non-numeric values read as absent instead of failing the entry.
fn lenient_population<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<PopulationValue>::deserialize(deserializer)? {
        Some(PopulationValue::Whole(n)) => Some(n),
        Some(PopulationValue::Real(f)) if f.is_finite() && f > 0.0 => Some(f.trunc() as u64),
        Some(PopulationValue::Real(_)) => Some(0),
        Some(PopulationValue::Other(_)) | None => None,
    })
}

/// Currency code -> units of that currency per one unit of the base currency
pub type RateTable = HashMap<String, f64>;

/// Stored catalog entry, keyed by its normalized `name`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    /// Canonical join key, also used as the display value
    pub name: String,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: u64,
    pub currency_code: Option<String>,
    pub exchange_rate: Option<f64>,
    /// Derived estimate; zero whenever no usable exchange rate was found
    pub estimated_gdp: f64,
    pub flag_url: Option<String>,
    pub last_refreshed_at: DateTime<Utc>,
}

impl CountryRecord {
    pub fn key(&self) -> &str {
        &self.name
    }
}

/// Exact-match filters applied by `find_many`; `None` means no filter on that field
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFilter {
    pub region: Option<String>,
    pub currency_code: Option<String>,
}

impl CatalogFilter {
    pub fn matches(&self, record: &CountryRecord) -> bool {
        let region_ok = match &self.region {
            Some(region) => record.region.as_deref() == Some(region.as_str()),
            None => true,
        };
        let currency_ok = match &self.currency_code {
            Some(code) => record.currency_code.as_deref() == Some(code.as_str()),
            None => true,
        };
        region_ok && currency_ok
    }
}

/// Ordering on `estimated_gdp`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    GdpDesc,
    GdpAsc,
    #[default]
    Unspecified,
}

impl SortOrder {
    /// Lenient parse: unknown values mean no ordering
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "gdp_desc" | "metric_desc" => SortOrder::GdpDesc,
            "gdp_asc" | "metric_asc" => SortOrder::GdpAsc,
            _ => SortOrder::Unspecified,
        }
    }

    /// Stable sort, so ties keep their incoming order
    pub fn apply(&self, records: &mut [CountryRecord]) {
        match self {
            SortOrder::GdpDesc => {
                records.sort_by(|a, b| b.estimated_gdp.total_cmp(&a.estimated_gdp))
            }
            SortOrder::GdpAsc => {
                records.sort_by(|a, b| a.estimated_gdp.total_cmp(&b.estimated_gdp))
            }
            SortOrder::Unspecified => {}
        }
    }
}

impl From<Option<&str>> for SortOrder {
    fn from(value: Option<&str>) -> Self {
        value.map(SortOrder::parse).unwrap_or_default()
    }
}

/// Result of one refresh cycle
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RefreshOutcome {
    pub message: String,
    /// Store count after the cycle
    pub total: u64,
    pub inserted: usize,
    pub replaced: usize,
    pub skipped: usize,
    pub failed: usize,
    pub refreshed_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteOutcome {
    pub message: String,
    pub removed: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogStatus {
    pub total_countries: u64,
    pub last_refreshed_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankedCountry {
    pub name: String,
    pub estimated_gdp: f64,
}

/// Input handed to the summary renderer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub total_count: u64,
    pub last_refreshed_at: Option<DateTime<Utc>>,
    pub top: Vec<RankedCountry>,
}
