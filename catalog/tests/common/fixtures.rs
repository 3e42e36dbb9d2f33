//! Test fixtures and data for catalog tests
//!
//! Feed payloads shaped like the live country directory and rate feeds.

use chrono::{TimeZone, Utc};
use shared::{CountryRecord, RateTable, RawCountry, RawCurrency};

/// Standard test data and fixtures
pub struct TestFixtures;

impl TestFixtures {
    pub const BASE_CURRENCY: &'static str = "USD";

    /// Distinct keys produced by `directory()`
    pub const DISTINCT_KEYS: u64 = 7;

    /// Entries in `directory()` without a usable name
    pub const BLANK_ENTRIES: usize = 2;

    pub fn country(name: &str, region: Option<&str>, population: u64, currency: Option<&str>) -> RawCountry {
        RawCountry {
            name: Some(name.to_string()),
            capital: None,
            region: region.map(str::to_string),
            population: Some(population),
            flag: Some(format!("https://flags.example/{}.svg", name.len())),
            currencies: currency.map(|code| {
                vec![RawCurrency {
                    code: Some(code.to_string()),
                }]
            }),
        }
    }

    pub fn directory() -> Vec<RawCountry> {
        vec![
            Self::country("France", Some("Europe"), 67_000_000, Some("EUR")),
            Self::country("Germany", Some("Europe"), 83_000_000, Some("EUR")),
            Self::country("Nigeria", Some("Africa"), 206_000_000, Some("NGN")),
            Self::country("Bolivia (Plurinational State of)", Some("Americas"), 11_000_000, Some("BOB")),
            Self::country("   ", Some("Nowhere"), 1, Some("EUR")),
            Self::country("Atlantis", Some("Oceania"), 500_000, Some("XYZ")),
            Self::country("Palestine, State of", Some("Asia"), 5_000_000, None),
            Self::country("Zeroland", Some("Oceania"), 1_000, Some("ZZZ")),
            RawCountry::default(),
        ]
    }

    pub fn rates() -> RateTable {
        [
            ("USD", 1.0),
            ("EUR", 0.9),
            ("NGN", 1600.0),
            ("BOB", 6.9),
            ("ZZZ", 0.0),
        ]
        .into_iter()
        .map(|(code, rate)| (code.to_string(), rate))
        .collect()
    }

    /// Record already present before any refresh runs
    pub fn legacy_record() -> CountryRecord {
        CountryRecord {
            name: "vatican city".to_string(),
            capital: Some("Vatican City".to_string()),
            region: Some("Europe".to_string()),
            population: 825,
            currency_code: Some("EUR".to_string()),
            exchange_rate: Some(0.9),
            estimated_gdp: 1_000_000.0,
            flag_url: None,
            last_refreshed_at: Utc.with_ymd_and_hms(2020, 5, 1, 0, 0, 0).unwrap(),
        }
    }

    pub fn ranked_record(name: &str, region: &str, gdp: f64) -> CountryRecord {
        CountryRecord {
            name: name.to_string(),
            capital: None,
            region: Some(region.to_string()),
            population: 1,
            currency_code: Some("EUR".to_string()),
            exchange_rate: Some(0.9),
            estimated_gdp: gdp,
            flag_url: None,
            last_refreshed_at: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
        }
    }
}
