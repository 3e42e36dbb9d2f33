//! Service-specific tests
//!
//! Each service has its own test file; shared record builders live in
//! `common` below.

#[cfg(test)]
mod source_clients;

#[cfg(test)]
pub mod common {
    use chrono::{TimeZone, Utc};
    use shared::CountryRecord;

    /// Record with a fixed timestamp so equality checks are stable
    pub fn record(name: &str, region: &str, currency: &str, gdp: f64) -> CountryRecord {
        CountryRecord {
            name: name.to_string(),
            capital: None,
            region: Some(region.to_string()),
            population: 1_000,
            currency_code: Some(currency.to_string()),
            exchange_rate: Some(1.0),
            estimated_gdp: gdp,
            flag_url: None,
            last_refreshed_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
        }
    }
}
