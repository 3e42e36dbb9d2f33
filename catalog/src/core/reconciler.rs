//! Rate join and derived GDP estimate

use shared::{CountryRecord, RateTable};
use chrono::{DateTime, Utc};

use crate::traits::MetricFactor;
use crate::types::{NormalizedCountry, Reconciliation};

/// Joins normalized countries against a rate table
pub struct Reconciler<F: MetricFactor> {
    factor: F,
}

impl<F: MetricFactor> Reconciler<F> {
    pub fn new(factor: F) -> Self {
        Self { factor }
    }

    /// Look up the country's rate and derive `population * factor / rate`.
    ///
    /// A missing code, an unknown code, or a rate that is not a positive
    /// finite number all count as "no rate found".
    pub fn reconcile(&self, country: &NormalizedCountry, rates: &RateTable) -> Reconciliation {
        let rate = country
            .currency_code
            .as_ref()
            .and_then(|code| rates.get(code))
            .copied()
            .filter(|rate| rate.is_finite() && *rate > 0.0);

        match rate {
            Some(rate) => Reconciliation {
                exchange_rate: Some(rate),
                estimated_gdp: country.population as f64 * self.factor.draw() / rate,
            },
            None => Reconciliation::UNMATCHED,
        }
    }

    /// Reconcile and assemble the full record stored for this refresh
    pub fn build_record(
        &self,
        country: NormalizedCountry,
        rates: &RateTable,
        refreshed_at: DateTime<Utc>,
    ) -> CountryRecord {
        let reconciliation = self.reconcile(&country, rates);
        CountryRecord {
            name: country.key,
            capital: country.capital,
            region: country.region,
            population: country.population,
            currency_code: country.currency_code,
            exchange_rate: reconciliation.exchange_rate,
            estimated_gdp: reconciliation.estimated_gdp,
            flag_url: country.flag_url,
            last_refreshed_at: refreshed_at,
        }
    }
}
