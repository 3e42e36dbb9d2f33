//! Catalog-internal types

use regex::{Regex, RegexBuilder};

use crate::error::CatalogResult;

/// Country fields after key canonicalization, before the rate join
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedCountry {
    pub key: String,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: u64,
    pub currency_code: Option<String>,
    pub flag_url: Option<String>,
}

/// Output of the rate join for one country
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reconciliation {
    pub exchange_rate: Option<f64>,
    pub estimated_gdp: f64,
}

impl Reconciliation {
    pub const UNMATCHED: Reconciliation = Reconciliation {
        exchange_rate: None,
        estimated_gdp: 0.0,
    };
}

/// What a single-key upsert did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpsertKind {
    Inserted,
    Replaced,
}

/// Anchored, case-insensitive match against a stored key.
///
/// The input is escaped, so regex metacharacters in a lookup are literal.
#[derive(Clone, Debug)]
pub struct KeyPattern {
    input: String,
    regex: Regex,
}

impl KeyPattern {
    pub fn case_insensitive(input: &str) -> CatalogResult<Self> {
        let regex = RegexBuilder::new(&format!("^{}$", regex::escape(input)))
            .case_insensitive(true)
            .build()?;
        Ok(Self {
            input: input.to_string(),
            regex,
        })
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn matches(&self, key: &str) -> bool {
        self.regex.is_match(key)
    }
}
