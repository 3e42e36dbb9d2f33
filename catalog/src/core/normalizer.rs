//! Join-key canonicalization for raw directory records

use std::sync::OnceLock;
use regex::Regex;

use shared::RawCountry;
use crate::types::NormalizedCountry;

static PARENTHETICAL: OnceLock<Regex> = OnceLock::new();

fn parenthetical() -> &'static Regex {
    PARENTHETICAL.get_or_init(|| Regex::new(r"\s*\(.*?\)\s*").expect("static pattern compiles"))
}

/// Canonical key for a free-text country name, or `None` when nothing usable remains.
///
/// Trims, drops every parenthesized qualifier together with its surrounding
/// whitespace, then lower-cases.
pub fn normalize_key(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return None;
    }

    let key = parenthetical().replace_all(trimmed, "").trim().to_lowercase();
    if key.is_empty() {
        None
    } else {
        Some(key)
    }
}

/// Canonicalize one raw record; `None` means the record is skipped
pub fn normalize(raw: &RawCountry) -> Option<NormalizedCountry> {
    let key = normalize_key(raw.name.as_deref()?)?;

    let currency_code = raw
        .currencies
        .as_ref()
        .and_then(|currencies| currencies.first())
        .and_then(|currency| non_empty(currency.code.as_deref()));

    Some(NormalizedCountry {
        key,
        capital: non_empty(raw.capital.as_deref()),
        region: non_empty(raw.region.as_deref()),
        population: raw.population.unwrap_or(0),
        currency_code,
        flag_url: non_empty(raw.flag.as_deref()),
    })
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::RawCurrency;

    #[test]
    fn test_variants_share_a_key() {
        let variants = [
            "Bolivia (Plurinational State of)",
            "  bolivia  ",
            "BOLIVIA",
            "Bolivia(Plurinational State of)",
        ];
        for variant in variants {
            assert_eq!(normalize_key(variant).as_deref(), Some("bolivia"), "{variant}");
        }
    }

    #[test]
    fn test_normalization_is_idempotent() {
        for name in ["Korea (Republic of)", "Côte d'Ivoire", "United Kingdom of Great Britain"] {
            let once = normalize_key(name).unwrap();
            assert_eq!(normalize_key(&once).as_deref(), Some(once.as_str()));
        }
    }

    #[test]
    fn test_strips_every_parenthetical() {
        assert_eq!(
            normalize_key("Virgin Islands (British) (UK)").as_deref(),
            Some("virgin islands")
        );
    }

    #[test]
    fn test_blank_names_are_skipped() {
        assert_eq!(normalize_key(""), None);
        assert_eq!(normalize_key("   \t"), None);
        assert_eq!(normalize_key(" (unknown) "), None);
        assert!(normalize(&RawCountry::default()).is_none());
    }

    #[test]
    fn test_extracts_downstream_fields() {
        let raw = RawCountry {
            name: Some("France".to_string()),
            capital: Some("Paris".to_string()),
            region: Some(String::new()),
            population: None,
            flag: Some("https://flags.example/fr.svg".to_string()),
            currencies: Some(vec![
                RawCurrency { code: Some("EUR".to_string()) },
                RawCurrency { code: Some("XPF".to_string()) },
            ]),
        };

        let normalized = normalize(&raw).unwrap();
        assert_eq!(normalized.key, "france");
        assert_eq!(normalized.capital.as_deref(), Some("Paris"));
        assert_eq!(normalized.region, None);
        assert_eq!(normalized.population, 0);
        assert_eq!(normalized.currency_code.as_deref(), Some("EUR"));
        assert_eq!(normalized.flag_url.as_deref(), Some("https://flags.example/fr.svg"));
    }

    #[test]
    fn test_missing_currency_list() {
        let normalized = normalize(&RawCountry {
            currencies: Some(vec![]),
            ..RawCountry::named("Antarctica")
        })
        .unwrap();
        assert_eq!(normalized.currency_code, None);
    }
}
