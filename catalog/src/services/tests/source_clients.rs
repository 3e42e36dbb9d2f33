//! Tests for the HTTP feed clients against a local mock server

use std::time::Duration;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::error::CatalogError;
use crate::services::{ExchangeRateClient, RestCountriesClient};
use crate::traits::{DirectorySource, RateSource};

const TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::test]
async fn test_directory_client_decodes_feed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "name": "Nigeria",
                "capital": "Abuja",
                "region": "Africa",
                "population": 206139589,
                "flag": "https://flagcdn.com/ng.svg",
                "currencies": [{ "code": "NGN", "name": "Nigerian naira", "symbol": "₦" }]
            },
            { "name": "Antarctica", "region": "Polar", "population": 1000 }
        ])))
        .mount(&server)
        .await;

    let client = RestCountriesClient::new(format!("{}/v2/all", server.uri()), TIMEOUT).unwrap();
    let countries = client.fetch_directory().await.unwrap();

    assert_eq!(countries.len(), 2);
    assert_eq!(countries[0].name.as_deref(), Some("Nigeria"));
    assert_eq!(countries[0].population, Some(206139589));
    let currencies = countries[0].currencies.as_ref().unwrap();
    assert_eq!(currencies[0].code.as_deref(), Some("NGN"));
    assert!(countries[1].currencies.is_none());
    assert!(countries[1].capital.is_none());
}

#[tokio::test]
async fn test_directory_client_drops_malformed_entries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": "Ghana", "population": 31072940 },
            { "name": ["Broken"], "population": 10 },
            "not an object"
        ])))
        .mount(&server)
        .await;

    let client = RestCountriesClient::new(server.uri(), TIMEOUT).unwrap();
    let countries = client.fetch_directory().await.unwrap();

    assert_eq!(countries.len(), 1);
    assert_eq!(countries[0].name.as_deref(), Some("Ghana"));
}

#[tokio::test]
async fn test_directory_client_keeps_entries_with_odd_populations() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": "Tokelau", "population": 1411.6 },
            { "name": "Pitcairn", "population": -50 },
            { "name": "Bouvet Island", "population": "uninhabited" }
        ])))
        .mount(&server)
        .await;

    let client = RestCountriesClient::new(server.uri(), TIMEOUT).unwrap();
    let countries = client.fetch_directory().await.unwrap();

    let populations: Vec<(Option<&str>, Option<u64>)> = countries
        .iter()
        .map(|country| (country.name.as_deref(), country.population))
        .collect();
    assert_eq!(
        populations,
        vec![
            (Some("Tokelau"), Some(1411)),
            (Some("Pitcairn"), Some(0)),
            (Some("Bouvet Island"), None),
        ]
    );
}

#[tokio::test]
async fn test_directory_client_maps_http_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = RestCountriesClient::new(server.uri(), TIMEOUT).unwrap();
    match client.fetch_directory().await {
        Err(CatalogError::SourceUnavailable { feed, message }) => {
            assert_eq!(feed, "country directory");
            assert!(message.contains("503"));
        }
        other => panic!("expected SourceUnavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn test_directory_client_rejects_non_array_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": 404 })))
        .mount(&server)
        .await;

    let client = RestCountriesClient::new(server.uri(), TIMEOUT).unwrap();
    assert!(matches!(
        client.fetch_directory().await,
        Err(CatalogError::SourceUnavailable { .. })
    ));
}

#[tokio::test]
async fn test_rate_client_appends_base_currency() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v6/latest/USD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": "success",
            "base_code": "USD",
            "rates": { "USD": 1, "EUR": 0.92, "NGN": 1600.5 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ExchangeRateClient::new(format!("{}/v6/latest/", server.uri()), TIMEOUT).unwrap();
    let rates = client.fetch_rates("USD").await.unwrap();

    assert_eq!(rates.len(), 3);
    assert_eq!(rates.get("USD"), Some(&1.0));
    assert_eq!(rates.get("NGN"), Some(&1600.5));
}

#[tokio::test]
async fn test_rate_client_requires_rates_object() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": "error" })))
        .mount(&server)
        .await;

    let client = ExchangeRateClient::new(server.uri(), TIMEOUT).unwrap();
    match client.fetch_rates("USD").await {
        Err(CatalogError::SourceUnavailable { feed, .. }) => assert_eq!(feed, "exchange rates"),
        other => panic!("expected SourceUnavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_feed_is_source_unavailable() {
    // Port 9 (discard) is not expected to serve HTTP
    let client = ExchangeRateClient::new("http://127.0.0.1:9/v6/latest", Duration::from_millis(500)).unwrap();
    tokio_test::assert_err!(client.fetch_rates("USD").await);
}
