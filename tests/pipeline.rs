#![allow(clippy::unwrap_used)]
//! End-to-end lookups against a local stand-in for the completion endpoint.

mod common;

use std::time::Duration;

use common::{MockUpstream, SERENDIPITY_ENVELOPE, envelope};
use lexi_cli::config::{Config, ConfigStore, ProxyConfig};
use lexi_cli::lookup::lookup;
use lexi_cli::translation::{
    ClientOptions, ExtractionError, Kind, LOCALIZED_DEFINITION_NOT_FOUND, LookupError,
    TranslationClient, TranslationError, build_prompt,
};
use tempfile::TempDir;

fn config(api_key: &str) -> Config {
    Config {
        api_key: api_key.to_string(),
        ..Config::default()
    }
}

fn options(endpoint: &str) -> ClientOptions {
    ClientOptions {
        endpoint: endpoint.to_string(),
        timeout: Duration::from_secs(5),
        max_retries: 0,
        retry_backoff: Duration::from_millis(10),
        ..ClientOptions::default()
    }
}

fn client(endpoint: &str) -> TranslationClient {
    TranslationClient::new(&config("test-key"), options(endpoint)).unwrap()
}

#[tokio::test]
async fn test_serendipity_lookup() {
    let mut upstream = MockUpstream::start(200, SERENDIPITY_ENVELOPE).await;

    let result = lookup(&client(&upstream.endpoint), "serendipity")
        .await
        .unwrap();

    assert_eq!(result.kind, Kind::Word);
    assert_eq!(result.subject, "serendipity");
    assert_eq!(result.localized_definition, "تصادف خوشایند");
    assert!(result.examples.is_empty());
    assert!(result.pronunciation.is_none());
    assert!(result.acronym_expansion.is_none());

    let request = upstream.next_request().await;
    assert!(request.request_line.starts_with("POST "));
    assert!(request.request_line.contains("key=test-key"));
    assert_eq!(request.header("content-type"), Some("application/json"));
}

#[tokio::test]
async fn test_request_body_carries_prompt() {
    let mut upstream = MockUpstream::start(200, SERENDIPITY_ENVELOPE).await;
    let text = "say \"hi\"\\ تست";

    client(&upstream.endpoint).translate(text).await.unwrap();

    let body = upstream.next_request().await.json();
    let sent = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert_eq!(sent, build_prompt(text));
}

#[tokio::test]
async fn test_translate_returns_reply_verbatim() {
    let reply = "```json\n{\"type\": \"word\"}\n```";
    let upstream = MockUpstream::start(200, envelope(reply)).await;

    let raw = client(&upstream.endpoint).translate("x").await.unwrap();

    assert_eq!(raw, reply);
}

#[tokio::test]
async fn test_fenced_reply_is_extracted() {
    let reply = "```json\n{\"type\":\"sentence\",\"word\":\"break the ice\",\
                 \"definition\":\"start a conversation\",\
                 \"examples\":[\"She told a joke to break the ice.\"],\
                 \"persian_definition\":\"یخ را شکستن\",\"synonyms\":[\"open up\"]}\n```";
    let upstream = MockUpstream::start(200, envelope(reply)).await;

    let result = lookup(&client(&upstream.endpoint), "break the ice")
        .await
        .unwrap();

    assert_eq!(result.kind, Kind::Sentence);
    assert_eq!(result.localized_definition, "یخ را شکستن");
    assert_eq!(result.examples.len(), 1);
    assert_eq!(result.synonyms, vec!["open up"]);
}

#[tokio::test]
async fn test_missing_localized_definition_uses_sentinel() {
    let reply = r#"{"type":"word","word":"lexi","definition":"a name"}"#;
    let upstream = MockUpstream::start(200, envelope(reply)).await;

    let result = lookup(&client(&upstream.endpoint), "lexi").await.unwrap();

    assert_eq!(result.localized_definition, LOCALIZED_DEFINITION_NOT_FOUND);
    assert!(!result.has_localized_definition());
}

#[tokio::test]
async fn test_error_status_quotes_upstream_message() {
    let body = r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#;
    let upstream = MockUpstream::start(400, body).await;

    let err = client(&upstream.endpoint).translate("x").await.unwrap_err();

    let TranslationError::UpstreamFormat(detail) = err else {
        panic!("expected an upstream error, got {err:?}");
    };
    assert!(detail.contains("400"));
    assert!(detail.contains("API key not valid"));
}

#[tokio::test]
async fn test_upstream_errors_are_not_retried() {
    let mut upstream = MockUpstream::start(503, "").await;
    let client = TranslationClient::new(
        &config("test-key"),
        ClientOptions {
            max_retries: 2,
            ..options(&upstream.endpoint)
        },
    )
    .unwrap();

    assert!(client.translate("x").await.is_err());

    upstream.next_request().await;
    let second = tokio::time::timeout(Duration::from_millis(200), upstream.next_request()).await;
    assert!(second.is_err());
}

#[tokio::test]
async fn test_envelope_without_text_is_upstream_error() {
    let upstream = MockUpstream::start(200, r#"{"candidates":[]}"#).await;

    let err = client(&upstream.endpoint).translate("x").await.unwrap_err();

    assert!(matches!(err, TranslationError::UpstreamFormat(_)));
}

#[tokio::test]
async fn test_non_json_envelope_is_upstream_error() {
    let upstream = MockUpstream::start(200, "<html>gateway</html>").await;

    let err = client(&upstream.endpoint).translate("x").await.unwrap_err();

    assert!(matches!(err, TranslationError::UpstreamFormat(_)));
}

#[tokio::test]
async fn test_refused_connection_is_network_error() {
    let endpoint = common::refused_endpoint().await;
    let client = TranslationClient::new(
        &config("secret-key"),
        ClientOptions {
            max_retries: 1,
            ..options(&endpoint)
        },
    )
    .unwrap();

    let err = client.translate("x").await.unwrap_err();

    let TranslationError::Network(detail) = err else {
        panic!("expected a network error, got {err:?}");
    };
    assert!(!detail.contains("secret-key"));
}

#[tokio::test]
async fn test_silent_upstream_times_out() {
    let endpoint = common::silent_endpoint().await;
    let client = TranslationClient::new(
        &config("test-key"),
        ClientOptions {
            timeout: Duration::from_millis(300),
            ..options(&endpoint)
        },
    )
    .unwrap();

    let err = client.translate("x").await.unwrap_err();

    let TranslationError::Network(detail) = err else {
        panic!("expected a network error, got {err:?}");
    };
    assert!(detail.contains("timed out"));
}

#[tokio::test]
async fn test_unparseable_reply_keeps_raw_text() {
    let reply = "Sorry, I cannot help with that.";
    let upstream = MockUpstream::start(200, envelope(reply)).await;

    let err = lookup(&client(&upstream.endpoint), "x").await.unwrap_err();

    assert!(matches!(
        err,
        LookupError::Extraction(ExtractionError::InvalidJson { .. })
    ));
    assert_eq!(err.raw_reply(), Some(reply));
}

#[tokio::test]
async fn test_requests_go_through_configured_proxy() {
    let mut proxy = MockUpstream::start(200, SERENDIPITY_ENVELOPE).await;
    let config = Config {
        api_key: "test-key".to_string(),
        proxy: ProxyConfig::new(
            &proxy.addr.ip().to_string(),
            &proxy.addr.port().to_string(),
        ),
        ..Config::default()
    };
    let client =
        TranslationClient::new(&config, options("http://lexi-upstream.test/generate")).unwrap();

    let result = lookup(&client, "serendipity").await.unwrap();
    assert_eq!(result.localized_definition, "تصادف خوشایند");

    let request = proxy.next_request().await;
    assert!(
        request
            .request_line
            .starts_with("POST http://lexi-upstream.test/generate?key=test-key")
    );
}

#[tokio::test]
async fn test_client_follows_saved_config() {
    let temp = TempDir::new().unwrap();
    let store = ConfigStore::at(temp.path().join("config.json"));
    let mut upstream = MockUpstream::start(200, SERENDIPITY_ENVELOPE).await;

    store.save(&config("first-key")).unwrap();
    let first = TranslationClient::new(&store.load().config, options(&upstream.endpoint)).unwrap();
    first.translate("x").await.unwrap();
    assert!(upstream.next_request().await.request_line.contains("key=first-key"));

    store.save(&config("second-key")).unwrap();
    let second = TranslationClient::new(&store.load().config, options(&upstream.endpoint)).unwrap();
    second.translate("x").await.unwrap();
    assert!(upstream.next_request().await.request_line.contains("key=second-key"));
}
