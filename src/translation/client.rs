use reqwest::{Client, Proxy, StatusCode, Url};
use serde::{Deserialize, Serialize};
use std::error::Error as _;
use std::time::Duration;

use super::error::TranslationError;
use super::prompt::build_prompt;
use crate::config::Config;

/// The generative-completion endpoint every lookup is sent to.
pub const DEFAULT_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_RETRIES: u32 = 2;
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(500);

/// Transport settings that do not come from the persisted config.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// URL requests are POSTed to. The API key is appended as `?key=`.
    pub endpoint: String,
    /// Disables TLS certificate and host verification.
    pub accept_invalid_certs: bool,
    /// Upper bound for one request, connect included.
    pub timeout: Duration,
    /// Extra attempts after a network error. Upstream errors are never retried.
    pub max_retries: u32,
    /// Delay before the first retry; doubled for every further one.
    pub retry_backoff: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            accept_invalid_certs: false,
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    fn new(prompt: &'a str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Sends lookups to the completion endpoint and returns the model's raw reply.
///
/// A client captures the API key and proxy of the [`Config`] it was built
/// from. Build a new one whenever the config changes.
pub struct TranslationClient {
    http: Client,
    url: Url,
    endpoint: String,
    options: ClientOptions,
}

impl TranslationClient {
    pub fn new(config: &Config, options: ClientOptions) -> Result<Self, TranslationError> {
        if !config.has_api_key() {
            return Err(TranslationError::MissingApiKey);
        }

        let url = Url::parse_with_params(&options.endpoint, &[("key", config.api_key.as_str())])
            .map_err(|e| {
                TranslationError::InvalidConfig(format!(
                    "invalid endpoint '{}': {e}",
                    options.endpoint
                ))
            })?;

        let mut builder = Client::builder().timeout(options.timeout);

        if options.accept_invalid_certs {
            tracing::warn!("TLS certificate verification is disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        builder = match &config.proxy {
            Some(proxy) => {
                let proxy_url = proxy.url();
                let proxy = Proxy::all(proxy_url.as_str()).map_err(|e| {
                    TranslationError::InvalidConfig(format!("invalid proxy '{proxy_url}': {e}"))
                })?;
                tracing::debug!(proxy = %proxy_url, "routing requests through proxy");
                builder.proxy(proxy)
            }
            None => builder.no_proxy(),
        };

        let http = builder.build().map_err(|e| {
            TranslationError::InvalidConfig(format!("failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            http,
            url,
            endpoint: options.endpoint.clone(),
            options,
        })
    }

    /// The endpoint URL without the API key.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Asks the model about `text` and returns its reply verbatim.
    pub async fn translate(&self, text: &str) -> Result<String, TranslationError> {
        let prompt = build_prompt(text);
        let body = GenerateContentRequest::new(&prompt);

        let mut attempt: u32 = 0;
        loop {
            match self.send(&body).await {
                Err(e) if e.is_transient() && attempt < self.options.max_retries => {
                    let delay = self
                        .options
                        .retry_backoff
                        .saturating_mul(1 << attempt.min(16));
                    attempt += 1;
                    tracing::warn!(attempt, delay_ms = delay.as_millis() as u64, "{e}; retrying");
                    tokio::time::sleep(delay).await;
                }
                result => return result,
            }
        }
    }

    async fn send(&self, body: &GenerateContentRequest<'_>) -> Result<String, TranslationError> {
        tracing::debug!(endpoint = %self.endpoint, "sending lookup request");

        let response = self
            .http
            .post(self.url.clone())
            .json(body)
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        let text = response.text().await.map_err(network_error)?;

        tracing::debug!(%status, bytes = text.len(), "received response");

        if !status.is_success() {
            return Err(TranslationError::UpstreamFormat(describe_status(
                status, &text,
            )));
        }

        reply_text(&text)
    }
}

/// Pulls `candidates[0].content.parts[0].text` out of a success body.
fn reply_text(body: &str) -> Result<String, TranslationError> {
    let response: GenerateContentResponse = serde_json::from_str(body).map_err(|e| {
        TranslationError::UpstreamFormat(format!("response is not valid JSON: {e}"))
    })?;

    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .map(|r| format!(" (blocked: {r})"))
            .unwrap_or_default();
        return Err(TranslationError::UpstreamFormat(format!(
            "response has no candidates{reason}"
        )));
    };

    candidate
        .content
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .ok_or_else(|| {
            TranslationError::UpstreamFormat(
                "response has no text in candidates[0].content.parts[0]".to_string(),
            )
        })
}

fn describe_status(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body).map_or_else(
        |_| {
            let body = body.trim();
            if body.is_empty() {
                format!("request failed with status {status}")
            } else {
                format!("request failed with status {status}: {body}")
            }
        },
        |e| format!("request failed with status {status}: {}", e.error.message),
    )
}

/// Describes a transport failure without the request URL, which carries the key.
fn network_error(e: reqwest::Error) -> TranslationError {
    let timed_out = e.is_timeout();
    let e = e.without_url();

    let mut detail = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        detail.push_str(": ");
        detail.push_str(&cause.to_string());
        source = cause.source();
    }

    if timed_out {
        detail = format!("request timed out ({detail})");
    }

    TranslationError::Network(detail)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ProxyConfig;

    fn config_with_key() -> Config {
        Config {
            api_key: "test-key".to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn test_request_body_shape() {
        let prompt = "say \"hi\"\nتست";
        let body = serde_json::to_value(GenerateContentRequest::new(prompt)).unwrap();

        assert_eq!(
            body,
            serde_json::json!({"contents": [{"parts": [{"text": prompt}]}]})
        );
    }

    #[test]
    fn test_new_requires_api_key() {
        let result = TranslationClient::new(&Config::default(), ClientOptions::default());
        assert!(matches!(result, Err(TranslationError::MissingApiKey)));
    }

    #[test]
    fn test_new_puts_key_in_query() {
        let client = TranslationClient::new(&config_with_key(), ClientOptions::default()).unwrap();

        assert_eq!(client.url.query(), Some("key=test-key"));
        assert_eq!(client.endpoint(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_new_rejects_invalid_endpoint() {
        let options = ClientOptions {
            endpoint: "not a url".to_string(),
            ..ClientOptions::default()
        };
        let result = TranslationClient::new(&config_with_key(), options);
        assert!(matches!(result, Err(TranslationError::InvalidConfig(_))));
    }

    #[test]
    fn test_new_accepts_proxy() {
        let mut config = config_with_key();
        config.proxy = ProxyConfig::new("127.0.0.1", "3128");

        assert!(TranslationClient::new(&config, ClientOptions::default()).is_ok());
    }

    #[test]
    fn test_new_rejects_unusable_proxy() {
        let mut config = config_with_key();
        config.proxy = ProxyConfig::new("bad host", "3128");

        let result = TranslationClient::new(&config, ClientOptions::default());
        assert!(matches!(result, Err(TranslationError::InvalidConfig(_))));
    }

    #[test]
    fn test_reply_text_success() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"hello"}],"role":"model"}}]}"#;
        assert_eq!(reply_text(body).unwrap(), "hello");
    }

    #[test]
    fn test_reply_text_no_candidates() {
        let err = reply_text(r#"{"candidates":[]}"#).unwrap_err();
        assert!(matches!(err, TranslationError::UpstreamFormat(_)));
    }

    #[test]
    fn test_reply_text_blocked_prompt() {
        let err = reply_text(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap_err();
        assert!(err.to_string().contains("blocked: SAFETY"));
    }

    #[test]
    fn test_reply_text_missing_text_is_an_error() {
        let err = reply_text(r#"{"candidates":[{"content":{"parts":[{}]}}]}"#).unwrap_err();
        assert!(matches!(err, TranslationError::UpstreamFormat(_)));

        let err = reply_text(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap_err();
        assert!(matches!(err, TranslationError::UpstreamFormat(_)));
    }

    #[test]
    fn test_reply_text_invalid_envelope() {
        let err = reply_text("<html>oops</html>").unwrap_err();
        assert!(matches!(err, TranslationError::UpstreamFormat(_)));
    }

    #[test]
    fn test_describe_status_uses_upstream_message() {
        let body = r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
        let message = describe_status(StatusCode::BAD_REQUEST, body);

        assert!(message.contains("400"));
        assert!(message.contains("API key not valid."));
    }

    #[test]
    fn test_describe_status_plain_body() {
        assert_eq!(
            describe_status(StatusCode::BAD_GATEWAY, ""),
            "request failed with status 502 Bad Gateway"
        );
        assert!(describe_status(StatusCode::BAD_GATEWAY, "upstream down").ends_with("upstream down"));
    }
}
