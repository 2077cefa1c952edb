//! API client — the single point of entry for all backend calls in SEOScribe.
//!
//! ARCHITECTURAL RULE: no other module may issue HTTP requests directly.
//! All backend interactions MUST go through [`ApiClient`], so that every
//! call gets the same timeout, error classification, and `errors`-array
//! handling.

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::models::health::HealthStatus;
use crate::models::jsonld::{JsonLdResult, SchemaRequest};
use crate::models::keywords::{KeywordList, KeywordRequest};
use crate::models::metadata::{MetadataRequest, MetadataResult};
use crate::models::rewrite::{DownloadRequest, RewriteRequest, RewriteResult};
use crate::models::social::{SocialRequest, SocialResult};
use crate::models::Envelope;

pub mod retry;

/// Per-call deadline applied when the caller does not configure one.
pub const DEFAULT_TIMEOUT_MS: u64 = 20_000;

/// Classified failure for a single backend call.
///
/// The retry helper consults [`ClientError::is_retryable`]: only failures
/// where the backend may never have seen the request (timeout, transport)
/// are worth re-issuing. Status, validation, and application failures are
/// deterministic and surface immediately.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to {path} timed out after {after:?}")]
    Timeout { path: String, after: Duration },

    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response payload: {0}")]
    Validation(String),

    #[error("backend reported: {0}")]
    Application(String),
}

impl ClientError {
    /// True for failures where the request may not have reached the
    /// backend at all; everything else is deterministic and final.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ClientError::Timeout { .. } | ClientError::Transport(_)
        )
    }
}

/// The single HTTP client used by all commands.
///
/// Every JSON call follows the same cycle: merge headers, issue the
/// request under a deadline, check the status, unwrap any `errors` array,
/// deserialize into the endpoint's contract.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, Duration::from_millis(DEFAULT_TIMEOUT_MS))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }

    // ── Typed endpoint operations ───────────────────────────────────────

    /// POST /keywords — suggest keyword phrases, optionally trend-verified.
    /// Returns the raw wire list; normalize at the boundary via
    /// [`KeywordList::normalize`].
    pub async fn keywords(&self, request: &KeywordRequest) -> Result<KeywordList, ClientError> {
        self.post_json("/keywords", request).await
    }

    /// POST /rewrite — restructure content as a semantic HTML fragment.
    pub async fn rewrite(&self, request: &RewriteRequest) -> Result<RewriteResult, ClientError> {
        self.post_enveloped("/rewrite", request).await
    }

    /// POST /metadata — title, meta description, Open Graph and Twitter card.
    pub async fn metadata(&self, request: &MetadataRequest) -> Result<MetadataResult, ClientError> {
        self.post_enveloped("/metadata", request).await
    }

    /// POST /schema — JSON-LD structured data plus lint findings.
    pub async fn schema(&self, request: &SchemaRequest) -> Result<JsonLdResult, ClientError> {
        self.post_enveloped("/schema", request).await
    }

    /// POST /social — per-network post drafts.
    pub async fn social(&self, request: &SocialRequest) -> Result<SocialResult, ClientError> {
        self.post_enveloped("/social", request).await
    }

    /// GET /health — backend liveness and configured model.
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let payload = self
            .send(Method::GET, "/health", None, HeaderMap::new())
            .await?;
        deserialize_payload(payload)
    }

    /// POST /download — render an HTML fragment into a full downloadable
    /// page. The response is a binary stream: status and timeout rules
    /// apply unchanged, but there is no JSON parsing and no `errors`
    /// unwrapping.
    pub async fn download(&self, request: &DownloadRequest) -> Result<Bytes, ClientError> {
        let url = self.url("/download");
        let body = encode_body(request)?;
        let builder = self
            .http
            .request(Method::POST, &url)
            .headers(default_headers())
            .body(body);

        let fut = async {
            let response = builder.send().await.map_err(|e| self.classify("/download", e))?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(ClientError::Status {
                    status: status.as_u16(),
                    body,
                });
            }
            response
                .bytes()
                .await
                .map_err(|e| self.classify("/download", e))
        };

        let bytes = tokio::time::timeout(self.timeout, fut)
            .await
            .map_err(|_| ClientError::Timeout {
                path: "/download".to_string(),
                after: self.timeout,
            })??;

        debug!(%url, len = bytes.len(), "download completed");
        Ok(bytes)
    }

    // ── Executor core ───────────────────────────────────────────────────

    /// Issues a JSON call with extra caller headers merged over the
    /// defaults (caller wins on conflict). Returns the parsed payload
    /// after status and `errors`-array checks.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        extra_headers: HeaderMap,
    ) -> Result<Value, ClientError> {
        let url = self.url(path);
        let mut headers = default_headers();
        for (name, value) in extra_headers.iter() {
            headers.insert(name, value.clone());
        }

        let mut builder = self.http.request(method, &url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(encode_body(body)?);
        }

        // The whole send-and-read runs under one deadline. On expiry the
        // future is dropped, which aborts the in-flight request; a late
        // response is never observed.
        let fut = async {
            let response = builder.send().await.map_err(|e| self.classify(path, e))?;
            let status = response.status();
            let text = response.text().await.map_err(|e| self.classify(path, e))?;
            Ok::<(reqwest::StatusCode, String), ClientError>((status, text))
        };
        let (status, text) = tokio::time::timeout(self.timeout, fut)
            .await
            .map_err(|_| ClientError::Timeout {
                path: path.to_string(),
                after: self.timeout,
            })??;

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let payload: Value = serde_json::from_str(&text)
            .map_err(|e| ClientError::Validation(format!("malformed JSON body: {e}")))?;

        if let Some(joined) = application_errors(&payload) {
            return Err(ClientError::Application(joined));
        }

        debug!(%url, status = status.as_u16(), "request completed");
        Ok(payload)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)
            .map_err(|e| ClientError::Validation(format!("failed to encode request body: {e}")))?;
        let payload = self
            .send(Method::POST, path, Some(&body), HeaderMap::new())
            .await?;
        deserialize_payload(payload)
    }

    async fn post_enveloped<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let envelope: Envelope<T> = self.post_json(path, body).await?;
        Ok(envelope.data)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn classify(&self, path: &str, error: reqwest::Error) -> ClientError {
        if error.is_timeout() {
            ClientError::Timeout {
                path: path.to_string(),
                after: self.timeout,
            }
        } else {
            ClientError::Transport(error)
        }
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

fn encode_body<B: Serialize>(body: &B) -> Result<Vec<u8>, ClientError> {
    serde_json::to_vec(body)
        .map_err(|e| ClientError::Validation(format!("failed to encode request body: {e}")))
}

fn deserialize_payload<T: DeserializeOwned>(payload: Value) -> Result<T, ClientError> {
    serde_json::from_value(payload).map_err(|e| ClientError::Validation(e.to_string()))
}

/// An otherwise-successful payload may still carry a non-empty `errors`
/// array; that counts as a failure, joined into one message.
fn application_errors(payload: &Value) -> Option<String> {
    let errors = payload.get("errors")?.as_array()?;
    if errors.is_empty() {
        return None;
    }
    Some(
        errors
            .iter()
            .map(|e| match e.as_str() {
                Some(message) => message.to_string(),
                None => e.to_string(),
            })
            .collect::<Vec<_>>()
            .join("; "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_url_joins_base_and_path() {
        let client = ApiClient::new("http://localhost:8000/api/");
        assert_eq!(client.url("/rewrite"), "http://localhost:8000/api/rewrite");
    }

    #[test]
    fn test_timeout_is_retryable() {
        let timeout = ClientError::Timeout {
            path: "/rewrite".to_string(),
            after: Duration::from_millis(5),
        };
        assert!(timeout.is_retryable());
    }

    #[test]
    fn test_status_validation_application_are_final() {
        let status = ClientError::Status {
            status: 400,
            body: "bad request".to_string(),
        };
        let validation = ClientError::Validation("missing field".to_string());
        let application = ClientError::Application("quota exceeded".to_string());
        assert!(!status.is_retryable());
        assert!(!validation.is_retryable());
        assert!(!application.is_retryable());
    }

    #[test]
    fn test_application_errors_joined_with_semicolons() {
        let payload = json!({"errors": ["first", "second"]});
        assert_eq!(
            application_errors(&payload).as_deref(),
            Some("first; second")
        );
    }

    #[test]
    fn test_application_errors_empty_array_is_success() {
        let payload = json!({"errors": [], "keywords": []});
        assert_eq!(application_errors(&payload), None);
    }

    #[test]
    fn test_application_errors_absent_is_success() {
        let payload = json!({"keywords": ["a"]});
        assert_eq!(application_errors(&payload), None);
    }

    #[test]
    fn test_application_errors_non_string_entries_render_as_json() {
        let payload = json!({"errors": [{"code": 7}]});
        assert_eq!(
            application_errors(&payload).as_deref(),
            Some(r#"{"code":7}"#)
        );
    }
}
