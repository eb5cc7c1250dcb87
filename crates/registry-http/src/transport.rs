//! Transport abstraction for registry requests.
//!
//! The transport performs exactly one HTTP exchange per request and reports
//! the parsed body. Implementations may use reqwest or an in-memory script.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use crate::error::HttpFailure;

/// Result type for transport operations.
pub type Result<T> = std::result::Result<T, HttpFailure>;

/// HTTP verbs used by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
        }
    }
}

/// A fully resolved request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    /// Resolved URI, possibly already carrying a query string.
    pub url: String,
    /// Extra query parameters appended to `url`.
    pub query: Vec<(String, String)>,
    /// JSON body, sent with `Content-Type: application/json`.
    pub body: Option<Value>,
    pub timeout: Duration,
}

/// Transport trait for issuing registry requests.
///
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Perform one exchange.
    ///
    /// Returns the parsed body on a 2xx status. Any other status yields an
    /// [`HttpFailure`] carrying the parsed error body; connection errors and
    /// timeouts yield one without a body.
    async fn execute(&self, request: HttpRequest) -> Result<Value>;
}

/// Parse a response body: JSON when it is JSON, otherwise the raw text.
///
/// An empty body yields `None`.
pub fn parse_body(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    Some(serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string())))
}

/// Transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured client (proxies, TLS roots, ...).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<Value> {
        let builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self
                .client
                .post(&request.url)
                .header(CONTENT_TYPE, "application/json"),
        };
        let mut builder = builder.query(&request.query).timeout(request.timeout);
        if let Some(body) = &request.body {
            builder = builder.body(body.to_string());
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| HttpFailure::network(e.to_string()))?;
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| HttpFailure::network(e.to_string()))?;
        let body = parse_body(&text);

        if status.is_success() {
            Ok(body.unwrap_or(Value::Null))
        } else {
            Err(HttpFailure::response(status.as_u16(), body))
        }
    }
}

/// An in-memory transport for testing.
///
/// Replays queued responses in order and records every request it sees.
pub mod memory {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Mutex, PoisonError};

    /// Scripted transport implementation.
    #[derive(Debug, Default)]
    pub struct ScriptedTransport {
        responses: Mutex<VecDeque<Result<Value>>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        /// Create a transport with an empty script.
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue a successful response body.
        pub fn push_ok(&self, body: Value) -> &Self {
            self.push(Ok(body))
        }

        /// Queue an error response with the given status and body.
        pub fn push_error(&self, status: u16, body: Option<Value>) -> &Self {
            self.push(Err(HttpFailure::response(status, body)))
        }

        /// Queue a network failure (no response at all).
        pub fn push_network_failure(&self, reason: &str) -> &Self {
            self.push(Err(HttpFailure::network(reason)))
        }

        fn push(&self, response: Result<Value>) -> &Self {
            self.responses
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push_back(response);
            self
        }

        /// Every request executed so far, in order.
        pub fn requests(&self) -> Vec<HttpRequest> {
            self.requests
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        /// Number of requests executed so far.
        pub fn request_count(&self) -> usize {
            self.requests
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .len()
        }
    }

    #[async_trait]
    impl HttpTransport for ScriptedTransport {
        async fn execute(&self, request: HttpRequest) -> Result<Value> {
            self.requests
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(request);
            self.responses
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .pop_front()
                .unwrap_or_else(|| Err(HttpFailure::network("no scripted response")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::ScriptedTransport;
    use super::*;
    use serde_json::json;

    fn get(url: &str) -> HttpRequest {
        HttpRequest {
            method: Method::Get,
            url: url.to_string(),
            query: vec![],
            body: None,
            timeout: Duration::from_millis(10),
        }
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(r#"{"a":1}"#), Some(json!({"a": 1})));
        assert_eq!(parse_body("challenge-123"), Some(json!("challenge-123")));
        assert_eq!(parse_body("  "), None);
    }

    #[tokio::test]
    async fn test_scripted_replays_in_order() {
        let transport = ScriptedTransport::new();
        transport.push_ok(json!("first")).push_error(404, None);

        assert_eq!(transport.execute(get("/a")).await.unwrap(), json!("first"));
        let failure = transport.execute(get("/b")).await.unwrap_err();
        assert_eq!(failure.status, Some(404));

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].url, "/b");
    }

    #[tokio::test]
    async fn test_scripted_exhausted_is_network_failure() {
        let transport = ScriptedTransport::new();
        let failure = transport.execute(get("/a")).await.unwrap_err();
        assert!(failure.body.is_none());
        assert_eq!(transport.request_count(), 1);
    }
}
