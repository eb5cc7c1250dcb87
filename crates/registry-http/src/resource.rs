//! Templated HTTP resources.
//!
//! A resource binds a URI template and a verb to a transport. Each call
//! resolves the template against the supplied parameters, performs exactly
//! one request, and normalizes failures into [`ResourceError`].

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use registry_core::{param_to_string, resolve, Params};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{HttpFailure, ResourceError, Result};
use crate::transport::{HttpRequest, HttpTransport, Method};

/// Timeout applied to every request unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(4000);

/// A GET-bound URI template.
#[derive(Clone)]
pub struct GetResource {
    template: String,
    transport: Arc<dyn HttpTransport>,
    timeout: Duration,
}

impl GetResource {
    pub fn new(template: impl Into<String>, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            template: template.into(),
            transport,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Issue the GET. Parameters without a placeholder become query parameters.
    pub async fn call(&self, params: &Params) -> Result<Value> {
        let resolved = resolve(&self.template, params);
        let request = HttpRequest {
            method: Method::Get,
            query: resolved.query_pairs(),
            url: resolved.uri,
            body: None,
            timeout: self.timeout,
        };
        dispatch(self.transport.as_ref(), request).await
    }

    /// Issue the GET and deserialize the body.
    pub async fn call_as<T: DeserializeOwned>(&self, params: &Params) -> Result<T> {
        let body = self.call(params).await?;
        Ok(serde_json::from_value(body)?)
    }
}

impl fmt::Debug for GetResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GetResource")
            .field("template", &self.template)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// A POST-bound URI template.
#[derive(Clone)]
pub struct PostResource {
    template: String,
    transport: Arc<dyn HttpTransport>,
    timeout: Duration,
}

impl PostResource {
    pub fn new(template: impl Into<String>, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            template: template.into(),
            transport,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Issue the POST with `data` as the JSON body.
    pub async fn call<D>(&self, data: &D, params: &Params) -> Result<Value>
    where
        D: Serialize + ?Sized,
    {
        let body = serde_json::to_value(data)?;
        let resolved = resolve(&self.template, params);
        let request = HttpRequest {
            method: Method::Post,
            query: resolved.query_pairs(),
            url: resolved.uri,
            body: Some(body),
            timeout: self.timeout,
        };
        dispatch(self.transport.as_ref(), request).await
    }

    /// Issue the POST and deserialize the body.
    pub async fn call_as<D, T>(&self, data: &D, params: &Params) -> Result<T>
    where
        D: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.call(data, params).await?;
        Ok(serde_json::from_value(body)?)
    }
}

impl fmt::Debug for PostResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostResource")
            .field("template", &self.template)
            .field("timeout", &self.timeout)
            .finish()
    }
}

async fn dispatch(transport: &dyn HttpTransport, request: HttpRequest) -> Result<Value> {
    debug!(method = %request.method, url = %request.url, "registry request");
    transport.execute(request).await.map_err(process_error)
}

/// Normalize a transport failure.
///
/// A body object carrying `message` is surfaced verbatim; everything else
/// becomes [`ResourceError::Unknown`].
pub fn process_error(failure: HttpFailure) -> ResourceError {
    match failure.body {
        Some(Value::Object(map)) if map.contains_key("message") => {
            let message = map.get("message").map(param_to_string).unwrap_or_default();
            warn!(status = ?failure.status, %message, "registry error");
            ResourceError::Server {
                message,
                status: failure.status,
                body: Value::Object(map),
            }
        }
        _ => {
            debug!(reason = %failure.reason, "registry request failed without detail");
            ResourceError::Unknown
        }
    }
}
