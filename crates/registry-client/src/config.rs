//! Client configuration.

use std::time::Duration;

use registry_http::DEFAULT_TIMEOUT;

use crate::error::{ClientError, Result};

/// Environment variable naming the registry node (`host[:port]`).
pub const ENV_NODE: &str = "REGISTRY_NODE";
/// Environment variable overriding the URI scheme.
pub const ENV_SCHEME: &str = "REGISTRY_SCHEME";
/// Environment variable overriding the request timeout, in milliseconds.
pub const ENV_TIMEOUT_MS: &str = "REGISTRY_TIMEOUT_MS";

/// Configuration for the registry client.
///
/// With no `node` the client is inert: [`crate::Registry::from_config`]
/// returns `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Registry host, e.g. `localhost:9200`.
    pub node: Option<String>,
    /// URI scheme prefixed to every endpoint.
    pub scheme: String,
    /// Timeout applied to every request.
    pub timeout: Duration,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            node: None,
            scheme: "http".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl RegistryConfig {
    /// Configuration for a given node with default settings.
    pub fn for_node(node: impl Into<String>) -> Self {
        Self {
            node: Some(node.into()),
            ..Self::default()
        }
    }

    /// Read the configuration from `REGISTRY_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            node: lookup(ENV_NODE),
            ..Self::default()
        };
        if let Some(scheme) = lookup(ENV_SCHEME) {
            config.scheme = scheme;
        }
        if let Some(ms) = lookup(ENV_TIMEOUT_MS) {
            let ms: u64 = ms
                .trim()
                .parse()
                .map_err(|_| ClientError::Config(format!("{ENV_TIMEOUT_MS}={ms}")))?;
            config.timeout = Duration::from_millis(ms);
        }
        Ok(config)
    }

    /// The configured node, if set and not blank.
    pub fn node(&self) -> Option<&str> {
        self.node
            .as_deref()
            .map(str::trim)
            .filter(|node| !node.is_empty())
    }

    pub fn is_configured(&self) -> bool {
        self.node().is_some()
    }

    /// `scheme://node` for a given node.
    pub fn base_url(&self, node: &str) -> String {
        format!("{}://{}", self.scheme, node.trim_end_matches('/'))
    }
}
