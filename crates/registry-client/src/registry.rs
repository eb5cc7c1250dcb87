//! The registry: every endpoint of one server behind a single handle.

use std::fmt;
use std::sync::Arc;

use registry_core::{Keypair, Record, SearchHit};
use registry_http::{GetResource, HttpTransport, PostResource, ReqwestTransport};

use crate::auth::{get_token, Token};
use crate::categories::{Categories, CategoryCache};
use crate::config::RegistryConfig;
use crate::crypto::{CryptoProvider, Ed25519Sha256};
use crate::error::Result;
use crate::push::PushSocket;
use crate::writer;

/// Endpoint templates, relative to `{scheme}://{node}`.
pub mod paths {
    pub const AUTH: &str = "/auth";
    pub const CATEGORY_SEARCH: &str = "/registry/category/_search?from=0&size=1000";
    pub const RECORD: &str = "/registry/record";
    pub const RECORD_BY_ID: &str = "/registry/record/:id";
    pub const RECORD_SEARCH_TEXT: &str = "/registry/record/_search?q=:search";
    pub const RECORD_SEARCH: &str = "/registry/record/_search";
    pub const RECORD_AVATAR: &str =
        "/registry/record/_search?q=issuer::issuer+category::category&size=1&_source=pictures.src";
    pub const CURRENCY_ALL: &str =
        "/currency/simple/_search?_source=currencyName,peers.host,peers.port";
    pub const CURRENCY_BY_ID: &str = "/currency/simple/:id/_source";
}

/// `/auth` resources.
#[derive(Debug, Clone)]
pub struct AuthEndpoints {
    /// Fetch a challenge.
    pub get: GetResource,
    /// Exchange a signed challenge for a token.
    pub post: PostResource,
}

/// `/registry/record` resources.
#[derive(Debug, Clone)]
pub struct RecordEndpoints {
    /// Fetch a record by `id`.
    pub get: GetResource,
    /// Replace the record at `id`.
    pub update: PostResource,
    /// Query-string search on `search`.
    pub search_text: GetResource,
    /// Search with a query body.
    pub search: PostResource,
    /// Avatar of an issuer: params `issuer` and `category`.
    pub avatar: GetResource,
}

/// `/currency/simple` resources.
#[derive(Debug, Clone)]
pub struct CurrencyEndpoints {
    pub all: GetResource,
    /// Fetch one currency by `id`.
    pub get: GetResource,
}

/// A client for one registry server.
///
/// Holds the server's endpoints, the signing utility, and the category cache.
pub struct Registry {
    node: String,
    base_url: String,
    crypto: Arc<dyn CryptoProvider>,
    auth: AuthEndpoints,
    category_search: GetResource,
    record_add: PostResource,
    record: RecordEndpoints,
    currency: CurrencyEndpoints,
    categories: CategoryCache,
}

impl Registry {
    /// A registry for `node` with the default transport and crypto provider.
    pub fn new(node: &str) -> Self {
        Self::with_parts(
            node,
            &RegistryConfig::for_node(node),
            Arc::new(ReqwestTransport::new()),
            Arc::new(Ed25519Sha256),
        )
    }

    /// A registry for the configured node, or `None` when no node is configured.
    pub fn from_config(config: &RegistryConfig) -> Option<Self> {
        let node = config.node()?;
        Some(Self::with_parts(
            node,
            config,
            Arc::new(ReqwestTransport::new()),
            Arc::new(Ed25519Sha256),
        ))
    }

    /// A registry with explicit collaborators.
    ///
    /// `config` supplies scheme and timeout; its `node` is ignored in favor of `node`.
    pub fn with_parts(
        node: &str,
        config: &RegistryConfig,
        transport: Arc<dyn HttpTransport>,
        crypto: Arc<dyn CryptoProvider>,
    ) -> Self {
        let node = node.trim().to_string();
        let base_url = config.base_url(&node);

        let get = |path: &str| {
            GetResource::new(format!("{base_url}{path}"), Arc::clone(&transport))
                .with_timeout(config.timeout)
        };
        let post = |path: &str| {
            PostResource::new(format!("{base_url}{path}"), Arc::clone(&transport))
                .with_timeout(config.timeout)
        };

        let auth = AuthEndpoints {
            get: get(paths::AUTH),
            post: post(paths::AUTH),
        };
        let category_search = get(paths::CATEGORY_SEARCH);
        let record_add = post(paths::RECORD);
        let record = RecordEndpoints {
            get: get(paths::RECORD_BY_ID),
            update: post(paths::RECORD_BY_ID),
            search_text: get(paths::RECORD_SEARCH_TEXT),
            search: post(paths::RECORD_SEARCH),
            avatar: get(paths::RECORD_AVATAR),
        };
        let currency = CurrencyEndpoints {
            all: get(paths::CURRENCY_ALL),
            get: get(paths::CURRENCY_BY_ID),
        };

        Self {
            node,
            base_url,
            crypto,
            auth,
            category_search,
            record_add,
            record,
            currency,
            categories: CategoryCache::new(),
        }
    }

    pub fn node(&self) -> &str {
        &self.node
    }

    /// `{scheme}://{node}`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Auth
    // ─────────────────────────────────────────────────────────────────────────

    pub fn auth(&self) -> &AuthEndpoints {
        &self.auth
    }

    /// Obtain a token by signing a fresh challenge with `keypair`.
    pub async fn token(&self, keypair: &Keypair) -> Result<Token> {
        get_token(&self.auth.get, &self.auth.post, self.crypto.as_ref(), keypair).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Hits and categories
    // ─────────────────────────────────────────────────────────────────────────

    /// A placeholder hit with nothing in it.
    pub fn empty_hit(&self) -> SearchHit {
        SearchHit::empty()
    }

    /// All categories, fetched on first use and memoized once non-empty.
    pub async fn categories(&self) -> Result<Arc<Categories>> {
        self.categories.get_or_fetch(&self.category_search).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Records
    // ─────────────────────────────────────────────────────────────────────────

    pub fn record(&self) -> &RecordEndpoints {
        &self.record
    }

    /// Sign `record` as `keypair` and submit it. Returns the new record id.
    pub async fn add_record(&self, record: &Record, keypair: &Keypair) -> Result<String> {
        writer::add_record(&self.record_add, record, keypair, self.crypto.as_ref()).await
    }

    /// The signed form of `record`, as [`Registry::add_record`] would submit it.
    pub async fn prepare_record(&self, record: &Record, keypair: &Keypair) -> Result<Record> {
        writer::prepare_record(record, keypair, self.crypto.as_ref()).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Currencies and push
    // ─────────────────────────────────────────────────────────────────────────

    pub fn currency(&self) -> &CurrencyEndpoints {
        &self.currency
    }

    /// Open a push socket to `uri`.
    pub async fn ws(&self, uri: &str) -> Result<PushSocket> {
        PushSocket::connect(uri).await
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("node", &self.node)
            .field("base_url", &self.base_url)
            .field("cached_categories", &self.categories.cached().len())
            .finish()
    }
}
