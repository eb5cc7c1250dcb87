//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;

use async_trait::async_trait;
use registry_client::{CryptoError, CryptoProvider, Ed25519Sha256, Registry, RegistryConfig};
use registry_core::{Keypair, PublicKey, Sha256Digest};
use registry_http::memory::ScriptedTransport;
use registry_http::HttpTransport;
use serde_json::{json, Value};

/// A keypair and a registry wired to a scripted transport.
pub struct TestFixture {
    pub keypair: Keypair,
    pub transport: Arc<ScriptedTransport>,
    pub registry: Registry,
}

impl TestFixture {
    /// Create a new test fixture with a random keypair.
    pub fn new() -> Self {
        Self::build(Keypair::generate(), Arc::new(Ed25519Sha256))
    }

    /// Create with a deterministic keypair from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self::build(Keypair::from_seed(&seed), Arc::new(Ed25519Sha256))
    }

    /// Create with a custom crypto provider.
    pub fn with_crypto(crypto: Arc<dyn CryptoProvider>) -> Self {
        Self::build(Keypair::generate(), crypto)
    }

    fn build(keypair: Keypair, crypto: Arc<dyn CryptoProvider>) -> Self {
        let transport = Arc::new(ScriptedTransport::new());
        let dynamic: Arc<dyn HttpTransport> = transport.clone();
        let registry = Registry::with_parts("node", &RegistryConfig::default(), dynamic, crypto);
        Self {
            keypair,
            transport,
            registry,
        }
    }

    pub fn public_key(&self) -> PublicKey {
        self.keypair.public_key()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create deterministic keypairs for multi-party tests.
pub fn multi_party_keypairs(count: usize) -> Vec<Keypair> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            Keypair::from_seed(&seed)
        })
        .collect()
}

/// A crypto provider whose sign and/or hash always fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingCrypto {
    pub fail_sign: bool,
    pub fail_hash: bool,
}

impl FailingCrypto {
    pub fn signing() -> Self {
        Self {
            fail_sign: true,
            fail_hash: false,
        }
    }

    pub fn hashing() -> Self {
        Self {
            fail_sign: false,
            fail_hash: true,
        }
    }
}

#[async_trait]
impl CryptoProvider for FailingCrypto {
    async fn sign(&self, message: &str, keypair: &Keypair) -> Result<String, CryptoError> {
        if self.fail_sign {
            return Err(CryptoError::Signing("signer unavailable".into()));
        }
        Ed25519Sha256.sign(message, keypair).await
    }

    async fn hash(&self, message: &str) -> Result<Sha256Digest, CryptoError> {
        if self.fail_hash {
            return Err(CryptoError::Hashing("hasher unavailable".into()));
        }
        Ed25519Sha256.hash(message).await
    }
}

/// A `_search` response body with one hit per `(id, source)`.
pub fn search_response(hits: &[(&str, Value)]) -> Value {
    let hits: Vec<Value> = hits
        .iter()
        .map(|(id, source)| json!({"_id": id, "_source": source}))
        .collect();
    json!({"hits": {"total": hits.len(), "hits": hits}})
}

/// The two-category fixture: `c1` Books and `c2` Music.
pub fn books_and_music() -> Value {
    search_response(&[("c1", json!({"name": "Books"})), ("c2", json!({"name": "Music"}))])
}

/// Install a test-writer tracing subscriber. Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use registry_client::ClientError;
    use registry_core::Record;

    #[test]
    fn test_seeded_fixture_is_deterministic() {
        let a = TestFixture::with_seed([7; 32]);
        let b = TestFixture::with_seed([7; 32]);
        assert_eq!(a.public_key(), b.public_key());
    }

    #[test]
    fn test_multi_party() {
        let pks: Vec<_> = multi_party_keypairs(3).iter().map(|k| k.public_key()).collect();
        assert_ne!(pks[0], pks[1]);
        assert_ne!(pks[1], pks[2]);
        assert_ne!(pks[0], pks[2]);
    }

    #[test]
    fn test_search_response_shape() {
        let body = books_and_music();
        assert_eq!(body["hits"]["total"], 2);
        assert_eq!(body["hits"]["hits"][1]["_id"], "c2");
    }

    #[tokio::test]
    async fn test_failing_crypto_blocks_submission() {
        init_tracing();
        let fixture = TestFixture::with_crypto(Arc::new(FailingCrypto::hashing()));
        fixture.transport.push_ok(json!("never"));

        let err = fixture
            .registry
            .add_record(&Record::new().with("title", "Bike"), &fixture.keypair)
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Crypto(CryptoError::Hashing(_))));
        assert_eq!(fixture.transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_failing_signer_blocks_token_exchange() {
        let fixture = TestFixture::with_crypto(Arc::new(FailingCrypto::signing()));
        fixture.transport.push_ok(json!("challenge")).push_ok(json!("never"));

        let err = fixture.registry.token(&fixture.keypair).await.unwrap_err();

        assert!(matches!(err, ClientError::Crypto(CryptoError::Signing(_))));
        assert_eq!(fixture.transport.request_count(), 1);
    }
}
