//! Shared helpers for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use registry_core::{Keypair, Sha256Digest};
use registry_http::memory::ScriptedTransport;

use crate::config::RegistryConfig;
use crate::crypto::{CryptoProvider, Ed25519Sha256};
use crate::error::CryptoError;
use crate::registry::Registry;

/// Delegates to [`Ed25519Sha256`], counting calls and optionally failing.
#[derive(Debug, Default)]
pub struct CountingCrypto {
    pub fail_sign: bool,
    pub fail_hash: bool,
    pub signs: AtomicUsize,
    pub hashes: AtomicUsize,
}

impl CountingCrypto {
    pub fn failing_sign() -> Self {
        Self {
            fail_sign: true,
            ..Self::default()
        }
    }

    pub fn failing_hash() -> Self {
        Self {
            fail_hash: true,
            ..Self::default()
        }
    }

    pub fn sign_count(&self) -> usize {
        self.signs.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CryptoProvider for CountingCrypto {
    async fn sign(&self, message: &str, keypair: &Keypair) -> Result<String, CryptoError> {
        self.signs.fetch_add(1, Ordering::SeqCst);
        if self.fail_sign {
            return Err(CryptoError::Signing("key locked".into()));
        }
        Ed25519Sha256.sign(message, keypair).await
    }

    async fn hash(&self, message: &str) -> Result<Sha256Digest, CryptoError> {
        self.hashes.fetch_add(1, Ordering::SeqCst);
        if self.fail_hash {
            return Err(CryptoError::Hashing("digest unavailable".into()));
        }
        Ed25519Sha256.hash(message).await
    }
}

pub struct Harness {
    pub transport: Arc<ScriptedTransport>,
    pub crypto: Arc<CountingCrypto>,
    pub registry: Registry,
}

pub fn harness() -> Harness {
    harness_with(CountingCrypto::default())
}

pub fn harness_with(crypto: CountingCrypto) -> Harness {
    let transport = Arc::new(ScriptedTransport::new());
    let crypto = Arc::new(crypto);
    let registry = Registry::with_parts(
        "node",
        &RegistryConfig::default(),
        transport.clone(),
        crypto.clone(),
    );
    Harness {
        transport,
        crypto,
        registry,
    }
}

pub fn keypair() -> Keypair {
    Keypair::from_seed(&[0x5a; 32])
}
