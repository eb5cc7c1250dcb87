//! The signing and hashing utility used by the auth flow and record writer.
//!
//! Both operations are asynchronous so that an implementation may delegate
//! to a remote signer or hardware key.

use async_trait::async_trait;
use registry_core::{Keypair, Sha256Digest};

use crate::error::CryptoError;

/// Signs and hashes messages on behalf of the client.
#[async_trait]
pub trait CryptoProvider: Send + Sync {
    /// Sign `message`, returning the encoded signature.
    async fn sign(&self, message: &str, keypair: &Keypair) -> Result<String, CryptoError>;

    /// Digest `message`.
    async fn hash(&self, message: &str) -> Result<Sha256Digest, CryptoError>;
}

/// Ed25519 signatures (base64) over SHA-256 digests, computed in process.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Sha256;

#[async_trait]
impl CryptoProvider for Ed25519Sha256 {
    async fn sign(&self, message: &str, keypair: &Keypair) -> Result<String, CryptoError> {
        Ok(keypair.sign(message.as_bytes()).to_base64())
    }

    async fn hash(&self, message: &str) -> Result<Sha256Digest, CryptoError> {
        Ok(Sha256Digest::hash(message.as_bytes()))
    }
}
