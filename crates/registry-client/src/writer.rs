//! Signed record submission.
//!
//! The record is copied, stripped of stale credentials and stamped with the
//! issuer; its canonical JSON is then hashed and signed. Only when both
//! succeed are `hash` and `signature` attached and the record posted.

use registry_core::{param_to_string, Keypair, Params, Record};
use registry_http::PostResource;
use serde_json::Value;
use tracing::debug;

use crate::crypto::CryptoProvider;
use crate::error::{ClientError, Result};

/// Produce the signed form of `record` without submitting it.
pub async fn prepare_record(
    record: &Record,
    keypair: &Keypair,
    crypto: &dyn CryptoProvider,
) -> Result<Record> {
    let unsigned = record.unsigned_for(&keypair.public_key());
    let canonical = unsigned.canonical_json();

    let (digest, signature) = tokio::try_join!(
        crypto.hash(&canonical),
        crypto.sign(&canonical, keypair),
    )?;

    Ok(unsigned.seal(&digest, signature))
}

/// Sign `record` and post it, returning the identifier assigned by the registry.
pub async fn add_record(
    post: &PostResource,
    record: &Record,
    keypair: &Keypair,
    crypto: &dyn CryptoProvider,
) -> Result<String> {
    let signed = prepare_record(record, keypair, crypto).await?;
    debug!(hash = signed.hash().unwrap_or_default(), "submitting record");

    let body = post.call(&signed, &Params::new()).await?;
    record_id(body)
}

/// The registry answers either with the bare id or an index response carrying `_id`.
fn record_id(body: Value) -> Result<String> {
    match body {
        Value::String(id) => Ok(id),
        Value::Object(ref map) => match map.get("_id") {
            Some(id) => Ok(param_to_string(id)),
            None => Err(ClientError::InvalidResponse(format!("no record id in {body}"))),
        },
        Value::Null => Err(ClientError::InvalidResponse("empty record id".into())),
        other => Ok(param_to_string(&other)),
    }
}
