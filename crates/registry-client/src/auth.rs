//! Challenge-response authentication.
//!
//! 1. GET a challenge phrase from `/auth`.
//! 2. Sign the exact challenge text with the caller's keypair.
//! 3. POST `{pubkey, challenge, signature}` back to `/auth`; the body is the token.
//!
//! The first failing step ends the flow with its own error. A challenge is
//! never reused: a failed attempt restarts from step 1.

use std::fmt;

use registry_core::{param_to_string, Keypair, Params};
use registry_http::{GetResource, PostResource};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::crypto::CryptoProvider;
use crate::error::{ClientError, Result};

/// An opaque credential issued by the auth endpoint.
///
/// Renewal and attachment to later requests are the caller's concern.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(..)")
    }
}

/// Body of the challenge response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthRequest {
    /// Base58 public key.
    pub pubkey: String,
    /// The challenge exactly as received.
    pub challenge: Value,
    /// Signature over the challenge text.
    pub signature: String,
}

/// Run the challenge-response flow.
pub async fn get_token(
    challenge_resource: &GetResource,
    exchange_resource: &PostResource,
    crypto: &dyn CryptoProvider,
    keypair: &Keypair,
) -> Result<Token> {
    let challenge = challenge_resource.call(&Params::new()).await?;
    let challenge_text = param_to_string(&challenge);
    debug!(len = challenge_text.len(), "received auth challenge");

    let signature = crypto.sign(&challenge_text, keypair).await?;

    let request = AuthRequest {
        pubkey: keypair.public_key().to_base58(),
        challenge,
        signature,
    };
    let body = exchange_resource.call(&request, &Params::new()).await?;

    match body {
        Value::Null => Err(ClientError::InvalidResponse("empty token".into())),
        other => Ok(Token(param_to_string(&other))),
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{ClientError, CryptoError};
    use crate::test_support::{harness, harness_with, keypair, CountingCrypto};
    use registry_core::Signature;
    use registry_http::{Method, ResourceError};
    use serde_json::json;

    #[tokio::test]
    async fn test_token_flow() {
        let h = harness();
        h.transport
            .push_ok(json!("challenge-xyz"))
            .push_ok(json!("token-1"));
        let kp = keypair();

        let token = h.registry.token(&kp).await.unwrap();
        assert_eq!(token.as_str(), "token-1");

        let requests = h.transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, Method::Get);
        assert_eq!(requests[0].url, "http://node/auth");
        assert_eq!(requests[1].method, Method::Post);
        assert_eq!(requests[1].url, "http://node/auth");

        let body = requests[1].body.as_ref().unwrap();
        assert_eq!(body["pubkey"], json!(kp.public_key().to_base58()));
        assert_eq!(body["challenge"], json!("challenge-xyz"));
        let signature = Signature::from_base64(body["signature"].as_str().unwrap()).unwrap();
        kp.public_key().verify(b"challenge-xyz", &signature).unwrap();
    }

    #[tokio::test]
    async fn test_challenge_failure_short_circuits() {
        let h = harness();
        h.transport.push_error(503, Some(json!({"message": "node syncing"})));

        let err = h.registry.token(&keypair()).await.unwrap_err();

        assert!(matches!(
            err,
            ClientError::Resource(ResourceError::Server { ref message, .. }) if message == "node syncing"
        ));
        assert_eq!(h.transport.request_count(), 1);
        assert_eq!(h.crypto.sign_count(), 0);
    }

    #[tokio::test]
    async fn test_sign_failure_skips_exchange() {
        let h = harness_with(CountingCrypto::failing_sign());
        h.transport.push_ok(json!("challenge")).push_ok(json!("never"));

        let err = h.registry.token(&keypair()).await.unwrap_err();

        assert!(matches!(err, ClientError::Crypto(CryptoError::Signing(_))));
        assert_eq!(h.transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_exchange_rejection_is_returned_verbatim() {
        let h = harness();
        h.transport
            .push_ok(json!("challenge"))
            .push_error(401, Some(json!({"message": "bad pubkey"})));

        let err = h.registry.token(&keypair()).await.unwrap_err();
        assert_eq!(err.to_string(), "bad pubkey");
    }

    #[tokio::test]
    async fn test_each_attempt_fetches_a_fresh_challenge() {
        let h = harness();
        h.transport
            .push_ok(json!("first"))
            .push_network_failure("reset")
            .push_ok(json!("second"))
            .push_ok(json!("tok"));
        let kp = keypair();

        assert!(h.registry.token(&kp).await.is_err());
        h.registry.token(&kp).await.unwrap();

        let requests = h.transport.requests();
        assert_eq!(requests.len(), 4);
        assert_eq!(requests[2].method, registry_http::Method::Get);
        assert_eq!(requests[3].body.as_ref().unwrap()["challenge"], json!("second"));
    }

    #[tokio::test]
    async fn test_structured_token_body() {
        let h = harness();
        h.transport
            .push_ok(json!("challenge"))
            .push_ok(json!({"token": "abc"}));

        let token = h.registry.token(&keypair()).await.unwrap();
        assert_eq!(token.as_str(), r#"{"token":"abc"}"#);
    }
}
