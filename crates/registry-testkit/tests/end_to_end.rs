//! End-to-end tests: the registry client against a mock HTTP node.

use std::sync::Arc;

use registry_client::{ClientError, Ed25519Sha256, Registry, RegistryConfig};
use registry_core::{params_from, PublicKey, Record, Signature};
use registry_http::{ReqwestTransport, ResourceError};
use registry_testkit::{all_vectors, books_and_music, init_tracing, search_response};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn registry_for(server: &MockServer) -> Registry {
    Registry::with_parts(
        &server.address().to_string(),
        &RegistryConfig::default(),
        Arc::new(ReqwestTransport::new()),
        Arc::new(Ed25519Sha256),
    )
}

async fn posted_body(server: &MockServer, at: &str) -> Value {
    let requests = server.received_requests().await.unwrap_or_default();
    let request = requests
        .iter()
        .find(|r| r.method.as_str() == "POST" && r.url.path() == at)
        .expect("no POST recorded");
    serde_json::from_slice(&request.body).expect("POST body is JSON")
}

#[tokio::test]
async fn test_categories_fetched_once_over_http() -> anyhow::Result<()> {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/registry/category/_search"))
        .and(query_param("from", "0"))
        .and(query_param("size", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(books_and_music()))
        .expect(1)
        .mount(&server)
        .await;

    let registry = registry_for(&server);
    for _ in 0..3 {
        let categories = registry.categories().await?;
        assert_eq!(categories.len(), 2);
        assert_eq!(categories.get("c1").and_then(|c| c.name()), Some("Books"));
        assert_eq!(categories.get("c2").and_then(|c| c.name()), Some("Music"));
    }
    Ok(())
}

#[tokio::test]
async fn test_empty_categories_are_refetched_over_http() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/registry/category/_search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_response(&[])))
        .expect(2)
        .mount(&server)
        .await;

    let registry = registry_for(&server);
    assert!(registry.categories().await?.is_empty());
    assert!(registry.categories().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_token_round_trip() -> anyhow::Result<()> {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_string("sign-me-7f3a"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_string("token-abc"))
        .expect(1)
        .mount(&server)
        .await;

    let registry = registry_for(&server);
    let keypair = registry_core::Keypair::from_seed(&[0x21; 32]);
    let token = registry.token(&keypair).await?;
    assert_eq!(token.as_str(), "token-abc");

    let body = posted_body(&server, "/auth").await;
    assert_eq!(body["challenge"], "sign-me-7f3a");
    let pubkey = PublicKey::from_base58(body["pubkey"].as_str().unwrap_or_default())?;
    assert_eq!(pubkey, keypair.public_key());
    let signature = Signature::from_base64(body["signature"].as_str().unwrap_or_default())?;
    pubkey.verify(b"sign-me-7f3a", &signature)?;
    Ok(())
}

#[tokio::test]
async fn test_token_rejection_message_surfaces() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_string("challenge"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "bad pubkey"})),
        )
        .mount(&server)
        .await;

    let registry = registry_for(&server);
    let err = registry
        .token(&registry_core::Keypair::generate())
        .await
        .unwrap_err();

    match err {
        ClientError::Resource(ResourceError::Server { message, status, .. }) => {
            assert_eq!(message, "bad pubkey");
            assert_eq!(status, Some(401));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_add_record_matches_golden_vector() -> anyhow::Result<()> {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/registry/record"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"_id": "rec-42", "created": true})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let registry = registry_for(&server);
    let vector = &all_vectors()[2];
    let keypair = registry_core::Keypair::from_seed(&vector.seed);
    let record = Record::from_value(serde_json::from_str(vector.record)?)?;

    let id = registry.add_record(&record, &keypair).await?;
    assert_eq!(id, "rec-42");

    let body = posted_body(&server, "/registry/record").await;
    assert_eq!(body["issuer"], vector.expected_issuer);
    assert_eq!(body["hash"], vector.expected_hash);
    assert_eq!(body["signature"], vector.expected_signature);
    assert_eq!(body["title"], "Guitar");
    Ok(())
}

#[tokio::test]
async fn test_avatar_query_reaches_node() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/registry/record/_search"))
        .and(query_param("size", "1"))
        .and(query_param("_source", "pictures.src"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_response(&[(
            "r1",
            json!({"pictures": [{"src": "data:image/png;base64,AAAA"}]}),
        )])))
        .expect(1)
        .mount(&server)
        .await;

    let registry = registry_for(&server);
    let body = registry
        .record()
        .avatar
        .call(&params_from(json!({"issuer": "PUB", "category": "avatar"})))
        .await?;
    assert_eq!(body["hits"]["hits"][0]["_id"], "r1");

    let requests = server.received_requests().await.unwrap_or_default();
    let query = requests[0].url.query().unwrap_or_default().to_string();
    assert!(query.starts_with("q=issuer:PUB+category:avatar"), "{query}");
    Ok(())
}

#[tokio::test]
async fn test_unreachable_node_is_unknown_error() {
    let registry = Registry::with_parts(
        "127.0.0.1:1",
        &RegistryConfig::default(),
        Arc::new(ReqwestTransport::new()),
        Arc::new(Ed25519Sha256),
    );

    let err = registry.categories().await.unwrap_err();
    assert!(matches!(err, ClientError::Resource(ResourceError::Unknown)));
    assert_eq!(err.to_string(), registry_http::UNKNOWN_ERROR);
}
