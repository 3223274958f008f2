//! End-to-end tests that run the full router against a real listener on an
//! ephemeral port and drive it over HTTP.

use api_lib::{
    adapters::{InMemoryStore, LocalFileStore, StubAnalysisAdapter},
    config::Config,
    web::{app_router, state::AppState, token::TokenIssuer},
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::Level;

async fn start_server(tmp: &tempfile::TempDir) -> String {
    let config = Arc::new(Config {
        bind_address: "127.0.0.1:0".parse().unwrap(),
        log_level: Level::INFO,
        token_secret: "test-secret".to_string(),
        token_ttl_days: 30,
        upload_dir: tmp.path().to_path_buf(),
        max_upload_bytes: 10 * 1024 * 1024,
        cors_origin: "http://localhost:3000".to_string(),
    });

    let app_state = Arc::new(AppState {
        store: Arc::new(InMemoryStore::new()),
        files: Arc::new(LocalFileStore::new(config.upload_dir.clone())),
        analysis: Arc::new(StubAnalysisAdapter::new()),
        tokens: TokenIssuer::new(&config.token_secret, config.token_ttl_days),
        config,
    });

    let app = app_router(app_state).expect("build router");
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind 127.0.0.1:0");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server task error: {e:?}");
        }
    });
    format!("http://{}", addr)
}

async fn register_and_login(
    client: &reqwest::Client,
    base: &str,
    name: &str,
    email: &str,
    secret: &str,
) -> String {
    let res = client
        .post(format!("{base}/api/auth/register"))
        .json(&json!({"name": name, "email": email, "secret": secret}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 201);

    let res = client
        .post(format!("{base}/api/auth/login"))
        .json(&json!({"email": email, "secret": secret}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    body["token"].as_str().unwrap().to_string()
}

async fn upload_file(
    client: &reqwest::Client,
    base: &str,
    token: &str,
    file_name: &str,
) -> String {
    let part = reqwest::multipart::Part::bytes(b"fake contract body".to_vec())
        .file_name(file_name.to_string());
    let form = reqwest::multipart::Form::new().part("file", part);
    let res = client
        .post(format!("{base}/api/contracts/upload"))
        .bearer_auth(token)
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 201);
    let body: Value = res.json().await.unwrap();
    body["contractId"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn end_to_end_contract_lifecycle() {
    let tmp = tempfile::tempdir().unwrap();
    let base = start_server(&tmp).await;
    let client = reqwest::Client::new();

    // Register Alice and log in.
    let token = register_and_login(&client, &base, "Alice", "a@x.com", "secret1").await;

    // Upload a contract; it starts out Pending.
    let contract_id = upload_file(&client, &base, &token, "msa.pdf").await;
    let res = client
        .get(format!("{base}/api/contracts"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let listed: Value = res.json().await.unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["fileName"], "msa.pdf");
    assert_eq!(listed[0]["status"], "Pending");

    // No review exists yet.
    let res = client
        .get(format!("{base}/api/contracts/{contract_id}/review"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    // Generate the review; the contract becomes Analyzed with a score.
    let res = client
        .post(format!("{base}/api/contracts/{contract_id}/review"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let review: Value = res.json().await.unwrap();
    let score = review["riskScore"].as_u64().unwrap();
    assert!(score <= 100);
    assert!(!review["issues"].as_array().unwrap().is_empty());

    let res = client
        .get(format!("{base}/api/contracts"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let listed: Value = res.json().await.unwrap();
    assert_eq!(listed[0]["status"], "Analyzed");
    assert_eq!(listed[0]["riskScore"].as_u64().unwrap(), score);

    // The stored review is readable afterwards.
    let res = client
        .get(format!("{base}/api/contracts/{contract_id}/review"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    // Delete the contract: the list empties and the review is gone with it.
    let res = client
        .delete(format!("{base}/api/contracts/{contract_id}"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let res = client
        .get(format!("{base}/api/contracts"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let listed: Value = res.json().await.unwrap();
    assert!(listed.as_array().unwrap().is_empty());

    let res = client
        .get(format!("{base}/api/contracts/{contract_id}/review"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    // Deleting again stays a 200 no-op.
    let res = client
        .delete(format!("{base}/api/contracts/{contract_id}"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
}

#[tokio::test]
async fn protected_routes_require_a_valid_token() {
    let tmp = tempfile::tempdir().unwrap();
    let base = start_server(&tmp).await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{base}/api/contracts"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 401);
    let body: Value = res.json().await.unwrap();
    assert!(body["error"].is_string());

    let res = client
        .get(format!("{base}/api/contracts"))
        .bearer_auth("not-a-real-token")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 401);
}

#[tokio::test]
async fn bad_registration_and_login_are_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let base = start_server(&tmp).await;
    let client = reqwest::Client::new();

    // Empty field -> 400 with an error body.
    let res = client
        .post(format!("{base}/api/auth/register"))
        .json(&json!({"name": "", "email": "a@x.com", "secret": "s"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert!(body["error"].is_string());

    // Wrong secret for an existing account -> 401, never a token.
    register_and_login(&client, &base, "Alice", "a@x.com", "secret1").await;
    let res = client
        .post(format!("{base}/api/auth/login"))
        .json(&json!({"email": "a@x.com", "secret": "wrong"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 401);
    let body: Value = res.json().await.unwrap();
    assert!(body.get("token").is_none());

    // Re-registering the same email is rejected.
    let res = client
        .post(format!("{base}/api/auth/register"))
        .json(&json!({"name": "Alicia", "email": "a@x.com", "secret": "s2"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
}

#[tokio::test]
async fn upload_without_a_file_part_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let base = start_server(&tmp).await;
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &base, "Alice", "a@x.com", "s1").await;

    let form = reqwest::multipart::Form::new().text("note", "no file here");
    let res = client
        .post(format!("{base}/api/contracts/upload"))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn contracts_are_isolated_between_users() {
    let tmp = tempfile::tempdir().unwrap();
    let base = start_server(&tmp).await;
    let client = reqwest::Client::new();

    let alice = register_and_login(&client, &base, "Alice", "a@x.com", "s1").await;
    let bob = register_and_login(&client, &base, "Bob", "b@x.com", "s2").await;

    let alice_contract = upload_file(&client, &base, &alice, "msa.pdf").await;
    upload_file(&client, &base, &bob, "nda.pdf").await;

    // Each caller only ever sees their own uploads.
    let res = client
        .get(format!("{base}/api/contracts"))
        .bearer_auth(&alice)
        .send()
        .await
        .unwrap();
    let listed: Value = res.json().await.unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["fileName"], "msa.pdf");

    // Bob cannot generate or read a review on Alice's contract.
    let res = client
        .post(format!("{base}/api/contracts/{alice_contract}/review"))
        .bearer_auth(&bob)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    // Bob deleting Alice's contract is a harmless no-op.
    let res = client
        .delete(format!("{base}/api/contracts/{alice_contract}"))
        .bearer_auth(&bob)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let res = client
        .get(format!("{base}/api/contracts"))
        .bearer_auth(&alice)
        .send()
        .await
        .unwrap();
    let listed: Value = res.json().await.unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);
}
