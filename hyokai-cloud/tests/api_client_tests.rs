use hyokai_cloud::{CloudConfig, CloudError, HttpRemoteStore, RemoteStore};
use hyokai_types::Preferences;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn token_body(access: &str) -> serde_json::Value {
    json!({
        "access_token": access,
        "refresh_token": "refresh-1",
        "user": { "id": "user-1", "email": "dev@hyokai.app" }
    })
}

async fn client(server: &MockServer) -> HttpRemoteStore {
    let store = HttpRemoteStore::new(CloudConfig::with_base_url(server.uri()));
    store
        .set_tokens(
            "access-1".to_string(),
            "refresh-1".to_string(),
            "user-1".to_string(),
        )
        .await;
    store
}

#[tokio::test]
async fn authenticate_stores_tokens() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("access-1")))
        .expect(1)
        .mount(&server)
        .await;

    let store = HttpRemoteStore::new(CloudConfig::with_base_url(server.uri()));
    assert!(!store.is_authenticated().await);

    let tokens = store.authenticate("dev@hyokai.app", "hunter2").await.unwrap();
    assert_eq!(tokens.user_id, "user-1");
    assert!(store.is_authenticated().await);
    assert_eq!(store.user_id().await.as_deref(), Some("user-1"));
}

#[tokio::test]
async fn failed_login_maps_to_auth_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let store = HttpRemoteStore::new(CloudConfig::with_base_url(server.uri()));
    let err = store.authenticate("dev@hyokai.app", "wrong").await.unwrap_err();
    assert!(matches!(err, CloudError::AuthFailed(_)));
    assert!(!store.is_authenticated().await);
}

#[tokio::test]
async fn upsert_sends_bearer_and_json() {
    let server = MockServer::start().await;
    let prefs = Preferences {
        language: Some("en".to_string()),
        ..Preferences::default()
    };
    Mock::given(method("PUT"))
        .and(path("/api/user/preferences"))
        .and(header("authorization", "Bearer access-1"))
        .and(body_json(&prefs))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let store = client(&server).await;
    store.upsert_preferences(&prefs).await.unwrap();
}

#[tokio::test]
async fn expired_token_is_refreshed_and_request_retried() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/user/preferences"))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("access-2")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/user/preferences"))
        .and(header("authorization", "Bearer access-2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let store = client(&server).await;
    store.upsert_preferences(&Preferences::default()).await.unwrap();
}

#[tokio::test]
async fn rejected_refresh_surfaces_auth_failure() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/user/preferences"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let store = client(&server).await;
    let err = store.upsert_preferences(&Preferences::default()).await.unwrap_err();
    assert!(matches!(err, CloudError::AuthFailed(_)));
}

#[tokio::test]
async fn gateway_errors_classify_as_transient() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/user/history"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let store = client(&server).await;
    let err = store.upsert_history(&[]).await.unwrap_err();
    assert!(matches!(err, CloudError::Status { code: 503, .. }));
    assert!(err.is_transient());
    assert!(!err.is_rate_limited());
}

#[tokio::test]
async fn rate_limiting_is_distinguishable() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/user/repos"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let store = client(&server).await;
    let err = store.upsert_repo_cache(&[]).await.unwrap_err();
    assert!(err.is_rate_limited());
    assert!(err.is_transient());
}

#[tokio::test]
async fn migrated_at_roundtrips_through_account_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user/account"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "migrated_at": "2026-08-01T12:00:00Z" })),
        )
        .mount(&server)
        .await;

    let store = client(&server).await;
    let at = store.migrated_at().await.unwrap().unwrap();
    assert_eq!(at.to_rfc3339(), "2026-08-01T12:00:00+00:00");
}

#[tokio::test]
async fn unmigrated_account_reads_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user/account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "migrated_at": null })))
        .mount(&server)
        .await;

    let store = client(&server).await;
    assert_eq!(store.migrated_at().await.unwrap(), None);
}

#[tokio::test]
async fn mark_migrated_returns_the_flag_timestamp() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/user/account/migrated"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "migrated_at": "2026-08-01T12:00:00Z" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = client(&server).await;
    let at = store.mark_migrated().await.unwrap();
    assert_eq!(at.to_rfc3339(), "2026-08-01T12:00:00+00:00");
}

#[tokio::test]
async fn requests_without_tokens_fail_before_http() {
    let server = MockServer::start().await;
    let store = HttpRemoteStore::new(CloudConfig::with_base_url(server.uri()));

    let err = store.upsert_preferences(&Preferences::default()).await.unwrap_err();
    assert!(matches!(err, CloudError::AuthRequired));
    assert_eq!(server.received_requests().await.unwrap().len(), 0);
}
