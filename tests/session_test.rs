use httpmock::prelude::*;
use tempfile::TempDir;
use turfbook::{ApiClient, AppStore, LocalStorage, SessionFlow, TurfbookError};

fn user_json() -> serde_json::Value {
    serde_json::json!({
        "_id": "u1",
        "name": "Test User",
        "email": "test@example.com",
        "phone": "9999999999"
    })
}

fn storage_in(dir: &TempDir) -> LocalStorage {
    LocalStorage::new(dir.path().to_str().unwrap().to_string())
}

#[tokio::test]
async fn login_persists_token_and_profile() {
    let dir = TempDir::new().unwrap();
    let server = MockServer::start();
    let login_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/users/login")
            .json_body_partial(r#"{"email": "test@example.com", "password": "hunter2"}"#);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"token": "tok-123", "user": user_json()}));
    });

    let api = ApiClient::new(server.base_url());
    let store = AppStore::new();
    let storage = storage_in(&dir);
    let session = SessionFlow::new(&api, &store, &storage);

    let user = session.login("test@example.com", "hunter2").await.unwrap();
    login_mock.assert();
    assert_eq!(user.id, "u1");

    let state = store.state();
    assert!(state.session.authenticated);
    assert_eq!(state.session.token.as_deref(), Some("tok-123"));
    assert_eq!(state.session.user_id(), Some("u1"));

    // Both local-storage analogues land on disk.
    let token = std::fs::read_to_string(dir.path().join("token")).unwrap();
    assert_eq!(token, "tok-123");
    let profile = std::fs::read_to_string(dir.path().join("user.json")).unwrap();
    assert!(profile.contains("test@example.com"));
}

#[tokio::test]
async fn login_failure_surfaces_message_and_stays_signed_out() {
    let dir = TempDir::new().unwrap();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/users/login");
        then.status(400)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"message": "Invalid credentials"}));
    });

    let api = ApiClient::new(server.base_url());
    let store = AppStore::new();
    let storage = storage_in(&dir);
    let session = SessionFlow::new(&api, &store, &storage);

    let err = session.login("test@example.com", "wrong").await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid credentials");

    let state = store.state();
    assert!(!state.session.authenticated);
    assert_eq!(state.session.error.as_deref(), Some("Invalid credentials"));
    assert!(!dir.path().join("token").exists());
}

#[tokio::test]
async fn restored_session_sends_bearer_token() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("token"), "tok-456").unwrap();
    std::fs::write(dir.path().join("user.json"), user_json().to_string()).unwrap();

    let server = MockServer::start();
    let profile_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/users/profile")
            .header("authorization", "Bearer tok-456");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(user_json());
    });

    let api = ApiClient::new(server.base_url());
    let store = AppStore::new();
    let storage = storage_in(&dir);
    let session = SessionFlow::new(&api, &store, &storage);

    assert!(session.restore().await.unwrap());
    assert!(store.state().session.authenticated);

    session.fetch_profile().await.unwrap();
    profile_mock.assert();
}

#[tokio::test]
async fn restore_without_persisted_token_stays_signed_out() {
    let dir = TempDir::new().unwrap();
    let server = MockServer::start();

    let api = ApiClient::new(server.base_url());
    let store = AppStore::new();
    let storage = storage_in(&dir);
    let session = SessionFlow::new(&api, &store, &storage);

    assert!(!session.restore().await.unwrap());
    assert!(!store.state().session.authenticated);
}

#[tokio::test]
async fn expired_token_clears_the_persisted_session() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("token"), "stale-token").unwrap();
    std::fs::write(dir.path().join("user.json"), user_json().to_string()).unwrap();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/users/profile");
        then.status(401);
    });

    let api = ApiClient::new(server.base_url());
    let store = AppStore::new();
    let storage = storage_in(&dir);
    let session = SessionFlow::new(&api, &store, &storage);
    assert!(session.restore().await.unwrap());

    let err = session.fetch_profile().await.unwrap_err();
    assert!(matches!(err, TurfbookError::UnauthorizedError));

    // Token-expiry handling: files gone, state signed out.
    assert!(!dir.path().join("token").exists());
    assert!(!dir.path().join("user.json").exists());
    assert!(!store.state().session.authenticated);
}

#[tokio::test]
async fn logout_forgets_the_session() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("token"), "tok-789").unwrap();
    std::fs::write(dir.path().join("user.json"), user_json().to_string()).unwrap();

    let server = MockServer::start();
    let api = ApiClient::new(server.base_url());
    let store = AppStore::new();
    let storage = storage_in(&dir);
    let session = SessionFlow::new(&api, &store, &storage);
    assert!(session.restore().await.unwrap());

    session.logout().await;

    assert!(!dir.path().join("token").exists());
    assert!(!store.state().session.authenticated);
    assert!(store.state().session.user.is_none());
}

#[tokio::test]
async fn corrupt_profile_file_does_not_block_restore() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("token"), "tok-123").unwrap();
    std::fs::write(dir.path().join("user.json"), "not json at all").unwrap();

    let server = MockServer::start();
    let api = ApiClient::new(server.base_url());
    let store = AppStore::new();
    let storage = storage_in(&dir);
    let session = SessionFlow::new(&api, &store, &storage);

    assert!(session.restore().await.unwrap());
    let state = store.state();
    assert!(state.session.authenticated);
    assert!(state.session.user.is_none());
}
