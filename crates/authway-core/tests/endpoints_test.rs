//! Endpoint contracts against a mock server: typed results, holder side
//! effects, validation short-circuits, and lifecycle hooks.

use std::cell::Cell;
use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use authway_core::auth::ACCESS_TOKEN_KEY;
use authway_core::{AuthClient, CallHooks, ClientConfig, MemoryStore, TokenStore};

fn make_client(server: &MockServer, store: Arc<dyn TokenStore>) -> AuthClient {
    AuthClient::new(ClientConfig::new(server.uri()), store).expect("client should build")
}

fn user_json(id: &str, email: &str) -> serde_json::Value {
    json!({
        "id": id,
        "email": email,
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z"
    })
}

#[tokio::test]
async fn sign_in_email_yields_session_and_persists_token() {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryStore::new());

    Mock::given(method("POST"))
        .and(path("/api/auth/sign-in/email"))
        .and(body_json(json!({
            "email": "user@example.com",
            "password": "password123"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session": {
                "id": "s1",
                "token": "tok1",
                "expiresAt": "2099-01-01T00:00:00Z",
                "user": user_json("u1", "user@example.com")
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = make_client(&server, store.clone());
    let session = client
        .sign_in()
        .email("user@example.com", "password123")
        .await
        .unwrap();

    assert_eq!(session.id, "s1");
    assert_eq!(session.token, "tok1");
    assert_eq!(session.user.email, "user@example.com");
    assert_eq!(
        store.read(ACCESS_TOKEN_KEY).unwrap().as_deref(),
        Some("tok1")
    );
    assert_eq!(client.current_session().unwrap().id, "s1");
}

#[tokio::test]
async fn sign_in_validation_failure_never_touches_the_wire() {
    let server = MockServer::start().await;
    let client = make_client(&server, Arc::new(MemoryStore::new()));

    let err = client.sign_in().email("not-an-email", "").await.unwrap_err();
    assert_eq!(err.code, "validation_failed");
    let details = err.details.expect("validation details");
    assert!(details.contains_key("email"));
    assert!(details.contains_key("password"));

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn hooks_fire_request_then_error_never_success() {
    let server = MockServer::start().await;
    // No mock mounted: wiremock answers 404, exercising the error path
    let client = make_client(&server, Arc::new(MemoryStore::new()));

    let requests = Cell::new(0u32);
    let successes = Cell::new(0u32);
    let errors = Cell::new(0u32);
    let hooks = CallHooks::new()
        .on_request(|| requests.set(requests.get() + 1))
        .on_success(|| successes.set(successes.get() + 1))
        .on_error(|_| errors.set(errors.get() + 1));

    let result = client
        .sign_in()
        .email_with_hooks("user@example.com", "password123", &hooks)
        .await;
    assert!(result.is_err());
    assert_eq!(requests.get(), 1);
    assert_eq!(successes.get(), 0);
    assert_eq!(errors.get(), 1);
}

#[tokio::test]
async fn validation_failure_fires_on_error_hook() {
    let server = MockServer::start().await;
    let client = make_client(&server, Arc::new(MemoryStore::new()));

    let errors = Cell::new(0u32);
    let hooks = CallHooks::new().on_error(|e| {
        assert_eq!(e.code, "validation_failed");
        errors.set(errors.get() + 1);
    });

    client
        .sign_in()
        .email_with_hooks("not-an-email", "password123", &hooks)
        .await
        .unwrap_err();
    assert_eq!(errors.get(), 1);
}

#[tokio::test]
async fn hooks_fire_on_success_for_mocked_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/sign-in/otp"))
        .and(body_json(json!({ "email": "user@example.com", "otp": "123456" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "s-otp",
            "token": "tokO",
            "expiresAt": "2099-01-01T00:00:00Z",
            "user": user_json("u1", "user@example.com")
        })))
        .mount(&server)
        .await;

    let client = make_client(&server, Arc::new(MemoryStore::new()));

    let successes = Cell::new(0u32);
    let errors = Cell::new(0u32);
    let hooks = CallHooks::new()
        .on_success(|| successes.set(successes.get() + 1))
        .on_error(|_| errors.set(errors.get() + 1));

    let session = client
        .sign_in()
        .otp_with_hooks("user@example.com", "123456", &hooks)
        .await
        .unwrap();
    assert_eq!(session.id, "s-otp");
    assert_eq!(successes.get(), 1);
    assert_eq!(errors.get(), 0);
}

#[tokio::test]
async fn sign_up_returns_user_without_authenticating() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/sign-up/email"))
        .and(body_json(json!({
            "email": "new@example.com",
            "password": "password123",
            "name": "New User"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "user": user_json("u2", "new@example.com") })),
        )
        .mount(&server)
        .await;

    let client = make_client(&server, Arc::new(MemoryStore::new()));
    let user = client
        .sign_up()
        .email("new@example.com", "password123", Some("New User"))
        .await
        .unwrap();

    assert_eq!(user.id, "u2");
    // Registration alone does not populate the holder
    assert!(client.current_session().is_none());
}

#[tokio::test]
async fn sign_up_enforces_password_rules() {
    let server = MockServer::start().await;
    let client = make_client(&server, Arc::new(MemoryStore::new()));

    let err = client
        .sign_up()
        .email("new@example.com", "short", None)
        .await
        .unwrap_err();
    assert_eq!(err.code, "validation_failed");
    assert!(err.details.unwrap().contains_key("password"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_sessions_decodes_wrapper() {
    let server = MockServer::start().await;

    let session = |id: &str, current: bool| {
        json!({
            "id": id,
            "token": format!("tok-{id}"),
            "expiresAt": "2099-01-01T00:00:00Z",
            "ipAddress": "203.0.113.7",
            "userAgent": "demo/1.0",
            "isCurrent": current,
            "user": user_json("u1", "user@example.com")
        })
    };

    Mock::given(method("GET"))
        .and(path("/api/auth/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sessions": [session("s1", true), session("s2", false)]
        })))
        .mount(&server)
        .await;

    let client = make_client(&server, Arc::new(MemoryStore::new()));
    let sessions = client.session().list().await.unwrap();
    assert_eq!(sessions.len(), 2);
    assert!(sessions[0].is_current);
    assert!(!sessions[1].is_current);
    assert_eq!(sessions[1].ip_address.as_deref(), Some("203.0.113.7"));
}

#[tokio::test]
async fn list_sessions_decodes_bare_array() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "s1",
            "token": "tok-s1",
            "expiresAt": "2099-01-01T00:00:00Z",
            "user": user_json("u1", "user@example.com")
        }])))
        .mount(&server)
        .await;

    let client = make_client(&server, Arc::new(MemoryStore::new()));
    let sessions = client.session().list().await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].id, "s1");
}

#[tokio::test]
async fn revoke_session_posts_session_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/revoke-session"))
        .and(body_json(json!({ "sessionId": "s2" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = make_client(&server, Arc::new(MemoryStore::new()));
    client.session().revoke("s2").await.unwrap();
}

#[tokio::test]
async fn sign_out_clears_local_state() {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryStore::new());

    Mock::given(method("POST"))
        .and(path("/api/auth/sign-in/anonymous"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session": {
                "id": "s1",
                "token": "tok1",
                "expiresAt": "2099-01-01T00:00:00Z",
                "user": user_json("u1", "user@example.com")
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/sign-out"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = make_client(&server, store.clone());
    client.sign_in().anonymous().await.unwrap();
    assert!(client.current_session().is_some());
    assert!(store.exists(ACCESS_TOKEN_KEY).unwrap());

    client.session().sign_out().await.unwrap();
    assert!(client.current_session().is_none());
    assert_eq!(store.read(ACCESS_TOKEN_KEY).unwrap(), None);
}

#[tokio::test]
async fn sign_out_clears_locally_even_when_server_fails() {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryStore::new());
    store.write(ACCESS_TOKEN_KEY, "tok1").unwrap();

    Mock::given(method("POST"))
        .and(path("/api/auth/sign-out"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = make_client(&server, store.clone());
    let err = client.session().sign_out().await.unwrap_err();
    assert_eq!(err.code, "server_error");
    assert_eq!(store.read(ACCESS_TOKEN_KEY).unwrap(), None);
    assert!(client.current_session().is_none());
}

#[tokio::test]
async fn oauth_sign_in_returns_provider_url() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/oauth2/sign-in/github"))
        .and(query_param("callbackUrl", "myapp://callback"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "url": "https://github.com/login/oauth/authorize?x=1" })),
        )
        .mount(&server)
        .await;

    let client = make_client(&server, Arc::new(MemoryStore::new()));
    let url = client
        .oauth()
        .sign_in("github", "myapp://callback")
        .await
        .unwrap();
    assert!(url.starts_with("https://github.com/"));
}

#[tokio::test]
async fn oauth_callback_exchanges_token_for_session() {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryStore::new());

    Mock::given(method("POST"))
        .and(path("/api/auth/oauth2/callback"))
        .and(body_json(json!({ "token": "short-lived" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "s-oauth",
            "token": "tokG",
            "expiresAt": "2099-01-01T00:00:00Z",
            "user": user_json("u1", "user@example.com")
        })))
        .mount(&server)
        .await;

    let client = make_client(&server, store.clone());
    let session = client.oauth().callback("short-lived").await.unwrap();
    assert_eq!(session.id, "s-oauth");
    assert_eq!(client.current_session().unwrap().id, "s-oauth");
    assert_eq!(
        store.read(ACCESS_TOKEN_KEY).unwrap().as_deref(),
        Some("tokG")
    );
}

#[tokio::test]
async fn account_update_refreshes_held_session_user() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/sign-in/anonymous"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session": {
                "id": "s1",
                "token": "tok1",
                "expiresAt": "2099-01-01T00:00:00Z",
                "user": user_json("u1", "user@example.com")
            }
        })))
        .mount(&server)
        .await;

    let mut updated = user_json("u1", "user@example.com");
    updated["name"] = json!("Renamed");
    Mock::given(method("POST"))
        .and(path("/api/auth/account/update"))
        .and(body_json(json!({ "name": "Renamed" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user": updated })))
        .mount(&server)
        .await;

    let client = make_client(&server, Arc::new(MemoryStore::new()));
    client.sign_in().anonymous().await.unwrap();

    let user = client.account().update(Some("Renamed"), None).await.unwrap();
    assert_eq!(user.name.as_deref(), Some("Renamed"));
    assert_eq!(
        client.current_session().unwrap().user.name.as_deref(),
        Some("Renamed")
    );
}

#[tokio::test]
async fn change_password_sends_both_fields() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/account/change-password"))
        .and(body_json(json!({
            "newPassword": "newpassword1",
            "oldPassword": "password123"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = make_client(&server, Arc::new(MemoryStore::new()));
    client
        .account()
        .change_password("newpassword1", Some("password123"))
        .await
        .unwrap();
}

#[tokio::test]
async fn account_delete_clears_local_state() {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryStore::new());
    store.write(ACCESS_TOKEN_KEY, "tok1").unwrap();

    Mock::given(method("POST"))
        .and(path("/api/auth/account/delete"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = make_client(&server, store.clone());
    client.account().delete().await.unwrap();
    assert_eq!(store.read(ACCESS_TOKEN_KEY).unwrap(), None);
    assert!(client.current_session().is_none());
}

#[tokio::test]
async fn structured_error_body_passes_through() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/account/change-password"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "PASSWORD_TOO_WEAK",
            "message": "Password does not meet requirements",
            "details": { "newPassword": "too weak" }
        })))
        .mount(&server)
        .await;

    let client = make_client(&server, Arc::new(MemoryStore::new()));
    let err = client
        .account()
        .change_password("weak-but-long-enough", None)
        .await
        .unwrap_err();

    assert_eq!(err.code, "PASSWORD_TOO_WEAK");
    assert_eq!(err.message, "Password does not meet requirements");
    assert_eq!(
        err.details.unwrap().get("newPassword").map(String::as_str),
        Some("too weak")
    );
}

#[tokio::test]
async fn restore_session_discards_all_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/session"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = make_client(&server, Arc::new(MemoryStore::new()));
    assert!(client.restore_session().await.is_none());
    assert!(client.current_session().is_none());
}

#[tokio::test]
async fn restore_session_populates_holder_on_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session": {
                "id": "s1",
                "token": "tok1",
                "expiresAt": "2099-01-01T00:00:00Z",
                "user": user_json("u1", "user@example.com")
            }
        })))
        .mount(&server)
        .await;

    let client = make_client(&server, Arc::new(MemoryStore::new()));
    let session = client.restore_session().await.unwrap();
    assert_eq!(session.id, "s1");
    assert_eq!(client.current_session().unwrap().id, "s1");
}
