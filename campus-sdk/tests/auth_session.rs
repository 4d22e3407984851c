//! Login, logout, session persistence, and token-rejection handling
//! against a mock backend.

mod common;

use httpmock::prelude::*;
use serde_json::json;

use campus::errors::{AuthError, Error, RequestError};
use campus::{Router, Screen, SessionStore, StatusCode, View};
use campus::views::{AttendanceView, StudentsView};

use common::{admin_profile, gateway_for, signed_in, viewer_profile};

#[tokio::test]
async fn login_stores_the_session_and_unlocks_navigation() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/auth/login")
                .json_body(json!({"username": "admin", "password": "admin123"}));
            then.status(200).json_body(json!({
                "token": "tok-abc",
                "user": {
                    "id": 1,
                    "username": "admin",
                    "email": "admin@school.edu",
                    "role": "admin",
                    "permissions": ["admin", "view_data", "view_analytics"]
                }
            }));
        })
        .await;

    let store = SessionStore::new();
    let gateway = gateway_for(&server, store.clone());
    let user = gateway.login("admin", "admin123").await.unwrap();
    mock.assert_async().await;

    assert_eq!(user.username, "admin");
    assert!(store.is_authenticated());
    assert!(store.is_admin());
    assert_eq!(store.token().as_deref(), Some("tok-abc"));

    let router = Router::new(store);
    assert_eq!(router.screen(), Screen::View(View::Dashboard));
    assert!(router.available_views().contains(&View::Users));
}

#[tokio::test]
async fn failed_login_surfaces_the_server_message_and_stores_nothing() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/auth/login");
            then.status(401).json_body(json!({"message": "Invalid credentials"}));
        })
        .await;

    let store = SessionStore::new();
    let gateway = gateway_for(&server, store.clone());
    let err = gateway.login("admin", "wrong").await.unwrap_err();

    // A 401 with no session held is a plain server error, not an expiry.
    match err {
        Error::Request(RequestError::Server { status, message }) => {
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn rejected_token_clears_the_session_and_forces_login() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/students")
                .header("authorization", "Bearer tok-123");
            then.status(401).json_body(json!({"message": "Token is invalid"}));
        })
        .await;

    let store = signed_in(viewer_profile());
    let gateway = gateway_for(&server, store.clone());
    let router = Router::new(store.clone());
    assert_eq!(router.screen(), Screen::View(View::Dashboard));

    // A background read swallows the error but the interceptor still fires.
    let mut view = StudentsView::open(&gateway).unwrap();
    view.refresh().await;

    assert!(!store.is_authenticated());
    assert_eq!(router.screen(), Screen::Login);
}

#[tokio::test]
async fn rejected_token_on_a_mutation_returns_session_expired() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/attendance");
            then.status(401).json_body(json!({"message": "Token has expired"}));
        })
        .await;

    let store = signed_in(admin_profile());
    let gateway = gateway_for(&server, store.clone());
    let mut view = AttendanceView::open(&gateway).unwrap();
    view.select_student(Some(1)).await;
    view.form_mut().subject = "Physics".to_string();

    let err = view.mark().await.unwrap_err();
    assert!(matches!(err, Error::Authentication(AuthError::SessionExpired)));
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn requests_without_a_session_carry_no_bearer_header() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/auth/login")
                .matches(|req| {
                    !req.headers
                        .iter()
                        .flatten()
                        .any(|(name, _)| name.eq_ignore_ascii_case("authorization"))
                });
            then.status(200).json_body(json!({
                "token": "t",
                "user": {
                    "id": 3,
                    "username": "viewer",
                    "email": "viewer@school.edu",
                    "role": "viewer",
                    "permissions": ["view_data"]
                }
            }));
        })
        .await;

    let gateway = gateway_for(&server, SessionStore::new());
    gateway.login("viewer", "viewer123").await.unwrap();
    mock.assert_async().await;
}

#[test]
fn session_survives_a_restart_through_the_backing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    {
        let store = SessionStore::with_file(&path);
        assert!(!store.is_authenticated());
        store
            .set_session("tok-persist".to_string(), admin_profile())
            .unwrap();
    }

    let restored = SessionStore::with_file(&path);
    assert!(restored.is_authenticated());
    assert_eq!(restored.token().as_deref(), Some("tok-persist"));
    assert_eq!(restored.user().unwrap().username, "admin");

    restored.clear();
    assert!(!path.exists());
    let after_logout = SessionStore::with_file(&path);
    assert!(!after_logout.is_authenticated());
}

#[test]
fn malformed_session_file_is_treated_as_signed_out() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "not json").unwrap();

    let store = SessionStore::with_file(&path);
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn logout_clears_the_shared_store_for_every_consumer() {
    let server = MockServer::start_async().await;
    let store = signed_in(admin_profile());
    let gateway = gateway_for(&server, store.clone());
    let router = Router::new(store.clone());

    gateway.logout();
    assert!(!store.is_authenticated());
    assert_eq!(router.screen(), Screen::Login);
    assert!(router.available_views().is_empty());
}
