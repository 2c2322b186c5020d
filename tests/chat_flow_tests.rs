//! End-to-end flows through the dispatcher against a mock API server.

use std::sync::Arc;

use mathnarrator::api::HttpBackend;
use mathnarrator::core::action::Action;
use mathnarrator::core::dispatch::Dispatcher;
use mathnarrator::core::identity::{GUEST_NAME, UserIdentity};
use mathnarrator::core::message::{NETWORK_ERROR_NOTICE, REPLY_FALLBACK, Role};
use mathnarrator::core::route::Route;
use mathnarrator::core::session::{MemorySessionStore, SessionStore};
use mathnarrator::core::state::App;
use serde_json::json;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

// ============================================================================
// Helper Functions
// ============================================================================

fn setup(
    base_url: &str,
    store: Arc<MemorySessionStore>,
) -> (Dispatcher, UnboundedReceiver<Action>, App) {
    let (tx, rx) = mpsc::unbounded_channel();
    let dispatcher = Dispatcher::new(store, Arc::new(HttpBackend::new(base_url)), tx);
    let app = App::new(format!("{base_url}/auth/login"));
    (dispatcher, rx, app)
}

/// Feeds the next background result back into the app.
async fn pump(dispatcher: &Dispatcher, rx: &mut UnboundedReceiver<Action>, app: &mut App) {
    let action = rx.recv().await.expect("background task dropped its sender");
    dispatcher.dispatch(app, action);
}

async fn mount_reply(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// ============================================================================
// Flows
// ============================================================================

#[tokio::test]
async fn test_sign_in_then_chat_as_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/me"))
        .and(header("authorization", "Bearer abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(header("authorization", "Bearer abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "reply": "81" })))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    let (dispatcher, mut rx, mut app) = setup(&server.uri(), store.clone());

    dispatcher.dispatch(&mut app, Action::SignIn);
    dispatcher.dispatch(
        &mut app,
        Action::CallbackReceived("http://localhost:3000/auth/success?token=abc123".to_string()),
    );
    assert_eq!(app.route, Route::Chat);
    assert_eq!(store.get().as_deref(), Some("abc123"));

    pump(&dispatcher, &mut rx, &mut app).await;
    let identity = app.identity.clone().unwrap();
    assert_eq!(identity.name, "Ada Lovelace");
    assert!(!identity.guest);

    dispatcher.dispatch(&mut app, Action::Submit("square of 9".to_string()));
    assert!(app.is_loading);
    pump(&dispatcher, &mut rx, &mut app).await;

    assert!(!app.is_loading);
    let items = app.transcript.items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].role, Role::User);
    assert_eq!(items[1].text, "81");
}

#[tokio::test]
async fn test_rejected_token_falls_back_to_guest() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "expired" })))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::with_token("stale"));
    let (dispatcher, mut rx, mut app) = setup(&server.uri(), store.clone());

    dispatcher.dispatch(&mut app, Action::QuickChat);
    pump(&dispatcher, &mut rx, &mut app).await;

    assert_eq!(app.identity, Some(UserIdentity::guest()));
    assert_eq!(app.identity.as_ref().unwrap().name, GUEST_NAME);
    // The token is kept; only logout removes it
    assert_eq!(store.get().as_deref(), Some("stale"));
}

#[tokio::test]
async fn test_missing_reply_shows_fallback() {
    let server = MockServer::start().await;
    mount_reply(&server, json!({ "other": 1 })).await;

    let (dispatcher, mut rx, mut app) = setup(&server.uri(), Arc::new(MemorySessionStore::new()));
    dispatcher.dispatch(&mut app, Action::QuickChat);
    pump(&dispatcher, &mut rx, &mut app).await;

    dispatcher.dispatch(&mut app, Action::Submit("hello".to_string()));
    pump(&dispatcher, &mut rx, &mut app).await;

    assert_eq!(app.transcript.last().unwrap().text, REPLY_FALLBACK);
    assert!(!app.is_loading);
}

#[tokio::test]
async fn test_empty_reply_shows_fallback() {
    let server = MockServer::start().await;
    mount_reply(&server, json!({ "reply": "" })).await;

    let (dispatcher, mut rx, mut app) = setup(&server.uri(), Arc::new(MemorySessionStore::new()));
    dispatcher.dispatch(&mut app, Action::QuickChat);
    pump(&dispatcher, &mut rx, &mut app).await;

    dispatcher.dispatch(&mut app, Action::Submit("hello".to_string()));
    pump(&dispatcher, &mut rx, &mut app).await;

    assert_eq!(app.transcript.last().unwrap().text, REPLY_FALLBACK);
}

#[tokio::test]
async fn test_json_error_body_shows_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "expired" })))
        .mount(&server)
        .await;

    let (dispatcher, mut rx, mut app) = setup(&server.uri(), Arc::new(MemorySessionStore::new()));
    dispatcher.dispatch(&mut app, Action::QuickChat);
    pump(&dispatcher, &mut rx, &mut app).await;

    dispatcher.dispatch(&mut app, Action::Submit("hello".to_string()));
    pump(&dispatcher, &mut rx, &mut app).await;

    assert_eq!(app.transcript.last().unwrap().text, REPLY_FALLBACK);
}

#[tokio::test]
async fn test_html_error_page_shows_network_notice() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string("<html>Internal Server Error</html>"),
        )
        .mount(&server)
        .await;

    let (dispatcher, mut rx, mut app) = setup(&server.uri(), Arc::new(MemorySessionStore::new()));
    dispatcher.dispatch(&mut app, Action::QuickChat);
    pump(&dispatcher, &mut rx, &mut app).await;

    dispatcher.dispatch(&mut app, Action::Submit("hello".to_string()));
    pump(&dispatcher, &mut rx, &mut app).await;

    let items = app.transcript.items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].role, Role::Assistant);
    assert_eq!(items[1].text, NETWORK_ERROR_NOTICE);
    assert!(!app.is_loading);
}

#[tokio::test]
async fn test_unreachable_server_shows_network_notice() {
    let (dispatcher, mut rx, mut app) =
        setup("http://127.0.0.1:1", Arc::new(MemorySessionStore::new()));
    dispatcher.dispatch(&mut app, Action::QuickChat);
    pump(&dispatcher, &mut rx, &mut app).await;

    dispatcher.dispatch(&mut app, Action::Submit("hello".to_string()));
    pump(&dispatcher, &mut rx, &mut app).await;

    let items = app.transcript.items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].text, "hello");
    assert_eq!(items[1].role, Role::Assistant);
    assert_eq!(items[1].text, NETWORK_ERROR_NOTICE);
    assert!(!app.is_loading);
}

#[tokio::test]
async fn test_second_submit_while_pending_is_ignored() {
    let server = MockServer::start().await;
    mount_reply(&server, json!({ "reply": "first" })).await;

    let (dispatcher, mut rx, mut app) = setup(&server.uri(), Arc::new(MemorySessionStore::new()));
    dispatcher.dispatch(&mut app, Action::QuickChat);
    pump(&dispatcher, &mut rx, &mut app).await;

    dispatcher.dispatch(&mut app, Action::Submit("one".to_string()));
    dispatcher.dispatch(&mut app, Action::Submit("two".to_string()));
    pump(&dispatcher, &mut rx, &mut app).await;

    let texts: Vec<&str> = app.transcript.items().iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, vec!["one", "first"]);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_logout_then_guest_chat_sends_no_token() {
    let server = MockServer::start().await;
    mount_reply(&server, json!({ "reply": "ok" })).await;

    let store = Arc::new(MemorySessionStore::with_token("abc"));
    let (dispatcher, mut rx, mut app) = setup(&server.uri(), store.clone());

    dispatcher.dispatch(&mut app, Action::QuickChat);
    dispatcher.dispatch(&mut app, Action::Logout);
    assert_eq!(app.route, Route::Landing);
    assert!(store.get().is_none());

    // Identity lookup from the first visit may still arrive; it is stale now
    dispatcher.dispatch(&mut app, Action::QuickChat);
    while app.identity.is_none() {
        pump(&dispatcher, &mut rx, &mut app).await;
    }
    assert_eq!(app.identity, Some(UserIdentity::guest()));

    dispatcher.dispatch(&mut app, Action::Submit("hi".to_string()));
    pump(&dispatcher, &mut rx, &mut app).await;

    let requests = server.received_requests().await.unwrap();
    let chat: Vec<_> = requests.iter().filter(|r| r.url.path() == "/api/chat").collect();
    assert_eq!(chat.len(), 1);
    assert!(chat[0].headers.get("authorization").is_none());
}
