//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{ApiError, ChatBackend, ChatReply, Profile};
use crate::core::state::App;

#[derive(Default)]
struct Calls {
    profile: usize,
    chat: usize,
    last_token: Option<String>,
    last_query: Option<String>,
}

/// A backend with canned answers that records how it was called.
pub struct StubBackend {
    profile: Result<Profile, ApiError>,
    reply: Result<ChatReply, ApiError>,
    calls: Mutex<Calls>,
}

impl Default for StubBackend {
    fn default() -> Self {
        Self {
            profile: Err(ApiError::Network("stub has no profile".to_string())),
            reply: Ok(ChatReply::default()),
            calls: Mutex::new(Calls::default()),
        }
    }
}

impl StubBackend {
    pub fn with_profile(mut self, profile: Result<Profile, ApiError>) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_reply(mut self, reply: Result<ChatReply, ApiError>) -> Self {
        self.reply = reply;
        self
    }

    pub fn profile_calls(&self) -> usize {
        self.calls.lock().unwrap().profile
    }

    pub fn chat_calls(&self) -> usize {
        self.calls.lock().unwrap().chat
    }

    pub fn last_token(&self) -> Option<String> {
        self.calls.lock().unwrap().last_token.clone()
    }

    pub fn last_query(&self) -> Option<String> {
        self.calls.lock().unwrap().last_query.clone()
    }
}

#[async_trait]
impl ChatBackend for StubBackend {
    fn name(&self) -> &str {
        "stub"
    }

    async fn fetch_profile(&self, token: &str) -> Result<Profile, ApiError> {
        let mut calls = self.calls.lock().unwrap();
        calls.profile += 1;
        calls.last_token = Some(token.to_string());
        self.profile.clone()
    }

    async fn send_chat(&self, query: &str, token: Option<&str>) -> Result<ChatReply, ApiError> {
        let mut calls = self.calls.lock().unwrap();
        calls.chat += 1;
        calls.last_query = Some(query.to_string());
        calls.last_token = token.map(str::to_string);
        self.reply.clone()
    }
}

/// Creates a test App sitting on the chat screen.
pub fn test_app() -> App {
    let mut app = App::new("http://localhost:5000/auth/login".to_string());
    app.route = crate::core::route::Route::Chat;
    app
}
