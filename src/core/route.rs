//! # Routes
//!
//! The three screens the client can show, addressed by the same paths the
//! web client used. Navigation never happens inside a handler: the reducer
//! returns `Effect::Navigate(route)` and the adapter applies it.

/// A client-side navigation target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Route {
    #[default]
    Landing,
    AuthCompletion,
    Chat,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::AuthCompletion => "/auth/success",
            Route::Chat => "/chat",
        }
    }

    /// Resolves a path (query string ignored). Unknown paths are `None`.
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or("");
        match path.trim_end_matches('/') {
            "" => Some(Route::Landing),
            "/auth/success" => Some(Route::AuthCompletion),
            "/chat" => Some(Route::Chat),
            _ => None,
        }
    }
}
