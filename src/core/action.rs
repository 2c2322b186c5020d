//! # Actions
//!
//! Everything that can happen in the client becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! The API answers? That's `Action::ReplyReceived { .. }`.
//!
//! `update()` takes the current state and an action, mutates the state and
//! returns an `Effect` describing the side effect to run next (navigate,
//! spawn a request, touch the session store). No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info};

use crate::api::{ApiError, ChatReply};
use crate::core::identity::UserIdentity;
use crate::core::message::{NETWORK_ERROR_NOTICE, REPLY_FALLBACK};
use crate::core::route::Route;
use crate::core::session::AuthCompletion;
use crate::core::state::App;

#[derive(Debug)]
pub enum Action {
    /// A navigation has been applied; the new screen should initialise.
    Navigated(Route),
    /// "Sign in" on the landing screen.
    SignIn,
    /// "Quick chat" on the landing screen.
    QuickChat,
    /// The user handed over the location the authorization server redirected to.
    CallbackReceived(String),
    AuthCompleted(AuthCompletion),
    IdentityResolved {
        view_id: u64,
        identity: UserIdentity,
    },
    Submit(String),
    ReplyReceived {
        view_id: u64,
        result: Result<ChatReply, ApiError>,
    },
    NewChat,
    Logout,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    Navigate(Route),
    ResolveIdentity { view_id: u64 },
    SpawnChatRequest { query: String, view_id: u64 },
    CompleteAuth(String),
    EndSession,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Quit => Effect::Quit,

        Action::Navigated(route) => {
            info!("Navigated to {}", route.path());
            app.route = route;
            match route {
                Route::Chat => {
                    // Every visit is a fresh chat view
                    app.view_id += 1;
                    app.transcript.clear();
                    app.identity = None;
                    app.is_loading = false;
                    app.status_message = String::from("Connecting...");
                    Effect::ResolveIdentity {
                        view_id: app.view_id,
                    }
                }
                Route::AuthCompletion => {
                    app.status_message = String::from(
                        "Sign in in your browser, then paste the address you land on",
                    );
                    Effect::None
                }
                Route::Landing => {
                    app.transcript.clear();
                    app.identity = None;
                    app.is_loading = false;
                    app.status_message = app
                        .landing_notice
                        .take()
                        .unwrap_or_else(|| String::from("Welcome to FormulaVerse!"));
                    Effect::None
                }
            }
        }

        Action::SignIn if app.route == Route::Landing => {
            info!("Starting sign-in via {}", app.login_url);
            Effect::Navigate(Route::AuthCompletion)
        }

        Action::QuickChat if app.route == Route::Landing => Effect::Navigate(Route::Chat),

        Action::CallbackReceived(location) if app.route == Route::AuthCompletion => {
            Effect::CompleteAuth(location)
        }

        Action::AuthCompleted(outcome) => {
            debug!("Auth completion shown as {}", outcome.visible_location);
            if outcome.route == Route::Landing {
                // Shown once the landing screen has been entered
                app.landing_notice = Some(String::from("No token found in that address"));
            }
            Effect::Navigate(outcome.route)
        }

        Action::IdentityResolved { view_id, identity } => {
            if view_id != app.view_id || app.route != Route::Chat {
                debug!("Dropping identity for stale view {}", view_id);
                return Effect::None;
            }
            app.status_message = if identity.guest {
                String::from("Guest mode")
            } else {
                format!("Signed in as {}", identity.name)
            };
            app.identity = Some(identity);
            Effect::None
        }

        Action::Submit(text) => {
            if app.route != Route::Chat {
                return Effect::None;
            }
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Effect::None;
            }
            if app.is_loading {
                debug!("Submit ignored: a reply is still pending");
                return Effect::None;
            }

            app.transcript.push_user(trimmed);
            app.is_loading = true;
            app.status_message = String::from("Thinking...");
            Effect::SpawnChatRequest {
                query: trimmed.to_string(),
                view_id: app.view_id,
            }
        }

        Action::ReplyReceived { view_id, result } => {
            if view_id != app.view_id {
                debug!("Dropping reply for stale view {}", view_id);
                return Effect::None;
            }
            app.is_loading = false;

            let text = match result {
                Ok(reply) => {
                    app.status_message = String::from("Ready");
                    reply
                        .reply
                        .filter(|r| !r.is_empty())
                        .unwrap_or_else(|| REPLY_FALLBACK.to_string())
                }
                // The server answered, just not with a reply
                Err(ApiError::Api { status, .. }) => {
                    app.status_message = format!("Server returned HTTP {status}");
                    REPLY_FALLBACK.to_string()
                }
                Err(e) => {
                    info!("Chat request failed: {}", e);
                    app.status_message = String::from("Network error");
                    NETWORK_ERROR_NOTICE.to_string()
                }
            };
            app.transcript.push_assistant(text);
            Effect::None
        }

        Action::NewChat if app.route == Route::Chat => {
            app.transcript.clear();
            app.status_message = String::from("New chat");
            Effect::None
        }

        Action::Logout => Effect::EndSession,

        // Landing/auth actions arriving on the wrong screen
        Action::SignIn | Action::QuickChat | Action::CallbackReceived(_) | Action::NewChat => {
            Effect::None
        }
    }
}
