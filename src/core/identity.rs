//! # Identity Bootstrap
//!
//! Works out who is chatting each time the chat screen opens. Without a
//! stored token the user is a guest. With one, the API is asked once; any
//! failure quietly falls back to guest.

use log::{info, warn};

use crate::api::{ChatBackend, Profile};
use crate::core::session::{SessionStore, redact};

pub const GUEST_NAME: &str = "Guest User";
pub const GUEST_AVATAR_URL: &str = "https://ui-avatars.com/api/?name=Guest&background=random";
/// Used when a signed-in profile has no picture.
pub const DEFAULT_AVATAR_URL: &str = "https://lh3.googleusercontent.com/a/default-user=s96-c";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub name: String,
    pub email: Option<String>,
    pub avatar_url: String,
    pub guest: bool,
}

impl UserIdentity {
    pub fn guest() -> Self {
        Self {
            name: GUEST_NAME.to_string(),
            email: None,
            avatar_url: GUEST_AVATAR_URL.to_string(),
            guest: true,
        }
    }

    pub fn from_profile(profile: Profile) -> Self {
        Self {
            name: profile.name,
            email: profile.email,
            avatar_url: profile
                .picture
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| DEFAULT_AVATAR_URL.to_string()),
            guest: false,
        }
    }
}

/// Resolves the active identity from the stored token.
pub async fn resolve(store: &dyn SessionStore, backend: &dyn ChatBackend) -> UserIdentity {
    let Some(token) = store.get() else {
        info!("No session token, continuing as guest");
        return UserIdentity::guest();
    };

    match backend.fetch_profile(&token).await {
        Ok(profile) => {
            info!("Resolved identity for token {}", redact(&token));
            UserIdentity::from_profile(profile)
        }
        Err(e) => {
            warn!("Identity lookup failed, falling back to guest: {}", e);
            UserIdentity::guest()
        }
    }
}
