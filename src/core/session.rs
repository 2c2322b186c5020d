//! # Session Token Storage
//!
//! The only state that outlives a run: one bearer token, stored under the
//! key `mathnarrator_token` in a small JSON key-value file
//! (`~/.mathnarrator/session.json` by default).
//!
//! Everything that touches the token goes through the `SessionStore` trait,
//! so auth completion and logout can be tested against `MemorySessionStore`.
//!
//! Writes use atomic rename (write `.tmp`, then `rename()`).

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{debug, info, warn};
use url::Url;

use crate::core::route::Route;

/// Name of the storage entry holding the bearer token.
pub const STORAGE_KEY: &str = "mathnarrator_token";

/// Query parameter the authorization server appends on redirect.
pub const TOKEN_PARAM: &str = "token";

/// Get/set/clear access to the persisted bearer token.
pub trait SessionStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str) -> io::Result<()>;
    fn clear(&self) -> io::Result<()>;
}

/// Returns `~/.mathnarrator/session.json`.
pub fn default_session_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".mathnarrator").join("session.json"))
}

/// Shortens a token for log output.
pub fn redact(token: &str) -> String {
    let prefix: String = token.chars().take(4).collect();
    format!("{prefix}***")
}

// ============================================================================
// File-backed store
// ============================================================================

type Entries = BTreeMap<String, String>;

pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_entries(&self) -> io::Result<Entries> {
        if !self.path.exists() {
            return Ok(Entries::new());
        }
        let json = fs::read_to_string(&self.path)?;
        serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn write_entries(&self, entries: &Entries) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp_path = self.path.with_extension("tmp");
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Option<String> {
        match self.load_entries() {
            Ok(mut entries) => entries.remove(STORAGE_KEY),
            Err(e) => {
                warn!("Unreadable session file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn set(&self, token: &str) -> io::Result<()> {
        // A corrupt file is replaced rather than blocking sign-in
        let mut entries = self.load_entries().unwrap_or_default();
        entries.insert(STORAGE_KEY.to_string(), token.to_string());
        self.write_entries(&entries)?;
        debug!("Stored session token {} at {}", redact(token), self.path.display());
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        let mut entries = self.load_entries().unwrap_or_default();
        entries.remove(STORAGE_KEY);
        if entries.is_empty() {
            fs::remove_file(&self.path)?;
        } else {
            self.write_entries(&entries)?;
        }
        debug!("Cleared session token at {}", self.path.display());
        Ok(())
    }
}

// ============================================================================
// In-memory store
// ============================================================================

/// Process-local store. Used for tests and when no home directory exists.
#[derive(Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Option<String> {
        self.token
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn set(&self, token: &str) -> io::Result<()> {
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}

// ============================================================================
// Auth completion and logout
// ============================================================================

/// Outcome of handling a return from the authorization server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCompletion {
    /// Where to go next.
    pub route: Route,
    /// The location to display, with the token stripped.
    pub visible_location: String,
}

/// Pulls a non-empty `token` query parameter out of a location.
///
/// Accepts a full URL, a path with query, or a bare `?query`.
pub fn token_from_location(location: &str) -> Option<String> {
    let base = Url::parse("http://localhost/").ok()?;
    let url = base.join(location.trim()).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == TOKEN_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|token| !token.is_empty())
}

/// Handles the redirect back from the authorization server.
///
/// With a token: persist it and continue to the chat screen. Without one:
/// leave storage alone and go back to the landing screen.
pub fn complete_auth(location: &str, store: &dyn SessionStore) -> AuthCompletion {
    let Some(token) = token_from_location(location) else {
        info!("Auth completion without token, returning to landing");
        return AuthCompletion {
            route: Route::Landing,
            visible_location: Route::Landing.path().to_string(),
        };
    };

    if let Err(e) = store.set(&token) {
        warn!("Failed to persist session token: {}", e);
    } else {
        info!("Signed in, token {}", redact(&token));
    }

    AuthCompletion {
        route: Route::Chat,
        visible_location: Route::AuthCompletion.path().to_string(),
    }
}

/// Drops the stored token. Always lands on the landing screen.
pub fn logout(store: &dyn SessionStore) -> Route {
    if let Err(e) = store.clear() {
        warn!("Failed to clear session token: {}", e);
    } else {
        info!("Logged out");
    }
    Route::Landing
}
