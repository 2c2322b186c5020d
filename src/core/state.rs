//! # Application State
//!
//! Core business state for the client. Domain data only; presentation
//! state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── route: Route                    // active screen
//! ├── transcript: Transcript          // messages of the current chat
//! ├── identity: Option<UserIdentity>  // None while resolving
//! ├── is_loading: bool                // a chat request is in flight
//! ├── view_id: u64                    // bumped on every chat visit
//! ├── status_message: String          // status line text
//! ├── landing_notice: Option<String>  // status to show on the next landing visit
//! ├── login_url: String               // external authorization endpoint
//! └── recent_chats: &[RecentChat]     // sidebar placeholder
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::identity::UserIdentity;
use crate::core::message::Transcript;
use crate::core::route::Route;

/// A sidebar entry. There is no store behind these yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecentChat {
    pub title: &'static str,
    pub timestamp: &'static str,
}

pub const PLACEHOLDER_HISTORY: &[RecentChat] = &[
    RecentChat {
        title: "Linear Algebra Basics",
        timestamp: "2 hours ago",
    },
    RecentChat {
        title: "Calculus Integration",
        timestamp: "1 day ago",
    },
    RecentChat {
        title: "Statistics Problems",
        timestamp: "3 days ago",
    },
];

pub struct App {
    pub route: Route,
    pub transcript: Transcript,
    pub identity: Option<UserIdentity>,
    /// True while a chat request is in flight. Guards against double submit.
    pub is_loading: bool,
    /// Identifies the current chat view; replies for older views are dropped.
    pub view_id: u64,
    pub status_message: String,
    /// Replaces the welcome text the next time the landing screen opens.
    pub landing_notice: Option<String>,
    pub login_url: String,
    pub recent_chats: &'static [RecentChat],
}

impl App {
    pub fn new(login_url: String) -> Self {
        Self {
            route: Route::Landing,
            transcript: Transcript::new(),
            identity: None,
            is_loading: false,
            view_id: 0,
            status_message: String::from("Welcome to FormulaVerse!"),
            landing_notice: None,
            login_url,
            recent_chats: PLACEHOLDER_HISTORY,
        }
    }
}
