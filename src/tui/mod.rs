//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm. Effects
//! are run by `core::dispatch::Dispatcher`, so the same flows work without
//! a terminal.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (landing page, reply pending): draws every ~80ms.
//! - **Idle**: sleeps up to 500ms, only redraws on events, background
//!   results or terminal resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.

pub mod component;
pub mod components;
pub mod event;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use tokio::sync::mpsc;

use crate::api::{ChatBackend, HttpBackend};
use crate::core::action::Action;
use crate::core::config::ResolvedConfig;
use crate::core::dispatch::Dispatcher;
use crate::core::route::Route;
use crate::core::session::{FileSessionStore, MemorySessionStore, SessionStore};
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::auth_prompt::CALLBACK_PLACEHOLDER;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

pub const CHAT_PLACEHOLDER: &str = "Type a math expression or question...";

/// Which screen the client opens on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartMode {
    Landing,
    /// Skip the landing screen and chat straight away.
    Guest,
    /// Complete a sign-in with a callback address given on the command line.
    Callback(String),
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub message_list: MessageListState,
    pub input_box: InputBox,
    pub callback_box: InputBox,
    // Animation frame counter
    pub tick: usize,
    /// Chat view the message list state belongs to
    seen_view_id: u64,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(" Ask FormulaVerse ", CHAT_PLACEHOLDER),
            callback_box: InputBox::new(" Callback address ", CALLBACK_PLACEHOLDER),
            tick: 0,
            seen_view_id: 0,
        }
    }

    /// Drop scroll state left over from a previous chat view.
    pub fn sync_with(&mut self, app: &App) {
        if self.seen_view_id != app.view_id || app.transcript.is_empty() {
            self.message_list = MessageListState::new();
            self.seen_view_id = app.view_id;
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock  // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

/// Build the session store from the resolved config.
pub fn build_store(config: &ResolvedConfig) -> Arc<dyn SessionStore> {
    match &config.session_path {
        Some(path) => {
            info!("Session file: {}", path.display());
            Arc::new(FileSessionStore::new(path.clone()))
        }
        None => {
            info!("No session file location, keeping the session in memory");
            Arc::new(MemorySessionStore::new())
        }
    }
}

/// Actions to replay before the first frame.
pub fn startup_actions(start: StartMode) -> Vec<Action> {
    match start {
        StartMode::Landing => Vec::new(),
        StartMode::Guest => vec![Action::QuickChat],
        StartMode::Callback(location) => vec![
            Action::Navigated(Route::AuthCompletion),
            Action::CallbackReceived(location),
        ],
    }
}

/// Translate a terminal event into an action for the active screen.
///
/// Component-local events (typing, scrolling) are absorbed here and yield
/// `None`.
pub fn route_event(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    // Ctrl+C always quits regardless of screen
    if matches!(event, TuiEvent::ForceQuit) {
        return Some(Action::Quit);
    }

    match app.route {
        Route::Landing => match event {
            TuiEvent::InputChar('s') | TuiEvent::InputChar('S') => Some(Action::SignIn),
            TuiEvent::InputChar('c') | TuiEvent::InputChar('C') | TuiEvent::Submit => {
                Some(Action::QuickChat)
            }
            TuiEvent::InputChar('q') | TuiEvent::Escape => Some(Action::Quit),
            _ => None,
        },
        Route::AuthCompletion => {
            if matches!(event, TuiEvent::Escape) {
                tui.callback_box.clear();
                return Some(Action::Navigated(Route::Landing));
            }
            match tui.callback_box.handle_event(event)? {
                InputEvent::Submit(location) => Some(Action::CallbackReceived(location)),
                InputEvent::ContentChanged => None,
            }
        }
        Route::Chat => match event {
            TuiEvent::NewChat => Some(Action::NewChat),
            TuiEvent::Logout => Some(Action::Logout),
            TuiEvent::ScrollUp
            | TuiEvent::ScrollDown
            | TuiEvent::ScrollPageUp
            | TuiEvent::ScrollPageDown
            | TuiEvent::ScrollToBottom => {
                tui.message_list.handle_event(event);
                None
            }
            _ => {
                tui.input_box.disabled = app.is_loading;
                match tui.input_box.handle_event(event)? {
                    InputEvent::Submit(text) => Some(Action::Submit(text)),
                    InputEvent::ContentChanged => None,
                }
            }
        },
    }
}

pub fn run(config: ResolvedConfig, start: StartMode) -> std::io::Result<()> {
    let store = build_store(&config);
    let backend: Arc<dyn ChatBackend> = Arc::new(HttpBackend::new(config.api_base_url.clone()));
    info!("Using {} backend at {}", backend.name(), config.api_base_url);

    // Channel for actions from background tasks
    let (tx, mut rx) = mpsc::unbounded_channel();
    let dispatcher = Dispatcher::new(store, backend, tx);

    let mut app = App::new(config.login_url.clone());
    let mut tui = TuiState::new();

    let mut should_quit = false;
    for action in startup_actions(start) {
        should_quit |= dispatcher.dispatch(&mut app, action);
    }
    if should_quit {
        return Ok(());
    }

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new()?;

    // Animation timer
    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        tui.sync_with(&app);

        let animating = app.route == Route::Landing || app.is_loading;
        if animating {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            tui.tick = (start_time.elapsed().as_millis() / 80) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }
            if let Some(action) = route_event(&app, &mut tui, &event)
                && dispatcher.dispatch(&mut app, action)
            {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }

        // Handle background task results (identity, replies)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if dispatcher.dispatch(&mut app, action) {
                should_quit = true;
            }
        }

        if should_quit {
            break;
        }
    }

    info!("Shutting down");
    ratatui::restore();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    fn type_into(app: &App, tui: &mut TuiState, text: &str) {
        for c in text.chars() {
            assert!(route_event(app, tui, &TuiEvent::InputChar(c)).is_none());
        }
    }

    #[test]
    fn test_force_quit_everywhere() {
        let mut tui = TuiState::new();
        for route in [Route::Landing, Route::AuthCompletion, Route::Chat] {
            let mut app = test_app();
            app.route = route;
            assert!(matches!(
                route_event(&app, &mut tui, &TuiEvent::ForceQuit),
                Some(Action::Quit)
            ));
        }
    }

    #[test]
    fn test_landing_keys() {
        let mut app = test_app();
        app.route = Route::Landing;
        let mut tui = TuiState::new();

        assert!(matches!(
            route_event(&app, &mut tui, &TuiEvent::InputChar('s')),
            Some(Action::SignIn)
        ));
        assert!(matches!(
            route_event(&app, &mut tui, &TuiEvent::InputChar('c')),
            Some(Action::QuickChat)
        ));
        assert!(matches!(
            route_event(&app, &mut tui, &TuiEvent::InputChar('q')),
            Some(Action::Quit)
        ));
        assert!(route_event(&app, &mut tui, &TuiEvent::InputChar('z')).is_none());
    }

    #[test]
    fn test_callback_paste_and_submit() {
        let mut app = test_app();
        app.route = Route::AuthCompletion;
        let mut tui = TuiState::new();

        let pasted = TuiEvent::Paste("http://localhost:3000/auth/success?token=abc".to_string());
        assert!(route_event(&app, &mut tui, &pasted).is_none());

        match route_event(&app, &mut tui, &TuiEvent::Submit) {
            Some(Action::CallbackReceived(location)) => {
                assert_eq!(location, "http://localhost:3000/auth/success?token=abc")
            }
            other => panic!("Expected CallbackReceived, got {:?}", other),
        }
    }

    #[test]
    fn test_escape_leaves_auth_screen() {
        let mut app = test_app();
        app.route = Route::AuthCompletion;
        let mut tui = TuiState::new();
        type_into(&app, &mut tui, "half typed");

        assert!(matches!(
            route_event(&app, &mut tui, &TuiEvent::Escape),
            Some(Action::Navigated(Route::Landing))
        ));
        assert!(tui.callback_box.text().is_empty());
    }

    #[test]
    fn test_chat_submit_and_shortcuts() {
        let app = test_app();
        let mut tui = TuiState::new();
        type_into(&app, &mut tui, "integrate x^2");

        match route_event(&app, &mut tui, &TuiEvent::Submit) {
            Some(Action::Submit(text)) => assert_eq!(text, "integrate x^2"),
            other => panic!("Expected Submit, got {:?}", other),
        }
        assert!(matches!(
            route_event(&app, &mut tui, &TuiEvent::NewChat),
            Some(Action::NewChat)
        ));
        assert!(matches!(
            route_event(&app, &mut tui, &TuiEvent::Logout),
            Some(Action::Logout)
        ));
    }

    #[test]
    fn test_submit_blocked_while_loading() {
        let mut app = test_app();
        app.is_loading = true;
        let mut tui = TuiState::new();
        type_into(&app, &mut tui, "second question");

        assert!(route_event(&app, &mut tui, &TuiEvent::Submit).is_none());
        assert_eq!(tui.input_box.text(), "second question");
    }

    #[test]
    fn test_scroll_goes_to_message_list() {
        let app = test_app();
        let mut tui = TuiState::new();
        assert!(route_event(&app, &mut tui, &TuiEvent::ScrollUp).is_none());
        assert!(!tui.message_list.stick_to_bottom);
    }

    #[test]
    fn test_new_view_resets_scroll_state() {
        let mut app = test_app();
        app.transcript.push_user("hi");
        let mut tui = TuiState::new();
        tui.sync_with(&app);
        tui.message_list.stick_to_bottom = false;

        tui.sync_with(&app);
        assert!(!tui.message_list.stick_to_bottom);

        app.view_id += 1;
        tui.sync_with(&app);
        assert!(tui.message_list.stick_to_bottom);
    }

    #[test]
    fn test_startup_actions() {
        assert!(startup_actions(StartMode::Landing).is_empty());
        assert!(matches!(
            startup_actions(StartMode::Guest).as_slice(),
            [Action::QuickChat]
        ));
        assert!(matches!(
            startup_actions(StartMode::Callback("x".to_string())).as_slice(),
            [Action::Navigated(Route::AuthCompletion), Action::CallbackReceived(_)]
        ));
    }
}
