//! # Core Application Logic
//!
//! This module contains the client's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • Dispatcher (effects) │
//!                    └───────────┬─────────────┘
//!                                │
//!                  ┌─────────────┴─────────────┐
//!                  ▼                           ▼
//!           ┌────────────┐              ┌────────────┐
//!           │    TUI     │              │    API     │
//!           │  Adapter   │              │  (reqwest) │
//!           │ (ratatui)  │              │            │
//!           └────────────┘              └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`dispatch`]: Runs the effects the reducer returns
//! - [`session`]: Token storage, auth completion, logout
//! - [`identity`]: Guest/signed-in identity bootstrap
//! - [`message`]: The transcript
//! - [`route`]: Screen addresses
//! - [`config`]: Layered configuration

pub mod action;
pub mod config;
pub mod dispatch;
pub mod identity;
pub mod message;
pub mod route;
pub mod session;
pub mod state;
