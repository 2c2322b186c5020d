//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as parameters and are built
//! fresh every frame:
//! - `TitleBar`: header row with product name and status
//! - `Message`: one transcript entry
//! - `LandingPage`: entry screen with the floating symbol field
//! - `Sidebar`: identity card, new chat, recent chats, logout
//! - `AuthPrompt`: sign-in instructions around the callback input
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `InputBox`: text entry for questions and the callback address
//! - `MessageList`: scrollable transcript with layout caching
//!
//! ## Props-Based Data Flow
//!
//! Components receive external data as "props" (struct fields), not by
//! reaching into `App`. Dependencies stay explicit and components stay
//! testable against a `TestBackend`.
//!
//! ```rust,ignore
//! // Good: dependencies are explicit
//! Sidebar::new(app.identity.as_ref(), app.recent_chats).render(frame, area);
//!
//! // Bad: hidden dependency on global state
//! sidebar.render(frame, area); // reads from App
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── auth_prompt.rs   (Callback paste screen)
//! ├── landing.rs       (Entry screen)
//! ├── sidebar.rs       (Chat screen side column)
//! ├── title_bar.rs     (Header row)
//! ├── message.rs       (Single message renderer)
//! ├── message_list.rs  (Scrollable message container)
//! └── input_box/       (Text input with hard wrapping)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod auth_prompt;
pub mod input_box;
pub mod landing;
pub mod message;
pub mod message_list;
pub mod sidebar;

pub use auth_prompt::AuthPrompt;
pub use input_box::{InputBox, InputEvent};
pub use landing::LandingPage;
pub use message_list::{MessageList, MessageListState};
pub use sidebar::Sidebar;
