pub mod client;
pub mod types;

pub use client::{ApiError, ChatBackend, HttpBackend};
pub use types::{ChatReply, ChatRequest, Profile};
