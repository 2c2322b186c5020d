//! Wire types for the MathNarrator HTTP API.
//!
//! Field names match the JSON the server speaks. Anything the client does
//! not read is ignored on deserialization.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub query: String,
}

/// Response of `POST /api/chat`.
///
/// The server echoes the query and the caller's claims too; only `reply`
/// matters here, and it may be missing.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatReply {
    #[serde(default)]
    pub reply: Option<String>,
}

/// Response of `GET /api/me`.
///
/// `name` is required: a body without it is treated as malformed.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

/// Error body the server returns with 4xx responses, e.g. `{"error": "Missing authorization header"}`.
#[derive(Deserialize, Debug)]
pub(crate) struct ErrorBody {
    pub error: String,
}
