//! # Effect Dispatch
//!
//! Runs the effects `update()` asks for. Synchronous effects (navigation,
//! session store access) are applied in place and fed back as follow-up
//! actions until the reducer settles. Network work is spawned on tokio and
//! reports back through the action channel.
//!
//! ```text
//! Action → update() → Effect ─┬─ Navigate / CompleteAuth / EndSession → Action → update() …
//!                             └─ ResolveIdentity / SpawnChatRequest → tokio task → channel
//! ```

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::mpsc::UnboundedSender;

use crate::api::ChatBackend;
use crate::core::action::{Action, Effect, update};
use crate::core::identity;
use crate::core::session::{self, SessionStore};
use crate::core::state::App;

pub struct Dispatcher {
    store: Arc<dyn SessionStore>,
    backend: Arc<dyn ChatBackend>,
    tx: UnboundedSender<Action>,
}

impl Dispatcher {
    pub fn new(
        store: Arc<dyn SessionStore>,
        backend: Arc<dyn ChatBackend>,
        tx: UnboundedSender<Action>,
    ) -> Self {
        Self { store, backend, tx }
    }

    /// Applies `action` and every synchronous effect it leads to.
    ///
    /// Returns `true` when the app should quit.
    pub fn dispatch(&self, app: &mut App, action: Action) -> bool {
        let mut next = Some(action);
        while let Some(action) = next.take() {
            debug!("Dispatching {:?}", action);
            next = match update(app, action) {
                Effect::None => None,
                Effect::Quit => return true,
                Effect::Navigate(route) => Some(Action::Navigated(route)),
                Effect::CompleteAuth(location) => Some(Action::AuthCompleted(
                    session::complete_auth(&location, self.store.as_ref()),
                )),
                Effect::EndSession => Some(Action::Navigated(session::logout(self.store.as_ref()))),
                Effect::ResolveIdentity { view_id } => {
                    self.spawn_identity(view_id);
                    None
                }
                Effect::SpawnChatRequest { query, view_id } => {
                    self.spawn_chat(query, view_id);
                    None
                }
            };
        }
        false
    }

    fn spawn_identity(&self, view_id: u64) {
        let store = self.store.clone();
        let backend = self.backend.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let identity = identity::resolve(store.as_ref(), backend.as_ref()).await;
            if tx.send(Action::IdentityResolved { view_id, identity }).is_err() {
                warn!("Failed to send identity: receiver dropped");
            }
        });
    }

    fn spawn_chat(&self, query: String, view_id: u64) {
        info!("Spawning chat request via {} backend", self.backend.name());
        // Read at send time so a token stored mid-session is picked up
        let token = self.store.get();
        let backend = self.backend.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = backend.send_chat(&query, token.as_deref()).await;
            if tx.send(Action::ReplyReceived { view_id, result }).is_err() {
                warn!("Failed to send chat reply: receiver dropped");
            }
        });
    }
}
