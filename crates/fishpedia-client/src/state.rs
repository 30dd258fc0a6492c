//! Application state shared across all commands.
//!
//! [`AppState`] is wrapped in `Arc<Mutex<>>` ([`SharedState`]).  Views keep a
//! clone of the handle and go through [`crate::commands`] for every
//! mutation; nothing else writes to the catalog or the session.

use std::sync::{Arc, Mutex, MutexGuard};

use fishpedia_shared::User;
use fishpedia_store::Catalog;

use crate::error::CommandError;
use crate::events::EventBus;

pub type SharedState = Arc<Mutex<AppState>>;

/// Central application state.
pub struct AppState {
    /// Fish collection, favorites and local media.
    pub catalog: Catalog,

    /// The logged-in user, `None` when logged out.
    pub session: Option<User>,

    /// Change notifications for views.
    pub events: EventBus,
}

impl AppState {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            session: None,
            events: EventBus::new(),
        }
    }

    /// State loaded with the seed entries and nobody logged in.
    pub fn seeded() -> Self {
        Self::new(Catalog::seeded())
    }

    pub fn into_shared(self) -> SharedState {
        Arc::new(Mutex::new(self))
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn require_session(&self) -> Result<&User, CommandError> {
        self.session.as_ref().ok_or(CommandError::LoginRequired)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::seeded()
    }
}

pub(crate) fn lock(state: &SharedState) -> Result<MutexGuard<'_, AppState>, CommandError> {
    state
        .lock()
        .map_err(|e| CommandError::LockPoisoned(e.to_string()))
}
