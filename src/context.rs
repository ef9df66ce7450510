//! Application Context
//!
//! Shared signals provided via Leptos Context API.

use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;

use crate::models::AuthState;
use crate::session_store::SessionStore;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Bumped after every session store write - read
    pub session_revision: ReadSignal<u32>,
    /// Bumped after every session store write - write
    set_session_revision: WriteSignal<u32>,
    /// One-shot message shown under the header
    pub notice: RwSignal<Option<String>>,
    /// Where the signed-in session lives
    store: StoredValue<SessionStore, LocalStorage>,
}

impl AppContext {
    pub fn new(session_revision: (ReadSignal<u32>, WriteSignal<u32>), store: SessionStore) -> Self {
        Self {
            session_revision: session_revision.0,
            set_session_revision: session_revision.1,
            notice: RwSignal::new(None),
            store: StoredValue::new_local(store),
        }
    }

    /// Signal that the session store changed
    pub fn session_changed(&self) {
        self.set_session_revision.update(|v| *v += 1);
    }

    /// Current auth state, re-read from storage on every call.
    /// Subscribes the caller to session changes.
    pub fn auth_state(&self) -> AuthState {
        let _ = self.session_revision.get();
        self.store.with_value(SessionStore::auth_state)
    }

    pub fn session_store(&self) -> SessionStore {
        self.store.get_value()
    }

    pub fn notify(&self, message: impl Into<String>) {
        self.notice.set(Some(message.into()));
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
