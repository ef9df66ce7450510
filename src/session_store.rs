//! Session Store
//!
//! Persists the single signed-in user's session under a fixed key. Reads
//! never fail: a corrupt record is reported as such and treated as absent.
//! No expiry is enforced here.

use std::rc::Rc;

use crate::models::{AuthState, Session};
use crate::storage::{BrowserStorage, KeyValueStorage};

pub const SESSION_KEY: &str = "opspilot_session";

/// Result of reading the persisted session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadResult {
    Valid(Session),
    Absent,
    Corrupt,
}

#[derive(Clone)]
pub struct SessionStore {
    storage: Rc<dyn KeyValueStorage>,
}

impl SessionStore {
    pub fn new(storage: Rc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Store backed by `window.localStorage`
    pub fn browser() -> Self {
        Self::new(Rc::new(BrowserStorage))
    }

    pub fn save(&self, session: &Session) {
        match serde_json::to_string(session) {
            Ok(json) => self.storage.set(SESSION_KEY, &json),
            Err(e) => log::error!("[SESSION] Failed to serialize session: {}", e),
        }
    }

    pub fn load(&self) -> LoadResult {
        let Some(raw) = self.storage.get(SESSION_KEY) else {
            return LoadResult::Absent;
        };
        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => LoadResult::Valid(session),
            Err(e) => {
                log::warn!("[SESSION] Ignoring corrupt session record: {}", e);
                LoadResult::Corrupt
            }
        }
    }

    /// Stored session, or `None` when absent or corrupt
    pub fn read(&self) -> Option<Session> {
        match self.load() {
            LoadResult::Valid(session) => Some(session),
            LoadResult::Absent | LoadResult::Corrupt => None,
        }
    }

    pub fn auth_state(&self) -> AuthState {
        self.read().into()
    }

    pub fn clear(&self) {
        self.storage.remove(SESSION_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::test_support::MemoryStorage;

    fn manager() -> Session {
        Session {
            member_id: "m-1".into(),
            team_id: "t-1".into(),
            role: Role::Manager,
            email: "boss@example.com".into(),
            name: Some("Boss".into()),
        }
    }

    #[test]
    fn test_save_then_read() {
        let store = SessionStore::new(Rc::new(MemoryStorage::default()));
        store.save(&manager());
        assert_eq!(store.load(), LoadResult::Valid(manager()));
        assert!(store.auth_state().is_manager());
    }

    #[test]
    fn test_absent_session() {
        let store = SessionStore::new(Rc::new(MemoryStorage::default()));
        assert_eq!(store.load(), LoadResult::Absent);
        assert_eq!(store.auth_state(), AuthState::Anonymous);
    }

    #[test]
    fn test_corrupt_session_reads_as_none() {
        let storage = Rc::new(MemoryStorage::default());
        storage.set(SESSION_KEY, "{not json");
        let store = SessionStore::new(storage);
        assert_eq!(store.load(), LoadResult::Corrupt);
        assert_eq!(store.read(), None);
    }

    #[test]
    fn test_unknown_role_is_corrupt() {
        let storage = Rc::new(MemoryStorage::default());
        storage.set(
            SESSION_KEY,
            r#"{"member_id":"1","team_id":"2","role":"admin","email":"x@y.z"}"#,
        );
        assert_eq!(SessionStore::new(storage).load(), LoadResult::Corrupt);
    }

    #[test]
    fn test_clear_removes_session() {
        let storage = Rc::new(MemoryStorage::default());
        let store = SessionStore::new(storage.clone());
        store.save(&manager());
        store.clear();
        assert_eq!(store.load(), LoadResult::Absent);
        assert!(storage.is_empty());
    }
}
