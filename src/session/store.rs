use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::Session;

/// A session guarded for one command at a time.
pub type SharedSession = Arc<tokio::sync::Mutex<Session>>;

/// Identifier of a connection's session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// Sessions keyed by connection, passed explicitly to transports.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<SessionId, SharedSession>>,
    next_id: AtomicU64,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a fresh connection id.
    pub fn next_id(&self) -> SessionId {
        SessionId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1)
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<SessionId, SharedSession>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, id: SessionId) -> Option<SharedSession> {
        self.sessions().get(&id).cloned()
    }

    /// Creates (or replaces) the session for `id`.
    pub fn create(&self, id: SessionId) -> SharedSession {
        let session = Arc::new(tokio::sync::Mutex::new(Session::new()));
        self.sessions().insert(id, Arc::clone(&session));
        tracing::info!(%id, "created session");
        session
    }

    pub fn get_or_create(&self, id: SessionId) -> SharedSession {
        if let Some(session) = self.get(id) {
            return session;
        }
        self.create(id)
    }

    pub fn remove(&self, id: SessionId) -> bool {
        let removed = self.sessions().remove(&id).is_some();
        if removed {
            tracing::info!(%id, "removed session");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let store = SessionStore::new();
        let a = store.next_id();
        let b = store.next_id();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_create_get_remove() {
        let store = SessionStore::new();
        let id = store.next_id();
        assert!(store.get(id).is_none());

        let session = store.create(id);
        session.lock().await.record_command("help");

        let again = store.get(id).unwrap_or_else(|| panic!("session missing"));
        assert_eq!(again.lock().await.command_history().len(), 1);
        assert_eq!(store.len(), 1);

        assert!(store.remove(id));
        assert!(!store.remove(id));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_get_or_create_reuses_session() {
        let store = SessionStore::new();
        let id = store.next_id();
        let first = store.get_or_create(id);
        let second = store.get_or_create(id);
        assert!(Arc::ptr_eq(&first, &second));
    }
}
