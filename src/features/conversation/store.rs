//! Concurrent registry of chat sessions keyed by session id

use chrono::Utc;
use dashmap::DashMap;
use log::{debug, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::session::ChatSession;

/// Handle to one session. The mutex serializes submissions within a
/// session; distinct sessions never share it.
pub type SharedSession = Arc<Mutex<ChatSession>>;

pub struct SessionStore {
    sessions: DashMap<Uuid, SharedSession>,
    greeting: String,
}

impl SessionStore {
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            sessions: DashMap::new(),
            greeting: greeting.into(),
        }
    }

    pub fn create(&self) -> (Uuid, SharedSession) {
        let session = ChatSession::new(&self.greeting);
        let id = session.id();
        let shared = Arc::new(Mutex::new(session));
        self.sessions.insert(id, shared.clone());
        debug!("[{id}] Session created | Active sessions: {}", self.sessions.len());
        (id, shared)
    }

    pub fn get(&self, id: &Uuid) -> Option<SharedSession> {
        self.sessions.get(id).map(|entry| entry.value().clone())
    }

    pub fn remove(&self, id: &Uuid) -> bool {
        self.sessions.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop sessions idle for longer than `max_idle`. Sessions busy with a
    /// submission are kept. Returns how many were removed.
    pub fn reap_idle(&self, max_idle: chrono::Duration) -> usize {
        let now = Utc::now();
        let before = self.sessions.len();
        self.sessions.retain(|_, session| match session.try_lock() {
            Ok(guard) => now - guard.last_active() < max_idle,
            Err(_) => true,
        });
        before.saturating_sub(self.sessions.len())
    }

    /// Periodically reap idle sessions. Runs until the task is dropped.
    pub async fn run_reaper(self: Arc<Self>, every: Duration, max_idle: chrono::Duration) {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            let removed = self.reap_idle(max_idle);
            if removed > 0 {
                info!(
                    "🧹 Reaped {removed} idle sessions | Active sessions: {}",
                    self.sessions.len()
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::conversation::Role;

    #[tokio::test]
    async fn test_create_and_get() {
        let store = SessionStore::new("hi");
        let (id, _) = store.create();
        assert_eq!(store.len(), 1);

        let session = store.get(&id).unwrap();
        let guard = session.lock().await;
        assert_eq!(guard.id(), id);
        assert_eq!(guard.messages().len(), 1);
        assert_eq!(guard.messages()[0].content(), "hi");
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new("hi");
        let (a, _) = store.create();
        let (b, _) = store.create();
        assert_ne!(a, b);

        {
            let session = store.get(&a).unwrap();
            let mut guard = session.lock().await;
            guard.reset();
        }
        let session_a = store.get(&a).unwrap();
        let session_b = store.get(&b).unwrap();
        assert!(!Arc::ptr_eq(&session_a, &session_b));

        let guard_b = session_b.lock().await;
        assert_eq!(guard_b.messages().len(), 1);
        assert_eq!(guard_b.messages()[0].role(), Role::Assistant);
    }

    #[test]
    fn test_get_unknown() {
        let store = SessionStore::new("hi");
        assert!(store.get(&Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_remove() {
        let store = SessionStore::new("hi");
        let (id, _) = store.create();
        assert!(store.remove(&id));
        assert!(!store.remove(&id));
        assert!(store.is_empty());
    }

    #[test]
    fn test_reap_idle() {
        let store = SessionStore::new("hi");
        store.create();
        store.create();

        assert_eq!(store.reap_idle(chrono::Duration::minutes(5)), 0);
        assert_eq!(store.len(), 2);

        assert_eq!(store.reap_idle(chrono::Duration::zero()), 2);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_reap_skips_busy_sessions() {
        let store = SessionStore::new("hi");
        let (_, session) = store.create();
        let _guard = session.lock().await;

        assert_eq!(store.reap_idle(chrono::Duration::zero()), 0);
        assert_eq!(store.len(), 1);
    }
}
