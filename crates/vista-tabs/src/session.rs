//! Shared tab session
//!
//! `TabSession` is the handle every consumer of the tab strip holds. It is
//! cheap to clone and all clones see the same state. Each operation commits
//! the tab sequence and the active key together under one write lock, and
//! subscribers are notified once per commit that changed anything.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;
use uuid::Uuid;

use crate::set::{AddOutcome, TabSet};
use crate::tab::TabDescriptor;
use crate::Result;

/// Point-in-time copy of the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub tabs: Vec<TabDescriptor>,
    pub active_key: Option<String>,
    pub revision: u64,
}

impl SessionSnapshot {
    pub fn keys(&self) -> Vec<&str> {
        self.tabs.iter().map(|t| t.key()).collect()
    }

    pub fn active_tab(&self) -> Option<&TabDescriptor> {
        let key = self.active_key.as_deref()?;
        self.tabs.iter().find(|t| t.key() == key)
    }
}

struct Inner {
    set: TabSet,
    revision: u64,
}

pub struct TabSession {
    id: String,
    created_at: DateTime<Utc>,
    inner: Arc<RwLock<Inner>>,
    notifier: Arc<watch::Sender<SessionSnapshot>>,
}

impl TabSession {
    /// Create an empty session
    pub fn new() -> Self {
        Self::from_set(TabSet::new())
    }

    /// Create a session seeded with a pinned, active home tab
    pub fn with_home(home: TabDescriptor) -> Self {
        Self::from_set(TabSet::with_home(home))
    }

    fn from_set(set: TabSet) -> Self {
        let id = Uuid::new_v4().to_string();
        let initial = SessionSnapshot {
            session_id: id.clone(),
            tabs: set.tabs().to_vec(),
            active_key: set.active_key().map(str::to_string),
            revision: 0,
        };
        let (notifier, _) = watch::channel(initial);

        tracing::debug!(session_id = %id, tab_count = set.len(), "Created tab session");

        Self {
            id,
            created_at: Utc::now(),
            inner: Arc::new(RwLock::new(Inner { set, revision: 0 })),
            notifier: Arc::new(notifier),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Run several mutations as one commit.
    ///
    /// Observers see only the state after `f` returns, never an
    /// intermediate one, and the revision advances at most once.
    pub fn transaction<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut TabSet) -> T,
    {
        let mut inner = self.inner.write();
        let before = inner.set.version();
        let result = f(&mut inner.set);

        if inner.set.version() != before {
            inner.revision += 1;
            let snapshot = self.snapshot_of(&inner);
            drop(inner);
            self.notifier.send_replace(snapshot);
        }

        result
    }

    pub fn add_tab(&self, descriptor: TabDescriptor) -> Result<AddOutcome> {
        self.transaction(|set| set.add_tab(descriptor))
    }

    pub fn remove_tab(&self, key: &str) -> Option<TabDescriptor> {
        self.transaction(|set| set.remove_tab(key))
    }

    pub fn set_active_key(&self, key: &str) -> Result<()> {
        self.transaction(|set| set.set_active_key(key))
    }

    pub fn close_all_tabs(&self) -> Vec<TabDescriptor> {
        self.transaction(|set| set.close_all_tabs())
    }

    pub fn close_other_tabs(&self, key: &str) -> Result<Vec<TabDescriptor>> {
        self.transaction(|set| set.close_other_tabs(key))
    }

    pub fn get_tab_by_path(&self, path: &str) -> Option<TabDescriptor> {
        self.inner.read().set.get_tab_by_path(path).cloned()
    }

    pub fn get_tab(&self, key: &str) -> Option<TabDescriptor> {
        self.inner.read().set.get_tab(key).cloned()
    }

    pub fn tabs(&self) -> Vec<TabDescriptor> {
        self.inner.read().set.tabs().to_vec()
    }

    pub fn active_key(&self) -> Option<String> {
        self.inner.read().set.active_key().map(str::to_string)
    }

    pub fn active_tab(&self) -> Option<TabDescriptor> {
        self.inner.read().set.active_tab().cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().set.is_empty()
    }

    /// Number of commits that changed the session
    pub fn revision(&self) -> u64 {
        self.inner.read().revision
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let inner = self.inner.read();
        self.snapshot_of(&inner)
    }

    /// Receive a snapshot after every committed change
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.notifier.subscribe()
    }

    fn snapshot_of(&self, inner: &Inner) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id.clone(),
            tabs: inner.set.tabs().to_vec(),
            active_key: inner.set.active_key().map(str::to_string),
            revision: inner.revision,
        }
    }
}

impl Default for TabSession {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TabSession {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            created_at: self.created_at,
            inner: Arc::clone(&self.inner),
            notifier: Arc::clone(&self.notifier),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home() -> TabDescriptor {
        TabDescriptor::pinned("dashboard", "Dashboard", "/dashboard").unwrap()
    }

    fn tab(key: &str) -> TabDescriptor {
        TabDescriptor::new(key, key, format!("/{}", key), true).unwrap()
    }

    #[test]
    fn test_clones_share_identity() {
        let session = TabSession::with_home(home());
        let clone = session.clone();

        assert_eq!(clone.id(), session.id());
        assert_eq!(clone.created_at(), session.created_at());
        assert!(session.created_at() <= Utc::now());
        assert_eq!(session.snapshot().session_id, session.id());
    }

    #[test]
    fn test_clones_share_state() {
        let session = TabSession::with_home(home());
        let reader = session.clone();

        session.add_tab(tab("user")).unwrap();

        assert_eq!(reader.len(), 2);
        assert_eq!(reader.active_key().as_deref(), Some("user"));
        assert_eq!(reader.id(), session.id());
    }

    #[test]
    fn test_independent_sessions_coexist() {
        let a = TabSession::with_home(home());
        let b = TabSession::with_home(home());

        a.add_tab(tab("user")).unwrap();

        assert_eq!(a.len(), 2);
        assert_eq!(b.len(), 1);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_revision_counts_real_changes_only() {
        let session = TabSession::with_home(home());
        assert_eq!(session.revision(), 0);

        session.add_tab(tab("user")).unwrap();
        assert_eq!(session.revision(), 1);

        // Already active: nothing to commit
        session.add_tab(tab("user")).unwrap();
        assert!(session.remove_tab("ghost").is_none());
        assert!(session.set_active_key("ghost").is_err());
        assert_eq!(session.revision(), 1);

        session.set_active_key("dashboard").unwrap();
        assert_eq!(session.revision(), 2);
    }

    #[test]
    fn test_transaction_commits_once() {
        let session = TabSession::with_home(home());
        let mut rx = session.subscribe();

        session.transaction(|set| {
            set.add_tab(tab("a")).unwrap();
            set.add_tab(tab("b")).unwrap();
            set.remove_tab("a");
        });

        assert_eq!(session.revision(), 1);
        assert!(rx.has_changed().unwrap());

        let snapshot = rx.borrow_and_update().clone();
        assert_eq!(snapshot.keys(), vec!["dashboard", "b"]);
        assert_eq!(snapshot.active_key.as_deref(), Some("b"));
        assert_eq!(snapshot.revision, 1);
    }

    #[test]
    fn test_unchanged_operations_do_not_notify() {
        let session = TabSession::with_home(home());
        let rx = session.subscribe();

        session.close_all_tabs();
        session.add_tab(home()).unwrap();

        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_snapshot_active_tab() {
        let session = TabSession::with_home(home());
        session.add_tab(tab("order")).unwrap();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.active_tab().unwrap().path(), "/order");
        assert_eq!(snapshot.session_id, session.id());
    }

    #[tokio::test]
    async fn test_subscriber_sees_final_state_of_gesture() {
        let session = TabSession::with_home(home());
        let mut rx = session.subscribe();

        session.add_tab(tab("user")).unwrap();
        session.close_other_tabs("user").unwrap();

        rx.changed().await.unwrap();
        let snapshot = rx.borrow().clone();
        assert_eq!(snapshot.keys(), vec!["dashboard", "user"]);
        assert_eq!(snapshot.active_key.as_deref(), Some("user"));
    }

    #[test]
    fn test_closing_everything_leaves_no_active_key() {
        let session = TabSession::new();
        session.add_tab(tab("a")).unwrap();
        session.close_all_tabs();

        let snapshot = session.snapshot();
        assert!(snapshot.tabs.is_empty());
        assert_eq!(snapshot.active_key, None);
        assert!(snapshot.active_tab().is_none());
    }
}
