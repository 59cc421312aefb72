//! Navigation binder
//!
//! Folds observed path changes into the tab session and turns tab-strip and
//! menu interaction into navigation. Only genuine path transitions are acted
//! on; the last seen path is tracked explicitly.

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use url::Url;

use vista_tabs::{AddOutcome, TabDescriptor, TabError, TabSession, TabStripEvent};

use crate::navigator::Navigator;
use crate::routes::RouteTable;
use crate::target::MenuTarget;
use crate::Result;

/// What observing a path did to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathOutcome {
    /// Same path as the previous observation
    Unchanged,
    /// The root path is not a workspace view
    Root,
    /// A new tab was opened for the path
    Opened(String),
    /// The tab already open for the path was made active
    Activated(String),
    /// The tab for the path was already active
    AlreadyActive(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuOutcome {
    /// External page opened, session untouched
    External(Url),
    /// Internal page shown in the tab with this key
    Internal { key: String, outcome: AddOutcome },
}

pub struct NavigationBinder<N: Navigator> {
    session: TabSession,
    routes: Arc<RouteTable>,
    navigator: N,
    home_path: String,
    last_seen_path: Mutex<Option<String>>,
}

impl<N: Navigator> NavigationBinder<N> {
    pub fn new(
        session: TabSession,
        routes: Arc<RouteTable>,
        navigator: N,
        home_path: impl Into<String>,
    ) -> Self {
        Self {
            session,
            routes,
            navigator,
            home_path: home_path.into(),
            last_seen_path: Mutex::new(None),
        }
    }

    pub fn session(&self) -> &TabSession {
        &self.session
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn home_path(&self) -> &str {
        &self.home_path
    }

    pub fn last_seen_path(&self) -> Option<String> {
        self.last_seen_path.lock().clone()
    }

    /// Observe the navigator's current path
    pub fn sync(&self) -> Result<PathOutcome> {
        let path = self.navigator.current_path();
        self.observe_path(&path)
    }

    /// Fold one observed path into the session.
    ///
    /// Opens a tab when none is bound to the path, otherwise re-activates the
    /// bound tab. Existing tabs are never relabeled. A path that fails to
    /// fold is not recorded as seen, so observing it again retries.
    pub fn observe_path(&self, path: &str) -> Result<PathOutcome> {
        let mut last = self.last_seen_path.lock();
        if last.as_deref() == Some(path) {
            return Ok(PathOutcome::Unchanged);
        }

        if path.is_empty() || path == "/" {
            *last = Some(path.to_string());
            return Ok(PathOutcome::Root);
        }

        let outcome = self.session.transaction(|set| -> Result<PathOutcome> {
            if let Some(existing) = set.get_tab_by_path(path) {
                let key = existing.key().to_string();
                if set.active_key() == Some(key.as_str()) {
                    return Ok(PathOutcome::AlreadyActive(key));
                }
                set.set_active_key(&key)?;
                return Ok(PathOutcome::Activated(key));
            }

            let descriptor = self.descriptor_for(path)?;
            let key = descriptor.key().to_string();
            set.add_tab(descriptor)?;
            Ok(PathOutcome::Opened(key))
        })?;
        *last = Some(path.to_string());
        drop(last);

        tracing::debug!(path = %path, outcome = ?outcome, "Observed path");

        Ok(outcome)
    }

    /// Tab click: activate the tab and show its path
    pub fn select_tab(&self, key: &str) -> Result<()> {
        let tab = self
            .session
            .get_tab(key)
            .ok_or_else(|| TabError::NotFound(key.to_string()))?;

        self.session.set_active_key(key)?;
        self.push(tab.path());

        Ok(())
    }

    /// Menu click: open an external page, or open/activate the tab for an
    /// internal path and show it
    pub fn select_menu(&self, menu_key: &str) -> Result<MenuOutcome> {
        match MenuTarget::parse(menu_key)? {
            MenuTarget::External(url) => {
                self.navigator.open_external(&url);
                Ok(MenuOutcome::External(url))
            }
            MenuTarget::Internal(path) => {
                let descriptor = self.descriptor_for(&path)?;
                let requested_key = descriptor.key().to_string();
                let outcome = self.session.add_tab(descriptor)?;

                // A duplicate path keeps the tab that was already open
                let key = self
                    .session
                    .get_tab_by_path(&path)
                    .map(|t| t.key().to_string())
                    .unwrap_or(requested_key);

                self.push(&path);

                Ok(MenuOutcome::Internal { key, outcome })
            }
        }
    }

    /// Close button on a tab. Pinned tabs stay open.
    pub fn close_tab(&self, key: &str) -> Result<Option<TabDescriptor>> {
        match self.session.get_tab(key) {
            None => return Ok(None),
            Some(tab) if tab.is_pinned() => {
                tracing::warn!(tab_key = %key, "Ignoring close of pinned tab");
                return Ok(None);
            }
            Some(_) => {}
        }

        let before = self.session.active_key();
        let removed = self.session.remove_tab(key);
        self.follow_active(before);

        Ok(removed)
    }

    pub fn close_all(&self) -> Vec<TabDescriptor> {
        let before = self.session.active_key();
        let closed = self.session.close_all_tabs();
        self.follow_active(before);
        closed
    }

    pub fn close_others(&self, key: &str) -> Result<Vec<TabDescriptor>> {
        let before = self.session.active_key();
        let closed = self.session.close_other_tabs(key)?;
        self.follow_active(before);
        Ok(closed)
    }

    /// Dispatch an event from the rendered tab strip
    pub fn handle_strip_event(&self, event: TabStripEvent) -> Result<()> {
        match event {
            TabStripEvent::Change(key) => self.select_tab(&key),
            TabStripEvent::Close(key) => self.close_tab(&key).map(|_| ()),
            TabStripEvent::CloseAll => {
                self.close_all();
                Ok(())
            }
            TabStripEvent::CloseOthers(key) => self.close_others(&key).map(|_| ()),
        }
    }

    /// Observe paths until the sending side is dropped.
    ///
    /// The value current at subscription time counts as the initial mount.
    pub async fn run(&self, mut paths: watch::Receiver<String>) {
        let initial = paths.borrow_and_update().clone();
        self.observe_logged(&initial);

        while paths.changed().await.is_ok() {
            let path = paths.borrow_and_update().clone();
            self.observe_logged(&path);
        }

        tracing::debug!(session_id = %self.session.id(), "Path source closed");
    }

    fn observe_logged(&self, path: &str) {
        if let Err(e) = self.observe_path(path) {
            tracing::warn!(path = %path, error = %e, "Failed to fold path into tab session");
        }
    }

    fn descriptor_for(&self, path: &str) -> Result<TabDescriptor> {
        let closable = path != self.home_path;
        self.routes.resolve(path).into_descriptor(path, closable)
    }

    /// Show `path`. The session already reflects it, so the echo is
    /// recorded as seen and a later return to the previous path is a real
    /// transition.
    fn push(&self, path: &str) {
        *self.last_seen_path.lock() = Some(path.to_string());
        if self.navigator.current_path() != path {
            self.navigator.navigate_to(path);
        }
    }

    /// Show the active tab's path if closing tabs moved the active key
    fn follow_active(&self, before: Option<String>) {
        let active = self.session.active_tab();
        if active.as_ref().map(|t| t.key()) == before.as_deref() {
            return;
        }

        if let Some(tab) = active {
            self.push(tab.path());
        }
    }
}
