//! Ordered tab set
//!
//! Invariants held after every operation:
//! - keys are unique and at most one tab is open per path
//! - when the set is non-empty the active key names a member
//! - pinned tabs survive close-all and close-others
//! - insertion order is preserved

use crate::error::TabError;
use crate::tab::TabDescriptor;
use crate::Result;

/// What `add_tab` did with the descriptor it was given
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Appended to the end of the set and made active
    Opened,
    /// A tab for the same path was already open and is now active
    Activated,
    /// A tab for the same path was already open and already active
    AlreadyActive,
}

#[derive(Debug, Clone, Default)]
pub struct TabSet {
    tabs: Vec<TabDescriptor>,
    active_key: Option<String>,
    /// Bumped on every change to `tabs` or `active_key`
    version: u64,
}

impl TabSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set seeded with a pinned home tab, active
    pub fn with_home(home: TabDescriptor) -> Self {
        let home = home.into_pinned();

        Self {
            active_key: Some(home.key().to_string()),
            tabs: vec![home],
            version: 0,
        }
    }

    pub fn add_tab(&mut self, descriptor: TabDescriptor) -> Result<AddOutcome> {
        if let Some(existing) = self.tabs.iter().find(|t| t.path() == descriptor.path()) {
            if self.active_key.as_deref() == Some(existing.key()) {
                return Ok(AddOutcome::AlreadyActive);
            }

            let key = existing.key().to_string();
            tracing::debug!(tab_key = %key, path = %descriptor.path(), "Re-activated open tab");
            self.set_active(Some(key));
            return Ok(AddOutcome::Activated);
        }

        if let Some(clash) = self.tabs.iter().find(|t| t.key() == descriptor.key()) {
            return Err(TabError::DuplicateKey {
                key: descriptor.key().to_string(),
                open_path: clash.path().to_string(),
                path: descriptor.path().to_string(),
            });
        }

        tracing::info!(
            tab_key = %descriptor.key(),
            path = %descriptor.path(),
            closable = descriptor.closable(),
            "Opened tab"
        );

        let key = descriptor.key().to_string();
        self.tabs.push(descriptor);
        self.active_key = Some(key);
        self.version += 1;

        Ok(AddOutcome::Opened)
    }

    /// Remove a tab by key. Returns `None` and changes nothing if the key is absent.
    pub fn remove_tab(&mut self, key: &str) -> Option<TabDescriptor> {
        let index = self.index_of(key)?;
        let removed = self.tabs.remove(index);
        self.version += 1;

        if self.active_key.as_deref() == Some(key) {
            let next = if self.tabs.is_empty() {
                None
            } else {
                let clamped = index.min(self.tabs.len() - 1);
                Some(self.tabs[clamped].key().to_string())
            };
            self.active_key = next;
        }

        tracing::info!(
            tab_key = %key,
            active = ?self.active_key,
            remaining = self.tabs.len(),
            "Closed tab"
        );

        Some(removed)
    }

    pub fn set_active_key(&mut self, key: &str) -> Result<()> {
        if self.index_of(key).is_none() {
            tracing::warn!(tab_key = %key, "Ignoring activation of unknown tab");
            return Err(TabError::NotFound(key.to_string()));
        }

        self.set_active(Some(key.to_string()));
        Ok(())
    }

    /// Close every closable tab. Returns the tabs that were closed.
    pub fn close_all_tabs(&mut self) -> Vec<TabDescriptor> {
        let (kept, closed): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.tabs).into_iter().partition(|t| t.is_pinned());

        self.tabs = kept;
        let next = self.tabs.first().map(|t| t.key().to_string());
        if !closed.is_empty() || next != self.active_key {
            self.active_key = next;
            self.version += 1;
        }

        tracing::info!(closed = closed.len(), remaining = self.tabs.len(), "Closed all tabs");

        closed
    }

    /// Close every closable tab except `key`, and make `key` active.
    pub fn close_other_tabs(&mut self, key: &str) -> Result<Vec<TabDescriptor>> {
        if self.index_of(key).is_none() {
            tracing::warn!(tab_key = %key, "Ignoring close-others for unknown tab");
            return Err(TabError::NotFound(key.to_string()));
        }

        let (kept, closed): (Vec<_>, Vec<_>) = std::mem::take(&mut self.tabs)
            .into_iter()
            .partition(|t| t.key() == key || t.is_pinned());

        self.tabs = kept;
        if !closed.is_empty() {
            self.version += 1;
        }
        self.set_active(Some(key.to_string()));

        tracing::info!(tab_key = %key, closed = closed.len(), "Closed other tabs");

        Ok(closed)
    }

    pub fn get_tab_by_path(&self, path: &str) -> Option<&TabDescriptor> {
        self.tabs.iter().find(|t| t.path() == path)
    }

    pub fn get_tab(&self, key: &str) -> Option<&TabDescriptor> {
        self.tabs.iter().find(|t| t.key() == key)
    }

    pub fn tabs(&self) -> &[TabDescriptor] {
        &self.tabs
    }

    pub fn active_key(&self) -> Option<&str> {
        self.active_key.as_deref()
    }

    pub fn active_tab(&self) -> Option<&TabDescriptor> {
        self.active_key.as_deref().and_then(|key| self.get_tab(key))
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub(crate) fn version(&self) -> u64 {
        self.version
    }

    fn index_of(&self, key: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.key() == key)
    }

    fn set_active(&mut self, key: Option<String>) {
        if self.active_key != key {
            self.active_key = key;
            self.version += 1;
        }
    }
}
