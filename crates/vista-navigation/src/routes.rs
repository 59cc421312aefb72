//! Route table
//!
//! Maps known application paths to the key and label their tab is opened
//! with. Built once at startup and never mutated.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use vista_tabs::TabDescriptor;

use crate::error::NavigationError;
use crate::Result;

pub const UNKNOWN_PAGE_LABEL: &str = "Unknown page";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub path: String,
    pub key: String,
    pub label: String,
}

impl RouteEntry {
    pub fn new(path: &str, key: &str, label: &str) -> Self {
        Self {
            path: path.to_string(),
            key: key.to_string(),
            label: label.to_string(),
        }
    }
}

/// Key and label a tab for some path would be opened with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabTemplate {
    pub key: String,
    pub label: String,
    /// False when the path was missing from the table and the fallback was used
    pub known: bool,
}

impl TabTemplate {
    pub fn into_descriptor(self, path: &str, closable: bool) -> Result<TabDescriptor> {
        Ok(TabDescriptor::new(self.key, self.label, path, closable)?)
    }
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    by_path: HashMap<String, usize>,
    by_key: HashMap<String, usize>,
    fallback_label: String,
}

impl RouteTable {
    pub fn new(entries: Vec<RouteEntry>) -> Result<Self> {
        let mut by_path = HashMap::with_capacity(entries.len());
        let mut by_key = HashMap::with_capacity(entries.len());

        for (index, entry) in entries.iter().enumerate() {
            if by_path.insert(entry.path.clone(), index).is_some() {
                return Err(NavigationError::DuplicateRoute {
                    field: "path",
                    value: entry.path.clone(),
                });
            }
            if by_key.insert(entry.key.clone(), index).is_some() {
                return Err(NavigationError::DuplicateRoute {
                    field: "key",
                    value: entry.key.clone(),
                });
            }
        }

        Ok(Self {
            entries,
            by_path,
            by_key,
            fallback_label: UNKNOWN_PAGE_LABEL.to_string(),
        })
    }

    /// Parse a JSON array of route entries
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<RouteEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    /// The dashboard's views
    pub fn builtin() -> Self {
        let entries = vec![
            RouteEntry::new("/dashboard", "dashboard", "Dashboard"),
            RouteEntry::new("/dashboard/monitor", "monitor", "Monitoring"),
            RouteEntry::new("/dashboard/chart", "chart", "Chart Builder"),
            RouteEntry::new("/dashboard/rpa", "rpa", "Process Orchestration"),
            RouteEntry::new("/user", "user", "User Management"),
            RouteEntry::new("/agents", "agents", "AI Assistant"),
            RouteEntry::new("/excel", "excel", "Spreadsheet"),
            RouteEntry::new("/md", "md", "Markdown Editor"),
            RouteEntry::new("/formEngine", "formEngine", "Form Engine"),
            RouteEntry::new("/dragMode", "dragMode", "Drag Builder"),
            RouteEntry::new("/board", "board", "Whiteboard"),
            RouteEntry::new("/order", "order", "Orders"),
            RouteEntry::new("/resource", "resource", "Asset Management"),
        ];

        let by_path = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.path.clone(), i))
            .collect();
        let by_key = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.key.clone(), i))
            .collect();

        Self {
            entries,
            by_path,
            by_key,
            fallback_label: UNKNOWN_PAGE_LABEL.to_string(),
        }
    }

    pub fn with_fallback_label(mut self, label: impl Into<String>) -> Self {
        self.fallback_label = label.into();
        self
    }

    /// Resolve the tab template for a path, falling back to a key derived
    /// from the path when the table has no entry.
    pub fn resolve(&self, path: &str) -> TabTemplate {
        match self.lookup(path) {
            Some(entry) => TabTemplate {
                key: entry.key.clone(),
                label: entry.label.clone(),
                known: true,
            },
            None => TabTemplate {
                key: path.strip_prefix('/').unwrap_or(path).to_string(),
                label: self.fallback_label.clone(),
                known: false,
            },
        }
    }

    pub fn lookup(&self, path: &str) -> Option<&RouteEntry> {
        self.by_path.get(path).map(|&i| &self.entries[i])
    }

    pub fn lookup_key(&self, key: &str) -> Option<&RouteEntry> {
        self.by_key.get(key).map(|&i| &self.entries[i])
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn fallback_label(&self) -> &str {
        &self.fallback_label
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::builtin()
    }
}
