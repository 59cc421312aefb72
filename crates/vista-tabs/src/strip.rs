//! Tab strip surface
//!
//! What a renderer needs to draw the strip, and the events it sends back.

use serde::{Deserialize, Serialize};

use crate::session::SessionSnapshot;
use crate::tab::TabDescriptor;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabStripItem {
    pub key: String,
    pub label: String,
    pub closable: bool,
}

impl From<&TabDescriptor> for TabStripItem {
    fn from(tab: &TabDescriptor) -> Self {
        Self {
            key: tab.key().to_string(),
            label: tab.display_label().to_string(),
            closable: tab.closable(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabStripView {
    pub items: Vec<TabStripItem>,
    pub active_key: Option<String>,
}

impl TabStripView {
    pub fn is_active(&self, key: &str) -> bool {
        self.active_key.as_deref() == Some(key)
    }

    /// One-line rendering, active tab in brackets and pinned tabs marked
    pub fn render_line(&self) -> String {
        self.items
            .iter()
            .map(|item| {
                let label = if item.closable {
                    item.label.clone()
                } else {
                    format!("^{}", item.label)
                };
                if self.is_active(&item.key) {
                    format!("[{}]", label)
                } else {
                    format!(" {} ", label)
                }
            })
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl From<&SessionSnapshot> for TabStripView {
    fn from(snapshot: &SessionSnapshot) -> Self {
        Self {
            items: snapshot.tabs.iter().map(TabStripItem::from).collect(),
            active_key: snapshot.active_key.clone(),
        }
    }
}

/// User interaction with the rendered strip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "key", rename_all = "snake_case")]
pub enum TabStripEvent {
    /// A tab was clicked
    Change(String),
    /// A tab's close button was clicked
    Close(String),
    CloseAll,
    CloseOthers(String),
}
