//! Tab descriptor
//!
//! One open workspace view. A descriptor is immutable once created; the
//! session only ever replaces which descriptor is active.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TabError;
use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawDescriptor")]
pub struct TabDescriptor {
    /// Stable identifier, derived from the route table rather than the path
    key: String,
    /// Display name shown in the tab strip
    label: String,
    /// Navigable path this tab is bound to
    path: String,
    /// Whether the user may close this tab
    closable: bool,
    /// When the tab was opened
    opened_at: DateTime<Utc>,
}

impl TabDescriptor {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        path: impl Into<String>,
        closable: bool,
    ) -> Result<Self> {
        let key = key.into();
        let path = path.into();

        if key.trim().is_empty() {
            return Err(TabError::EmptyKey);
        }

        if !path.starts_with('/') {
            return Err(TabError::InvalidPath(path));
        }

        Ok(Self {
            key,
            label: label.into(),
            path,
            closable,
            opened_at: Utc::now(),
        })
    }

    /// Create a pinned tab (never closed by bulk operations)
    pub fn pinned(
        key: impl Into<String>,
        label: impl Into<String>,
        path: impl Into<String>,
    ) -> Result<Self> {
        Self::new(key, label, path, false)
    }

    pub(crate) fn into_pinned(self) -> Self {
        Self {
            closable: false,
            ..self
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn closable(&self) -> bool {
        self.closable
    }

    pub fn is_pinned(&self) -> bool {
        !self.closable
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// Get display label (with fallback to the path)
    pub fn display_label(&self) -> &str {
        if self.label.trim().is_empty() {
            &self.path
        } else {
            &self.label
        }
    }
}

/// Wire form, checked by the same rules as `TabDescriptor::new`
#[derive(Deserialize)]
struct RawDescriptor {
    key: String,
    label: String,
    path: String,
    closable: bool,
    opened_at: DateTime<Utc>,
}

impl TryFrom<RawDescriptor> for TabDescriptor {
    type Error = TabError;

    fn try_from(raw: RawDescriptor) -> Result<Self> {
        let tab = Self::new(raw.key, raw.label, raw.path, raw.closable)?;
        Ok(Self {
            opened_at: raw.opened_at,
            ..tab
        })
    }
}

impl PartialEq for TabDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
            && self.label == other.label
            && self.path == other.path
            && self.closable == other.closable
    }
}

impl Eq for TabDescriptor {}
