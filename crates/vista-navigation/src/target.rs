//! Menu targets
//!
//! Menu entries are keyed either by an application path or by a full
//! external URL.

use url::Url;

use crate::error::NavigationError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuTarget {
    /// Page outside the application, opened in a new browsing context
    External(Url),
    /// Application path, always with a leading `/`
    Internal(String),
}

impl MenuTarget {
    pub fn parse(key: &str) -> Result<Self> {
        let key = key.trim();
        if key.is_empty() {
            return Err(NavigationError::InvalidTarget(key.to_string()));
        }

        let lower = key.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return Url::parse(key)
                .map(MenuTarget::External)
                .map_err(|e| NavigationError::InvalidTarget(format!("{}: {}", key, e)));
        }

        if key.contains("://") {
            return Err(NavigationError::InvalidTarget(key.to_string()));
        }

        let path = if key.starts_with('/') {
            key.to_string()
        } else {
            format!("/{}", key)
        };

        Ok(MenuTarget::Internal(path))
    }

    pub fn is_external(&self) -> bool {
        matches!(self, MenuTarget::External(_))
    }
}
