//! Navigation capability
//!
//! The binder never touches the URL directly; it asks a `Navigator`.
//! `MemoryNavigator` is an in-process router with a back/forward stack that
//! publishes every path change on a watch channel.

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use url::Url;

pub trait Navigator: Send + Sync {
    /// Path currently shown
    fn current_path(&self) -> String;

    /// Push a path without a full reload. Fire-and-forget.
    fn navigate_to(&self, path: &str);

    /// Open an external page in a new browsing context
    fn open_external(&self, url: &Url);
}

#[derive(Debug)]
struct History {
    entries: Vec<String>,
    index: usize,
    external: Vec<Url>,
}

pub struct MemoryNavigator {
    history: Arc<Mutex<History>>,
    paths: Arc<watch::Sender<String>>,
}

impl MemoryNavigator {
    pub fn new(start_path: impl Into<String>) -> Self {
        let start_path = start_path.into();
        let (paths, _) = watch::channel(start_path.clone());

        Self {
            history: Arc::new(Mutex::new(History {
                entries: vec![start_path],
                index: 0,
                external: Vec::new(),
            })),
            paths: Arc::new(paths),
        }
    }

    /// Receive every path change, starting from the current path
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.paths.subscribe()
    }

    /// Step back in history. Returns false at the oldest entry.
    pub fn back(&self) -> bool {
        let path = {
            let mut history = self.history.lock();
            if history.index == 0 {
                return false;
            }
            history.index -= 1;
            history.entries[history.index].clone()
        };

        tracing::debug!(path = %path, "History back");
        self.paths.send_replace(path);
        true
    }

    /// Step forward in history. Returns false at the newest entry.
    pub fn forward(&self) -> bool {
        let path = {
            let mut history = self.history.lock();
            if history.index + 1 >= history.entries.len() {
                return false;
            }
            history.index += 1;
            history.entries[history.index].clone()
        };

        tracing::debug!(path = %path, "History forward");
        self.paths.send_replace(path);
        true
    }

    pub fn can_go_back(&self) -> bool {
        self.history.lock().index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        let history = self.history.lock();
        history.index + 1 < history.entries.len()
    }

    /// Every path pushed so far, oldest first
    pub fn history(&self) -> Vec<String> {
        self.history.lock().entries.clone()
    }

    /// External pages opened so far
    pub fn opened_external(&self) -> Vec<Url> {
        self.history.lock().external.clone()
    }
}

impl Navigator for MemoryNavigator {
    fn current_path(&self) -> String {
        let history = self.history.lock();
        history.entries[history.index].clone()
    }

    fn navigate_to(&self, path: &str) {
        {
            let mut history = self.history.lock();
            let keep = history.index + 1;
            history.entries.truncate(keep);
            history.entries.push(path.to_string());
            history.index = keep;
        }

        tracing::debug!(path = %path, "Pushed path");
        self.paths.send_replace(path.to_string());
    }

    fn open_external(&self, url: &Url) {
        tracing::info!(url = %url, "Opening external page");
        self.history.lock().external.push(url.clone());
    }
}

impl Clone for MemoryNavigator {
    fn clone(&self) -> Self {
        Self {
            history: Arc::clone(&self.history),
            paths: Arc::clone(&self.paths),
        }
    }
}

impl<N: Navigator + ?Sized> Navigator for Arc<N> {
    fn current_path(&self) -> String {
        (**self).current_path()
    }

    fn navigate_to(&self, path: &str) {
        (**self).navigate_to(path)
    }

    fn open_external(&self, url: &Url) {
        (**self).open_external(url)
    }
}
