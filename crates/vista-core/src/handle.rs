//! Workspace provider handle
//!
//! Consumers get the workspace through a handle instead of a global. Using
//! the handle before a workspace has been installed is a wiring mistake and
//! fails immediately with `NotInitialized`.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::error::CoreError;
use crate::workspace::Workspace;
use crate::Result;

pub struct WorkspaceHandle {
    workspace: Arc<RwLock<Option<Workspace>>>,
}

impl WorkspaceHandle {
    /// Handle with no workspace installed yet
    pub fn new() -> Self {
        Self {
            workspace: Arc::new(RwLock::new(None)),
        }
    }

    pub fn install(&self, workspace: Workspace) {
        tracing::debug!(session_id = %workspace.session().id(), "Installed workspace");
        *self.workspace.write() = Some(workspace);
    }

    pub fn is_installed(&self) -> bool {
        self.workspace.read().is_some()
    }

    /// Remove and return the installed workspace
    pub fn take(&self) -> Option<Workspace> {
        self.workspace.write().take()
    }

    pub fn with_workspace<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Workspace) -> Result<T>,
    {
        let guard = self.workspace.read();
        match guard.as_ref() {
            Some(workspace) => f(workspace),
            None => Err(CoreError::NotInitialized),
        }
    }
}

impl Default for WorkspaceHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for WorkspaceHandle {
    fn clone(&self) -> Self {
        Self {
            workspace: Arc::clone(&self.workspace),
        }
    }
}
