//! Tab error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TabError {
    #[error("Tab not found: {0}")]
    NotFound(String),

    #[error("Tab key already open for another path: {key} (open at {open_path}, requested {path})")]
    DuplicateKey {
        key: String,
        open_path: String,
        path: String,
    },

    #[error("Tab key cannot be empty")]
    EmptyKey,

    #[error("Invalid tab path: {0}")]
    InvalidPath(String),
}
