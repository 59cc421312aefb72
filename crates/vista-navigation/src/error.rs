//! Navigation error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("Invalid navigation target: {0}")]
    InvalidTarget(String),

    #[error("Duplicate route {field}: {value}")]
    DuplicateRoute { field: &'static str, value: String },

    #[error("Route table parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Tab error: {0}")]
    Tab(#[from] vista_tabs::TabError),
}
