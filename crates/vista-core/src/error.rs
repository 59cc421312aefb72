//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Tab error: {0}")]
    Tab(#[from] vista_tabs::TabError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] vista_navigation::NavigationError),

    #[error("Chart error: {0}")]
    Chart(#[from] vista_widgets::ChartError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Workspace not initialized")]
    NotInitialized,
}
