//! Widget error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Chart render failed: {0}")]
    Render(String),

    #[error("Chart container id cannot be empty")]
    EmptyContainer,

    #[error("Dataset parse error: {0}")]
    Dataset(#[from] serde_json::Error),
}
