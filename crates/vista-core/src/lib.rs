//! Vista Core
//!
//! Central coordination layer for the workspace shell: one tab session, one
//! route table and one navigator, wired together at startup.

mod config;
mod error;
mod handle;
mod workspace;

pub use config::Config;
pub use error::CoreError;
pub use handle::WorkspaceHandle;
pub use workspace::Workspace;

// Re-export core components
pub use vista_navigation::{
    MemoryNavigator, MenuOutcome, MenuTarget, NavigationBinder, NavigationError, Navigator,
    PathOutcome, RouteEntry, RouteTable, TabTemplate, UNKNOWN_PAGE_LABEL,
};
pub use vista_tabs::{
    AddOutcome, SessionSnapshot, TabDescriptor, TabError, TabSession, TabSet, TabStripEvent,
    TabStripItem, TabStripView,
};
pub use vista_widgets::{
    ChartError, ChartHandle, ChartRenderer, ChartSlot, DataPoint, Dataset, RenderOutcome,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging. Output goes to stderr so stdout stays free for the tab strip.
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
