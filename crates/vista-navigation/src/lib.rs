//! Vista Navigation
//!
//! Keeps the tab session and the current URL path in step:
//! 1. A path change opens or re-activates the tab for that path
//! 2. Selecting a tab pushes its path
//! 3. Selecting a menu entry opens its tab, or an external page

mod binder;
mod error;
mod navigator;
mod routes;
mod target;

pub use binder::{MenuOutcome, NavigationBinder, PathOutcome};
pub use error::NavigationError;
pub use navigator::{MemoryNavigator, Navigator};
pub use routes::{RouteEntry, RouteTable, TabTemplate, UNKNOWN_PAGE_LABEL};
pub use target::MenuTarget;

pub type Result<T> = std::result::Result<T, NavigationError>;
