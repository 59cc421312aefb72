//! Vista Tab Sessions
//!
//! The tab strip of the workspace is an ordered set of open views plus one
//! active key. Tabs are opened by navigation, closed by the user, and the
//! home tab is pinned for the lifetime of the session.

mod error;
mod session;
mod set;
mod strip;
mod tab;

pub use error::TabError;
pub use session::{SessionSnapshot, TabSession};
pub use set::{AddOutcome, TabSet};
pub use strip::{TabStripEvent, TabStripItem, TabStripView};
pub use tab::TabDescriptor;

pub type Result<T> = std::result::Result<T, TabError>;
