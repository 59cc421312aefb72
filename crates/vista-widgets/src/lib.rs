//! Vista Widgets
//!
//! Chart widgets hold at most one live chart per container. Drawing is
//! delegated to a `ChartRenderer`; failures stay inside the widget.

mod chart;
mod error;

pub use chart::{ChartHandle, ChartRenderer, ChartSlot, DataPoint, Dataset, RenderOutcome};
pub use error::ChartError;

pub type Result<T> = std::result::Result<T, ChartError>;
