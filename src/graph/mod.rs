//! Graph storage and the status-filtered view queries run against.

pub mod store;
pub mod view;

pub use store::{BuildError, BuildWarning, GraphStore};
pub use view::{ActiveView, ViewEdge, ViewLink, WeightKind};
