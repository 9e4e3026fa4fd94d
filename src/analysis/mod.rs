//! Graph algorithms that answer topology queries.
//!
//! Everything in here is pure: each function takes a prebuilt
//! [`ActiveView`](crate::graph::ActiveView) and dense view indices, and
//! reports absence with plain values. Mapping user-facing keys to indices
//! and absences to errors is the engine's job.

pub mod max_flow;
pub mod shortest_path;
pub mod spanning_tree;
pub mod union_find;

pub use max_flow::maximum_flow;
pub use shortest_path::shortest_path;
pub use spanning_tree::minimum_spanning_forest;
pub use union_find::DisjointSet;
