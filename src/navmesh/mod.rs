//! Navigation mesh representation
//!
//! A sparse waypoint visibility graph derived from the grid, the planners
//! that search it and the smoother applied to their output.

pub mod builder;
pub mod funnel;
pub mod rrt;
pub mod search;

pub use builder::{Edge, NavMesh, NavMeshConfig, Waypoint};
pub use funnel::{funnel_indices, smooth_path};
pub use rrt::NavMeshRRTPlanner;
pub use search::NavMeshSearch;
