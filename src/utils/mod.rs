//! Utility modules for gridnav

pub mod geometry;
pub mod grid_map;
pub mod priority_queue;

pub use geometry::{densify, raster_line};
pub use grid_map::*;
pub use priority_queue::PriorityQueue;
