//! gridnav - grid and navmesh path planning for many agents
//!
//! This crate answers start/goal queries over a 2D occupancy grid, either
//! directly on the cells or on a sparse waypoint mesh derived from them,
//! and reports the path, the exploration trace and search metrics.

// Core modules
pub mod common;
pub mod utils;

// Planning modules
pub mod path_planning;
pub mod navmesh;

// Dispatch and configuration
pub mod config;
pub mod runner;

// Re-export common types for convenience
pub use common::{GridPos, Metrics, PlanningResult, polyline_length};
pub use common::GridPlanner;
pub use common::{GridNavError, GridNavResult};
pub use config::PlannerConfig;
pub use navmesh::{NavMesh, NavMeshConfig};
pub use runner::{plan_agents, plan_grid, plan_navmesh, AgentQuery, Algorithm, NavMeshPlan, Representation};
pub use utils::Grid;
