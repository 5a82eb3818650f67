//! RRT over the navmesh
//!
//! Grows the same goal-biased tree as the grid planner, but draws its
//! samples from waypoint positions so the tree is pulled along the
//! open corridors the mesh already found. The tree polyline is smoothed
//! before densification.

use std::time::Instant;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::common::{GridNavResult, GridPos, PlanningResult};
use crate::navmesh::builder::NavMesh;
use crate::navmesh::search::{check_query, finish_waypoint_path};
use crate::path_planning::rrt::{grow_tree, RRTConfig};
use crate::utils::Grid;

/// RRT planner sampling waypoint positions
#[derive(Debug, Clone)]
pub struct NavMeshRRTPlanner {
    config: RRTConfig,
}

impl Default for NavMeshRRTPlanner {
    fn default() -> Self {
        Self::new(RRTConfig::navmesh())
    }
}

impl NavMeshRRTPlanner {
    pub fn new(config: RRTConfig) -> Self {
        NavMeshRRTPlanner { config }
    }

    pub fn config(&self) -> &RRTConfig {
        &self.config
    }

    pub fn plan(
        &self,
        grid: &Grid,
        mesh: &NavMesh,
        start: GridPos,
        goal: GridPos,
    ) -> GridNavResult<Option<PlanningResult>> {
        let timer = Instant::now();
        self.config.validate()?;
        check_query(grid, mesh, start, goal)?;

        let rows = grid.rows() as i32;
        let cols = grid.cols() as i32;
        let growth = grow_tree(grid, start, goal, &self.config, |rng| {
            match mesh.waypoints.choose(rng) {
                Some(waypoint) => waypoint.pos(),
                None => GridPos::new(rng.gen_range(0..rows), rng.gen_range(0..cols)),
            }
        });

        let Some(polyline) = growth.polyline else {
            log::debug!(
                "navmesh-rrt: cannot find path within {} iterations ({} tree nodes)",
                self.config.max_iter,
                growth.explored.len()
            );
            return Ok(None);
        };

        let result = finish_waypoint_path(grid, timer, polyline, growth.explored, false);
        log::debug!(
            "navmesh-rrt: reached {} with {} tree nodes, cost {:.3}",
            goal,
            result.explored.len(),
            result.metrics.path_cost
        );
        Ok(Some(result))
    }
}
