//! Dijkstra, Greedy and A* over the waypoint graph
//!
//! Same loop as the grid family, keyed by waypoint id. Start and goal enter
//! the graph through their nearest visible waypoint; the resulting waypoint
//! chain is bracketed by the true endpoints, smoothed and densified.

use std::time::Instant;

use crate::common::{polyline_length, GridNavError, GridNavResult, GridPos, PlanningResult};
use crate::navmesh::builder::NavMesh;
use crate::navmesh::funnel::smooth_path;
use crate::path_planning::search::{assemble, best_first, SearchSpace, Strategy, Successor};
use crate::utils::{densify, Grid};

struct WaypointSpace<'a> {
    mesh: &'a NavMesh,
    adjacency: Vec<Vec<(usize, f64)>>,
    goal: GridPos,
}

impl SearchSpace for WaypointSpace<'_> {
    type Node = usize;

    fn successors(&self, current: usize, _parent: Option<usize>, out: &mut Vec<Successor<usize>>) {
        out.extend(
            self.adjacency[current]
                .iter()
                .map(|&(next, cost)| Successor::new(next, current, cost)),
        );
    }

    fn heuristic(&self, node: usize) -> f64 {
        self.mesh.position(node).distance(&self.goal)
    }
}

/// Graph search over a navmesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavMeshSearch {
    strategy: Strategy,
}

impl NavMeshSearch {
    pub fn dijkstra() -> Self {
        Self { strategy: Strategy::Uniform }
    }

    pub fn greedy() -> Self {
        Self { strategy: Strategy::Greedy }
    }

    pub fn a_star() -> Self {
        Self { strategy: Strategy::Informed }
    }

    pub fn name(&self) -> &'static str {
        match self.strategy {
            Strategy::Uniform => "navmesh-dijkstra",
            Strategy::Greedy => "navmesh-greedy",
            Strategy::Informed => "navmesh-astar",
        }
    }

    pub fn plan(
        &self,
        grid: &Grid,
        mesh: &NavMesh,
        start: GridPos,
        goal: GridPos,
    ) -> GridNavResult<Option<PlanningResult>> {
        let timer = Instant::now();
        check_query(grid, mesh, start, goal)?;

        if start == goal {
            return Ok(Some(assemble(timer, vec![start], vec![start], Vec::new(), 0.0)));
        }

        let (Some(entry), Some(exit)) = (mesh.nearest_visible(grid, start), mesh.nearest_visible(grid, goal)) else {
            log::debug!("{}: no waypoint visible from {} or {}", self.name(), start, goal);
            return Ok(None);
        };

        let space = WaypointSpace {
            mesh,
            adjacency: mesh.adjacency(),
            goal: mesh.position(exit),
        };
        let outcome = best_first(&space, entry, exit, self.strategy);
        let explored: Vec<GridPos> = outcome.explored.iter().map(|&id| mesh.position(id)).collect();

        let Some(chain) = outcome.chain else {
            log::debug!(
                "{}: waypoint {} unreachable from {} after {} expansions",
                self.name(),
                exit,
                entry,
                explored.len()
            );
            return Ok(None);
        };

        let mut raw = Vec::with_capacity(chain.len() + 2);
        raw.push(start);
        raw.extend(chain.iter().map(|&id| mesh.position(id)));
        raw.push(goal);

        let result = finish_waypoint_path(grid, timer, raw, explored, self.strategy == Strategy::Greedy);
        log::debug!(
            "{}: {} waypoints smoothed to {}, cost {:.3}",
            self.name(),
            chain.len(),
            result.waypoints.len(),
            result.metrics.path_cost
        );
        Ok(Some(result))
    }
}

/// Endpoint and staleness checks shared by every navmesh planner
pub(crate) fn check_query(grid: &Grid, mesh: &NavMesh, start: GridPos, goal: GridPos) -> GridNavResult<()> {
    grid.check_endpoint(start)?;
    grid.check_endpoint(goal)?;
    if !mesh.is_current(grid) {
        return Err(GridNavError::StaleNavMesh);
    }
    Ok(())
}

/// Smooth a visible-chain polyline, densify it and package the result
///
/// `step_count` reports the densified move count instead of the Euclidean
/// length, matching the grid Greedy planner.
pub(crate) fn finish_waypoint_path(
    grid: &Grid,
    timer: Instant,
    mut raw: Vec<GridPos>,
    explored: Vec<GridPos>,
    step_count: bool,
) -> PlanningResult {
    raw.dedup();
    let waypoints = smooth_path(grid, &raw);
    let path = densify(&waypoints);
    let cost = if step_count {
        path.len().saturating_sub(1) as f64
    } else {
        polyline_length(&waypoints)
    };
    assemble(timer, path, waypoints, explored, cost)
}
