//! Theta* path planning algorithm
//!
//! Theta* is an any-angle path planning algorithm that extends A* by
//! allowing paths to connect any two visible nodes, not just grid neighbors.
//! This produces shorter, more natural paths compared to standard A*.
//!
//! Key features:
//! - Line-of-sight checks to skip intermediate nodes
//! - Produces any-angle paths (not restricted to grid directions)
//! - Optimal or near-optimal path lengths
//!
//! The any-angle polyline is reported as `waypoints`; `path` is its
//! rasterization with the same line used for the visibility test.
//!
//! Reference: Nash, A., Daniel, K., Koenig, S., & Felner, A. (2007).
//! "Theta*: Any-Angle Path Planning on Grids"

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::common::{GridNavError, GridNavResult, GridPlanner, GridPos, PlanningResult};
use crate::path_planning::search::{assemble, best_first, SearchSpace, Strategy, Successor};
use crate::utils::{densify, Grid};

/// Configuration for Theta* planner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThetaStarConfig {
    /// Heuristic weight (1.0 = optimal, >1.0 = faster but suboptimal)
    pub heuristic_weight: f64,
}

impl Default for ThetaStarConfig {
    fn default() -> Self {
        Self {
            heuristic_weight: 1.0,
        }
    }
}

impl ThetaStarConfig {
    pub fn validate(&self) -> GridNavResult<()> {
        if !(self.heuristic_weight >= 1.0) {
            return Err(GridNavError::Config(format!(
                "theta_star heuristic_weight must be >= 1.0, got {}",
                self.heuristic_weight
            )));
        }
        Ok(())
    }
}

/// Theta* path planner
///
/// Theta* extends A* by checking line-of-sight between a node and its
/// grandparent. If there's a clear line-of-sight, the path skips the
/// parent node, resulting in shorter, more direct paths.
#[derive(Debug, Clone, Default)]
pub struct ThetaStarPlanner {
    config: ThetaStarConfig,
}

impl ThetaStarPlanner {
    pub fn new(config: ThetaStarConfig) -> Self {
        ThetaStarPlanner { config }
    }
}

struct AnyAngleSpace<'a> {
    grid: &'a Grid,
    goal: GridPos,
    heuristic_weight: f64,
}

impl SearchSpace for AnyAngleSpace<'_> {
    type Node = GridPos;

    fn successors(&self, current: GridPos, parent: Option<GridPos>, out: &mut Vec<Successor<GridPos>>) {
        for neighbor in self.grid.neighbors8(current) {
            let succ = match parent {
                // Path 2: connect directly to the grandparent
                Some(p) if self.grid.line_of_sight(p, neighbor) => {
                    Successor::new(neighbor, p, p.distance(&neighbor))
                }
                // Path 1: standard A* step through the current node
                _ => Successor::new(neighbor, current, current.distance(&neighbor)),
            };
            out.push(succ);
        }
    }

    fn heuristic(&self, node: GridPos) -> f64 {
        self.heuristic_weight * node.distance(&self.goal)
    }
}

impl GridPlanner for ThetaStarPlanner {
    fn plan(&self, grid: &Grid, start: GridPos, goal: GridPos) -> GridNavResult<Option<PlanningResult>> {
        let timer = Instant::now();
        self.config.validate()?;
        grid.check_endpoint(start)?;
        grid.check_endpoint(goal)?;

        let space = AnyAngleSpace {
            grid,
            goal,
            heuristic_weight: self.config.heuristic_weight,
        };
        let outcome = best_first(&space, start, goal, Strategy::Informed);

        let Some(vertices) = outcome.chain else {
            log::debug!("theta*: no path from {} to {} after {} expansions", start, goal, outcome.explored.len());
            return Ok(None);
        };

        let path = densify(&vertices);
        log::debug!(
            "theta*: reached {} with {} vertices, length {:.3}",
            goal,
            vertices.len(),
            outcome.cost
        );
        Ok(Some(assemble(timer, path, vertices, outcome.explored, outcome.cost)))
    }

    fn name(&self) -> &'static str {
        "theta*"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::polyline_length;
    use crate::path_planning::assertions::{assert_legal_path, assert_visible_waypoints};
    use crate::path_planning::AStarPlanner;
    use crate::utils::grid_map::test_support::*;

    fn plan_both(grid: &Grid, start: GridPos, goal: GridPos) -> (PlanningResult, PlanningResult) {
        let theta = ThetaStarPlanner::default().plan(grid, start, goal).unwrap().unwrap();
        let a_star = AStarPlanner::new().plan(grid, start, goal).unwrap().unwrap();
        (theta, a_star)
    }

    #[test]
    fn test_theta_star_open_grid_is_straight() {
        let grid = empty(20, 20);
        let start = GridPos::new(1, 1);
        let goal = GridPos::new(15, 18);
        let (theta, a_star) = plan_both(&grid, start, goal);

        assert_legal_path(&grid, &theta, start, goal, false);
        assert_eq!(theta.waypoints, vec![start, goal]);
        assert!((theta.metrics.path_cost - start.distance(&goal)).abs() < 1e-9);
        assert!(theta.metrics.path_cost < a_star.metrics.path_cost);
    }

    #[test]
    fn test_theta_star_dominates_a_star_around_wall() {
        let grid = wall_with_gap();
        let start = GridPos::new(5, 2);
        let goal = GridPos::new(5, 8);
        let (theta, a_star) = plan_both(&grid, start, goal);

        assert_legal_path(&grid, &theta, start, goal, false);
        assert_visible_waypoints(&grid, &theta);
        assert!(theta.metrics.path_cost <= a_star.metrics.path_cost + 1e-9);
        assert!((polyline_length(&theta.waypoints) - theta.metrics.path_cost).abs() < 1e-9);
    }

    #[test]
    fn test_theta_star_maze() {
        let grid = map("
..........
.####.....
....#..#..
.##.#..#..
..#....#..
..######..
..........
");
        let start = GridPos::new(0, 0);
        let goal = GridPos::new(4, 5);
        let (theta, a_star) = plan_both(&grid, start, goal);
        assert_legal_path(&grid, &theta, start, goal, false);
        assert_visible_waypoints(&grid, &theta);
        assert!(theta.metrics.path_cost <= a_star.metrics.path_cost + 1e-9);
    }

    #[test]
    fn test_theta_star_no_path() {
        let grid = partitioned();
        let result = ThetaStarPlanner::default()
            .plan(&grid, GridPos::new(0, 0), GridPos::new(9, 9))
            .unwrap();
        assert!(result.is_none());
    }
}
