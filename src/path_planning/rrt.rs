//! RRT (Rapidly-exploring Random Tree) path planning algorithm
//!
//! Sampling-based path planning algorithm that builds a tree by
//! randomly sampling the grid. Tree growth is shared with the navmesh
//! variant, which only swaps the sampler and the post-processing.
//!
//! RRT is neither optimal nor deterministic unless a seed is configured.

use std::time::Instant;

use itertools::Itertools;
use nalgebra::Vector2;
use ordered_float::OrderedFloat;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::common::{polyline_length, GridNavError, GridNavResult, GridPlanner, GridPos, PlanningResult};
use crate::path_planning::search::assemble;
use crate::utils::{densify, Grid};

/// Configuration for RRT planner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RRTConfig {
    /// Maximum extension per iteration, in cells
    pub step_size: f64,
    /// Probability of sampling the goal directly (0.0 - 1.0)
    pub goal_sample_rate: f64,
    /// Distance at which the goal is attached to the tree
    pub goal_threshold: f64,
    /// Maximum iterations
    pub max_iter: usize,
    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for RRTConfig {
    fn default() -> Self {
        Self {
            step_size: 3.0,
            goal_sample_rate: 0.1,
            goal_threshold: 2.0,
            max_iter: 5000,
            seed: None,
        }
    }
}

impl RRTConfig {
    /// Defaults for the navmesh variant, which leans harder on the goal
    pub fn navmesh() -> Self {
        Self {
            goal_sample_rate: 0.2,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> GridNavResult<()> {
        if !(self.step_size >= 1.0) {
            return Err(GridNavError::Config(format!(
                "rrt step_size must be >= 1.0, got {}",
                self.step_size
            )));
        }
        if !(0.0..=1.0).contains(&self.goal_sample_rate) {
            return Err(GridNavError::Config(format!(
                "rrt goal_sample_rate must be within [0, 1], got {}",
                self.goal_sample_rate
            )));
        }
        if !(self.goal_threshold >= 0.0) {
            return Err(GridNavError::Config(format!(
                "rrt goal_threshold must be non-negative, got {}",
                self.goal_threshold
            )));
        }
        Ok(())
    }
}

/// Internal node for RRT tree
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RRTNode {
    pub pos: GridPos,
    pub parent: Option<usize>,
}

/// Result of growing one tree
#[derive(Debug, Clone)]
pub(crate) struct TreeGrowth {
    /// Root-to-goal polyline through tree nodes, `None` on budget exhaustion
    pub polyline: Option<Vec<GridPos>>,
    /// Tree nodes in insertion order, root first
    pub explored: Vec<GridPos>,
}

pub(crate) fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Move from `from` toward `target` by at most `step_size`, snapped to a cell
fn steer(from: GridPos, target: GridPos, step_size: f64) -> GridPos {
    let a: Vector2<f64> = from.to_vector();
    let delta = target.to_vector() - a;
    let dist = delta.norm();
    if dist <= step_size {
        target
    } else {
        GridPos::from_vector(&(a + delta * (step_size / dist)))
    }
}

fn nearest_index(tree: &[RRTNode], target: GridPos) -> usize {
    tree.iter()
        .position_min_by_key(|node| OrderedFloat(node.pos.distance(&target)))
        .unwrap_or(0)
}

fn trace_back(tree: &[RRTNode], leaf: usize, goal: GridPos) -> Vec<GridPos> {
    let mut points = Vec::new();
    if tree[leaf].pos != goal {
        points.push(goal);
    }
    let mut node_index = Some(leaf);
    while let Some(index) = node_index {
        points.push(tree[index].pos);
        node_index = tree[index].parent;
    }
    points.reverse();
    points
}

/// Grow a goal-biased tree from `start` until it can see `goal`
///
/// `sample` draws the non-goal targets.
pub(crate) fn grow_tree<F>(
    grid: &Grid,
    start: GridPos,
    goal: GridPos,
    config: &RRTConfig,
    mut sample: F,
) -> TreeGrowth
where
    F: FnMut(&mut StdRng) -> GridPos,
{
    let mut rng = make_rng(config.seed);
    let mut tree = vec![RRTNode { pos: start, parent: None }];
    let mut explored = vec![start];

    let reaches_goal = |pos: GridPos| pos.distance(&goal) <= config.goal_threshold && grid.line_of_sight(pos, goal);

    if reaches_goal(start) {
        return TreeGrowth {
            polyline: Some(trace_back(&tree, 0, goal)),
            explored,
        };
    }

    let goal_rate = config.goal_sample_rate.clamp(0.0, 1.0);
    for _ in 0..config.max_iter {
        let target = if rng.gen_bool(goal_rate) { goal } else { sample(&mut rng) };

        let nearest = nearest_index(&tree, target);
        let from = tree[nearest].pos;
        let candidate = steer(from, target, config.step_size);

        if candidate == from || !grid.is_free(candidate) || !grid.line_of_sight(from, candidate) {
            continue;
        }

        tree.push(RRTNode {
            pos: candidate,
            parent: Some(nearest),
        });
        explored.push(candidate);

        if reaches_goal(candidate) {
            let leaf = tree.len() - 1;
            return TreeGrowth {
                polyline: Some(trace_back(&tree, leaf, goal)),
                explored,
            };
        }
    }

    TreeGrowth {
        polyline: None,
        explored,
    }
}

/// RRT path planner over the grid
#[derive(Debug, Clone, Default)]
pub struct RRTPlanner {
    config: RRTConfig,
}

impl RRTPlanner {
    pub fn new(config: RRTConfig) -> Self {
        RRTPlanner { config }
    }

    pub fn config(&self) -> &RRTConfig {
        &self.config
    }
}

impl GridPlanner for RRTPlanner {
    fn plan(&self, grid: &Grid, start: GridPos, goal: GridPos) -> GridNavResult<Option<PlanningResult>> {
        let timer = Instant::now();
        self.config.validate()?;
        grid.check_endpoint(start)?;
        grid.check_endpoint(goal)?;

        let rows = grid.rows() as i32;
        let cols = grid.cols() as i32;
        let growth = grow_tree(grid, start, goal, &self.config, |rng| {
            GridPos::new(rng.gen_range(0..rows), rng.gen_range(0..cols))
        });

        let Some(polyline) = growth.polyline else {
            log::debug!(
                "rrt: cannot find path within {} iterations ({} tree nodes)",
                self.config.max_iter,
                growth.explored.len()
            );
            return Ok(None);
        };

        let cost = polyline_length(&polyline);
        let path = densify(&polyline);
        log::debug!("rrt: reached {} with {} tree nodes", goal, growth.explored.len());
        Ok(Some(assemble(timer, path, polyline, growth.explored, cost)))
    }

    fn name(&self) -> &'static str {
        "rrt"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path_planning::assertions::{assert_legal_path, assert_visible_waypoints};
    use crate::utils::grid_map::test_support::*;

    fn seeded(seed: u64) -> RRTPlanner {
        RRTPlanner::new(RRTConfig {
            seed: Some(seed),
            ..Default::default()
        })
    }

    #[test]
    fn test_rrt_config_default() {
        let config = RRTConfig::default();
        assert_eq!(config.step_size, 3.0);
        assert_eq!(config.max_iter, 5000);
        assert_eq!(RRTConfig::navmesh().goal_sample_rate, 0.2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rrt_config_validation() {
        let bad_rate = RRTConfig {
            goal_sample_rate: 1.5,
            ..Default::default()
        };
        assert!(bad_rate.validate().is_err());
        let bad_step = RRTConfig {
            step_size: 0.2,
            ..Default::default()
        };
        assert!(bad_step.validate().is_err());
    }

    #[test]
    fn test_steer() {
        let from = GridPos::new(0, 0);
        assert_eq!(steer(from, GridPos::new(0, 10), 3.0), GridPos::new(0, 3));
        assert_eq!(steer(from, GridPos::new(1, 1), 3.0), GridPos::new(1, 1));
        assert_eq!(steer(from, GridPos::new(10, 10), 3.0), GridPos::new(2, 2));
    }

    #[test]
    fn test_rrt_finds_feasible_path() {
        let grid = wall_with_gap();
        let start = GridPos::new(5, 2);
        let goal = GridPos::new(5, 8);

        for seed in 0..5 {
            let result = seeded(seed).plan(&grid, start, goal).unwrap().unwrap();
            assert_legal_path(&grid, &result, start, goal, false);
            assert_visible_waypoints(&grid, &result);
            assert!(result.metrics.path_cost >= start.distance(&goal));
        }
    }

    #[test]
    fn test_rrt_seed_is_reproducible() {
        let grid = empty(30, 30);
        let start = GridPos::new(0, 0);
        let goal = GridPos::new(29, 29);
        let a = seeded(7).plan(&grid, start, goal).unwrap().unwrap();
        let b = seeded(7).plan(&grid, start, goal).unwrap().unwrap();
        assert_eq!(a.path, b.path);
        assert_eq!(a.explored, b.explored);
    }

    #[test]
    fn test_rrt_start_near_goal() {
        let grid = empty(5, 5);
        let start = GridPos::new(2, 2);
        let goal = GridPos::new(2, 3);
        let result = seeded(1).plan(&grid, start, goal).unwrap().unwrap();
        assert_eq!(result.path, vec![start, goal]);
        assert_eq!(result.metrics.nodes_explored, 1);
    }

    #[test]
    fn test_rrt_budget_exhaustion() {
        let grid = partitioned();
        let planner = RRTPlanner::new(RRTConfig {
            max_iter: 300,
            seed: Some(3),
            ..Default::default()
        });
        let result = planner.plan(&grid, GridPos::new(0, 0), GridPos::new(9, 9)).unwrap();
        assert!(result.is_none());
    }
}
