//! Jump Point Search (JPS) path planning algorithm
//!
//! JPS is an optimization of A* for uniform-cost grids that reduces the
//! number of nodes expanded by identifying "jump points" - nodes that
//! have forced neighbors or are the goal.
//!
//! This variant never cuts corners: a diagonal step needs both of its
//! cardinal components free, so every diagonal run can be walked as a
//! staircase of unit moves. Jump points are joined by their Manhattan
//! distance, which keeps the path cost equal to that of 4-connected A*.
//!
//! Reference: Harabor, D., & Grastien, A. (2011). Online Graph Pruning for
//! Pathfinding on Grid Maps.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::common::{GridNavError, GridNavResult, GridPlanner, GridPos, PlanningResult};
use crate::path_planning::search::{assemble, best_first, SearchSpace, Strategy, Successor};
use crate::utils::Grid;

/// Configuration for JPS planner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JPSConfig {
    /// Heuristic weight (1.0 = optimal, >1.0 = faster but suboptimal)
    pub heuristic_weight: f64,
}

impl Default for JPSConfig {
    fn default() -> Self {
        Self {
            heuristic_weight: 1.0,
        }
    }
}

impl JPSConfig {
    pub fn validate(&self) -> GridNavResult<()> {
        if !(self.heuristic_weight >= 1.0) {
            return Err(GridNavError::Config(format!(
                "jps heuristic_weight must be >= 1.0, got {}",
                self.heuristic_weight
            )));
        }
        Ok(())
    }
}

/// Direction for movement in JPS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Direction {
    dr: i32,
    dc: i32,
}

impl Direction {
    const fn new(dr: i32, dc: i32) -> Self {
        Self { dr, dc }
    }

    fn is_diagonal(&self) -> bool {
        self.dr != 0 && self.dc != 0
    }
}

const ALL_DIRECTIONS: [Direction; 8] = [
    Direction::new(-1, 0),
    Direction::new(0, 1),
    Direction::new(1, 0),
    Direction::new(0, -1),
    Direction::new(-1, 1),
    Direction::new(1, 1),
    Direction::new(1, -1),
    Direction::new(-1, -1),
];

/// Jump Point Search path planner
#[derive(Debug, Clone, Default)]
pub struct JPSPlanner {
    config: JPSConfig,
}

impl JPSPlanner {
    pub fn new(config: JPSConfig) -> Self {
        JPSPlanner { config }
    }
}

struct JumpSpace<'a> {
    grid: &'a Grid,
    goal: GridPos,
    heuristic_weight: f64,
    /// Upper bound on the length of any single scan
    max_scan: usize,
}

impl JumpSpace<'_> {
    fn can_step(&self, from: GridPos, dir: Direction) -> bool {
        if !self.grid.is_free(from.offset(dir.dr, dir.dc)) {
            return false;
        }
        if dir.is_diagonal() {
            // No corner cutting
            return self.grid.is_free(from.offset(dir.dr, 0)) && self.grid.is_free(from.offset(0, dir.dc));
        }
        true
    }

    /// Check if a position reached along a cardinal direction has forced neighbors
    fn has_forced_neighbor(&self, pos: GridPos, dir: Direction) -> bool {
        let grid = self.grid;
        if dir.dc != 0 {
            // Moving horizontally: a free side cell whose predecessor column is blocked
            [-1, 1].iter().any(|&side| {
                grid.is_free(pos.offset(side, 0)) && !grid.is_free(pos.offset(side, -dir.dc))
            })
        } else {
            // Moving vertically
            [-1, 1].iter().any(|&side| {
                grid.is_free(pos.offset(0, side)) && !grid.is_free(pos.offset(-dir.dr, side))
            })
        }
    }

    /// Walk a cardinal direction until the goal, a forced neighbor or a wall
    fn scan_cardinal(&self, from: GridPos, dir: Direction) -> Option<GridPos> {
        let mut current = from;
        for _ in 0..self.max_scan {
            if !self.can_step(current, dir) {
                return None;
            }
            let next = current.offset(dir.dr, dir.dc);
            if next == self.goal || self.has_forced_neighbor(next, dir) {
                return Some(next);
            }
            current = next;
        }
        None
    }

    /// Walk a diagonal, probing both cardinal components at every step
    fn scan_diagonal(&self, from: GridPos, dir: Direction) -> Option<GridPos> {
        let horizontal = Direction::new(0, dir.dc);
        let vertical = Direction::new(dir.dr, 0);
        let mut current = from;
        for _ in 0..self.max_scan {
            if !self.can_step(current, dir) {
                return None;
            }
            let next = current.offset(dir.dr, dir.dc);
            if next == self.goal
                || self.scan_cardinal(next, horizontal).is_some()
                || self.scan_cardinal(next, vertical).is_some()
            {
                return Some(next);
            }
            current = next;
        }
        None
    }

    /// Jump in a given direction until we find a jump point or hit an obstacle
    fn jump(&self, from: GridPos, dir: Direction) -> Option<GridPos> {
        if dir.is_diagonal() {
            self.scan_diagonal(from, dir)
        } else {
            self.scan_cardinal(from, dir)
        }
    }
}

impl SearchSpace for JumpSpace<'_> {
    type Node = GridPos;

    fn successors(&self, current: GridPos, _parent: Option<GridPos>, out: &mut Vec<Successor<GridPos>>) {
        for &dir in &ALL_DIRECTIONS {
            if let Some(jump_point) = self.jump(current, dir) {
                out.push(Successor::new(
                    jump_point,
                    current,
                    current.manhattan(&jump_point) as f64,
                ));
            }
        }
    }

    fn heuristic(&self, node: GridPos) -> f64 {
        self.heuristic_weight * node.manhattan(&self.goal) as f64
    }
}

/// Interpolate consecutive jump points with unit moves
///
/// Diagonal runs become column-then-row staircases; the intermediate cell
/// is free because diagonal steps never cut corners.
fn build_path(jump_points: &[GridPos]) -> Vec<GridPos> {
    let mut points = Vec::new();
    let Some(&first) = jump_points.first() else {
        return points;
    };
    points.push(first);

    for segment in jump_points.windows(2) {
        let target = segment[1];
        let mut current = segment[0];
        let dr = (target.row - current.row).signum();
        let dc = (target.col - current.col).signum();

        while current != target {
            if current.col != target.col {
                current = current.offset(0, dc);
                points.push(current);
            }
            if current.row != target.row {
                current = current.offset(dr, 0);
                points.push(current);
            }
        }
    }

    points
}

impl GridPlanner for JPSPlanner {
    fn plan(&self, grid: &Grid, start: GridPos, goal: GridPos) -> GridNavResult<Option<PlanningResult>> {
        let timer = Instant::now();
        self.config.validate()?;
        grid.check_endpoint(start)?;
        grid.check_endpoint(goal)?;

        let space = JumpSpace {
            grid,
            goal,
            heuristic_weight: self.config.heuristic_weight,
            max_scan: grid.rows() + grid.cols(),
        };
        let outcome = best_first(&space, start, goal, Strategy::Informed);

        let Some(jump_points) = outcome.chain else {
            log::debug!("jps: no path from {} to {} after {} jump points", start, goal, outcome.explored.len());
            return Ok(None);
        };

        let path = build_path(&jump_points);
        log::debug!(
            "jps: reached {} through {} jump points, {} cells",
            goal,
            jump_points.len(),
            path.len()
        );
        Ok(Some(assemble(timer, path, jump_points, outcome.explored, outcome.cost)))
    }

    fn name(&self) -> &'static str {
        "jps"
    }
}
