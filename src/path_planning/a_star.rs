//! A* path planning on a 4-connected grid
//!
//! Unit step cost with the Manhattan distance as an admissible, consistent
//! heuristic.

use crate::common::{GridNavResult, GridPlanner, GridPos, PlanningResult};
use crate::path_planning::grid_search::{plan_cardinal, CostReport, Heuristic};
use crate::path_planning::search::Strategy;
use crate::utils::Grid;

/// A* path planner
#[derive(Debug, Clone, Copy, Default)]
pub struct AStarPlanner;

impl AStarPlanner {
    pub fn new() -> Self {
        AStarPlanner
    }
}

impl GridPlanner for AStarPlanner {
    fn plan(&self, grid: &Grid, start: GridPos, goal: GridPos) -> GridNavResult<Option<PlanningResult>> {
        plan_cardinal(
            self.name(),
            grid,
            start,
            goal,
            Strategy::Informed,
            Heuristic::Manhattan,
            CostReport::Accumulated,
        )
    }

    fn name(&self) -> &'static str {
        "astar"
    }
}
