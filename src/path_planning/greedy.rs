//! Greedy Best-First Search on a 4-connected grid
//!
//! Orders the queue by the Manhattan estimate alone and never revisits a
//! reached cell, so it is fast but not optimal. `path_cost` is reported as
//! the step count of the returned path.

use crate::common::{GridNavResult, GridPlanner, GridPos, PlanningResult};
use crate::path_planning::grid_search::{plan_cardinal, CostReport, Heuristic};
use crate::path_planning::search::Strategy;
use crate::utils::Grid;

/// Greedy Best-First path planner
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyPlanner;

impl GreedyPlanner {
    pub fn new() -> Self {
        GreedyPlanner
    }
}

impl GridPlanner for GreedyPlanner {
    fn plan(&self, grid: &Grid, start: GridPos, goal: GridPos) -> GridNavResult<Option<PlanningResult>> {
        plan_cardinal(
            self.name(),
            grid,
            start,
            goal,
            Strategy::Greedy,
            Heuristic::Manhattan,
            CostReport::StepCount,
        )
    }

    fn name(&self) -> &'static str {
        "greedy"
    }
}
