//! Dijkstra path planning on a 4-connected grid
//!
//! Uniform-cost search: the queue is ordered by accumulated cost alone, so
//! the first time the goal is popped its cost is optimal.

use crate::common::{GridNavResult, GridPlanner, GridPos, PlanningResult};
use crate::path_planning::grid_search::{plan_cardinal, CostReport, Heuristic};
use crate::path_planning::search::Strategy;
use crate::utils::Grid;

/// Dijkstra path planner
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraPlanner;

impl DijkstraPlanner {
    pub fn new() -> Self {
        DijkstraPlanner
    }
}

impl GridPlanner for DijkstraPlanner {
    fn plan(&self, grid: &Grid, start: GridPos, goal: GridPos) -> GridNavResult<Option<PlanningResult>> {
        plan_cardinal(
            self.name(),
            grid,
            start,
            goal,
            Strategy::Uniform,
            Heuristic::Zero,
            CostReport::Accumulated,
        )
    }

    fn name(&self) -> &'static str {
        "dijkstra"
    }
}
