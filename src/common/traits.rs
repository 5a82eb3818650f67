//! Common traits defining interfaces for planning algorithms

use crate::common::error::GridNavResult;
use crate::common::types::{GridPos, PlanningResult};
use crate::utils::Grid;

/// Trait for grid-based path planning algorithms
///
/// `Ok(None)` means the query is well-formed but has no solution.
pub trait GridPlanner {
    /// Plan a path on `grid` from start to goal
    fn plan(&self, grid: &Grid, start: GridPos, goal: GridPos)
        -> GridNavResult<Option<PlanningResult>>;

    /// Short identifier used in log lines
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::Metrics;

    // Test that the trait is object safe and usable behind a reference
    struct StraightLine;

    impl GridPlanner for StraightLine {
        fn plan(
            &self,
            _grid: &Grid,
            start: GridPos,
            goal: GridPos,
        ) -> GridNavResult<Option<PlanningResult>> {
            Ok(Some(PlanningResult {
                path: vec![start, goal],
                waypoints: vec![start, goal],
                explored: Vec::new(),
                metrics: Metrics::default(),
            }))
        }

        fn name(&self) -> &'static str {
            "straight"
        }
    }

    #[test]
    fn test_grid_planner_trait() {
        let grid = Grid::new(2, 2).unwrap();
        let planner: &dyn GridPlanner = &StraightLine;
        let result = planner.plan(&grid, GridPos::new(0, 0), GridPos::new(1, 1));
        assert_eq!(result.unwrap().unwrap().len(), 2);
        assert_eq!(planner.name(), "straight");
    }
}
