// Path legality checks shared by planner tests

use crate::common::{GridPos, PlanningResult};
use crate::utils::Grid;

/// Every cell free, endpoints as requested, every move 8-adjacent
/// (4-adjacent when `four_connected`), trace length matches the metric.
pub fn assert_legal_path(
    grid: &Grid,
    result: &PlanningResult,
    start: GridPos,
    goal: GridPos,
    four_connected: bool,
) {
    let path = &result.path;
    assert_eq!(path.first(), Some(&start), "path must begin at start");
    assert_eq!(path.last(), Some(&goal), "path must end at goal");
    for &cell in path {
        assert!(grid.is_free(cell), "path crosses blocked cell {}", cell);
    }
    for w in path.windows(2) {
        if four_connected {
            assert_eq!(w[0].manhattan(&w[1]), 1, "illegal move {} -> {}", w[0], w[1]);
        } else {
            assert_eq!(w[0].chebyshev(&w[1]), 1, "illegal move {} -> {}", w[0], w[1]);
        }
    }
    assert_eq!(result.explored.len(), result.metrics.nodes_explored);
}

/// Every consecutive waypoint pair has line-of-sight
pub fn assert_visible_waypoints(grid: &Grid, result: &PlanningResult) {
    for w in result.waypoints.windows(2) {
        assert!(grid.line_of_sight(w[0], w[1]), "no line-of-sight {} -> {}", w[0], w[1]);
    }
}
