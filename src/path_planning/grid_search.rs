//! 4-connected unit-cost grid search shared by Dijkstra, Greedy and A*

use std::time::Instant;

use crate::common::{GridNavResult, GridPos, PlanningResult};
use crate::path_planning::search::{assemble, best_first, SearchSpace, Strategy, Successor};
use crate::utils::Grid;

/// Distance estimate toward the goal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heuristic {
    Zero,
    Manhattan,
    Euclidean,
}

impl Heuristic {
    pub fn estimate(self, from: GridPos, goal: GridPos) -> f64 {
        match self {
            Heuristic::Zero => 0.0,
            Heuristic::Manhattan => from.manhattan(&goal) as f64,
            Heuristic::Euclidean => from.distance(&goal),
        }
    }
}

/// How `path_cost` is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostReport {
    /// Accumulated g of the goal
    Accumulated,
    /// Number of moves in the returned path
    StepCount,
}

pub(crate) struct CardinalSpace<'a> {
    pub grid: &'a Grid,
    pub goal: GridPos,
    pub heuristic: Heuristic,
}

impl SearchSpace for CardinalSpace<'_> {
    type Node = GridPos;

    fn successors(&self, current: GridPos, _parent: Option<GridPos>, out: &mut Vec<Successor<GridPos>>) {
        out.extend(
            self.grid
                .neighbors4(current)
                .into_iter()
                .map(|n| Successor::new(n, current, 1.0)),
        );
    }

    fn heuristic(&self, node: GridPos) -> f64 {
        self.heuristic.estimate(node, self.goal)
    }
}

/// Validate endpoints, run the 4-connected search and package the result
pub(crate) fn plan_cardinal(
    name: &str,
    grid: &Grid,
    start: GridPos,
    goal: GridPos,
    strategy: Strategy,
    heuristic: Heuristic,
    cost_report: CostReport,
) -> GridNavResult<Option<PlanningResult>> {
    let timer = Instant::now();
    grid.check_endpoint(start)?;
    grid.check_endpoint(goal)?;

    let space = CardinalSpace { grid, goal, heuristic };
    let outcome = best_first(&space, start, goal, strategy);

    let Some(path) = outcome.chain else {
        log::debug!("{}: no path from {} to {} after {} expansions", name, start, goal, outcome.explored.len());
        return Ok(None);
    };

    let cost = match cost_report {
        CostReport::Accumulated => outcome.cost,
        CostReport::StepCount => path.len().saturating_sub(1) as f64,
    };
    log::debug!(
        "{}: reached {} in {} steps after {} expansions",
        name,
        goal,
        path.len().saturating_sub(1),
        outcome.explored.len()
    );

    Ok(Some(assemble(timer, path.clone(), path, outcome.explored, cost)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heuristics() {
        let a = GridPos::new(0, 0);
        let b = GridPos::new(3, 4);
        assert_eq!(Heuristic::Zero.estimate(a, b), 0.0);
        assert_eq!(Heuristic::Manhattan.estimate(a, b), 7.0);
        assert!((Heuristic::Euclidean.estimate(a, b) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_cardinal_space_unit_steps() {
        let grid = Grid::new(3, 3).unwrap();
        let space = CardinalSpace {
            grid: &grid,
            goal: GridPos::new(2, 2),
            heuristic: Heuristic::Manhattan,
        };
        let mut out = Vec::new();
        space.successors(GridPos::new(1, 1), None, &mut out);
        assert_eq!(out.len(), 4);
        assert!(out.iter().all(|s| s.step_cost == 1.0 && s.via == GridPos::new(1, 1)));
    }
}
