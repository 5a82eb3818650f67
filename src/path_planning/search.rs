//! Shared open/closed-set loop behind every graph and grid search
//!
//! Each algorithm plugs in a [`SearchSpace`] (successor generation and
//! heuristic) and a [`Strategy`] (how g and h combine into the queue
//! priority). The loop itself never changes.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::time::Instant;

use crate::common::{GridPos, Metrics, PlanningResult};
use crate::utils::PriorityQueue;

/// How g and h combine into the queue priority
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// g only (Dijkstra)
    Uniform,
    /// h only; a node is never relaxed once reached (Greedy Best-First)
    Greedy,
    /// g + h (A*, JPS, Theta*)
    Informed,
}

impl Strategy {
    fn priority(self, g: f64, h: f64) -> f64 {
        match self {
            Strategy::Uniform => g,
            Strategy::Greedy => h,
            Strategy::Informed => g + h,
        }
    }
}

/// Candidate produced while expanding a node
///
/// `via` is the node the candidate is relaxed through. It is the expanded
/// node itself except for any-angle relinking, where it may be that node's
/// predecessor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Successor<N> {
    pub node: N,
    pub via: N,
    pub step_cost: f64,
}

impl<N> Successor<N> {
    pub fn new(node: N, via: N, step_cost: f64) -> Self {
        Self { node, via, step_cost }
    }
}

/// Search space explored by [`best_first`]
pub trait SearchSpace {
    type Node: Copy + Eq + Hash;

    /// Push the successors of `current` into `out`
    ///
    /// `parent` is the predecessor currently recorded for `current`.
    fn successors(
        &self,
        current: Self::Node,
        parent: Option<Self::Node>,
        out: &mut Vec<Successor<Self::Node>>,
    );

    /// Estimated remaining cost to the goal
    fn heuristic(&self, node: Self::Node) -> f64;
}

/// Raw output of one search
#[derive(Debug, Clone)]
pub struct SearchOutcome<N> {
    /// start..=goal node chain, `None` when the queue ran dry
    pub chain: Option<Vec<N>>,
    /// Accumulated g of the goal
    pub cost: f64,
    /// Closed nodes in expansion order
    pub explored: Vec<N>,
}

/// Run a best-first search from `start` to `goal`
pub fn best_first<S: SearchSpace>(
    space: &S,
    start: S::Node,
    goal: S::Node,
    strategy: Strategy,
) -> SearchOutcome<S::Node> {
    let mut open = PriorityQueue::new();
    let mut g_score: HashMap<S::Node, f64> = HashMap::new();
    let mut came_from: HashMap<S::Node, S::Node> = HashMap::new();
    let mut closed: HashSet<S::Node> = HashSet::new();
    let mut explored = Vec::new();
    let mut successors = Vec::new();

    g_score.insert(start, 0.0);
    open.insert(start, strategy.priority(0.0, space.heuristic(start)));

    while let Some(current) = open.extract_min() {
        // Stale duplicate of an already expanded node
        if !closed.insert(current) {
            continue;
        }
        explored.push(current);

        let current_g = g_score.get(&current).copied().unwrap_or(f64::INFINITY);

        if current == goal {
            return SearchOutcome {
                chain: Some(reconstruct(&came_from, start, goal)),
                cost: current_g,
                explored,
            };
        }

        successors.clear();
        space.successors(current, came_from.get(&current).copied(), &mut successors);

        for succ in successors.drain(..) {
            if closed.contains(&succ.node) {
                continue;
            }
            if strategy == Strategy::Greedy && g_score.contains_key(&succ.node) {
                continue;
            }

            let Some(&base) = g_score.get(&succ.via) else {
                continue;
            };
            let tentative = base + succ.step_cost;
            let existing = g_score.get(&succ.node).copied().unwrap_or(f64::INFINITY);

            if tentative < existing {
                g_score.insert(succ.node, tentative);
                came_from.insert(succ.node, succ.via);
                open.insert(
                    succ.node,
                    strategy.priority(tentative, space.heuristic(succ.node)),
                );
            }
        }
    }

    SearchOutcome {
        chain: None,
        cost: f64::INFINITY,
        explored,
    }
}

fn reconstruct<N: Copy + Eq + Hash>(came_from: &HashMap<N, N>, start: N, goal: N) -> Vec<N> {
    let mut chain = vec![goal];
    let mut current = goal;
    while current != start {
        match came_from.get(&current) {
            Some(&prev) => {
                chain.push(prev);
                current = prev;
            }
            None => break,
        }
    }
    chain.reverse();
    chain
}

/// Package a finished query with its timing
pub(crate) fn assemble(
    timer: Instant,
    path: Vec<GridPos>,
    waypoints: Vec<GridPos>,
    explored: Vec<GridPos>,
    path_cost: f64,
) -> PlanningResult {
    let metrics = Metrics {
        computation_time_ms: timer.elapsed().as_secs_f64() * 1000.0,
        nodes_explored: explored.len(),
        path_cost,
    };
    PlanningResult {
        path,
        waypoints,
        explored,
        metrics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Small weighted digraph: 0 -> 1 -> 3 is cheap, 0 -> 2 -> 3 looks cheap to h
    struct Diamond;

    impl SearchSpace for Diamond {
        type Node = u8;

        fn successors(&self, current: u8, _parent: Option<u8>, out: &mut Vec<Successor<u8>>) {
            let edges: &[(u8, f64)] = match current {
                0 => &[(1, 1.0), (2, 1.0)],
                1 => &[(3, 1.0)],
                2 => &[(3, 5.0)],
                _ => &[],
            };
            out.extend(edges.iter().map(|&(n, c)| Successor::new(n, current, c)));
        }

        fn heuristic(&self, node: u8) -> f64 {
            match node {
                2 => 0.0,
                3 => 0.0,
                _ => 1.0,
            }
        }
    }

    #[test]
    fn test_uniform_finds_cheapest_chain() {
        let outcome = best_first(&Diamond, 0, 3, Strategy::Uniform);
        assert_eq!(outcome.chain, Some(vec![0, 1, 3]));
        assert_eq!(outcome.cost, 2.0);
        assert_eq!(outcome.explored.first(), Some(&0));
        assert_eq!(outcome.explored.last(), Some(&3));
    }

    #[test]
    fn test_greedy_follows_heuristic() {
        let outcome = best_first(&Diamond, 0, 3, Strategy::Greedy);
        assert_eq!(outcome.chain, Some(vec![0, 2, 3]));
        assert_eq!(outcome.cost, 6.0);
    }

    #[test]
    fn test_unreachable_goal() {
        let outcome = best_first(&Diamond, 1, 2, Strategy::Informed);
        assert!(outcome.chain.is_none());
        assert_eq!(outcome.explored, vec![1, 3]);
    }

    #[test]
    fn test_start_is_goal() {
        let outcome = best_first(&Diamond, 2, 2, Strategy::Informed);
        assert_eq!(outcome.chain, Some(vec![2]));
        assert_eq!(outcome.cost, 0.0);
        assert_eq!(outcome.explored.len(), 1);
    }
}
