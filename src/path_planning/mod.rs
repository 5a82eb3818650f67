// Path Planning algorithms module

pub mod search;
pub mod grid_search;
pub mod dijkstra;
pub mod greedy;
pub mod a_star;
pub mod jps;
pub mod theta_star;
pub mod rrt;

#[cfg(test)]
pub(crate) mod assertions;

pub use search::{best_first, SearchOutcome, SearchSpace, Strategy, Successor};
pub use grid_search::Heuristic;
pub use dijkstra::DijkstraPlanner;
pub use greedy::GreedyPlanner;
pub use a_star::AStarPlanner;
pub use jps::{JPSConfig, JPSPlanner};
pub use theta_star::{ThetaStarConfig, ThetaStarPlanner};
pub use rrt::{RRTConfig, RRTNode, RRTPlanner};
