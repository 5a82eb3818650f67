//! Common types used throughout gridnav

use std::fmt;

use itertools::Itertools;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Grid cell position
///
/// Rows grow downward and columns grow to the right. Used directly as the
/// key of closed sets and score maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    pub row: i32,
    pub col: i32,
}

impl GridPos {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn offset(&self, d_row: i32, d_col: i32) -> Self {
        Self::new(self.row + d_row, self.col + d_col)
    }

    pub fn manhattan(&self, other: &GridPos) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    pub fn chebyshev(&self, other: &GridPos) -> i32 {
        (self.row - other.row).abs().max((self.col - other.col).abs())
    }

    pub fn distance(&self, other: &GridPos) -> f64 {
        (((self.row - other.row).pow(2) + (self.col - other.col).pow(2)) as f64).sqrt()
    }

    /// Continuous (row, col) coordinates of the cell
    pub fn to_vector(&self) -> Vector2<f64> {
        Vector2::new(self.row as f64, self.col as f64)
    }

    /// Nearest cell to a continuous (row, col) coordinate
    pub fn from_vector(v: &Vector2<f64>) -> Self {
        Self::new(v[0].round() as i32, v[1].round() as i32)
    }
}

impl From<(i32, i32)> for GridPos {
    fn from(tuple: (i32, i32)) -> Self {
        Self::new(tuple.0, tuple.1)
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Instrumentation attached to every successful query
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Metrics {
    pub computation_time_ms: f64,
    pub nodes_explored: usize,
    pub path_cost: f64,
}

/// Output of a successful planning query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningResult {
    /// Cell-by-cell path from start to goal, both inclusive
    pub path: Vec<GridPos>,
    /// Sparse polyline the path was densified from
    pub waypoints: Vec<GridPos>,
    /// Nodes in the order the algorithm visited them
    pub explored: Vec<GridPos>,
    pub metrics: Metrics,
}

impl PlanningResult {
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn start(&self) -> Option<GridPos> {
        self.path.first().copied()
    }

    pub fn goal(&self) -> Option<GridPos> {
        self.path.last().copied()
    }
}

/// Euclidean length of a polyline
pub fn polyline_length(points: &[GridPos]) -> f64 {
    points
        .iter()
        .tuple_windows()
        .map(|(a, b)| a.distance(b))
        .sum()
}
