//! Waypoint visibility graph derived from grid occupancy
//!
//! Waypoints ring every obstacle and a coarse lattice covers open space.
//! Two waypoints are joined when they are close enough and can see each
//! other. The mesh is always rebuilt in full; staleness is detected through
//! the grid fingerprint.

use std::collections::HashSet;

use itertools::{iproduct, Itertools};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::common::{GridNavError, GridNavResult, GridPos};
use crate::utils::Grid;

/// Configuration for navmesh generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavMeshConfig {
    /// Spacing of the open-space sampling lattice, in cells
    pub lattice_spacing: usize,
    /// Longest edge considered, in cells
    pub max_edge_length: f64,
}

impl Default for NavMeshConfig {
    fn default() -> Self {
        Self {
            lattice_spacing: 5,
            max_edge_length: 15.0,
        }
    }
}

impl NavMeshConfig {
    pub fn validate(&self) -> GridNavResult<()> {
        if self.lattice_spacing == 0 {
            return Err(GridNavError::Config("navmesh lattice_spacing must be positive".to_string()));
        }
        if !(self.max_edge_length > 0.0) {
            return Err(GridNavError::Config(format!(
                "navmesh max_edge_length must be positive, got {}",
                self.max_edge_length
            )));
        }
        Ok(())
    }
}

/// Graph node; `id` indexes `NavMesh::waypoints`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: usize,
    pub row: i32,
    pub col: i32,
}

impl Waypoint {
    pub fn pos(&self) -> GridPos {
        GridPos::new(self.row, self.col)
    }
}

/// Visibility edge, stored once with `from < to`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub cost: f64,
}

/// Sparse waypoint graph built from one grid state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavMesh {
    pub waypoints: Vec<Waypoint>,
    pub edges: Vec<Edge>,
    /// `Grid::fingerprint` of the grid this mesh was built from
    pub fingerprint: u64,
}

impl NavMesh {
    /// Build a mesh for the current obstacle layout
    pub fn build(grid: &Grid, config: &NavMeshConfig) -> GridNavResult<Self> {
        config.validate()?;

        let waypoints = place_waypoints(grid, config.lattice_spacing);
        let edges = connect_waypoints(grid, &waypoints, config.max_edge_length);
        log::debug!(
            "navmesh: {} waypoints, {} edges on {}x{} grid",
            waypoints.len(),
            edges.len(),
            grid.rows(),
            grid.cols()
        );

        Ok(Self {
            waypoints,
            edges,
            fingerprint: grid.fingerprint(),
        })
    }

    /// False once the grid's obstacles have changed since the build
    pub fn is_current(&self, grid: &Grid) -> bool {
        self.fingerprint == grid.fingerprint()
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn position(&self, id: usize) -> GridPos {
        self.waypoints[id].pos()
    }

    /// Neighbor lists indexed by waypoint id, both edge directions
    pub fn adjacency(&self) -> Vec<Vec<(usize, f64)>> {
        let mut adjacency = vec![Vec::new(); self.waypoints.len()];
        for edge in &self.edges {
            adjacency[edge.from].push((edge.to, edge.cost));
            adjacency[edge.to].push((edge.from, edge.cost));
        }
        adjacency
    }

    /// Closest waypoint with line-of-sight to `point`, ties to the lower id
    pub fn nearest_visible(&self, grid: &Grid, point: GridPos) -> Option<usize> {
        self.waypoints
            .iter()
            .sorted_by_key(|w| (OrderedFloat(w.pos().distance(&point)), w.id))
            .find(|w| grid.line_of_sight(w.pos(), point))
            .map(|w| w.id)
    }
}

fn place_waypoints(grid: &Grid, spacing: usize) -> Vec<Waypoint> {
    let mut placed: HashSet<GridPos> = HashSet::new();
    let mut waypoints = Vec::new();
    let mut add = |pos: GridPos| {
        if grid.is_free(pos) && placed.insert(pos) {
            waypoints.push(Waypoint {
                id: waypoints.len(),
                row: pos.row,
                col: pos.col,
            });
        }
    };

    // Ring every obstacle with maneuvering points
    for obstacle in grid.obstacle_cells() {
        for (dr, dc) in iproduct!(-1..=1, -1..=1) {
            if (dr, dc) != (0, 0) {
                add(obstacle.offset(dr, dc));
            }
        }
    }

    // Coarse lattice over open space
    let rows = (0..grid.rows()).step_by(spacing);
    let cols = (0..grid.cols()).step_by(spacing);
    for (r, c) in iproduct!(rows, cols) {
        add(GridPos::new(r as i32, c as i32));
    }

    waypoints
}

fn connect_waypoints(grid: &Grid, waypoints: &[Waypoint], max_edge_length: f64) -> Vec<Edge> {
    waypoints
        .iter()
        .tuple_combinations()
        .filter_map(|(a, b)| {
            let cost = a.pos().distance(&b.pos());
            (cost <= max_edge_length && grid.line_of_sight(a.pos(), b.pos())).then(|| Edge {
                from: a.id,
                to: b.id,
                cost,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::grid_map::test_support::*;

    #[test]
    fn test_empty_grid_uses_lattice_only() {
        let grid = empty(11, 11);
        let mesh = NavMesh::build(&grid, &NavMeshConfig::default()).unwrap();
        // Rows and columns 0, 5, 10
        assert_eq!(mesh.len(), 9);
        assert_eq!(mesh.position(0), GridPos::new(0, 0));
        assert!(mesh.waypoints.iter().all(|w| w.row % 5 == 0 && w.col % 5 == 0));
    }

    #[test]
    fn test_obstacle_is_ringed() {
        let grid = map("
.......
.......
.......
...#...
.......
.......
.......
");
        let mesh = NavMesh::build(&grid, &NavMeshConfig::default()).unwrap();
        let ring: Vec<GridPos> = mesh.waypoints[..8].iter().map(|w| w.pos()).collect();
        for (dr, dc) in iproduct!(-1..=1, -1..=1) {
            if (dr, dc) != (0, 0) {
                assert!(ring.contains(&GridPos::new(3 + dr, 3 + dc)));
            }
        }
        // No duplicates and ids are dense
        let unique: HashSet<GridPos> = mesh.waypoints.iter().map(|w| w.pos()).collect();
        assert_eq!(unique.len(), mesh.len());
        assert!(mesh.waypoints.iter().enumerate().all(|(i, w)| w.id == i));
    }

    #[test]
    fn test_edges_are_sound() {
        let grid = wall_with_gap();
        let config = NavMeshConfig::default();
        let mesh = NavMesh::build(&grid, &config).unwrap();
        assert!(!mesh.edges.is_empty());
        for edge in &mesh.edges {
            let a = mesh.position(edge.from);
            let b = mesh.position(edge.to);
            assert!(edge.from < edge.to);
            assert!(grid.line_of_sight(a, b));
            assert!(a.distance(&b) <= config.max_edge_length);
            assert!((edge.cost - a.distance(&b)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        let grid = wall_with_gap();
        let mesh = NavMesh::build(&grid, &NavMeshConfig::default()).unwrap();
        let adjacency = mesh.adjacency();
        for (id, neighbors) in adjacency.iter().enumerate() {
            for &(other, _) in neighbors {
                assert!(adjacency[other].iter().any(|&(back, _)| back == id));
            }
        }
    }

    #[test]
    fn test_nearest_visible() {
        let grid = wall_with_gap();
        let mesh = NavMesh::build(&grid, &NavMeshConfig::default()).unwrap();
        let point = GridPos::new(5, 3);
        let id = mesh.nearest_visible(&grid, point).unwrap();
        assert!(grid.line_of_sight(mesh.position(id), point));
        assert!(mesh.position(id).col < 5);
    }

    #[test]
    fn test_nearest_visible_none_when_sealed() {
        let grid = map("
.....
.###.
.#.#.
.###.
.....
");
        let mesh = NavMesh::build(&grid, &NavMeshConfig::default()).unwrap();
        // The enclosed cell is itself a ring waypoint, so it resolves to itself
        let inner = GridPos::new(2, 2);
        assert_eq!(mesh.nearest_visible(&grid, inner).map(|id| mesh.position(id)), Some(inner));

        let bare = NavMesh {
            waypoints: Vec::new(),
            edges: Vec::new(),
            fingerprint: grid.fingerprint(),
        };
        assert_eq!(bare.nearest_visible(&grid, inner), None);
    }

    #[test]
    fn test_staleness() {
        let mut grid = empty(8, 8);
        let mesh = NavMesh::build(&grid, &NavMeshConfig::default()).unwrap();
        assert!(mesh.is_current(&grid));
        grid.set_obstacle(GridPos::new(4, 4), true).unwrap();
        assert!(!mesh.is_current(&grid));
    }

    #[test]
    fn test_config_validation() {
        let config = NavMeshConfig {
            lattice_spacing: 0,
            ..Default::default()
        };
        assert!(NavMesh::build(&empty(3, 3), &config).is_err());
    }
}
