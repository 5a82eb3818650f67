//! Dispatch from an (algorithm, representation) pair to a planner
//!
//! This is the only entry point external front-ends need. Nothing is kept
//! between calls; a built navmesh is handed back to the caller for reuse.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::{GridNavError, GridNavResult, GridPlanner, GridPos, PlanningResult};
use crate::config::PlannerConfig;
use crate::navmesh::{NavMesh, NavMeshRRTPlanner, NavMeshSearch};
use crate::path_planning::{
    AStarPlanner, DijkstraPlanner, GreedyPlanner, JPSPlanner, RRTPlanner, ThetaStarPlanner,
};
use crate::utils::Grid;

/// Planning algorithm selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    Dijkstra,
    Greedy,
    AStar,
    Jps,
    ThetaStar,
    Rrt,
}

impl Algorithm {
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Dijkstra,
        Algorithm::Greedy,
        Algorithm::AStar,
        Algorithm::Jps,
        Algorithm::ThetaStar,
        Algorithm::Rrt,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::Greedy => "greedy",
            Algorithm::AStar => "astar",
            Algorithm::Jps => "jps",
            Algorithm::ThetaStar => "thetastar",
            Algorithm::Rrt => "rrt",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Algorithm {
    type Err = GridNavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "greedy" => Ok(Algorithm::Greedy),
            "astar" => Ok(Algorithm::AStar),
            "jps" => Ok(Algorithm::Jps),
            "theta" | "thetastar" => Ok(Algorithm::ThetaStar),
            "rrt" => Ok(Algorithm::Rrt),
            _ => Err(GridNavError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// World representation the query is answered on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Representation {
    Grid,
    NavMesh,
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Representation::Grid => f.write_str("grid"),
            Representation::NavMesh => f.write_str("navmesh"),
        }
    }
}

impl FromStr for Representation {
    type Err = GridNavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grid" => Ok(Representation::Grid),
            "navmesh" => Ok(Representation::NavMesh),
            _ => Err(GridNavError::UnknownRepresentation(s.to_string())),
        }
    }
}

fn grid_planner(algorithm: Algorithm, config: &PlannerConfig) -> Box<dyn GridPlanner> {
    match algorithm {
        Algorithm::Dijkstra => Box::new(DijkstraPlanner::new()),
        Algorithm::Greedy => Box::new(GreedyPlanner::new()),
        Algorithm::AStar => Box::new(AStarPlanner::new()),
        Algorithm::Jps => Box::new(JPSPlanner::new(config.jps.clone())),
        Algorithm::ThetaStar => Box::new(ThetaStarPlanner::new(config.theta_star.clone())),
        Algorithm::Rrt => Box::new(RRTPlanner::new(config.grid_rrt.clone())),
    }
}

/// Answer one query on the grid
pub fn plan_grid(
    grid: &Grid,
    start: GridPos,
    goal: GridPos,
    algorithm: Algorithm,
    config: &PlannerConfig,
) -> GridNavResult<Option<PlanningResult>> {
    let planner = grid_planner(algorithm, config);
    let result = planner.plan(grid, start, goal)?;
    match &result {
        Some(found) => log::info!(
            "{}: {} -> {} in {} cells, cost {:.3}, {} explored",
            planner.name(),
            start,
            goal,
            found.len(),
            found.metrics.path_cost,
            found.metrics.nodes_explored
        ),
        None => log::info!("{}: no path from {} to {}", planner.name(), start, goal),
    }
    Ok(result)
}

/// Navmesh query outcome together with the mesh it ran on
#[derive(Debug, Clone)]
pub struct NavMeshPlan {
    pub result: Option<PlanningResult>,
    /// The mesh used, possibly freshly built; cache it for the next query
    pub navmesh: NavMesh,
}

/// Reuse `navmesh` when it matches the grid, rebuild it otherwise
pub fn ensure_navmesh(grid: &Grid, navmesh: Option<NavMesh>, config: &PlannerConfig) -> GridNavResult<NavMesh> {
    match navmesh {
        Some(mesh) if mesh.is_current(grid) => Ok(mesh),
        Some(_) => {
            log::debug!("navmesh is stale, rebuilding");
            NavMesh::build(grid, &config.navmesh)
        }
        None => NavMesh::build(grid, &config.navmesh),
    }
}

/// Answer one query on the navmesh, building the mesh if needed
pub fn plan_navmesh(
    grid: &Grid,
    navmesh: Option<NavMesh>,
    start: GridPos,
    goal: GridPos,
    algorithm: Algorithm,
    config: &PlannerConfig,
) -> GridNavResult<NavMeshPlan> {
    let navmesh = ensure_navmesh(grid, navmesh, config)?;
    let result = plan_on_mesh(grid, &navmesh, start, goal, algorithm, config)?;
    Ok(NavMeshPlan { result, navmesh })
}

/// JPS and Theta* have no navmesh form and run as navmesh A*.
fn plan_on_mesh(
    grid: &Grid,
    navmesh: &NavMesh,
    start: GridPos,
    goal: GridPos,
    algorithm: Algorithm,
    config: &PlannerConfig,
) -> GridNavResult<Option<PlanningResult>> {
    let result = match algorithm {
        Algorithm::Dijkstra => NavMeshSearch::dijkstra().plan(grid, navmesh, start, goal)?,
        Algorithm::Greedy => NavMeshSearch::greedy().plan(grid, navmesh, start, goal)?,
        Algorithm::AStar => NavMeshSearch::a_star().plan(grid, navmesh, start, goal)?,
        Algorithm::Jps | Algorithm::ThetaStar => {
            log::debug!("{} has no navmesh form, using navmesh A*", algorithm);
            NavMeshSearch::a_star().plan(grid, navmesh, start, goal)?
        }
        Algorithm::Rrt => NavMeshRRTPlanner::new(config.navmesh_rrt.clone()).plan(grid, navmesh, start, goal)?,
    };

    match &result {
        Some(found) => log::info!(
            "navmesh {}: {} -> {} via {} waypoints, cost {:.3}",
            algorithm,
            start,
            goal,
            found.waypoints.len(),
            found.metrics.path_cost
        ),
        None => log::info!("navmesh {}: no path from {} to {}", algorithm, start, goal),
    }
    Ok(result)
}

/// One agent's query in a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentQuery {
    pub start: GridPos,
    pub goal: GridPos,
    pub algorithm: Algorithm,
}

impl AgentQuery {
    pub fn new(start: GridPos, goal: GridPos, algorithm: Algorithm) -> Self {
        Self { start, goal, algorithm }
    }
}

/// Plan every agent independently, one result per query in input order
///
/// An invalid configuration fails the whole batch; endpoint misuse is
/// reported per agent. On the navmesh a single mesh is built up front and
/// shared by the batch.
pub fn plan_agents(
    grid: &Grid,
    agents: &[AgentQuery],
    representation: Representation,
    config: &PlannerConfig,
) -> GridNavResult<Vec<GridNavResult<Option<PlanningResult>>>> {
    config.validate()?;
    match representation {
        Representation::Grid => Ok(agents
            .iter()
            .map(|agent| plan_grid(grid, agent.start, agent.goal, agent.algorithm, config))
            .collect()),
        Representation::NavMesh if agents.is_empty() => Ok(Vec::new()),
        Representation::NavMesh => {
            let navmesh = NavMesh::build(grid, &config.navmesh)?;
            log::debug!("navmesh shared by {} agents", agents.len());
            Ok(agents
                .iter()
                .map(|agent| plan_on_mesh(grid, &navmesh, agent.start, agent.goal, agent.algorithm, config))
                .collect())
        }
    }
}
