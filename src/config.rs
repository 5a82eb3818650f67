//! Configuration loading for gridnav
//!
//! Every section is optional; missing sections and keys keep their
//! defaults. Example:
//!
//! ```toml
//! [grid_rrt]
//! step_size = 4.0
//! seed = 42
//!
//! [navmesh]
//! lattice_spacing = 4
//! ```

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::common::GridNavResult;
use crate::navmesh::NavMeshConfig;
use crate::path_planning::{JPSConfig, RRTConfig, ThetaStarConfig};

/// Tunables for every planner the runner can dispatch to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// RRT over grid cells
    pub grid_rrt: RRTConfig,
    /// RRT over waypoint positions; keys left out keep `RRTConfig::navmesh()`
    #[serde(default = "RRTConfig::navmesh", deserialize_with = "navmesh_rrt_table")]
    pub navmesh_rrt: RRTConfig,
    /// Navmesh generation
    pub navmesh: NavMeshConfig,
    pub jps: JPSConfig,
    pub theta_star: ThetaStarConfig,
}

/// RRT table where every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RRTOverrides {
    step_size: Option<f64>,
    goal_sample_rate: Option<f64>,
    goal_threshold: Option<f64>,
    max_iter: Option<usize>,
    seed: Option<u64>,
}

impl RRTOverrides {
    fn apply(self, base: RRTConfig) -> RRTConfig {
        RRTConfig {
            step_size: self.step_size.unwrap_or(base.step_size),
            goal_sample_rate: self.goal_sample_rate.unwrap_or(base.goal_sample_rate),
            goal_threshold: self.goal_threshold.unwrap_or(base.goal_threshold),
            max_iter: self.max_iter.unwrap_or(base.max_iter),
            seed: self.seed.or(base.seed),
        }
    }
}

fn navmesh_rrt_table<'de, D>(deserializer: D) -> Result<RRTConfig, D::Error>
where
    D: Deserializer<'de>,
{
    RRTOverrides::deserialize(deserializer).map(|overrides| overrides.apply(RRTConfig::navmesh()))
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            grid_rrt: RRTConfig::default(),
            navmesh_rrt: RRTConfig::navmesh(),
            navmesh: NavMeshConfig::default(),
            jps: JPSConfig::default(),
            theta_star: ThetaStarConfig::default(),
        }
    }
}

impl PlannerConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> GridNavResult<Self> {
        let config: PlannerConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> GridNavResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        log::info!("Loaded planner configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> GridNavResult<()> {
        self.grid_rrt.validate()?;
        self.navmesh_rrt.validate()?;
        self.navmesh.validate()?;
        self.jps.validate()?;
        self.theta_star.validate()?;
        Ok(())
    }
}
