//! Startup configuration for the simulator.
//!
//! The configuration surface is fixed at startup and immutable afterwards:
//! command-line flags select the control strategy, obstacle limit, current
//! intensity, state-visibility mode and the render/drag switches, while an
//! optional TOML file can override the mission parameters (waypoint route,
//! desired speed, RNG seed).

use anyhow::Context;
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

use crate::simulation::types::Waypoint;

/// Run the boat simulation.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Name of the control strategy to use
    #[arg(short, long, value_enum, default_value = "minimal")]
    pub controller: StrategyKind,

    /// Intensity of ocean currents in the simulation in cm/s
    #[arg(long = "current-level", default_value_t = 50)]
    pub current_level: u32,

    /// Maximum number of obstacles on screen at any time
    #[arg(long = "max-obstacles", default_value_t = 10)]
    pub max_obstacles: usize,

    /// Representation of the simulation state available to the boat
    #[arg(long = "state-mode", value_enum, default_value = "ground-truth")]
    pub state_mode: StateMode,

    /// Disable rendering the simulation
    #[arg(long = "no-render", default_value_t = false)]
    pub no_render: bool,

    /// Disable drag forces and current-induced motion
    #[arg(long = "no-drag", default_value_t = false)]
    pub no_drag: bool,

    /// Seed for the simulation RNG; runs with the same seed, configuration
    /// and action sequence reproduce identical state streams
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Optional TOML file overriding the mission parameters
    #[arg(long)]
    pub mission: Option<PathBuf>,
}

/// Named control strategies selectable at startup.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrategyKind {
    /// Hold the desired reference speed, no steering
    Minimal,
    /// Steer and pace toward the mission waypoints in sequence
    Waypoint,
}

/// How much of the true simulation state the controller gets to see.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateMode {
    /// Exact state, no degradation
    GroundTruth,
    /// Gaussian noise on the pose fields
    Noisy,
    /// Noisy pose plus range-limited obstacle visibility
    Sensor,
}

/// Mission parameters that may be overridden from a TOML file.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct MissionFile {
    waypoints: Option<Vec<Waypoint>>,
    desired_speed: Option<f64>,
    seed: Option<u64>,
}

/// Resolved, immutable run configuration handed to every task.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub strategy: StrategyKind,
    pub current_level: f64,
    pub max_obstacles: usize,
    pub state_mode: StateMode,
    pub render: bool,
    pub drag_forces: bool,
    pub seed: u64,
    pub desired_speed: f64,
    pub waypoints: Vec<Waypoint>,
}

/// Reference route used when no mission file is given: a rectangle well
/// inside the visible region.
const DEFAULT_WAYPOINTS: [Waypoint; 4] = [(100.0, 100.0), (700.0, 100.0), (700.0, 500.0), (100.0, 500.0)];

/// Reference speed published to controllers in every snapshot.
const DEFAULT_DESIRED_SPEED: f64 = 5.0;

impl SimConfig {
    /// Resolve the full configuration from CLI arguments, applying the
    /// mission file overlay if one was given.
    pub fn from_args(args: &Args) -> anyhow::Result<Self> {
        let mission = match &args.mission {
            Some(path) => {
                let content = std::fs::read_to_string(path).with_context(|| format!("failed to read mission file: {}", path.display()))?;
                toml::from_str::<MissionFile>(&content).with_context(|| format!("failed to parse mission file: {}", path.display()))?
            }
            None => MissionFile::default(),
        };

        let waypoints = mission.waypoints.unwrap_or_else(|| DEFAULT_WAYPOINTS.to_vec());
        if waypoints.is_empty() {
            anyhow::bail!("mission must contain at least one waypoint");
        }

        Ok(Self {
            strategy: args.controller,
            current_level: args.current_level as f64,
            max_obstacles: args.max_obstacles,
            state_mode: args.state_mode,
            render: !args.no_render,
            drag_forces: !args.no_drag,
            seed: mission.seed.unwrap_or(args.seed),
            desired_speed: mission.desired_speed.unwrap_or(DEFAULT_DESIRED_SPEED),
            waypoints,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_args() -> Args {
        Args {
            controller: StrategyKind::Minimal,
            current_level: 50,
            max_obstacles: 10,
            state_mode: StateMode::GroundTruth,
            no_render: false,
            no_drag: false,
            seed: 0,
            mission: None,
        }
    }

    #[test]
    fn defaults_resolve() {
        let config = SimConfig::from_args(&default_args()).unwrap();
        assert_eq!(config.max_obstacles, 10);
        assert_eq!(config.waypoints.len(), 4);
        assert!(config.render);
        assert!(config.drag_forces);
        assert_eq!(config.desired_speed, DEFAULT_DESIRED_SPEED);
    }

    #[test]
    fn mission_overlay_parses() {
        let overlay: MissionFile = toml::from_str(
            r#"
            waypoints = [[10.0, 20.0], [30.0, 40.0]]
            desired-speed = 7.5
            seed = 42
            "#,
        )
        .unwrap();
        assert_eq!(overlay.waypoints.unwrap(), vec![(10.0, 20.0), (30.0, 40.0)]);
        assert_eq!(overlay.desired_speed, Some(7.5));
        assert_eq!(overlay.seed, Some(42));
    }
}
