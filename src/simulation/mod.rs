//! Boat simulation core.
//!
//! Integrates:
//! - Fixed-step kinematic integration of the vehicle state
//! - Randomized obstacle lifecycle management
//! - Environmental current/drag forcing
//! - The tick-driven simulation loop task and its wire contracts
//!
//! ## Module organization
//!
//! - `types`: wire messages, channel aliases, world constants
//! - `kinematics`: the Euler integrator and footprint geometry
//! - `obstacles`: spawn/retire/integrate policy for the obstacle set
//! - `environment`: current-field collaborator contract
//! - `engine`: the seeded engine facade producing state snapshots
//! - `render`: the per-tick rendering collaborator boundary
//! - `sim_task`: the simulation loop spawned by the executor

pub mod engine;
pub mod environment;
pub mod kinematics;
pub mod obstacles;
pub mod render;
pub mod sim_task;
pub mod types;

pub use sim_task::simulation_task;
