//! Controller side: the pluggable strategy contract and its loop task.
//!
//! The loop knows nothing about strategy internals; it enforces the
//! observation/action calling contract and forwards whatever the resolved
//! strategy decides. Strategy selection happens once at startup from the
//! configured name.

pub mod minimal;
pub mod task;
pub mod waypoint;

pub use task::controller_task;

use crate::config::StrategyKind;
use crate::simulation::types::{Action, ObstacleTuple, StateMessage, Waypoint};

/// The fixed field tuple a strategy receives each decision cycle,
/// deserialized from the state publish message.
#[derive(Debug, Clone)]
pub struct Observation {
    pub lon: f64,
    pub lat: f64,
    pub speed: f64,
    pub desired_speed: f64,
    pub angle: f64,
    pub ang_vel: f64,
    pub current_x: f64,
    pub current_y: f64,
    pub obstacles: Vec<ObstacleTuple>,
}

impl From<StateMessage> for Observation {
    fn from(msg: StateMessage) -> Self {
        let s = msg.state;
        Self {
            lon: s.lon,
            lat: s.lat,
            speed: s.speed,
            desired_speed: s.desired_speed,
            angle: s.angle,
            ang_vel: s.ang_vel,
            current_x: s.ocean_current_x,
            current_y: s.ocean_current_y,
            obstacles: s.obstacles,
        }
    }
}

/// Mission context shared with every strategy: the waypoint route agreed
/// at startup, static for the run.
pub struct Mission {
    pub waypoints: Vec<Waypoint>,
}

/// The action-selection capability every control strategy satisfies.
pub trait ControlStrategy {
    fn choose_action(&mut self, mission: &Mission, observation: &Observation) -> Action;
}

/// Resolve the configured strategy name into a concrete handle. Done once
/// at startup; the loop never re-dispatches per call.
pub fn resolve_strategy(kind: StrategyKind) -> Box<dyn ControlStrategy> {
    match kind {
        StrategyKind::Minimal => Box::new(minimal::MinimalStrategy::new()),
        StrategyKind::Waypoint => Box::new(waypoint::WaypointStrategy::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::types::StateFields;

    #[test]
    fn observation_carries_the_tuple_fields_over() {
        let msg = StateMessage {
            state: StateFields {
                lat: 1.0,
                lon: 2.0,
                speed: 3.0,
                angle: 4.0,
                ang_vel: 5.0,
                ocean_current_x: 6.0,
                ocean_current_y: 7.0,
                desired_speed: 8.0,
                obstacles: vec![(9, 10.0, 11.0, 12.0, 13.0)],
            },
        };
        let obs = Observation::from(msg);
        assert_eq!(obs.lat, 1.0);
        assert_eq!(obs.lon, 2.0);
        assert_eq!(obs.desired_speed, 8.0);
        assert_eq!(obs.current_x, 6.0);
        assert_eq!(obs.obstacles.len(), 1);
    }

    #[test]
    fn strategies_resolve_by_name() {
        // Both names must produce a working handle.
        let mission = Mission {
            waypoints: vec![(0.0, 0.0)],
        };
        let obs = Observation {
            lon: 100.0,
            lat: 100.0,
            speed: 0.0,
            desired_speed: 5.0,
            angle: 90.0,
            ang_vel: 0.0,
            current_x: 0.0,
            current_y: 0.0,
            obstacles: Vec::new(),
        };
        for kind in [StrategyKind::Minimal, StrategyKind::Waypoint] {
            let mut strategy = resolve_strategy(kind);
            let _ = strategy.choose_action(&mission, &obs);
        }
    }
}
