//! The simplest useful strategy: proportional speed hold.

use crate::controller::{ControlStrategy, Mission, Observation};
use crate::simulation::types::Action;

pub struct MinimalStrategy {
    gain: f64,
}

impl MinimalStrategy {
    pub fn new() -> Self {
        Self { gain: 0.5 }
    }
}

impl ControlStrategy for MinimalStrategy {
    fn choose_action(&mut self, _mission: &Mission, observation: &Observation) -> Action {
        Action::Forward(self.gain * (observation.desired_speed - observation.speed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_toward_desired_speed() {
        let mission = Mission { waypoints: vec![] };
        let mut strategy = MinimalStrategy::new();
        let mut obs = Observation {
            lon: 0.0,
            lat: 0.0,
            speed: 0.0,
            desired_speed: 5.0,
            angle: 90.0,
            ang_vel: 0.0,
            current_x: 0.0,
            current_y: 0.0,
            obstacles: Vec::new(),
        };

        for _ in 0..20 {
            match strategy.choose_action(&mission, &obs) {
                Action::Forward(delta) => obs.speed += delta,
                Action::Turn(_) => panic!("speed hold never turns"),
            }
        }
        assert!((obs.speed - 5.0).abs() < 1e-3);
    }
}
