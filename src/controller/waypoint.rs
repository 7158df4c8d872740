//! Waypoint-following strategy: steer toward the active waypoint, hold the
//! reference speed once roughly aligned, advance to the next waypoint on
//! arrival and cycle the route.

use crate::controller::{ControlStrategy, Mission, Observation};
use crate::simulation::types::Action;

/// Distance at which a waypoint counts as reached, world units.
const ARRIVE_RADIUS: f64 = 15.0;
/// Heading error below which the strategy paces instead of turning, deg.
const ALIGNED_THRESHOLD_DEG: f64 = 5.0;
/// Bound on the commanded angular speed, deg/tick.
const TURN_LIMIT: f64 = 50.0;

const TURN_GAIN: f64 = 0.5;
const SPEED_GAIN: f64 = 0.5;

pub struct WaypointStrategy {
    active: usize,
}

impl WaypointStrategy {
    pub fn new() -> Self {
        Self { active: 0 }
    }
}

/// Fold an arbitrary angle difference into [-180, 180).
fn wrap_angle_deg(angle: f64) -> f64 {
    (angle + 180.0).rem_euclid(360.0) - 180.0
}

/// Heading whose motion direction (-sin, -cos) points from `from` to `to`.
fn bearing_deg(from: (f64, f64), to: (f64, f64)) -> f64 {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    (-dx).atan2(-dy).to_degrees()
}

impl ControlStrategy for WaypointStrategy {
    fn choose_action(&mut self, mission: &Mission, observation: &Observation) -> Action {
        if mission.waypoints.is_empty() {
            return Action::noop();
        }

        let position = (observation.lon, observation.lat);
        let mut target = mission.waypoints[self.active % mission.waypoints.len()];
        let distance = ((target.0 - position.0).powi(2) + (target.1 - position.1).powi(2)).sqrt();
        if distance < ARRIVE_RADIUS {
            self.active = (self.active + 1) % mission.waypoints.len();
            target = mission.waypoints[self.active];
        }

        let heading_error = wrap_angle_deg(bearing_deg(position, target) - observation.angle);

        if heading_error.abs() > ALIGNED_THRESHOLD_DEG {
            let commanded = (TURN_GAIN * heading_error).clamp(-TURN_LIMIT, TURN_LIMIT);
            Action::Turn(commanded - observation.ang_vel)
        } else {
            // Roughly aligned: damp any residual turn rate first, then pace.
            if observation.ang_vel.abs() > 1.0 {
                Action::Turn(-observation.ang_vel)
            } else {
                Action::Forward(SPEED_GAIN * (observation.desired_speed - observation.speed))
            }
        }
    }
}
