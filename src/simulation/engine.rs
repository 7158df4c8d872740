//! The boat simulation engine.
//!
//! [`BoatSim`] ties the kinematic integrator and the obstacle field to a
//! single seeded RNG and produces the externally visible state snapshot
//! after every step. All randomness flows through the one RNG instance, so
//! a fixed seed, configuration and action sequence reproduce byte-identical
//! snapshot streams.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use crate::config::{SimConfig, StateMode};
use crate::simulation::environment::{CurrentField, DRAG_COEFF};
use crate::simulation::kinematics::BoatState;
use crate::simulation::obstacles::{Obstacle, ObstacleField};
use crate::simulation::types::{Action, StateFields, StateMessage, Waypoint};

/// Obstacle visibility range in sensor state mode, world units.
const SENSOR_RANGE: f64 = 200.0;

/// Standard deviations of the pose noise in noisy/sensor state modes.
const POSITION_NOISE_SIGMA: f64 = 1.0;
const SPEED_NOISE_SIGMA: f64 = 0.1;
const ANGLE_NOISE_SIGMA: f64 = 0.5;

pub struct BoatSim {
    state: BoatState,
    obstacles: ObstacleField,
    rng: StdRng,
    current_field: Box<dyn CurrentField>,
    waypoints: Vec<Waypoint>,
    desired_speed: f64,
    drag_forces: bool,
    state_mode: StateMode,
    pose_noise: Normal<f64>,
    speed_noise: Normal<f64>,
    angle_noise: Normal<f64>,
}

impl BoatSim {
    pub fn new(config: &SimConfig, current_field: Box<dyn CurrentField>) -> Self {
        // The sigmas are positive constants; Normal::new only rejects
        // non-finite or negative deviations.
        let pose_noise = Normal::new(0.0, POSITION_NOISE_SIGMA).expect("invalid position noise sigma");
        let speed_noise = Normal::new(0.0, SPEED_NOISE_SIGMA).expect("invalid speed noise sigma");
        let angle_noise = Normal::new(0.0, ANGLE_NOISE_SIGMA).expect("invalid angle noise sigma");

        Self {
            state: BoatState::reset_pose(),
            obstacles: ObstacleField::new(config.max_obstacles),
            rng: StdRng::seed_from_u64(config.seed),
            current_field,
            waypoints: Vec::new(),
            desired_speed: config.desired_speed,
            drag_forces: config.drag_forces,
            state_mode: config.state_mode,
            pose_noise,
            speed_noise,
            angle_noise,
        }
    }

    /// Store the route agreed during the startup handshake. Static for the
    /// remainder of the run.
    pub fn set_waypoints(&mut self, waypoints: Vec<Waypoint>) {
        self.waypoints = waypoints;
    }

    /// Advance one tick under the given action and return the snapshot.
    pub fn step(&mut self, action: Action) -> StateMessage {
        let current = if self.drag_forces {
            Some(self.current_field.current_at(self.state.y, self.state.x))
        } else {
            None
        };

        self.state.advance(action, current);
        if self.drag_forces {
            self.state.apply_drag(DRAG_COEFF);
        }

        let footprint = self.state.footprint();
        self.obstacles.step(&footprint, &mut self.rng);

        self.snapshot()
    }

    /// Reinitialize to the reset pose, clear the obstacle set, and return
    /// the initial snapshot.
    pub fn reset(&mut self) -> StateMessage {
        self.state = BoatState::reset_pose();
        self.obstacles.reset();
        self.snapshot()
    }

    pub fn state(&self) -> &BoatState {
        &self.state
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        self.obstacles.as_slice()
    }

    /// Format the externally visible state, degraded per the configured
    /// state-visibility mode. The ocean current is always reported, even
    /// when drag forces are disabled.
    fn snapshot(&mut self) -> StateMessage {
        let (current_x, current_y) = self.current_field.current_at(self.state.y, self.state.x);

        let mut fields = StateFields {
            lat: self.state.y,
            lon: self.state.x,
            speed: self.state.speed,
            angle: self.state.heading_deg,
            ang_vel: self.state.angular_speed,
            ocean_current_x: current_x,
            ocean_current_y: current_y,
            desired_speed: self.desired_speed,
            obstacles: self.obstacles.tuples(),
        };

        match self.state_mode {
            StateMode::GroundTruth => {}
            StateMode::Noisy => self.degrade_pose(&mut fields),
            StateMode::Sensor => {
                self.degrade_pose(&mut fields);
                let (bx, by) = (self.state.x, self.state.y);
                fields.obstacles.retain(|&(_, x, y, _, _)| {
                    let dx = x - bx;
                    let dy = y - by;
                    dx * dx + dy * dy <= SENSOR_RANGE * SENSOR_RANGE
                });
            }
        }

        StateMessage { state: fields }
    }

    fn degrade_pose(&mut self, fields: &mut StateFields) {
        fields.lat += self.pose_noise.sample(&mut self.rng);
        fields.lon += self.pose_noise.sample(&mut self.rng);
        fields.speed += self.speed_noise.sample(&mut self.rng);
        fields.angle += self.angle_noise.sample(&mut self.rng);
        fields.ang_vel += self.speed_noise.sample(&mut self.rng);
    }
}
