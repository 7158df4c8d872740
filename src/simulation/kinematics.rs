//! Boat kinematics: a fixed-step explicit Euler integrator.
//!
//! One tick is one integration step; there is no substepping and no
//! adaptive step size. Actions adjust linear or angular speed additively
//! and without clamping. The heading angle accumulates without wrap
//! normalization; downstream consumers rely on that and it must not be
//! "fixed" into a [0, 360) range.

use crate::simulation::types::{ANGLE_SCALE, BOAT_HEIGHT, BOAT_WIDTH, SCREEN_HEIGHT, SCREEN_WIDTH, VEL_SCALE, Action};

/// Axis-aligned bounding box used for coarse footprint collision tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Aabb {
    /// Box of the given width/height centered on (cx, cy).
    pub fn centered(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        Self {
            min_x: cx - width / 2.0,
            min_y: cy - height / 2.0,
            max_x: cx + width / 2.0,
            max_y: cy + height / 2.0,
        }
    }

    /// Rectangle overlap test. Touching edges count as an overlap, which
    /// errs on the side of rejecting a spawn candidate.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min_x <= other.max_x && other.min_x <= self.max_x && self.min_y <= other.max_y && other.min_y <= self.max_y
    }
}

/// The single live vehicle state, mutated only by [`BoatState::advance`]
/// and [`BoatState::apply_drag`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoatState {
    pub x: f64,
    pub y: f64,
    /// Linear speed in world units per tick (before velocity scaling).
    pub speed: f64,
    /// Heading in degrees, unbounded.
    pub heading_deg: f64,
    /// Angular speed in degrees per tick (before angle scaling).
    pub angular_speed: f64,
}

impl BoatState {
    /// The reset pose: centered in the visible region, heading 90 degrees,
    /// at rest.
    pub fn reset_pose() -> Self {
        Self {
            x: (SCREEN_WIDTH - BOAT_WIDTH) / 2.0,
            y: (SCREEN_HEIGHT - BOAT_HEIGHT) / 2.0,
            speed: 0.0,
            heading_deg: 90.0,
            angular_speed: 0.0,
        }
    }

    /// Advance one tick: apply the action, integrate position from the
    /// current speed and heading, then integrate the heading.
    ///
    /// When `current` is given, the environment contributes an additional
    /// additive velocity term (the water current at the boat's location),
    /// scaled like the boat's own velocity.
    ///
    /// Pure numerics; never fails. Callers are responsible for keeping
    /// NaN/Inf out of the inputs.
    pub fn advance(&mut self, action: Action, current: Option<(f64, f64)>) {
        match action {
            Action::Forward(delta) => self.speed += delta,
            Action::Turn(delta) => self.angular_speed += delta,
        }

        let heading_rad = self.heading_deg.to_radians();
        self.x -= VEL_SCALE * self.speed * heading_rad.sin();
        self.y -= VEL_SCALE * self.speed * heading_rad.cos();

        if let Some((current_x, current_y)) = current {
            self.x += VEL_SCALE * current_x;
            self.y += VEL_SCALE * current_y;
        }

        self.heading_deg += ANGLE_SCALE * self.angular_speed;
    }

    /// Decay linear speed by the drag coefficient. Applied once per tick
    /// when drag forces are enabled.
    pub fn apply_drag(&mut self, coefficient: f64) {
        self.speed *= 1.0 - coefficient;
    }

    /// The boat's coarse footprint, ignoring heading.
    pub fn footprint(&self) -> Aabb {
        Aabb::centered(self.x, self.y, BOAT_WIDTH, BOAT_HEIGHT)
    }
}
