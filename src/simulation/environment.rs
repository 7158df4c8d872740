//! Environmental forcing: the water-current field and drag.
//!
//! The current model is a collaborator behind [`CurrentField`]; the engine
//! only depends on the position→vector contract. The reference
//! implementation is a smooth sinusoidal flow whose magnitude follows the
//! configured current intensity.

use crate::simulation::types::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Speed retention loss per tick while drag forces are enabled.
pub const DRAG_COEFF: f64 = 0.003;

/// Maps a geodetic-style coordinate (lat ≈ y, lon ≈ x) to the local water
/// current as a 2D vector in world units per tick.
pub trait CurrentField {
    fn current_at(&self, lat: f64, lon: f64) -> (f64, f64);
}

/// Smooth rotational flow: each component varies sinusoidally with the
/// opposite axis, so the field is divergence-free and has no still spots
/// away from the phase zero crossings.
pub struct SinusoidalCurrent {
    /// Peak current magnitude in world units per tick.
    intensity: f64,
}

impl SinusoidalCurrent {
    /// Build the field from the configured current level in cm/s.
    pub fn new(current_level: f64) -> Self {
        Self {
            intensity: current_level / 100.0,
        }
    }
}

impl CurrentField for SinusoidalCurrent {
    fn current_at(&self, lat: f64, lon: f64) -> (f64, f64) {
        let phase_x = lon / SCREEN_WIDTH * std::f64::consts::TAU;
        let phase_y = lat / SCREEN_HEIGHT * std::f64::consts::TAU;
        (self.intensity * phase_y.sin(), self.intensity * phase_x.cos())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magnitude_scales_with_current_level() {
        let calm = SinusoidalCurrent::new(0.0);
        let strong = SinusoidalCurrent::new(200.0);
        let (cx, cy) = calm.current_at(150.0, 200.0);
        assert_eq!((cx, cy), (0.0, 0.0));

        let (sx, sy) = strong.current_at(150.0, 200.0);
        assert!(sx.abs() <= 2.0 && sy.abs() <= 2.0);
        assert!(sx.abs() + sy.abs() > 0.0);
    }

    #[test]
    fn field_is_deterministic_in_position() {
        let field = SinusoidalCurrent::new(50.0);
        assert_eq!(field.current_at(10.0, 20.0), field.current_at(10.0, 20.0));
        assert_ne!(field.current_at(10.0, 20.0), field.current_at(300.0, 20.0));
    }
}
