//! Rendering collaborator boundary.
//!
//! Drawing is outside the simulation core; the loop only guarantees to call
//! the renderer once per tick when enabled. Implementations must return
//! promptly; a renderer that blocks stalls the physics cadence.

use crate::simulation::kinematics::BoatState;
use crate::simulation::obstacles::Obstacle;

/// Per-tick drawing hook plus the end-of-simulation event source (the
/// window close / key press surface in a graphical implementation).
pub trait Renderer {
    /// Draw the current world state.
    fn render(&mut self, state: &BoatState, obstacles: &[Obstacle]);

    /// Poll for an end-of-simulation request raised since the last call.
    /// A `true` return makes the simulation loop reset and keep running.
    fn poll_end_requested(&mut self) -> bool;
}

/// Renderer used when no display is attached: logs a periodic heartbeat so
/// long headless runs remain observable.
pub struct HeadlessRenderer {
    ticks: u64,
}

const HEARTBEAT_EVERY_TICKS: u64 = 500;

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self { ticks: 0 }
    }
}

impl Renderer for HeadlessRenderer {
    fn render(&mut self, state: &BoatState, obstacles: &[Obstacle]) {
        self.ticks += 1;
        if self.ticks % HEARTBEAT_EVERY_TICKS == 0 {
            log::debug!(
                "tick {}: boat at ({:.1}, {:.1}) heading {:.1} deg, speed {:.2}, {} obstacles",
                self.ticks,
                state.x,
                state.y,
                state.heading_deg,
                state.speed,
                obstacles.len()
            );
        }
    }

    fn poll_end_requested(&mut self) -> bool {
        false
    }
}
