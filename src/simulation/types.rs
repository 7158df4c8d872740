//! Type definitions shared across the simulation tasks.
//!
//! Contains the wire messages exchanged between the three tasks (actions,
//! state snapshots, waypoints, radio frames), the bounded channel aliases
//! wiring them together, and the world constants inherited from the
//! reference configuration.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::Duration;
use serde::{Deserialize, Serialize};

/// Width of the visible region in world units.
pub const SCREEN_WIDTH: f64 = 800.0;
/// Height of the visible region in world units.
pub const SCREEN_HEIGHT: f64 = 600.0;
/// Boat footprint width in world units.
pub const BOAT_WIDTH: f64 = 22.0;
/// Boat footprint height in world units.
pub const BOAT_HEIGHT: f64 = 44.0;

/// Velocity scale constant applied per integration step.
pub const VEL_SCALE: f64 = 0.01;
/// Angle scale constant applied per integration step.
pub const ANGLE_SCALE: f64 = 0.01;

/// Wall-clock cadence of the simulation tick loop. Best effort; the design
/// tolerates scheduling jitter.
pub const TICK_INTERVAL: Duration = Duration::from_millis(10);

/// An ordered target location agreed on during the startup handshake.
pub type Waypoint = (f64, f64);

/// Depth of the controller→simulation action channel. The controller only
/// emits one action per consumed snapshot, so this never runs deep.
pub const ACTION_QUEUE_SIZE: usize = 4;
/// Bounded channel carrying actions from the controller to the simulation.
pub type ActionQueue = embassy_sync::channel::Channel<CriticalSectionRawMutex, Action, ACTION_QUEUE_SIZE>;
/// Receiver side of the action channel.
pub type ActionQueueReceiver = embassy_sync::channel::Receiver<'static, CriticalSectionRawMutex, Action, ACTION_QUEUE_SIZE>;
/// Sender side of the action channel.
pub type ActionQueueSender = embassy_sync::channel::Sender<'static, CriticalSectionRawMutex, Action, ACTION_QUEUE_SIZE>;

/// Depth of the simulation→controller snapshot channel. Publishes are
/// fire-and-forget; a full channel drops the snapshot rather than blocking
/// the tick loop.
pub const STATE_QUEUE_SIZE: usize = 8;
/// Bounded channel carrying JSON-encoded state snapshots to the controller.
pub type StateQueue = embassy_sync::channel::Channel<CriticalSectionRawMutex, String, STATE_QUEUE_SIZE>;
/// Receiver side of the snapshot channel.
pub type StateQueueReceiver = embassy_sync::channel::Receiver<'static, CriticalSectionRawMutex, String, STATE_QUEUE_SIZE>;
/// Sender side of the snapshot channel.
pub type StateQueueSender = embassy_sync::channel::Sender<'static, CriticalSectionRawMutex, String, STATE_QUEUE_SIZE>;

/// Depth of the one-shot waypoint handshake channel.
pub const WAYPOINT_QUEUE_SIZE: usize = 1;
/// Channel carrying the waypoint list from the controller to the simulation.
pub type WaypointQueue = embassy_sync::channel::Channel<CriticalSectionRawMutex, Vec<Waypoint>, WAYPOINT_QUEUE_SIZE>;
/// Receiver side of the waypoint channel.
pub type WaypointQueueReceiver = embassy_sync::channel::Receiver<'static, CriticalSectionRawMutex, Vec<Waypoint>, WAYPOINT_QUEUE_SIZE>;
/// Sender side of the waypoint channel.
pub type WaypointQueueSender = embassy_sync::channel::Sender<'static, CriticalSectionRawMutex, Vec<Waypoint>, WAYPOINT_QUEUE_SIZE>;

/// Depth of each radio-frame channel (one per link direction).
pub const RADIO_QUEUE_SIZE: usize = 16;
/// Bounded channel carrying raw radio frames along one link direction.
pub type RadioFrameQueue = embassy_sync::channel::Channel<CriticalSectionRawMutex, Vec<u8>, RADIO_QUEUE_SIZE>;
/// Receiver side of a radio-frame channel.
pub type RadioFrameQueueReceiver = embassy_sync::channel::Receiver<'static, CriticalSectionRawMutex, Vec<u8>, RADIO_QUEUE_SIZE>;
/// Sender side of a radio-frame channel.
pub type RadioFrameQueueSender = embassy_sync::channel::Sender<'static, CriticalSectionRawMutex, Vec<u8>, RADIO_QUEUE_SIZE>;

/// A single control decision, consumed once by the simulation.
///
/// The delta is additive and unclamped: `Forward` adjusts linear speed,
/// `Turn` adjusts angular speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "delta", rename_all = "snake_case")]
pub enum Action {
    Forward(f64),
    Turn(f64),
}

impl Action {
    /// The coasting default applied on ticks where no action arrived.
    pub fn noop() -> Self {
        Action::Forward(0.0)
    }
}

/// One live obstacle rendered as a plain tuple: (radius, x, y, vx, vy).
pub type ObstacleTuple = (u32, f64, f64, f64, f64);

/// The externally visible state snapshot, published once per consumed
/// action. Field names match the wire contract exactly; `lat` carries the
/// y coordinate and `lon` the x coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateFields {
    pub lat: f64,
    pub lon: f64,
    pub speed: f64,
    pub angle: f64,
    pub ang_vel: f64,
    pub ocean_current_x: f64,
    pub ocean_current_y: f64,
    pub desired_speed: f64,
    pub obstacles: Vec<ObstacleTuple>,
}

/// Envelope for the state publish message: `{"state": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateMessage {
    pub state: StateFields,
}

impl StateMessage {
    /// Encode the snapshot as its wire form.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_wire_form_is_tagged() {
        let json = serde_json::to_string(&Action::Forward(2.5)).unwrap();
        assert_eq!(json, r#"{"kind":"forward","delta":2.5}"#);
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Action::Forward(2.5));

        let turn: Action = serde_json::from_str(r#"{"kind":"turn","delta":-1.0}"#).unwrap();
        assert_eq!(turn, Action::Turn(-1.0));
    }

    #[test]
    fn state_message_round_trips_with_named_fields() {
        let msg = StateMessage {
            state: StateFields {
                lat: 278.0,
                lon: 389.0,
                speed: 0.0,
                angle: 90.0,
                ang_vel: 0.0,
                ocean_current_x: 0.1,
                ocean_current_y: -0.2,
                desired_speed: 5.0,
                obstacles: vec![(12, 100.0, 200.0, 0.5, -0.5)],
            },
        };
        let json = msg.to_json().unwrap();
        assert!(json.starts_with(r#"{"state":{"lat":"#));
        assert!(json.contains(r#""desired_speed":5.0"#));
        let back: StateMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn malformed_state_message_is_rejected() {
        // Missing the mandatory speed field.
        let err = serde_json::from_str::<StateMessage>(r#"{"state":{"lat":1.0,"lon":2.0}}"#);
        assert!(err.is_err());
    }
}
