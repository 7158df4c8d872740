//! The simulated radio link and its base-station endpoint.
//!
//! - `packet`: fragmentation/reassembly protocol (252-byte fragments, EOT
//!   sentinel)
//! - `base_station`: the shore-side endpoint sending the mission waypoints
//!   and exchanging rate-limited status traffic with the robot

pub mod base_station;
pub mod packet;

pub use base_station::base_station_task;

use crate::simulation::types::RadioFrameQueueSender;

/// Send one whole message over a link direction as its wire fragments.
pub async fn send_message(frames_tx: &RadioFrameQueueSender, message: &[u8]) {
    for frame in packet::fragment(message) {
        frames_tx.send(frame).await;
    }
}
