//! The base-station endpoint of the simulated radio link.
//!
//! On startup it transmits the mission waypoint list exactly once (the
//! controller-side handshake depends on it). Afterwards it keeps the link
//! alive: outbound messages are rate-limited to one full message per send
//! interval, and inbound robot status frames are reassembled and logged in
//! between, so transmit and receive interleave instead of alternating in
//! lockstep.

use embassy_futures::select::{Either, select};
use embassy_time::{Duration, Instant, Timer};

use crate::config::SimConfig;
use crate::radio::packet::Reassembler;
use crate::radio::send_message;
use crate::simulation::types::{RadioFrameQueueReceiver, RadioFrameQueueSender};

/// Minimum spacing between full outbound messages.
pub const SEND_MSG_INTERVAL: Duration = Duration::from_millis(500);

#[embassy_executor::task]
pub async fn base_station_task(config: SimConfig, frames_tx: RadioFrameQueueSender, frames_rx: RadioFrameQueueReceiver) {
    // Waypoint handshake leg: sent exactly once, before any other traffic.
    let waypoint_message = match serde_json::to_vec(&config.waypoints) {
        Ok(bytes) => bytes,
        Err(err) => {
            log::error!("failed to encode waypoint list: {err}");
            std::process::exit(1);
        }
    };
    send_message(&frames_tx, &waypoint_message).await;
    log::info!("base station sent {} waypoints ({} bytes)", config.waypoints.len(), waypoint_message.len());

    let mut reassembler = Reassembler::new(0);
    let mut next_send = Instant::now() + SEND_MSG_INTERVAL;

    loop {
        match select(frames_rx.receive(), Timer::at(next_send)).await {
            Either::First(frame) => {
                if let Some(message) = reassembler.push_frame(&frame) {
                    log::info!("received robot status: {}", String::from_utf8_lossy(&message));
                }
            }
            Either::Second(()) => {
                send_message(&frames_tx, b"base station link check").await;
                next_send = Instant::now() + SEND_MSG_INTERVAL;
            }
        }
    }
}
