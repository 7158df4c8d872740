//! The controller loop task.
//!
//! Startup: reassemble the waypoint message from the radio link (blocking,
//! the one-time handshake), forward the route to the simulation, and
//! resolve the configured strategy into a concrete handle. Steady state:
//! wait on snapshot arrivals, inbound radio frames, and the status-report
//! deadline; every consumed snapshot yields exactly one action, and silence
//! yields nothing (a stale action is never re-sent).

use anyhow::Context;
use embassy_futures::select::{Either3, select3};
use embassy_time::{Instant, Timer};

use crate::config::SimConfig;
use crate::controller::{Mission, Observation, resolve_strategy};
use crate::radio::base_station::SEND_MSG_INTERVAL;
use crate::radio::packet::Reassembler;
use crate::radio::send_message;
use crate::simulation::types::{ActionQueueSender, RadioFrameQueueReceiver, RadioFrameQueueSender, StateMessage, StateQueueReceiver, Waypoint, WaypointQueueSender};

/// Block until one whole message has been reassembled from the link.
async fn receive_message(frames_rx: &RadioFrameQueueReceiver, reassembler: &mut Reassembler) -> Vec<u8> {
    loop {
        let frame = frames_rx.receive().await;
        if let Some(message) = reassembler.push_frame(&frame) {
            return message;
        }
    }
}

/// The protocol guarantees well-formed messages; a decode failure means the
/// contract with the peer is broken and the dependent loop must not spin on
/// garbage. Coarse teardown takes the whole process down.
fn fatal(err: anyhow::Error) -> ! {
    log::error!("controller fault: {err:#}");
    std::process::exit(1);
}

#[embassy_executor::task]
pub async fn controller_task(
    config: SimConfig,
    radio_rx: RadioFrameQueueReceiver,
    radio_tx: RadioFrameQueueSender,
    state_rx: StateQueueReceiver,
    action_tx: ActionQueueSender,
    waypoints_tx: WaypointQueueSender,
) {
    let mut reassembler = Reassembler::new(0);

    // Waypoint handshake: blocking by design; ticking must not start
    // before both sides agree on the route.
    let waypoint_message = receive_message(&radio_rx, &mut reassembler).await;
    let waypoints: Vec<Waypoint> = match serde_json::from_slice(&waypoint_message).context("malformed waypoint message") {
        Ok(waypoints) => waypoints,
        Err(err) => fatal(err),
    };
    log::info!("controller received {} waypoints over the radio link", waypoints.len());
    waypoints_tx.send(waypoints.clone()).await;

    let mission = Mission { waypoints };
    let mut strategy = resolve_strategy(config.strategy);
    log::info!("controller running with the {:?} strategy", config.strategy);

    let mut last_observation: Option<Observation> = None;
    let mut next_status = Instant::now() + SEND_MSG_INTERVAL;

    loop {
        match select3(state_rx.receive(), radio_rx.receive(), Timer::at(next_status)).await {
            Either3::First(snapshot_json) => {
                let snapshot: StateMessage = match serde_json::from_str(&snapshot_json).context("malformed state snapshot") {
                    Ok(snapshot) => snapshot,
                    Err(err) => fatal(err),
                };
                let observation = Observation::from(snapshot);
                let action = strategy.choose_action(&mission, &observation);
                last_observation = Some(observation);
                action_tx.send(action).await;
            }
            Either3::Second(frame) => {
                if let Some(message) = reassembler.push_frame(&frame) {
                    log::debug!("base station says: {}", String::from_utf8_lossy(&message));
                }
            }
            Either3::Third(()) => {
                // Rate-limited robot status uplink; skipped until the
                // first snapshot has arrived.
                if let Some(observation) = &last_observation {
                    let status = format!(
                        "lat={:.2} lon={:.2} speed={:.2} heading={:.2}",
                        observation.lat, observation.lon, observation.speed, observation.angle
                    );
                    send_message(&radio_tx, status.as_bytes()).await;
                }
                next_status = Instant::now() + SEND_MSG_INTERVAL;
            }
        }
    }
}
