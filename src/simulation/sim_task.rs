//! The simulation loop task.
//!
//! Lifecycle: block for the waypoint handshake, publish the initial
//! snapshot, then tick forever. Each tick drains at most one pending action
//! without blocking (coasting on a no-op when the controller is silent),
//! advances the engine, and publishes the snapshot only on ticks where an
//! action was actually consumed. Publishing is fire-and-forget; a slow
//! controller can never stall the physics/render cadence. An
//! end-of-simulation request from the render surface reinitializes the run
//! in place.

use embassy_time::Ticker;

use crate::config::SimConfig;
use crate::simulation::engine::BoatSim;
use crate::simulation::environment::SinusoidalCurrent;
use crate::simulation::render::{HeadlessRenderer, Renderer};
use crate::simulation::types::{Action, ActionQueueReceiver, StateMessage, StateQueueSender, TICK_INTERVAL, WaypointQueueReceiver};

/// Encode a snapshot for the wire. Snapshot encoding cannot fail under
/// normal operation; if it does, the protocol contract with the controller
/// is broken and the whole process comes down.
fn encode_or_die(snapshot: &StateMessage) -> String {
    match snapshot.to_json() {
        Ok(json) => json,
        Err(err) => {
            log::error!("failed to encode state snapshot: {err}");
            std::process::exit(1);
        }
    }
}

#[embassy_executor::task]
pub async fn simulation_task(
    config: SimConfig,
    waypoints_rx: WaypointQueueReceiver,
    action_rx: ActionQueueReceiver,
    state_tx: StateQueueSender,
) {
    let current_field = Box::new(SinusoidalCurrent::new(config.current_level));
    let mut sim = BoatSim::new(&config, current_field);
    let initial = sim.reset();

    // Startup handshake: the one blocking receive in this loop.
    let waypoints = waypoints_rx.receive().await;
    log::info!("simulation received {} waypoints, starting tick loop", waypoints.len());
    sim.set_waypoints(waypoints);

    state_tx.send(encode_or_die(&initial)).await;

    let mut renderer: Option<Box<dyn Renderer>> = if config.render {
        Some(Box::new(HeadlessRenderer::new()))
    } else {
        None
    };

    let mut ticker = Ticker::every(TICK_INTERVAL);
    loop {
        ticker.next().await;

        // At most one action per tick; silence means coasting, never a
        // replay of the previous action.
        let (action, consumed) = match action_rx.try_receive() {
            Ok(action) => (action, true),
            Err(_) => (Action::noop(), false),
        };

        let snapshot = sim.step(action);

        if consumed && state_tx.try_send(encode_or_die(&snapshot)).is_err() {
            log::warn!("controller is lagging; state snapshot dropped");
        }

        if let Some(renderer) = renderer.as_mut() {
            renderer.render(sim.state(), sim.obstacles());
            if renderer.poll_end_requested() {
                log::info!("end of simulation requested; resetting to {} waypoints", sim.waypoints().len());
                sim.reset();
            }
        }
    }
}
