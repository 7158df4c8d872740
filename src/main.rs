//! Process orchestrator for the boat simulator.
//!
//! Wires the three independently scheduled loops (simulation, controller,
//! and radio-link base station) through bounded point-to-point channels
//! and drives them on one executor. There is no shared mutable state; the
//! channels are the only synchronization. Teardown is coarse: any fatal
//! fault in a loop exits the whole process, and in-flight messages are
//! dropped.

use clap::Parser;
use embassy_executor::{Executor, Spawner};
use env_logger::Builder;
use log::{LevelFilter, info};

mod config;
mod controller;
mod radio;
mod simulation;

use config::{Args, SimConfig};
use simulation::types::{ActionQueue, RadioFrameQueue, StateQueue, WaypointQueue};

struct Wiring {
    action_queue: &'static ActionQueue,
    state_queue: &'static StateQueue,
    waypoint_queue: &'static WaypointQueue,
    /// Base station → robot/controller link direction.
    radio_down_queue: &'static RadioFrameQueue,
    /// Robot/controller → base station link direction.
    radio_up_queue: &'static RadioFrameQueue,
}

fn embassy_init(spawner: Spawner, config: SimConfig, wiring: Wiring) {
    let spawned = spawner
        .spawn(simulation::simulation_task(
            config.clone(),
            wiring.waypoint_queue.receiver(),
            wiring.action_queue.receiver(),
            wiring.state_queue.sender(),
        ))
        .and_then(|_| {
            spawner.spawn(controller::controller_task(
                config.clone(),
                wiring.radio_down_queue.receiver(),
                wiring.radio_up_queue.sender(),
                wiring.state_queue.receiver(),
                wiring.action_queue.sender(),
                wiring.waypoint_queue.sender(),
            ))
        })
        .and_then(|_| {
            spawner.spawn(radio::base_station_task(
                config,
                wiring.radio_down_queue.sender(),
                wiring.radio_up_queue.receiver(),
            ))
        });

    if let Err(err) = spawned {
        log::error!("failed to start the simulation tasks: {err:?}");
        std::process::exit(1);
    }
}

fn main() {
    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter(Some("boat_simulator"), LevelFilter::Debug)
        .init();

    let args = Args::parse();
    let config = match SimConfig::from_args(&args) {
        Ok(config) => config,
        Err(err) => {
            log::error!("invalid configuration: {err:#}");
            std::process::exit(2);
        }
    };

    info!(
        "starting boat simulator: strategy={:?} state-mode={:?} max-obstacles={} current-level={} render={} drag={}",
        config.strategy, config.state_mode, config.max_obstacles, config.current_level, config.render, config.drag_forces
    );

    // INTENTIONAL LEAK: Box::leak provides the 'static lifetimes the
    // executor-spawned tasks require for their channel endpoints. The
    // channels live for the whole process.
    let wiring = Wiring {
        action_queue: Box::leak(Box::new(ActionQueue::new())),
        state_queue: Box::leak(Box::new(StateQueue::new())),
        waypoint_queue: Box::leak(Box::new(WaypointQueue::new())),
        radio_down_queue: Box::leak(Box::new(RadioFrameQueue::new())),
        radio_up_queue: Box::leak(Box::new(RadioFrameQueue::new())),
    };

    let executor: &'static mut Executor = Box::leak(Box::new(Executor::new()));
    executor.run(|spawner| embassy_init(spawner, config, wiring));
}
