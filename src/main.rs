//! Timeshift Arena - headless session runner
//!
//! Drives the simulation at a fixed tick rate with a scripted pilot,
//! logging events and emitting JSON world snapshots to stdout. A real
//! deployment embeds the `timeshift_arena` library behind a renderer
//! instead of this binary.

use tokio::time::MissedTickBehavior;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use timeshift_arena::config::Config;
use timeshift_arena::content::ArenaLayout;
use timeshift_arena::sim::events::GameEvent;
use timeshift_arena::sim::snapshot::SnapshotBuilder;
use timeshift_arena::util::time::{init_session_time, tick_delta, TICK_DURATION_MICROS};
use timeshift_arena::{FrameInput, Phase, Simulation};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.log_level);

    // Initialize session time tracking
    init_session_time();

    info!("Starting Timeshift Arena session");
    info!(seed = config.seed, limit_secs = config.session_limit_secs);

    let mut sim = Simulation::new(config.seed, ArenaLayout::standard());
    let mut snapshots = SnapshotBuilder::new(config.snapshot_every_ticks.max(1));
    let emit_snapshots = config.snapshot_every_ticks > 0;

    let mut interval = tokio::time::interval(std::time::Duration::from_micros(TICK_DURATION_MICROS));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let limit_ticks = config.session_limit_secs * u64::from(timeshift_arena::util::time::SIMULATION_TPS);
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = &mut shutdown => {
                info!("Shutdown requested, ending session");
                break;
            }
        }

        let input = pilot_input(sim.state.tick);
        let events = sim.tick(tick_delta(), &input);
        for event in &events {
            log_event(event);
        }

        if sim.state.phase == Phase::GameOver {
            // The terminal state always reaches the consumer
            snapshots.force_next();
        }
        if emit_snapshots && snapshots.should_send() {
            let snapshot = snapshots.build(sim.state.tick, &sim.state);
            println!("{}", serde_json::to_string(&snapshot)?);
        }

        if sim.state.phase == Phase::GameOver {
            info!(survived_secs = f64::from(sim.state.time), "session over");
            break;
        }
        if limit_ticks > 0 && sim.state.tick >= limit_ticks {
            info!(ticks = sim.state.tick, "session limit reached");
            break;
        }
    }

    info!("Session shutdown complete");
    Ok(())
}

/// Scripted pilot for headless runs: circles the arena and fires in bursts,
/// which is enough to exercise recording, ghosts, and destruction
fn pilot_input(tick: u64) -> FrameInput {
    FrameInput {
        move_forward: true,
        yaw_delta: 0.01,
        jump: tick % 240 == 0,
        fire: tick % 45 == 0,
        ..FrameInput::default()
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::GhostSpawned { ghost_id, segment } => {
            info!(%ghost_id, segment, "ghost spawned")
        }
        GameEvent::GhostDestroyed { ghost_id } => info!(%ghost_id, "ghost destroyed"),
        GameEvent::PartDestroyed { part_id, kind, .. } => {
            info!(%part_id, ?kind, "building part destroyed")
        }
        GameEvent::GameOver { survived_secs } => {
            info!(survived_secs = f64::from(*survived_secs), "game over")
        }
        _ => tracing::debug!(?event, "event"),
    }
}

/// Initialize tracing/logging
fn init_tracing(log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        }
    }
}
