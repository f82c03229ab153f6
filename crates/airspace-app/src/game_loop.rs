//! Game loop thread. Runs the combat engine at a fixed rate and publishes snapshots.
//!
//! The engine is created inside this thread and never leaves it. Commands
//! arrive via an `mpsc` channel. Every snapshot is sent back over a second
//! channel and the latest one is also stored in shared state for polling.

use std::io;
use std::sync::mpsc;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use airspace_core::state::CombatSnapshot;
use airspace_sim::engine::{CombatEngine, SimConfig};

use crate::config::HostConfig;
use crate::state::{GameLoopCommand, GameLoopHandle, SharedSnapshot};

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and snapshot receiver for the host to use.
pub fn spawn_game_loop(
    config: &HostConfig,
    latest_snapshot: SharedSnapshot,
) -> io::Result<GameLoopHandle> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let (snapshot_tx, snapshot_rx) = mpsc::channel::<CombatSnapshot>();
    let tick_duration = config.tick_duration();
    let tick_dt = config.tick_dt();

    std::thread::Builder::new()
        .name("airspace-game-loop".into())
        .spawn(move || {
            run_game_loop(cmd_rx, &snapshot_tx, &latest_snapshot, tick_duration, tick_dt);
        })?;

    tracing::info!(tick_rate = config.tick_rate, "game loop started");
    Ok(GameLoopHandle {
        commands: cmd_tx,
        snapshots: snapshot_rx,
    })
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    snapshot_tx: &mpsc::Sender<CombatSnapshot>,
    latest_snapshot: &Mutex<Option<CombatSnapshot>>,
    tick_duration: Duration,
    tick_dt: f64,
) {
    let mut engine = CombatEngine::new(SimConfig::default());
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        if !drain_commands(&cmd_rx, &mut engine) {
            tracing::info!(ticks = engine.time().tick, "game loop stopped");
            return;
        }

        // 2. Advance one tick
        let snapshot = engine.tick(tick_dt);

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot.clone());
        }

        // 4. Forward the snapshot and its events; a dropped receiver only stops delivery
        let _ = snapshot_tx.send(snapshot);

        // 5. Sleep until next tick
        next_tick_time += tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > tick_duration * 2 {
            // Too far behind, reset to avoid catch-up spiral
            tracing::debug!(behind = ?(now - next_tick_time), "game loop fell behind");
            next_tick_time = now;
        }
    }
}

/// Forward every pending command to the engine. Returns false when the loop should stop.
fn drain_commands(cmd_rx: &mpsc::Receiver<GameLoopCommand>, engine: &mut CombatEngine) -> bool {
    loop {
        match cmd_rx.try_recv() {
            Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
            Ok(GameLoopCommand::Shutdown) => return false,
            Err(mpsc::TryRecvError::Empty) => return true,
            Err(mpsc::TryRecvError::Disconnected) => return false,
        }
    }
}
