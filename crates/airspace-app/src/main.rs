use std::sync::mpsc::RecvTimeoutError;
use std::time::{Duration, Instant};

use airspace_app::autopilot::Autopilot;
use airspace_app::game_loop;
use airspace_app::state;
use airspace_app::HostConfig;
use airspace_core::commands::PlayerCommand;
use airspace_core::enums::SessionPhase;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

fn main() -> std::io::Result<()> {
    init_tracing();
    let config = HostConfig::from_env();
    tracing::info!(?config, "starting airspace host");

    let handle = game_loop::spawn_game_loop(&config, state::new_shared_snapshot())?;
    handle.send(PlayerCommand::StartSession);
    let mut pilot = Autopilot::new(config.autopilot_seed, config.fire_interval);
    let started = Instant::now();
    let mut skipped = false;

    loop {
        let snapshot = match handle.snapshots.recv_timeout(Duration::from_secs(1)) {
            Ok(snapshot) => snapshot,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                tracing::error!("game loop disconnected");
                return Ok(());
            }
        };

        for event in &snapshot.events {
            tracing::debug!(?event, "combat event");
        }
        if snapshot.phase == SessionPhase::Ended {
            tracing::info!(
                score = snapshot.score.score,
                kills = snapshot.score.kills,
                wave = snapshot.wave.number,
                "session over"
            );
            break;
        }
        if !skipped && started.elapsed() >= config.session_timeout {
            tracing::warn!(timeout = ?config.session_timeout, "session timed out, skipping");
            handle.send(PlayerCommand::SkipSession);
            skipped = true;
            continue;
        }
        for command in pilot.next_commands(&snapshot) {
            if !handle.send(command) {
                tracing::error!("game loop disconnected");
                return Ok(());
            }
        }
    }

    handle.shutdown();
    // Let the loop thread log its exit before the process ends.
    std::thread::sleep(Duration::from_millis(50));
    Ok(())
}
