//! Tests for the combat engine: session lifecycle, wave progression,
//! scoring, the magazine under engine control, and cancellation.

use airspace_core::commands::PlayerCommand;
use airspace_core::constants::*;
use airspace_core::enums::*;
use airspace_core::errors::FireError;
use airspace_core::events::CombatEvent;
use airspace_core::state::CombatSnapshot;
use airspace_core::types::{EnemyId, Position};

use crate::engine::{CombatEngine, SimConfig};

/// Exactly representable frame delta so session-clock comparisons are exact.
const DT: f64 = 0.125;

fn started() -> CombatEngine {
    let mut engine = CombatEngine::new(SimConfig::default());
    engine.start_session();
    engine
}

fn id(raw: &str) -> EnemyId {
    EnemyId::from(raw)
}

/// Tick until `done` holds, collecting every event along the way.
fn tick_until(
    engine: &mut CombatEngine,
    max_ticks: usize,
    mut done: impl FnMut(&CombatSnapshot) -> bool,
) -> Vec<CombatEvent> {
    let mut events = Vec::new();
    for _ in 0..max_ticks {
        let snap = engine.tick(DT);
        events.extend(snap.events.iter().cloned());
        if done(&snap) {
            return events;
        }
    }
    panic!("condition not reached within {max_ticks} ticks");
}

fn live_enemies(engine: &CombatEngine) -> Vec<EnemyId> {
    engine
        .roster()
        .enemies()
        .filter(|enemy| !enemy.destroyed)
        .map(|enemy| enemy.id.clone())
        .collect()
}

/// Fire at every live enemy, waiting out reloads as needed, until the
/// current wave's roster is destroyed.
fn clear_current_wave(engine: &mut CombatEngine) -> Vec<CombatEvent> {
    let mut events = Vec::new();
    for _ in 0..400 {
        let live = live_enemies(engine);
        if live.is_empty() {
            return events;
        }
        for enemy_id in live {
            let _ = engine.fire_at(&enemy_id);
        }
        events.extend(engine.tick(DT).events);
    }
    panic!("wave {} was not cleared", engine.wave());
}

fn score_events(events: &[CombatEvent]) -> Vec<(u64, u32, u32)> {
    events
        .iter()
        .filter_map(|event| match event {
            CombatEvent::ScoreChanged {
                score,
                kills,
                multiplier,
            } => Some((*score, *kills, *multiplier)),
            _ => None,
        })
        .collect()
}

// ---- Session lifecycle ----

#[test]
fn test_new_engine_is_idle() {
    let mut engine = CombatEngine::new(SimConfig::default());
    assert_eq!(engine.phase(), SessionPhase::Idle);
    assert_eq!(engine.fire_at(&id("scout-1")), Err(FireError::SessionInactive));

    let snap = engine.tick(DT);
    assert_eq!(snap.time.tick, 0);
    assert!(snap.enemies.is_empty());
}

#[test]
fn test_start_session_spawns_first_wave() {
    let mut engine = started();
    let snap = engine.tick(DT);

    assert_eq!(snap.phase, SessionPhase::Active);
    assert_eq!(snap.wave.number, 1);
    assert_eq!(snap.wave.kills_required, 1);
    assert_eq!(snap.ammo.rounds, MAX_AMMO);
    assert_eq!(snap.score.multiplier, 1);
    assert_eq!(snap.enemies.len(), 1);
    assert_eq!(snap.enemies[0].enemy_id, id("scout-1"));
    assert_eq!(snap.enemies[0].kind, EnemyKind::Scout);

    assert_eq!(snap.events[0], CombatEvent::SessionStarted);
    assert!(snap.events.contains(&CombatEvent::EnemySpawned {
        enemy_id: id("scout-1"),
        kind: EnemyKind::Scout,
        wave: 1,
    }));
}

#[test]
fn test_start_session_via_command_queue() {
    let mut engine = CombatEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::StartSession);
    let snap = engine.tick(DT);
    assert_eq!(snap.phase, SessionPhase::Active);
    assert_eq!(snap.time.tick, 1);
}

#[test]
fn test_start_session_is_idempotent() {
    let mut once = started();
    let mut twice = started();
    twice.start_session();

    assert_eq!(
        serde_json::to_string(&once.snapshot()).unwrap(),
        serde_json::to_string(&twice.snapshot()).unwrap()
    );
    for _ in 0..10 {
        let a = serde_json::to_string(&once.tick(DT)).unwrap();
        let b = serde_json::to_string(&twice.tick(DT)).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn test_restart_mid_session_resets_everything() {
    let mut engine = started();
    clear_current_wave(&mut engine);
    assert!(engine.score().score > 0);

    engine.switch_missile_type(MissileKind::Emp);
    engine.start_session();
    let snap = engine.snapshot();
    assert_eq!(snap.score.score, 0);
    assert_eq!(snap.score.kills, 0);
    assert_eq!(snap.wave.number, 1);
    assert_eq!(snap.wave.phase, WavePhase::InProgress);
    assert_eq!(snap.ammo.rounds, MAX_AMMO);
    assert_eq!(snap.selected_missile, MissileKind::Standard);
    assert_eq!(snap.time.elapsed_us, 0);
}

// ---- Determinism ----

#[test]
fn test_determinism_same_timeline() {
    let run = || {
        let mut engine = CombatEngine::new(SimConfig::default());
        engine.queue_command(PlayerCommand::StartSession);
        let mut frames = Vec::new();
        for step in 0..200 {
            if step % 5 == 0 {
                for enemy_id in live_enemies(&engine) {
                    engine.queue_command(PlayerCommand::FireAt { enemy_id });
                }
            }
            if step == 37 {
                engine.queue_command(PlayerCommand::SwitchMissileType {
                    kind: MissileKind::HeatSeeker,
                });
            }
            frames.push(serde_json::to_string(&engine.tick(DT)).unwrap());
        }
        frames
    };
    assert_eq!(run(), run());
}

// ---- Targeting ----

#[test]
fn test_fire_twice_before_impact_is_already_targeted() {
    let mut engine = started();
    engine.fire_at(&id("scout-1")).unwrap();
    assert_eq!(engine.fire_at(&id("scout-1")), Err(FireError::AlreadyTargeted));
    assert_eq!(engine.ammo().rounds, MAX_AMMO - 1);
}

#[test]
fn test_queued_fire_failure_is_reported() {
    let mut engine = started();
    engine.queue_command(PlayerCommand::FireAt {
        enemy_id: id("ace-1"),
    });
    let snap = engine.tick(DT);
    assert!(snap.events.contains(&CombatEvent::FireRejected {
        enemy_id: id("ace-1"),
        error: FireError::UnknownEnemy,
    }));
}

#[test]
fn test_impact_event_order() {
    let mut engine = started();
    engine.tick(DT);
    engine.fire_at(&id("scout-1")).unwrap();
    let events = tick_until(&mut engine, 10, |snap| snap.score.kills == 1);

    let position_of = |wanted: fn(&CombatEvent) -> bool| {
        events.iter().position(wanted).expect("event missing")
    };
    let hit = position_of(|e| matches!(e, CombatEvent::EnemyHit { .. }));
    let score = position_of(|e| matches!(e, CombatEvent::ScoreChanged { kills: 1, .. }));
    let cleared = position_of(|e| matches!(e, CombatEvent::WaveCleared { wave: 1 }));
    assert!(hit < score && score < cleared);
}

#[test]
fn test_standard_missile_flight_time() {
    let mut engine = started();
    engine.fire_at(&id("scout-1")).unwrap();
    // 3 progress/s at 0.125s per tick: 0.375, 0.75, 1.125.
    assert_eq!(engine.tick(DT).score.kills, 0);
    assert_eq!(engine.tick(DT).score.kills, 0);
    let snap = engine.tick(DT);
    assert_eq!(snap.score.kills, 1);
    assert!(snap.enemies[0].destroyed);
    assert!(snap.missiles.is_empty());
}

#[test]
fn test_switch_missile_type_applies_to_next_launch() {
    let mut engine = started();
    clear_current_wave(&mut engine);
    tick_until(&mut engine, 40, |snap| snap.wave.number == 2);

    engine.fire_at(&id("scout-2")).unwrap();
    engine.switch_missile_type(MissileKind::HeatSeeker);
    engine.fire_at(&id("bomber-2")).unwrap();

    let snap = engine.tick(DT);
    let kinds: Vec<MissileKind> = snap.missiles.iter().map(|m| m.kind).collect();
    assert_eq!(kinds, vec![MissileKind::Standard, MissileKind::HeatSeeker]);
    assert!(snap
        .events
        .contains(&CombatEvent::MissileTypeChanged { kind: MissileKind::HeatSeeker }));

    // Heat seeker: 4/s, lands on the second tick; standard on the third.
    let snap = engine.tick(DT);
    assert_eq!(snap.missiles.len(), 1);
    assert_eq!(snap.missiles[0].enemy_id, id("scout-2"));
}

#[test]
fn test_reported_position_is_impact_hint() {
    let mut engine = started();
    let here = Position::new(-2.0, 1.5, -9.0);
    engine.queue_command(PlayerCommand::ReportEnemyPosition {
        enemy_id: id("scout-1"),
        position: here,
    });
    engine.tick(DT);
    engine.fire_at(&id("scout-1")).unwrap();

    let events = tick_until(&mut engine, 10, |snap| snap.score.kills == 1);
    let hint = events.iter().find_map(|event| match event {
        CombatEvent::EnemyHit { position, .. } => Some(*position),
        _ => None,
    });
    assert_eq!(hint, Some(here));
}

// ---- Scoring ----

#[test]
fn test_scoring_streak_across_waves() {
    let mut engine = started();
    let mut events = clear_current_wave(&mut engine);
    events.extend(tick_until(&mut engine, 40, |snap| snap.wave.number == 2));

    // Fire in roster order so the scout lands first.
    engine.fire_at(&id("scout-2")).unwrap();
    events.extend(engine.tick(DT).events);
    engine.fire_at(&id("bomber-2")).unwrap();
    events.extend(tick_until(&mut engine, 10, |snap| snap.score.kills == 3));

    let multipliers: Vec<u32> = score_events(&events)
        .into_iter()
        .filter(|(_, kills, _)| *kills > 0)
        .map(|(_, _, multiplier)| multiplier)
        .collect();
    assert_eq!(multipliers, vec![1, 2, 3]);
    assert_eq!(engine.score().score, 100 + 100 * 2 + 200 * 3);
}

// ---- Wave progression ----

#[test]
fn test_wave_one_progression() {
    let mut engine = started();
    engine.fire_at(&id("scout-1")).unwrap();
    let events = tick_until(&mut engine, 10, |snap| snap.score.kills == 1);
    assert!(events.contains(&CombatEvent::WaveCleared { wave: 1 }));

    // Impact landed at 0.375s; the next wave is due at 2.375s.
    let snap = engine.snapshot();
    assert_eq!(snap.wave.phase, WavePhase::WaveClearedPause);
    assert_eq!(snap.wave.banner_wave, 1);
    assert_eq!(snap.time.elapsed_us, 375_000);

    for _ in 0..15 {
        let snap = engine.tick(DT);
        assert_eq!(snap.wave.number, 1);
        assert_eq!(snap.wave.phase, WavePhase::WaveClearedPause);
    }
    let snap = engine.tick(DT);
    assert_eq!(snap.time.elapsed_us, 2_375_000);
    assert_eq!(snap.wave.number, 2);
    assert_eq!(snap.wave.phase, WavePhase::InProgress);
    assert_eq!(snap.wave.kills_this_wave, 0);
    assert_eq!(snap.wave.kills_required, 2);

    let roster: Vec<(EnemyId, EnemyKind)> = snap
        .enemies
        .iter()
        .map(|enemy| (enemy.enemy_id.clone(), enemy.kind))
        .collect();
    assert_eq!(
        roster,
        vec![
            (id("scout-2"), EnemyKind::Scout),
            (id("bomber-2"), EnemyKind::Bomber)
        ]
    );
    assert!(snap.events.contains(&CombatEvent::WaveStarted { wave: 2 }));
    assert!(snap.events.contains(&CombatEvent::EnemySpawned {
        enemy_id: id("bomber-2"),
        kind: EnemyKind::Bomber,
        wave: 2,
    }));
}

#[test]
fn test_one_wave_transition_begins_per_tick() {
    let mut engine = started();
    engine.fire_at(&id("scout-1")).unwrap();

    // A long frame lands the missile and clears the wave, but the advance
    // it schedules cannot also complete inside the same tick.
    let snap = engine.tick(10.0);
    assert!(snap.events.contains(&CombatEvent::WaveCleared { wave: 1 }));
    assert!(!snap
        .events
        .iter()
        .any(|event| matches!(event, CombatEvent::WaveStarted { .. })));
    assert_eq!(snap.wave.number, 1);

    let snap = engine.tick(10.0);
    assert!(snap.events.contains(&CombatEvent::WaveStarted { wave: 2 }));
}

#[test]
fn test_full_session_reaches_all_cleared() {
    let mut engine = started();
    let mut events = Vec::new();

    for wave in 1..=TOTAL_WAVES {
        assert_eq!(engine.wave(), wave);
        events.extend(clear_current_wave(&mut engine));
        if wave < TOTAL_WAVES {
            events.extend(tick_until(&mut engine, 40, |snap| snap.wave.number == wave + 1));
        }
    }

    // Final wave: no banner pause, terminal state after 1.5s.
    assert_eq!(engine.wave_phase(), WavePhase::InProgress);
    assert!(!events.contains(&CombatEvent::WaveCleared { wave: TOTAL_WAVES }));
    events.extend(tick_until(&mut engine, 20, |snap| {
        snap.phase == SessionPhase::Ended
    }));
    assert!(events.contains(&CombatEvent::AllWavesCleared));
    assert_eq!(engine.wave_phase(), WavePhase::AllCleared);

    // 100x1 | 100x2 + 200x3 | 100x4 + 200x5 + 500x5
    let score = engine.score();
    assert_eq!(score.kills, 6);
    assert_eq!(score.multiplier, 5);
    assert_eq!(score.score, 100 + 200 + 600 + 400 + 1000 + 2500);

    // Reload happened between waves two and three.
    assert!(events.iter().any(|event| matches!(
        event,
        CombatEvent::AmmoChanged {
            rounds: 0,
            reloading: true,
            ..
        }
    )));
}

#[test]
fn test_terminal_state_blocks_scoring_until_restart() {
    let mut engine = started();
    for wave in 1..=TOTAL_WAVES {
        clear_current_wave(&mut engine);
        if wave < TOTAL_WAVES {
            tick_until(&mut engine, 40, |snap| snap.wave.number == wave + 1);
        }
    }
    tick_until(&mut engine, 20, |snap| snap.phase == SessionPhase::Ended);
    let final_score = engine.score();

    for raw in ["scout-3", "bomber-3", "ace-3", "scout-1"] {
        assert_eq!(engine.fire_at(&id(raw)), Err(FireError::SessionInactive));
    }
    for _ in 0..100 {
        let snap = engine.tick(DT);
        assert_eq!(snap.score, final_score);
        assert_eq!(snap.wave.phase, WavePhase::AllCleared);
    }

    engine.start_session();
    assert_eq!(engine.phase(), SessionPhase::Active);
    assert_eq!(engine.score().score, 0);
    assert!(engine.fire_at(&id("scout-1")).is_ok());
}

// ---- Cancellation ----

#[test]
fn test_reset_during_wave_pause_discards_stale_transition() {
    let mut engine = started();
    engine.fire_at(&id("scout-1")).unwrap();
    tick_until(&mut engine, 10, |snap| {
        snap.wave.phase == WavePhase::WaveClearedPause
    });
    assert!(engine.waves().has_pending_transition());

    // Restart one second into the pause. The stale advance was due at 2.375s
    // on a clock that has now restarted from zero.
    for _ in 0..8 {
        engine.tick(DT);
    }
    engine.start_session();

    for _ in 0..40 {
        let snap = engine.tick(DT);
        assert_eq!(snap.wave.number, 1);
        assert_eq!(snap.wave.phase, WavePhase::InProgress);
        assert_eq!(snap.enemies.len(), 1);
        assert!(!snap.enemies[0].destroyed);
    }
}

#[test]
fn test_wave_start_cancels_nothing_from_current_wave() {
    let mut engine = started();
    clear_current_wave(&mut engine);
    tick_until(&mut engine, 40, |snap| snap.wave.number == 2);

    engine.fire_at(&id("scout-2")).unwrap();
    engine.fire_at(&id("bomber-2")).unwrap();
    let events = tick_until(&mut engine, 10, |snap| snap.score.kills == 3);
    let hits = events
        .iter()
        .filter(|e| matches!(e, CombatEvent::EnemyHit { .. }))
        .count();
    assert_eq!(hits, 2);
}

#[test]
fn test_skip_cancels_in_flight_missile_silently() {
    let mut engine = started();
    engine.fire_at(&id("scout-1")).unwrap();
    engine.skip_session();
    let snap = engine.tick(DT);
    assert!(snap.missiles.is_empty());
    assert!(!snap
        .events
        .iter()
        .any(|e| matches!(e, CombatEvent::EnemyHit { .. })));
    assert_eq!(engine.targeting().in_flight_count(), 0);
}

#[test]
fn test_skip_session_ends_without_scoring() {
    let mut engine = started();
    engine.fire_at(&id("scout-1")).unwrap();
    engine.queue_command(PlayerCommand::SkipSession);
    let snap = engine.tick(DT);

    assert_eq!(snap.phase, SessionPhase::Ended);
    assert!(snap.events.contains(&CombatEvent::SessionEnded { skipped: true }));
    assert!(snap.missiles.is_empty());

    for _ in 0..50 {
        let snap = engine.tick(DT);
        assert_eq!(snap.score.kills, 0);
        assert_eq!(snap.score.score, 0);
    }
    assert_eq!(engine.fire_at(&id("scout-1")), Err(FireError::SessionInactive));
}

#[test]
fn test_skip_during_pause_cancels_pending_advance() {
    let mut engine = started();
    engine.fire_at(&id("scout-1")).unwrap();
    tick_until(&mut engine, 10, |snap| {
        snap.wave.phase == WavePhase::WaveClearedPause
    });
    engine.skip_session();
    assert!(!engine.waves().has_pending_transition());
    assert_eq!(engine.wave(), 1);
}

// ---- Magazine under engine control ----

#[test]
fn test_reload_completes_after_reload_time() {
    let mut engine = started();
    clear_current_wave(&mut engine);
    tick_until(&mut engine, 40, |snap| snap.wave.number == 2);
    assert_eq!(engine.ammo().rounds, MAX_AMMO - 1);

    engine.fire_at(&id("scout-2")).unwrap();
    engine.fire_at(&id("bomber-2")).unwrap();
    assert_eq!(engine.ammo().rounds, 0);

    // 3000ms at 125ms per tick: 24 ticks, the first of which engages the reload.
    for _ in 0..23 {
        let snap = engine.tick(DT);
        assert!(snap.ammo.reloading);
        assert_eq!(snap.ammo.rounds, 0);
    }
    let snap = engine.tick(DT);
    assert_eq!(snap.ammo.rounds, MAX_AMMO);
    assert!(!snap.ammo.reloading);
    assert_eq!(snap.ammo.progress, 0.0);
}

#[test]
fn test_rounds_stay_in_bounds_under_spam() {
    let mut engine = started();
    for step in 0..600 {
        for enemy_id in live_enemies(&engine) {
            let _ = engine.fire_at(&enemy_id);
        }
        let snap = engine.tick(if step % 2 == 0 { DT } else { DT / 2.0 });
        assert!(snap.ammo.rounds <= MAX_AMMO);
        assert!((0.0..=1.0).contains(&snap.ammo.progress));
        if snap.ammo.reloading {
            assert_eq!(snap.ammo.rounds, 0);
        }
        if snap.phase == SessionPhase::Ended {
            break;
        }
    }
}

// ---- Time scale ----

#[test]
fn test_time_scale_freezes_and_clamps() {
    let mut engine = started();
    engine.fire_at(&id("scout-1")).unwrap();
    engine.queue_command(PlayerCommand::SetTimeScale { scale: 0.0 });
    for _ in 0..20 {
        let snap = engine.tick(DT);
        assert_eq!(snap.score.kills, 0);
        assert_eq!(snap.time.elapsed_us, 0);
    }

    engine.set_time_scale(100.0);
    assert_eq!(engine.time_scale(), MAX_TIME_SCALE);
    engine.set_time_scale(f64::NAN);
    assert_eq!(engine.time_scale(), 1.0);
}

#[test]
fn test_invalid_tick_deltas_are_ignored() {
    let mut engine = started();
    engine.tick(-1.0);
    engine.tick(f64::INFINITY);
    let snap = engine.tick(f64::NAN);
    assert_eq!(snap.time.elapsed_us, 0);
    assert_eq!(snap.time.tick, 3);
}

#[test]
fn test_non_finite_time_scale_in_config_falls_back_to_normal_speed() {
    for scale in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let mut engine = CombatEngine::new(SimConfig { time_scale: scale });
        assert_eq!(engine.time_scale(), 1.0);
        engine.start_session();
        engine.fire_at(&id("scout-1")).unwrap();
        tick_until(&mut engine, 10, |snap| snap.score.kills == 1);
        assert_eq!(engine.time().elapsed_us, 375_000);
    }
}

// ---- Host frame rate ----

/// Tick count at which each matching event was delivered, at the host's 60 Hz.
fn play_at_host_rate(engine: &mut CombatEngine, frames: usize) -> Vec<(u64, CombatEvent)> {
    let mut delivered = Vec::new();
    for _ in 0..frames {
        for enemy_id in live_enemies(engine) {
            let _ = engine.fire_at(&enemy_id);
        }
        let snap = engine.tick(airspace_core::constants::DT);
        let tick = snap.time.tick;
        delivered.extend(snap.events.into_iter().map(|event| (tick, event)));
        if snap.phase == SessionPhase::Ended {
            break;
        }
    }
    delivered
}

fn tick_of(delivered: &[(u64, CombatEvent)], wanted: &CombatEvent) -> u64 {
    delivered
        .iter()
        .find(|(_, event)| event == wanted)
        .map(|(tick, _)| *tick)
        .expect("event not delivered")
}

#[test]
fn test_wave_pauses_last_whole_frames_at_60hz() {
    let mut engine = started();
    let delivered = play_at_host_rate(&mut engine, 60 * 60);

    let cleared_1 = tick_of(&delivered, &CombatEvent::WaveCleared { wave: 1 });
    let started_2 = tick_of(&delivered, &CombatEvent::WaveStarted { wave: 2 });
    let cleared_2 = tick_of(&delivered, &CombatEvent::WaveCleared { wave: 2 });
    let started_3 = tick_of(&delivered, &CombatEvent::WaveStarted { wave: 3 });
    let all_cleared = tick_of(&delivered, &CombatEvent::AllWavesCleared);
    let final_kill = delivered
        .iter()
        .find(|(_, event)| matches!(event, CombatEvent::ScoreChanged { kills: 6, .. }))
        .map(|(tick, _)| *tick)
        .expect("final kill not delivered");

    // 2000 ms and 1500 ms at 60 Hz.
    assert_eq!(started_2 - cleared_1, 120);
    assert_eq!(started_3 - cleared_2, 120);
    assert_eq!(all_cleared - final_kill, 90);
}

#[test]
fn test_reload_takes_180_frames_at_60hz() {
    let mut engine = started();
    clear_current_wave(&mut engine);
    tick_until(&mut engine, 40, |snap| snap.wave.number == 2);
    engine.fire_at(&id("scout-2")).unwrap();
    engine.fire_at(&id("bomber-2")).unwrap();
    assert_eq!(engine.ammo().rounds, 0);

    for frame in 1..180 {
        let snap = engine.tick(airspace_core::constants::DT);
        assert!(snap.ammo.reloading, "refilled early on frame {frame}");
    }
    let snap = engine.tick(airspace_core::constants::DT);
    assert_eq!(snap.ammo.rounds, MAX_AMMO);
    assert!(!snap.ammo.reloading);
}

// ---- Presentation ----

#[test]
fn test_roll_follows_pattern_until_position_is_reported() {
    let mut engine = started();
    let snap = engine.tick(DT);
    let expected = crate::flight::pattern_roll(EnemyKind::Scout, 0.125);
    assert_eq!(snap.enemies[0].roll, expected);
    assert!(expected != 0.0);

    engine.queue_command(PlayerCommand::ReportEnemyPosition {
        enemy_id: id("scout-1"),
        position: Position::new(1.0, 1.0, -8.0),
    });
    let snap = engine.tick(DT);
    assert_eq!(snap.enemies[0].roll, 0.0);
}
