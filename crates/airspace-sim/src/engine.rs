//! Combat engine. The core of the shooter section.
//!
//! `CombatEngine` owns the hecs world, the five combat subsystems, and the
//! session clock. It processes player commands, runs every system in a fixed
//! order, and produces `CombatSnapshot`s. Completely headless, so every
//! session is reproducible from its command and tick-delta timeline.

use std::collections::VecDeque;

use hecs::World;

use airspace_core::commands::PlayerCommand;
use airspace_core::constants::MAX_TIME_SCALE;
use airspace_core::enums::{MissileKind, SessionPhase, WavePhase};
use airspace_core::errors::FireError;
use airspace_core::events::CombatEvent;
use airspace_core::state::{AmmoView, CombatSnapshot, ScoreView};
use airspace_core::types::{secs_to_micros, EnemyId, Position, SimTime};

use crate::magazine::AmmoMagazine;
use crate::roster::EnemyRoster;
use crate::scoring::ScoringEngine;
use crate::systems;
use crate::systems::snapshot::SnapshotSource;
use crate::targeting::{Impact, TargetingSystem};
use crate::waves::{WaveController, WaveSignal};

/// Configuration for a new engine.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Multiplier applied to every tick delta (1.0 = normal).
    pub time_scale: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { time_scale: 1.0 }
    }
}

/// The combat engine. Owns the ECS world and all session state.
pub struct CombatEngine {
    world: World,
    time: SimTime,
    phase: SessionPhase,
    time_scale: f64,
    command_queue: VecDeque<PlayerCommand>,
    events: Vec<CombatEvent>,

    roster: EnemyRoster,
    magazine: AmmoMagazine,
    targeting: TargetingSystem,
    scoring: ScoringEngine,
    waves: WaveController,
}

impl CombatEngine {
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: SessionPhase::default(),
            time_scale: sanitize_time_scale(config.time_scale),
            command_queue: VecDeque::new(),
            events: Vec::new(),
            roster: EnemyRoster::new(),
            magazine: AmmoMagazine::new(),
            targeting: TargetingSystem::new(),
            scoring: ScoringEngine::new(),
            waves: WaveController::new(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by `dt_secs` and return the resulting snapshot.
    ///
    /// Within a tick: queued commands, due wave transitions, magazine reload,
    /// enemy flight, missile flight, then scoring and wave bookkeeping for
    /// every impact. Nothing here fails; inconsistencies are resolved by
    /// cancelling the affected missile.
    pub fn tick(&mut self, dt_secs: f64) -> CombatSnapshot {
        self.process_commands();

        if self.phase == SessionPhase::Active {
            // Rounded once here; every system sees the same whole-microsecond step.
            let dt_us = secs_to_micros(dt_secs * self.time_scale);
            self.time.advance(dt_us);
            self.run_systems(dt_us);
        }

        let events = std::mem::take(&mut self.events);
        self.build_snapshot(events)
    }

    /// Current state without draining pending events.
    pub fn snapshot(&self) -> CombatSnapshot {
        self.build_snapshot(Vec::new())
    }

    /// Reset every subsystem and begin wave 1.
    ///
    /// Undelivered events from the previous session are dropped, so calling
    /// this twice leaves the same state as calling it once.
    pub fn start_session(&mut self) {
        self.targeting.reset(&mut self.world);
        self.roster.reset(&mut self.world);
        self.world.clear();
        self.magazine.reset();
        self.scoring.reset();
        self.waves.reset();
        self.time = SimTime::default();
        self.events.clear();
        self.phase = SessionPhase::Active;

        self.events.push(CombatEvent::SessionStarted);
        self.spawn_current_wave();
        self.push_score_changed();
        self.push_ammo_changed();
        tracing::info!(generation = self.waves.generation(), "session started");
    }

    /// Launch the selected missile kind at `enemy_id`. Returns the missile id.
    pub fn fire_at(&mut self, enemy_id: &EnemyId) -> Result<u32, FireError> {
        if self.phase != SessionPhase::Active || self.waves.is_terminal() {
            return Err(FireError::SessionInactive);
        }

        match self
            .targeting
            .fire_at(&mut self.world, &self.roster, &mut self.magazine, enemy_id)
        {
            Ok(launch) => {
                self.events.push(CombatEvent::MissileLaunched {
                    missile_id: launch.missile_id,
                    enemy_id: launch.enemy_id,
                    kind: launch.kind,
                });
                self.push_ammo_changed();
                Ok(launch.missile_id)
            }
            Err(err) => {
                tracing::debug!(enemy = %enemy_id, %err, "fire rejected");
                Err(err)
            }
        }
    }

    /// Change the kind used by subsequent launches. In-flight missiles keep theirs.
    pub fn switch_missile_type(&mut self, kind: MissileKind) {
        if self.targeting.selected() != kind {
            self.targeting.select(kind);
            self.events.push(CombatEvent::MissileTypeChanged { kind });
        }
    }

    /// End the session immediately without awarding further score.
    pub fn skip_session(&mut self) {
        if self.phase == SessionPhase::Ended {
            return;
        }
        self.waves.cancel_pending();
        self.targeting.cancel_all(&mut self.world);
        self.phase = SessionPhase::Ended;
        self.events.push(CombatEvent::SessionEnded { skipped: true });
        tracing::info!(
            wave = self.waves.wave(),
            score = self.scoring.score(),
            "session skipped"
        );
    }

    /// Take over an enemy's position from the built-in flight pattern.
    pub fn report_enemy_position(&mut self, enemy_id: &EnemyId, position: Position) -> bool {
        self.roster
            .report_position(&mut self.world, enemy_id, position)
    }

    pub fn set_time_scale(&mut self, scale: f64) {
        self.time_scale = sanitize_time_scale(scale);
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn wave(&self) -> u32 {
        self.waves.wave()
    }

    pub fn wave_phase(&self) -> WavePhase {
        self.waves.phase()
    }

    pub fn score(&self) -> ScoreView {
        self.scoring.view()
    }

    pub fn ammo(&self) -> AmmoView {
        self.magazine.view()
    }

    pub fn selected_missile(&self) -> MissileKind {
        self.targeting.selected()
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn roster(&self) -> &EnemyRoster {
        &self.roster
    }

    pub fn waves(&self) -> &WaveController {
        &self.waves
    }

    pub fn targeting(&self) -> &TargetingSystem {
        &self.targeting
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartSession => self.start_session(),
            PlayerCommand::FireAt { enemy_id } => {
                if let Err(error) = self.fire_at(&enemy_id) {
                    self.events.push(CombatEvent::FireRejected { enemy_id, error });
                }
            }
            PlayerCommand::SwitchMissileType { kind } => self.switch_missile_type(kind),
            PlayerCommand::SkipSession => self.skip_session(),
            PlayerCommand::ReportEnemyPosition { enemy_id, position } => {
                self.report_enemy_position(&enemy_id, position);
            }
            PlayerCommand::SetTimeScale { scale } => self.set_time_scale(scale),
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt_us: u64) {
        let now_us = self.time.elapsed_us;
        let dt_secs = dt_us as f64 / 1_000_000.0;

        // 1. Deferred wave transitions scheduled by earlier ticks
        for signal in self.waves.poll(now_us) {
            self.apply_wave_signal(signal);
        }
        if self.phase != SessionPhase::Active {
            return;
        }
        // 2. Magazine reload
        if self.magazine.tick_micros(dt_us) {
            self.push_ammo_changed();
        }
        // 3. Enemy flight
        systems::flight::run(&mut self.world, self.time.elapsed_secs());
        // 4. Missile homing and impacts
        let impacts = self.targeting.run(&mut self.world, &mut self.roster, dt_secs);
        // 5. Scoring and wave progression
        for impact in impacts {
            self.resolve_impact(impact, now_us);
        }
    }

    fn resolve_impact(&mut self, impact: Impact, now_us: u64) {
        self.scoring.on_impact(impact.enemy_kind, impact.missile_kind);
        self.events.push(CombatEvent::EnemyHit {
            enemy_id: impact.enemy_id,
            enemy_kind: impact.enemy_kind,
            missile_kind: impact.missile_kind,
            position: impact.position,
        });
        self.push_score_changed();

        if let Some(signal) = self.waves.on_kill(self.scoring.wave_kills(), now_us) {
            self.apply_wave_signal(signal);
        }
    }

    fn apply_wave_signal(&mut self, signal: WaveSignal) {
        match signal {
            WaveSignal::Cleared { wave } => {
                self.events.push(CombatEvent::WaveCleared { wave });
            }
            WaveSignal::Started { wave } => {
                self.scoring.clear_wave_kills();
                self.spawn_current_wave();
                self.targeting.cancel_orphans(&mut self.world, &self.roster);
                self.events.push(CombatEvent::WaveStarted { wave });
            }
            WaveSignal::AllCleared => {
                self.targeting.cancel_all(&mut self.world);
                self.phase = SessionPhase::Ended;
                self.events.push(CombatEvent::AllWavesCleared);
                tracing::info!(
                    score = self.scoring.score(),
                    kills = self.scoring.kills(),
                    "session complete"
                );
            }
        }
    }

    fn spawn_current_wave(&mut self) {
        let wave = self.waves.wave();
        match self.roster.spawn_wave(&mut self.world, wave) {
            Ok(enemies) => {
                self.events
                    .extend(enemies.into_iter().map(|enemy| CombatEvent::EnemySpawned {
                        enemy_id: enemy.id,
                        kind: enemy.kind,
                        wave,
                    }));
            }
            Err(err) => tracing::error!(%err, "roster generation failed"),
        }
    }

    fn push_score_changed(&mut self) {
        let score = self.scoring.view();
        self.events.push(CombatEvent::ScoreChanged {
            score: score.score,
            kills: score.kills,
            multiplier: score.multiplier,
        });
    }

    fn push_ammo_changed(&mut self) {
        let ammo = self.magazine.view();
        self.events.push(CombatEvent::AmmoChanged {
            rounds: ammo.rounds,
            reloading: ammo.reloading,
            progress: ammo.progress,
        });
    }

    fn build_snapshot(&self, events: Vec<CombatEvent>) -> CombatSnapshot {
        systems::snapshot::build_snapshot(
            &SnapshotSource {
                world: &self.world,
                time: self.time,
                phase: self.phase,
                roster: &self.roster,
                magazine: &self.magazine,
                targeting: &self.targeting,
                scoring: &self.scoring,
                waves: &self.waves,
            },
            events,
        )
    }
}

/// Clamp to `0..=MAX_TIME_SCALE`; a non-finite scale falls back to 1.
fn sanitize_time_scale(scale: f64) -> f64 {
    if scale.is_finite() {
        scale.clamp(0.0, MAX_TIME_SCALE)
    } else {
        1.0
    }
}
