//! Snapshot system: reads the world and subsystems and builds a CombatSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use airspace_core::enums::SessionPhase;
use airspace_core::events::CombatEvent;
use airspace_core::state::*;
use airspace_core::types::SimTime;

use crate::flight::pattern_roll;
use crate::magazine::AmmoMagazine;
use crate::roster::EnemyRoster;
use crate::scoring::ScoringEngine;
use crate::targeting::TargetingSystem;
use crate::waves::WaveController;

/// Borrowed view of everything a snapshot is built from.
pub struct SnapshotSource<'a> {
    pub world: &'a World,
    pub time: SimTime,
    pub phase: SessionPhase,
    pub roster: &'a EnemyRoster,
    pub magazine: &'a AmmoMagazine,
    pub targeting: &'a TargetingSystem,
    pub scoring: &'a ScoringEngine,
    pub waves: &'a WaveController,
}

/// Build a complete CombatSnapshot, taking ownership of the drained events.
pub fn build_snapshot(source: &SnapshotSource<'_>, events: Vec<CombatEvent>) -> CombatSnapshot {
    CombatSnapshot {
        time: source.time,
        phase: source.phase,
        selected_missile: source.targeting.selected(),
        wave: source.waves.view(source.scoring.wave_kills()),
        score: source.scoring.view(),
        ammo: source.magazine.view(),
        enemies: build_enemies(source),
        missiles: source.targeting.missile_views(source.world),
        events,
    }
}

/// Roster order, destroyed enemies included at their last known position.
/// Only pattern-flown enemies carry a bank angle.
fn build_enemies(source: &SnapshotSource<'_>) -> Vec<EnemyView> {
    let t = source.time.elapsed_secs();
    source
        .roster
        .enemies()
        .map(|enemy| EnemyView {
            enemy_id: enemy.id.clone(),
            kind: enemy.kind,
            position: source
                .roster
                .last_position(source.world, &enemy.id)
                .unwrap_or_default(),
            roll: if source.roster.follows_pattern(source.world, &enemy.id) {
                pattern_roll(enemy.kind, t)
            } else {
                0.0
            },
            destroyed: enemy.destroyed,
            targeted: source.targeting.is_targeted(&enemy.id),
        })
        .collect()
}
