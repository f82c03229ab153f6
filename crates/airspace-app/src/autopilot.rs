//! Seeded autopilot that plays a session by reading snapshots.

use std::time::Duration;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use airspace_core::commands::PlayerCommand;
use airspace_core::enums::{MissileKind, SessionPhase};
use airspace_core::state::CombatSnapshot;
use airspace_core::types::EnemyId;

/// Chance of switching loadout before a launch.
const SWITCH_CHANCE: f64 = 0.25;

pub struct Autopilot {
    rng: ChaCha8Rng,
    fire_interval_us: u64,
    last_fire_us: Option<u64>,
}

impl Autopilot {
    pub fn new(seed: u64, fire_interval: Duration) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            fire_interval_us: u64::try_from(fire_interval.as_micros()).unwrap_or(u64::MAX),
            last_fire_us: None,
        }
    }

    /// Commands to send after observing `snapshot`. Session time gates the
    /// fire interval, so a replayed session makes the same choices.
    pub fn next_commands(&mut self, snapshot: &CombatSnapshot) -> Vec<PlayerCommand> {
        if snapshot.phase != SessionPhase::Active {
            return Vec::new();
        }
        let now_us = snapshot.time.elapsed_us;
        // A restarted session runs on a fresh clock.
        if self.last_fire_us.is_some_and(|last| now_us < last) {
            self.last_fire_us = None;
        }
        if self
            .last_fire_us
            .is_some_and(|last| now_us - last < self.fire_interval_us)
        {
            return Vec::new();
        }
        if snapshot.ammo.reloading || snapshot.ammo.rounds == 0 {
            return Vec::new();
        }

        let candidates: Vec<&EnemyId> = snapshot
            .enemies
            .iter()
            .filter(|enemy| !enemy.destroyed && !enemy.targeted)
            .map(|enemy| &enemy.enemy_id)
            .collect();
        let Some(&target) = candidates.choose(&mut self.rng) else {
            return Vec::new();
        };

        let mut commands = Vec::with_capacity(2);
        if self.rng.gen_bool(SWITCH_CHANCE) {
            let kind = MissileKind::ALL[self.rng.gen_range(0..MissileKind::ALL.len())];
            if kind != snapshot.selected_missile {
                commands.push(PlayerCommand::SwitchMissileType { kind });
            }
        }
        commands.push(PlayerCommand::FireAt {
            enemy_id: target.clone(),
        });
        self.last_fire_us = Some(now_us);
        tracing::debug!(enemy = %target, at_us = now_us, "autopilot firing");
        commands
    }
}
