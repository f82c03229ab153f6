//! Enemy roster: which enemies a wave fields, and their entities in the world.
//!
//! Wave `n` fields one enemy per tier up to `min(n, 3)`. The roster keeps a
//! record of every enemy of the current wave, destroyed ones included; only
//! live enemies have an entity in the world.

use hecs::{Entity, World};

use airspace_core::components::{Enemy, EnemyTag, FlightControl};
use airspace_core::constants::{ENEMY_SPAWN_POSITION, MAX_ENEMY_TIERS, TOTAL_WAVES};
use airspace_core::enums::EnemyKind;
use airspace_core::errors::RosterError;
use airspace_core::types::{EnemyId, Position};

/// Kills required to clear `wave`. Equal to the roster size.
pub fn enemies_required(wave: u32) -> u32 {
    wave.min(MAX_ENEMY_TIERS)
}

/// Enemies fielded by `wave`, in tier order. Waves below 1 field nobody.
pub fn enemies_for_wave(wave: u32) -> Vec<Enemy> {
    EnemyKind::ALL
        .iter()
        .take(enemies_required(wave) as usize)
        .map(|&kind| Enemy {
            id: EnemyId::new(kind, wave),
            kind,
            base_points: kind.base_points(),
            destroyed: false,
        })
        .collect()
}

/// Checked variant for callers that must stay inside `1..=TOTAL_WAVES`.
pub fn try_enemies_for_wave(wave: u32) -> Result<Vec<Enemy>, RosterError> {
    if wave < 1 || wave > TOTAL_WAVES {
        return Err(RosterError::InvalidWave(wave));
    }
    Ok(enemies_for_wave(wave))
}

#[derive(Debug, Clone)]
struct RosterEntry {
    enemy: Enemy,
    /// Present while the enemy is alive.
    entity: Option<Entity>,
    last_position: Position,
}

/// The current wave's enemies and their world entities.
#[derive(Debug, Clone, Default)]
pub struct EnemyRoster {
    wave: u32,
    entries: Vec<RosterEntry>,
}

impl EnemyRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wave the roster was generated for (0 before the first spawn).
    pub fn wave(&self) -> u32 {
        self.wave
    }

    /// Replace the roster with `wave`'s enemies. Returns the new enemies.
    pub fn spawn_wave(&mut self, world: &mut World, wave: u32) -> Result<Vec<Enemy>, RosterError> {
        let enemies = try_enemies_for_wave(wave)?;
        self.clear(world);
        self.wave = wave;

        for enemy in &enemies {
            let entity = world.spawn((
                EnemyTag {
                    id: enemy.id.clone(),
                    kind: enemy.kind,
                },
                ENEMY_SPAWN_POSITION,
                FlightControl::Pattern,
            ));
            self.entries.push(RosterEntry {
                enemy: enemy.clone(),
                entity: Some(entity),
                last_position: ENEMY_SPAWN_POSITION,
            });
        }
        Ok(enemies)
    }

    /// Despawn every enemy and forget the roster.
    pub fn clear(&mut self, world: &mut World) {
        for entry in self.entries.drain(..) {
            if let Some(entity) = entry.entity {
                let _ = world.despawn(entity);
            }
        }
    }

    pub fn reset(&mut self, world: &mut World) {
        self.clear(world);
        self.wave = 0;
    }

    pub fn enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.entries.iter().map(|entry| &entry.enemy)
    }

    pub fn get(&self, id: &EnemyId) -> Option<&Enemy> {
        self.entry(id).map(|entry| &entry.enemy)
    }

    /// Whether a live enemy is still flown by its built-in pattern.
    pub fn follows_pattern(&self, world: &World, id: &EnemyId) -> bool {
        self.entry(id)
            .and_then(|entry| entry.entity)
            .and_then(|entity| world.get::<&FlightControl>(entity).ok())
            .is_some_and(|control| matches!(*control, FlightControl::Pattern))
    }

    /// Current position of a live enemy.
    pub fn live_position(&self, world: &World, id: &EnemyId) -> Option<Position> {
        let entity = self.entry(id)?.entity?;
        world.get::<&Position>(entity).ok().map(|pos| *pos)
    }

    /// Last known position, kept after the enemy is destroyed.
    pub fn last_position(&self, world: &World, id: &EnemyId) -> Option<Position> {
        self.live_position(world, id)
            .or_else(|| self.entry(id).map(|entry| entry.last_position))
    }

    /// Set the destroyed flag and despawn the entity. Returns false if the
    /// enemy is unknown or already destroyed.
    pub fn mark_destroyed(&mut self, world: &mut World, id: &EnemyId) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|entry| entry.enemy.id == *id) else {
            return false;
        };
        if entry.enemy.destroyed {
            return false;
        }
        entry.enemy.destroyed = true;
        if let Some(entity) = entry.entity.take() {
            if let Ok(pos) = world.get::<&Position>(entity) {
                entry.last_position = *pos;
            }
            let _ = world.despawn(entity);
        }
        true
    }

    /// Host-owned tracking for an enemy. The built-in pattern stops applying.
    pub fn report_position(&mut self, world: &mut World, id: &EnemyId, position: Position) -> bool {
        let Some(entity) = self.entry(id).and_then(|entry| entry.entity) else {
            return false;
        };
        match world.query_one_mut::<(&mut Position, &mut FlightControl)>(entity) {
            Ok((pos, control)) => {
                *pos = position;
                *control = FlightControl::Reported;
                true
            }
            Err(_) => false,
        }
    }

    fn entry(&self, id: &EnemyId) -> Option<&RosterEntry> {
        self.entries.iter().find(|entry| entry.enemy.id == *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(wave: u32) -> Vec<EnemyKind> {
        enemies_for_wave(wave).iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_roster_tiers_per_wave() {
        assert_eq!(kinds(1), vec![EnemyKind::Scout]);
        assert_eq!(kinds(2), vec![EnemyKind::Scout, EnemyKind::Bomber]);
        assert_eq!(
            kinds(3),
            vec![EnemyKind::Scout, EnemyKind::Bomber, EnemyKind::Ace]
        );
        // Capped at three tiers.
        assert_eq!(kinds(7).len(), 3);
        assert!(kinds(0).is_empty());
    }

    #[test]
    fn test_roster_ids_unique_across_session() {
        let mut ids: Vec<EnemyId> = (1..=TOTAL_WAVES)
            .flat_map(enemies_for_wave)
            .map(|e| e.id)
            .collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
        assert_eq!(total, 6);
    }

    #[test]
    fn test_roster_enemies_carry_points() {
        let wave = enemies_for_wave(3);
        let points: Vec<u64> = wave.iter().map(|e| e.base_points).collect();
        assert_eq!(points, vec![100, 200, 500]);
        assert!(wave.iter().all(|e| !e.destroyed));
    }

    #[test]
    fn test_try_enemies_rejects_out_of_range_waves() {
        assert_eq!(try_enemies_for_wave(0), Err(RosterError::InvalidWave(0)));
        assert_eq!(try_enemies_for_wave(4), Err(RosterError::InvalidWave(4)));
        assert_eq!(try_enemies_for_wave(2).unwrap().len(), 2);
    }

    #[test]
    fn test_spawn_wave_replaces_entities() {
        let mut world = World::new();
        let mut roster = EnemyRoster::new();
        roster.spawn_wave(&mut world, 2).unwrap();
        assert_eq!(world.len(), 2);

        roster.spawn_wave(&mut world, 3).unwrap();
        assert_eq!(world.len(), 3);
        assert_eq!(roster.wave(), 3);
        assert!(roster.get(&EnemyId::from("scout-2")).is_none());
        assert!(roster.get(&EnemyId::from("ace-3")).is_some());
    }

    #[test]
    fn test_mark_destroyed_keeps_record_and_position() {
        let mut world = World::new();
        let mut roster = EnemyRoster::new();
        roster.spawn_wave(&mut world, 1).unwrap();
        let id = EnemyId::from("scout-1");
        let here = Position::new(2.0, 1.0, -8.0);
        assert!(roster.follows_pattern(&world, &id));
        assert!(roster.report_position(&mut world, &id, here));
        assert!(!roster.follows_pattern(&world, &id));

        assert!(roster.mark_destroyed(&mut world, &id));
        assert!(!roster.mark_destroyed(&mut world, &id));
        assert_eq!(world.len(), 0);
        assert!(roster.get(&id).unwrap().destroyed);
        assert_eq!(roster.live_position(&world, &id), None);
        assert_eq!(roster.last_position(&world, &id), Some(here));
        assert!(!roster.follows_pattern(&world, &id));
    }
}
