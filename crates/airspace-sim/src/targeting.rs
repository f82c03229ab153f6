//! Targeting: missile launch, homing flight, and impact resolution.
//!
//! At most one missile may be in flight per enemy. Every missile impacts its
//! bound target once its progress reaches 1; a missile whose target leaves
//! the roster first is cancelled without an impact.

use hecs::{Entity, World};

use airspace_core::components::{Missile, MissileState};
use airspace_core::constants::MISSILE_LAUNCH_ORIGIN;
use airspace_core::enums::{EnemyKind, MissileKind};
use airspace_core::errors::FireError;
use airspace_core::state::MissileView;
use airspace_core::types::{EnemyId, Position};

use crate::guidance;
use crate::magazine::AmmoMagazine;
use crate::roster::EnemyRoster;

/// A successful launch.
#[derive(Debug, Clone, PartialEq)]
pub struct Launch {
    pub missile_id: u32,
    pub enemy_id: EnemyId,
    pub kind: MissileKind,
}

/// A confirmed hit, consumed by scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct Impact {
    pub enemy_id: EnemyId,
    pub enemy_kind: EnemyKind,
    pub missile_kind: MissileKind,
    /// Where the target was when the missile arrived.
    pub position: Position,
}

#[derive(Debug, Clone)]
struct InFlight {
    missile_id: u32,
    enemy_id: EnemyId,
    entity: Entity,
}

#[derive(Debug, Clone, Default)]
pub struct TargetingSystem {
    selected: MissileKind,
    /// Launch order. Impacts within one tick resolve in this order.
    in_flight: Vec<InFlight>,
    next_missile_id: u32,
}

impl TargetingSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kind used for subsequent launches.
    pub fn selected(&self) -> MissileKind {
        self.selected
    }

    /// In-flight missiles keep the kind they launched with.
    pub fn select(&mut self, kind: MissileKind) {
        self.selected = kind;
    }

    pub fn is_targeted(&self, enemy_id: &EnemyId) -> bool {
        self.in_flight.iter().any(|flight| flight.enemy_id == *enemy_id)
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Launch the selected kind at `enemy_id`, spending one round.
    pub fn fire_at(
        &mut self,
        world: &mut World,
        roster: &EnemyRoster,
        magazine: &mut AmmoMagazine,
        enemy_id: &EnemyId,
    ) -> Result<Launch, FireError> {
        let enemy = roster.get(enemy_id).ok_or(FireError::UnknownEnemy)?;
        if enemy.destroyed {
            return Err(FireError::EnemyDestroyed);
        }
        if self.is_targeted(enemy_id) {
            return Err(FireError::AlreadyTargeted);
        }
        let target = roster
            .live_position(world, enemy_id)
            .ok_or(FireError::EnemyDestroyed)?;

        magazine.fire()?;

        let missile_id = self.next_missile_id;
        self.next_missile_id += 1;
        let entity = world.spawn((
            Missile,
            MissileState {
                missile_id,
                target: enemy_id.clone(),
                kind: self.selected,
                progress: 0.0,
                aim_point: target,
            },
            MISSILE_LAUNCH_ORIGIN,
        ));
        self.in_flight.push(InFlight {
            missile_id,
            enemy_id: enemy_id.clone(),
            entity,
        });

        Ok(Launch {
            missile_id,
            enemy_id: enemy_id.clone(),
            kind: self.selected,
        })
    }

    /// Advance every missile by `dt_secs` and resolve impacts.
    pub fn run(&mut self, world: &mut World, roster: &mut EnemyRoster, dt_secs: f64) -> Vec<Impact> {
        let mut cancelled = Vec::new();
        let mut landed = Vec::new();

        for flight in &self.in_flight {
            let Some(target) = roster.live_position(world, &flight.enemy_id) else {
                cancelled.push(flight.missile_id);
                continue;
            };
            let Ok((missile, pos)) =
                world.query_one_mut::<(&mut MissileState, &mut Position)>(flight.entity)
            else {
                cancelled.push(flight.missile_id);
                continue;
            };

            missile.aim_point = guidance::home_toward(missile.aim_point, target);
            missile.progress = guidance::advance_progress(missile.progress, missile.kind, dt_secs);
            if missile.progress >= 1.0 {
                landed.push((flight.missile_id, missile.kind, target));
            } else {
                *pos = guidance::missile_position(missile.aim_point, missile.progress);
            }
        }

        for missile_id in cancelled {
            self.remove(world, missile_id);
        }

        let mut impacts = Vec::with_capacity(landed.len());
        for (missile_id, missile_kind, position) in landed {
            let Some(flight) = self.remove(world, missile_id) else {
                continue;
            };
            let Some(enemy_kind) = roster.get(&flight.enemy_id).map(|enemy| enemy.kind) else {
                continue;
            };
            if roster.mark_destroyed(world, &flight.enemy_id) {
                impacts.push(Impact {
                    enemy_id: flight.enemy_id,
                    enemy_kind,
                    missile_kind,
                    position,
                });
            }
        }
        impacts
    }

    /// Cancel missiles whose target is no longer a live roster enemy.
    pub fn cancel_orphans(&mut self, world: &mut World, roster: &EnemyRoster) -> usize {
        let orphans: Vec<u32> = self
            .in_flight
            .iter()
            .filter(|flight| roster.live_position(world, &flight.enemy_id).is_none())
            .map(|flight| flight.missile_id)
            .collect();
        for &missile_id in &orphans {
            self.remove(world, missile_id);
        }
        orphans.len()
    }

    /// Cancel every in-flight missile.
    pub fn cancel_all(&mut self, world: &mut World) {
        for flight in self.in_flight.drain(..) {
            tracing::debug!(missile_id = flight.missile_id, enemy = %flight.enemy_id, "missile cancelled");
            let _ = world.despawn(flight.entity);
        }
    }

    pub fn reset(&mut self, world: &mut World) {
        self.cancel_all(world);
        self.selected = MissileKind::default();
        self.next_missile_id = 0;
    }

    pub fn missile_views(&self, world: &World) -> Vec<MissileView> {
        self.in_flight
            .iter()
            .filter_map(|flight| {
                let missile = world.get::<&MissileState>(flight.entity).ok()?;
                let position = world.get::<&Position>(flight.entity).ok()?;
                Some(MissileView {
                    missile_id: missile.missile_id,
                    enemy_id: missile.target.clone(),
                    kind: missile.kind,
                    progress: missile.progress,
                    position: *position,
                })
            })
            .collect()
    }

    fn remove(&mut self, world: &mut World, missile_id: u32) -> Option<InFlight> {
        let index = self
            .in_flight
            .iter()
            .position(|flight| flight.missile_id == missile_id)?;
        let flight = self.in_flight.remove(index);
        let _ = world.despawn(flight.entity);
        Some(flight)
    }
}
