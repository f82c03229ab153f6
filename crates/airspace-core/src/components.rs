//! ECS components for hecs entities, plus the roster's enemy record.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{EnemyId, Position};

/// An enemy on the current wave's roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub kind: EnemyKind,
    /// Points before the multiplier.
    pub base_points: u64,
    /// Set on confirmed impact. Destroyed enemies are despawned from the world.
    pub destroyed: bool,
}

/// Identity component on enemy entities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyTag {
    pub id: EnemyId,
    pub kind: EnemyKind,
}

/// Who moves an enemy entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightControl {
    /// The built-in flight pattern for the enemy's kind.
    #[default]
    Pattern,
    /// The host reports positions; the pattern no longer applies.
    Reported,
}

/// In-flight missile state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissileState {
    pub missile_id: u32,
    /// Enemy this missile is bound to for its whole flight.
    pub target: EnemyId,
    pub kind: MissileKind,
    /// Travel progress in [0, 1). Reaching 1 is impact.
    pub progress: f64,
    /// Homing snapshot of the target, chasing its live position.
    pub aim_point: Position,
}

/// Marks an entity as a player missile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Missile;
