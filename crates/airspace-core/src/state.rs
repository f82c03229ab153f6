//! Combat state snapshot. The complete visible state sent to the presentation layer each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::CombatEvent;
use crate::types::{EnemyId, Position, SimTime};

/// Complete combat state broadcast after each tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatSnapshot {
    pub time: SimTime,
    pub phase: SessionPhase,
    pub selected_missile: MissileKind,
    pub wave: WaveView,
    pub score: ScoreView,
    pub ammo: AmmoView,
    pub enemies: Vec<EnemyView>,
    pub missiles: Vec<MissileView>,
    pub events: Vec<CombatEvent>,
}

/// Wave progression for the HUD.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaveView {
    pub number: u32,
    pub total: u32,
    pub phase: WavePhase,
    pub kills_this_wave: u32,
    pub kills_required: u32,
    /// Wave number for the "WAVE N CLEARED" banner.
    pub banner_wave: u32,
}

/// Running score for the HUD.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreView {
    pub score: u64,
    pub kills: u32,
    pub multiplier: u32,
}

/// Magazine status for the HUD.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AmmoView {
    pub rounds: u32,
    pub max_rounds: u32,
    pub reloading: bool,
    /// Reload progress (0.0 - 1.0). Zero when not reloading.
    pub progress: f64,
}

/// A roster entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub enemy_id: EnemyId,
    pub kind: EnemyKind,
    pub position: Position,
    /// Bank angle in radians for pattern-flown enemies, otherwise 0.
    pub roll: f64,
    pub destroyed: bool,
    /// Whether a missile is in flight toward this enemy.
    pub targeted: bool,
}

/// An in-flight missile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissileView {
    pub missile_id: u32,
    pub enemy_id: EnemyId,
    pub kind: MissileKind,
    /// Travel progress (0.0 - 1.0).
    pub progress: f64,
    pub position: Position,
}
