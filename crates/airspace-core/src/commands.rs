//! Player commands sent from the presentation layer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::MissileKind;
use crate::types::{EnemyId, Position};

/// All possible player and host actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Reset every subsystem and begin at wave 1.
    StartSession,
    /// Launch a missile of the selected kind at an enemy.
    FireAt { enemy_id: EnemyId },
    /// Change the kind used for subsequent launches.
    SwitchMissileType { kind: MissileKind },
    /// Abandon the remaining waves.
    SkipSession,
    /// Override an enemy's position with the host's own tracking.
    ReportEnemyPosition { enemy_id: EnemyId, position: Position },
    /// Set time scale (1.0 = normal, 0.0 = frozen).
    SetTimeScale { scale: f64 },
}
