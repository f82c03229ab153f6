//! Events emitted by the simulation for presentation feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::errors::FireError;
use crate::types::{EnemyId, Position};

/// Outbound notifications, drained into each snapshot in emission order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatEvent {
    /// A session was (re)started.
    SessionStarted,
    /// An enemy joined the roster of a new wave.
    EnemySpawned {
        enemy_id: EnemyId,
        kind: EnemyKind,
        wave: u32,
    },
    /// Missile away.
    MissileLaunched {
        missile_id: u32,
        enemy_id: EnemyId,
        kind: MissileKind,
    },
    /// Confirmed impact. `position` is the target's last known position.
    EnemyHit {
        enemy_id: EnemyId,
        enemy_kind: EnemyKind,
        missile_kind: MissileKind,
        position: Position,
    },
    /// The roster of `wave` is cleared and the next wave is scheduled.
    WaveCleared { wave: u32 },
    /// A new wave began.
    WaveStarted { wave: u32 },
    /// The final wave was cleared. The session is over.
    AllWavesCleared,
    /// The session ended without clearing every wave.
    SessionEnded { skipped: bool },
    ScoreChanged {
        score: u64,
        kills: u32,
        multiplier: u32,
    },
    AmmoChanged {
        rounds: u32,
        reloading: bool,
        progress: f64,
    },
    MissileTypeChanged { kind: MissileKind },
    /// A queued fire command was refused.
    FireRejected { enemy_id: EnemyId, error: FireError },
}
