//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Enemy aircraft tier. Wave `n` fields the first `min(n, 3)` tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    /// Light, fast weaver.
    Scout,
    /// Heavy, slow, wide turns.
    Bomber,
    /// Erratic high-value target.
    Ace,
}

impl EnemyKind {
    /// Tiers in roster order.
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Scout, EnemyKind::Bomber, EnemyKind::Ace];

    /// Lowercase tag used in enemy ids and on the wire.
    pub fn tag(self) -> &'static str {
        match self {
            EnemyKind::Scout => "scout",
            EnemyKind::Bomber => "bomber",
            EnemyKind::Ace => "ace",
        }
    }

    /// Points awarded for a kill before the multiplier is applied.
    pub fn base_points(self) -> u64 {
        match self {
            EnemyKind::Scout => SCOUT_POINTS,
            EnemyKind::Bomber => BOMBER_POINTS,
            EnemyKind::Ace => ACE_POINTS,
        }
    }
}

/// Missile loadout selectable by the player. Fixed per missile at launch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissileKind {
    #[default]
    #[serde(rename = "standard")]
    Standard,
    #[serde(rename = "heatseker", alias = "heatseeker")]
    HeatSeeker,
    #[serde(rename = "emp")]
    Emp,
}

impl MissileKind {
    pub const ALL: [MissileKind; 3] = [MissileKind::Standard, MissileKind::HeatSeeker, MissileKind::Emp];

    /// Travel progress per second; progress 1.0 is impact.
    pub fn speed(self) -> f64 {
        match self {
            MissileKind::Standard => STANDARD_MISSILE_SPEED,
            MissileKind::HeatSeeker => HEAT_SEEKER_SPEED,
            MissileKind::Emp => EMP_MISSILE_SPEED,
        }
    }

    /// Label shown on the weapon selector.
    pub fn display_name(self) -> &'static str {
        match self {
            MissileKind::Standard => "STANDARD",
            MissileKind::HeatSeeker => "HEAT SEEKER",
            MissileKind::Emp => "EMP",
        }
    }

    /// Map the number-row selector keys to a loadout.
    pub fn from_hotkey(key: char) -> Option<Self> {
        match key {
            '1' => Some(MissileKind::Standard),
            '2' => Some(MissileKind::HeatSeeker),
            '3' => Some(MissileKind::Emp),
            _ => None,
        }
    }
}

/// Wave controller state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WavePhase {
    /// Enemies on the roster are live.
    #[default]
    InProgress,
    /// Roster cleared, next wave is scheduled.
    WaveClearedPause,
    /// Final wave cleared. Terminal until reset.
    AllCleared,
}

/// Top-level session state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No session has been started.
    #[default]
    Idle,
    /// Systems run every tick.
    Active,
    /// All waves cleared or the session was skipped.
    Ended,
}
