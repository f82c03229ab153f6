//! Hit scoring with a consecutive-hit multiplier.
//!
//! Every fired missile impacts, so there is no miss path and the multiplier
//! only falls back to 1 on a full reset.

use airspace_core::constants::MULTIPLIER_CAP;
use airspace_core::enums::{EnemyKind, MissileKind};
use airspace_core::state::ScoreView;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringEngine {
    score: u64,
    kills: u32,
    multiplier: u32,
    consecutive_hits: u32,
    wave_kills: u32,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self {
            score: 0,
            kills: 0,
            multiplier: 1,
            consecutive_hits: 0,
            wave_kills: 0,
        }
    }
}

impl ScoringEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score a confirmed hit. Returns the points awarded.
    ///
    /// `missile_kind` only matters to the presentation layer's effects.
    pub fn on_impact(&mut self, enemy_kind: EnemyKind, _missile_kind: MissileKind) -> u64 {
        self.consecutive_hits += 1;
        self.multiplier = self.consecutive_hits.min(MULTIPLIER_CAP);

        let awarded = enemy_kind.base_points() * u64::from(self.multiplier);
        self.score += awarded;
        self.kills += 1;
        self.wave_kills += 1;
        awarded
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    /// Kills since the current wave began.
    pub fn wave_kills(&self) -> u32 {
        self.wave_kills
    }

    /// Called when the next wave begins.
    pub fn clear_wave_kills(&mut self) {
        self.wave_kills = 0;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn view(&self) -> ScoreView {
        ScoreView {
            score: self.score,
            kills: self.kills,
            multiplier: self.multiplier,
        }
    }
}
