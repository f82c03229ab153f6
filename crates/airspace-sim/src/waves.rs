//! Wave progression state machine.
//!
//! `InProgress -> WaveClearedPause -> InProgress(wave + 1)` for every wave but
//! the last, `InProgress -> AllCleared` after the last. Both transitions are
//! deferred through a generation-tagged scheduler so a reset cancels them.

use airspace_core::constants::*;
use airspace_core::enums::WavePhase;
use airspace_core::state::WaveView;

use crate::roster;
use crate::scheduler::{Scheduler, Ticket};

/// Deferred transitions owned by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WaveTransition {
    Advance,
    Finish,
}

/// Progression changes reported to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveSignal {
    /// The roster of `wave` was cleared; the next wave is scheduled.
    Cleared { wave: u32 },
    /// `wave` began. The per-wave kill counter must be cleared.
    Started { wave: u32 },
    /// The final wave was cleared.
    AllCleared,
}

#[derive(Debug, Clone)]
pub struct WaveController {
    wave: u32,
    phase: WavePhase,
    scheduler: Scheduler<WaveTransition>,
    /// The scheduled transition that has not fired yet.
    pending: Option<Ticket>,
}

impl Default for WaveController {
    fn default() -> Self {
        Self {
            wave: 1,
            phase: WavePhase::InProgress,
            scheduler: Scheduler::new(),
            pending: None,
        }
    }
}

impl WaveController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn phase(&self) -> WavePhase {
        self.phase
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == WavePhase::AllCleared
    }

    /// Whether a deferred transition is waiting to fire.
    pub fn has_pending_transition(&self) -> bool {
        self.pending
            .is_some_and(|ticket| !self.scheduler.is_stale(&ticket))
    }

    /// Generation of the underlying scheduler. Bumped by every reset.
    pub fn generation(&self) -> u64 {
        self.scheduler.generation()
    }

    /// Observe the per-wave kill count after a kill at `now_us`.
    pub fn on_kill(&mut self, wave_kills: u32, now_us: u64) -> Option<WaveSignal> {
        if self.phase != WavePhase::InProgress || self.has_pending_transition() {
            return None;
        }
        if wave_kills < roster::enemies_required(self.wave) {
            return None;
        }

        if self.wave < TOTAL_WAVES {
            self.phase = WavePhase::WaveClearedPause;
            let due = now_us + WAVE_CLEARED_PAUSE_MS * MICROS_PER_MILLI;
            self.pending = Some(self.scheduler.schedule(due, WaveTransition::Advance));
            tracing::info!(wave = self.wave, due_us = due, "wave cleared");
            Some(WaveSignal::Cleared { wave: self.wave })
        } else {
            let due = now_us + ALL_CLEARED_PAUSE_MS * MICROS_PER_MILLI;
            self.pending = Some(self.scheduler.schedule(due, WaveTransition::Finish));
            tracing::info!(wave = self.wave, due_us = due, "final wave cleared");
            None
        }
    }

    /// Apply every deferred transition due at `now_us`.
    pub fn poll(&mut self, now_us: u64) -> Vec<WaveSignal> {
        let mut signals = Vec::new();
        while let Some(transition) = self.scheduler.pop_due(now_us) {
            self.pending = None;
            match transition {
                WaveTransition::Advance => {
                    self.wave = (self.wave + 1).min(TOTAL_WAVES);
                    self.phase = WavePhase::InProgress;
                    tracing::info!(wave = self.wave, "wave started");
                    signals.push(WaveSignal::Started { wave: self.wave });
                }
                WaveTransition::Finish => {
                    self.phase = WavePhase::AllCleared;
                    tracing::info!("all waves cleared");
                    signals.push(WaveSignal::AllCleared);
                }
            }
        }
        signals
    }

    /// Drop any scheduled transition without changing the wave.
    pub fn cancel_pending(&mut self) {
        self.scheduler.invalidate();
        self.pending = None;
    }

    /// Back to wave 1. Pending transitions become stale.
    pub fn reset(&mut self) {
        self.scheduler.invalidate();
        self.wave = 1;
        self.phase = WavePhase::InProgress;
        self.pending = None;
    }

    pub fn view(&self, wave_kills: u32) -> WaveView {
        let banner_wave = if self.phase == WavePhase::WaveClearedPause {
            self.wave
        } else {
            self.wave.saturating_sub(1).max(1)
        };
        WaveView {
            number: self.wave,
            total: TOTAL_WAVES,
            phase: self.phase,
            kills_this_wave: wave_kills,
            kills_required: roster::enemies_required(self.wave),
            banner_wave,
        }
    }
}
