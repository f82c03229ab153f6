//! Ammunition magazine: limited rounds with an automatic timed reload.
//!
//! `Ready` while rounds remain. At zero rounds the next tick engages the
//! reload; progress is sampled every tick and the magazine refills to
//! `MAX_AMMO` once `RELOAD_TIME_MS` of tick time has elapsed.

use airspace_core::constants::{MAX_AMMO, MICROS_PER_MILLI, RELOAD_TIME_MS};
use airspace_core::errors::AmmoError;
use airspace_core::state::AmmoView;
use airspace_core::types::millis_to_micros;

const RELOAD_TIME_US: u64 = RELOAD_TIME_MS * MICROS_PER_MILLI;

#[derive(Debug, Clone, PartialEq)]
pub struct AmmoMagazine {
    rounds: u32,
    reloading: bool,
    /// Reload progress (0.0 - 1.0).
    progress: f64,
    /// Tick time accumulated since the reload engaged, in microseconds.
    reload_elapsed_us: u64,
}

impl Default for AmmoMagazine {
    fn default() -> Self {
        Self {
            rounds: MAX_AMMO,
            reloading: false,
            progress: 0.0,
            reload_elapsed_us: 0,
        }
    }
}

impl AmmoMagazine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn is_reloading(&self) -> bool {
        self.reloading
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Spend one round. Fails without side effects while reloading or empty.
    pub fn fire(&mut self) -> Result<(), AmmoError> {
        if self.reloading {
            return Err(AmmoError::CurrentlyReloading);
        }
        if self.rounds == 0 {
            return Err(AmmoError::InsufficientAmmo);
        }
        self.rounds -= 1;
        Ok(())
    }

    /// Advance the reload state machine by `elapsed_ms`, rounded to the
    /// microsecond. Returns true if any visible state changed.
    pub fn tick(&mut self, elapsed_ms: f64) -> bool {
        self.tick_micros(millis_to_micros(elapsed_ms))
    }

    /// Level-triggered: any tick that finds the magazine empty and idle
    /// engages a reload, and that tick's elapsed time already counts toward it.
    pub fn tick_micros(&mut self, elapsed_us: u64) -> bool {
        let mut changed = false;

        if self.rounds == 0 && !self.reloading {
            self.reloading = true;
            self.progress = 0.0;
            self.reload_elapsed_us = 0;
            changed = true;
        }

        if self.reloading {
            self.reload_elapsed_us = self.reload_elapsed_us.saturating_add(elapsed_us);
            if self.reload_elapsed_us >= RELOAD_TIME_US {
                self.rounds = MAX_AMMO;
                self.reloading = false;
                self.progress = 0.0;
                self.reload_elapsed_us = 0;
                return true;
            }
            let progress = self.reload_elapsed_us as f64 / RELOAD_TIME_US as f64;
            if progress != self.progress {
                self.progress = progress;
                changed = true;
            }
        }

        changed
    }

    /// Full magazine, no reload in progress.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn view(&self) -> AmmoView {
        AmmoView {
            rounds: self.rounds,
            max_rounds: MAX_AMMO,
            reloading: self.reloading,
            progress: self.progress,
        }
    }
}
