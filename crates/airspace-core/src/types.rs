//! Fundamental geometric and simulation types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::MICROS_PER_MILLI;
use crate::enums::EnemyKind;

/// Position in scene space. The presentation layer's units; the core never
/// interprets them beyond interpolation.
pub type Position = glam::DVec3;

/// Simulation time tracking.
///
/// The clock counts whole microseconds so that deadlines derived from it
/// (reloads, wave pauses) land on the same tick at any frame rate that
/// divides them evenly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of active ticks since the session started.
    pub tick: u64,
    /// Elapsed session time in microseconds.
    pub elapsed_us: u64,
}

impl SimTime {
    /// Advance by one tick of `dt_us` microseconds.
    pub fn advance(&mut self, dt_us: u64) {
        self.tick += 1;
        self.elapsed_us = self.elapsed_us.saturating_add(dt_us);
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_us as f64 / 1_000_000.0
    }

    /// Elapsed session time in whole milliseconds.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_us / MICROS_PER_MILLI
    }
}

/// Round a frame delta in seconds to clock resolution, once.
/// Negative and non-finite deltas count as zero.
pub fn secs_to_micros(secs: f64) -> u64 {
    if secs.is_finite() && secs > 0.0 {
        (secs * 1_000_000.0).round() as u64
    } else {
        0
    }
}

/// Same as `secs_to_micros` for a delta in milliseconds.
pub fn millis_to_micros(ms: f64) -> u64 {
    if ms.is_finite() && ms > 0.0 {
        (ms * MICROS_PER_MILLI as f64).round() as u64
    } else {
        0
    }
}

/// Session-unique enemy identity, composed from the enemy's kind and wave
/// (e.g. `"bomber-2"`). Each wave regenerates the whole roster, so the pair
/// never repeats within a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnemyId(String);

impl EnemyId {
    pub fn new(kind: EnemyKind, wave: u32) -> Self {
        Self(format!("{}-{wave}", kind.tag()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EnemyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EnemyId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for EnemyId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
