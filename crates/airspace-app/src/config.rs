use std::env;
use std::time::Duration;

use airspace_core::constants::TICK_RATE;

// Host runtime settings (not gameplay tuning).

const DEFAULT_AUTOPILOT_SEED: u64 = 42;
const DEFAULT_FIRE_INTERVAL_MS: u64 = 400;
const DEFAULT_SESSION_TIMEOUT_SECS: u64 = 120;

/// Fastest loop rate accepted from the environment.
const MAX_TICK_RATE: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// Game loop rate in Hz.
    pub tick_rate: u32,
    pub autopilot_seed: u64,
    /// Minimum gap between autopilot launches.
    pub fire_interval: Duration,
    /// The session is skipped if it has not ended after this long.
    pub session_timeout: Duration,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,
            autopilot_seed: DEFAULT_AUTOPILOT_SEED,
            fire_interval: Duration::from_millis(DEFAULT_FIRE_INTERVAL_MS),
            session_timeout: Duration::from_secs(DEFAULT_SESSION_TIMEOUT_SECS),
        }
    }
}

impl HostConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Missing or unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parsed = |key: &str| lookup(key).and_then(|value| value.trim().parse::<u64>().ok());
        let defaults = Self::default();

        let tick_rate = parsed("AIRSPACE_TICK_RATE")
            .filter(|&hz| hz > 0)
            .map(|hz| hz.min(u64::from(MAX_TICK_RATE)) as u32)
            .unwrap_or(defaults.tick_rate);

        Self {
            tick_rate,
            autopilot_seed: parsed("AIRSPACE_AUTOPILOT_SEED").unwrap_or(defaults.autopilot_seed),
            fire_interval: parsed("AIRSPACE_FIRE_INTERVAL_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.fire_interval),
            session_timeout: parsed("AIRSPACE_SESSION_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.session_timeout),
        }
    }

    /// Wall-clock duration of one loop iteration.
    pub fn tick_duration(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.tick_rate.max(1)))
    }

    /// Simulated seconds per tick.
    pub fn tick_dt(&self) -> f64 {
        1.0 / f64::from(self.tick_rate.max(1))
    }
}
