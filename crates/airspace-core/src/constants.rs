//! Simulation constants and tuning parameters.

use glam::DVec3;

// --- Session ---

/// Number of waves in a session.
pub const TOTAL_WAVES: u32 = 3;

/// Maximum number of distinct enemy tiers on a roster.
pub const MAX_ENEMY_TIERS: u32 = 3;

// --- Magazine ---

/// Rounds held by a full magazine.
pub const MAX_AMMO: u32 = 3;

/// Time to refill an empty magazine (milliseconds).
pub const RELOAD_TIME_MS: u64 = 3000;

// --- Wave transitions ---

/// Delay between a wave being cleared and the next wave starting (milliseconds).
pub const WAVE_CLEARED_PAUSE_MS: u64 = 2000;

/// Delay between the final kill and the all-cleared terminal state (milliseconds).
pub const ALL_CLEARED_PAUSE_MS: u64 = 1500;

/// Resolution of the session clock.
pub const MICROS_PER_MILLI: u64 = 1000;

// --- Scoring ---

/// Highest value the consecutive-hit multiplier can reach.
pub const MULTIPLIER_CAP: u32 = 5;

/// Base points for a scout kill.
pub const SCOUT_POINTS: u64 = 100;

/// Base points for a bomber kill.
pub const BOMBER_POINTS: u64 = 200;

/// Base points for an ace kill.
pub const ACE_POINTS: u64 = 500;

// --- Missile kinematics ---

/// Progress per second for a standard missile (1.0 = impact).
pub const STANDARD_MISSILE_SPEED: f64 = 3.0;

/// Progress per second for a heat seeker.
pub const HEAT_SEEKER_SPEED: f64 = 4.0;

/// Progress per second for an EMP missile.
pub const EMP_MISSILE_SPEED: f64 = 2.0;

/// Fraction of the remaining distance the aim point closes toward the target each tick.
pub const HOMING_LERP_FACTOR: f64 = 0.1;

/// Launch point of every missile, in scene units.
pub const MISSILE_LAUNCH_ORIGIN: DVec3 = DVec3::new(0.0, -3.0, 6.0);

// --- Enemies ---

/// Position a freshly spawned enemy occupies before its flight pattern takes over.
pub const ENEMY_SPAWN_POSITION: DVec3 = DVec3::new(0.0, 0.0, -8.0);

// --- Host ---

/// Default host tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the default host rate.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Largest accepted time scale.
pub const MAX_TIME_SCALE: f64 = 4.0;
