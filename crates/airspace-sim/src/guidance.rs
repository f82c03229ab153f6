//! Missile homing.
//!
//! The missile flies along `lerp(origin, aim, progress)` while the aim point
//! chases the target's live position by a fixed fraction per tick. This
//! shapes a pursuit curve; impact time depends only on progress.

use airspace_core::constants::{HOMING_LERP_FACTOR, MISSILE_LAUNCH_ORIGIN};
use airspace_core::enums::MissileKind;
use airspace_core::types::Position;

/// Move the aim point `HOMING_LERP_FACTOR` of the way toward the target.
pub fn home_toward(aim_point: Position, target: Position) -> Position {
    aim_point.lerp(target, HOMING_LERP_FACTOR)
}

/// Progress after `dt_secs` of flight.
pub fn advance_progress(progress: f64, kind: MissileKind, dt_secs: f64) -> f64 {
    progress + dt_secs * kind.speed()
}

/// Missile position for a given aim point and progress.
pub fn missile_position(aim_point: Position, progress: f64) -> Position {
    MISSILE_LAUNCH_ORIGIN.lerp(aim_point, progress.clamp(0.0, 1.0))
}
