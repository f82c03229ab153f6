//! Built-in enemy flight patterns.
//!
//! Closed-form functions of session time, so positions are reproducible for a
//! given tick timeline. Hosts with their own flight paths report positions
//! instead (see `FlightControl::Reported`).

use airspace_core::enums::EnemyKind;
use airspace_core::types::Position;

/// Position of an enemy of `kind` at `t` seconds into the session.
pub fn pattern_position(kind: EnemyKind, t: f64) -> Position {
    match kind {
        // Fast figure-eight weave.
        EnemyKind::Scout => Position::new(
            (t * 3.0).sin() * 4.0,
            (t * 2.0).cos() * 1.5 + 1.0,
            -8.0,
        ),
        // Slow, wide, low.
        EnemyKind::Bomber => Position::new(
            (t * 1.2).sin() * 3.0,
            (t * 0.8).sin() * 0.8 - 0.5,
            -10.0,
        ),
        // Superimposed harmonics; the hardest to lead.
        EnemyKind::Ace => Position::new(
            (t * 4.0).sin() * 3.0 + (t * 2.5).cos() * 1.5,
            (t * 3.0).cos() * 2.0,
            -7.0,
        ),
    }
}

/// Bank angle (radians) matching the pattern's lateral motion.
pub fn pattern_roll(kind: EnemyKind, t: f64) -> f64 {
    match kind {
        EnemyKind::Scout => -(t * 3.0).cos() * 0.3,
        EnemyKind::Bomber => -(t * 1.2).cos() * 0.15,
        EnemyKind::Ace => -(t * 4.0).cos() * 0.4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_at_time_zero() {
        assert_eq!(
            pattern_position(EnemyKind::Scout, 0.0),
            Position::new(0.0, 2.5, -8.0)
        );
        assert_eq!(
            pattern_position(EnemyKind::Bomber, 0.0),
            Position::new(0.0, -0.5, -10.0)
        );
        assert_eq!(
            pattern_position(EnemyKind::Ace, 0.0),
            Position::new(1.5, 2.0, -7.0)
        );
    }

    #[test]
    fn test_patterns_keep_their_depth() {
        for step in 0..200 {
            let t = f64::from(step) * 0.05;
            assert_eq!(pattern_position(EnemyKind::Scout, t).z, -8.0);
            assert_eq!(pattern_position(EnemyKind::Bomber, t).z, -10.0);
            assert_eq!(pattern_position(EnemyKind::Ace, t).z, -7.0);
        }
    }

    #[test]
    fn test_patterns_stay_in_envelope() {
        for step in 0..500 {
            let t = f64::from(step) * 0.037;
            let scout = pattern_position(EnemyKind::Scout, t);
            assert!(scout.x.abs() <= 4.0 && (-0.5..=2.5).contains(&scout.y));
            let ace = pattern_position(EnemyKind::Ace, t);
            assert!(ace.x.abs() <= 4.5 && ace.y.abs() <= 2.0);
            assert!(pattern_roll(EnemyKind::Ace, t).abs() <= 0.4);
        }
    }
}
