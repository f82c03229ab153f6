//! Structured failures returned from discrete operations.
//!
//! None of these are fatal to a session. `tick` never returns an error.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure from the magazine's fire action. No state changes on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum AmmoError {
    #[error("magazine is empty")]
    InsufficientAmmo,
    #[error("magazine is reloading")]
    CurrentlyReloading,
}

/// Failure from a fire-at-enemy request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum FireError {
    #[error("magazine is empty")]
    InsufficientAmmo,
    #[error("magazine is reloading")]
    CurrentlyReloading,
    #[error("a missile is already in flight toward this enemy")]
    AlreadyTargeted,
    #[error("enemy is already destroyed")]
    EnemyDestroyed,
    #[error("enemy is not on the current roster")]
    UnknownEnemy,
    #[error("no session is active")]
    SessionInactive,
}

impl From<AmmoError> for FireError {
    fn from(err: AmmoError) -> Self {
        match err {
            AmmoError::InsufficientAmmo => FireError::InsufficientAmmo,
            AmmoError::CurrentlyReloading => FireError::CurrentlyReloading,
        }
    }
}

/// Roster contract violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("wave {0} is outside 1..={max}", max = crate::constants::TOTAL_WAVES)]
    InvalidWave(u32),
}
