//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for read-only).
//! Bookkeeping that outlives a single entity lives in the engine's subsystems.

pub mod flight;
pub mod snapshot;
