//! Combat simulation engine for AIRSPACE.
//!
//! Owns the hecs ECS world of enemies and missiles, runs the combat
//! subsystems once per host frame, and produces CombatSnapshots for the
//! presentation layer.

pub mod engine;
pub mod flight;
pub mod guidance;
pub mod magazine;
pub mod roster;
pub mod scheduler;
pub mod scoring;
pub mod systems;
pub mod targeting;
pub mod waves;

pub use airspace_core as core;
pub use engine::{CombatEngine, SimConfig};

#[cfg(test)]
mod tests;
