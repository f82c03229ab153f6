//! Core types and definitions for the AIRSPACE combat simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! commands, errors, state snapshots, events, and constants.
//! It has no dependency on any runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod errors;
pub mod events;
pub mod state;
pub mod types;
