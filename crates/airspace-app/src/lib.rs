//! AIRSPACE host application.
//!
//! Runs the combat engine on its own thread at a fixed rate and drives it
//! with a seeded autopilot, standing in for a rendering front end.

pub mod autopilot;
pub mod config;
pub mod game_loop;
pub mod state;

pub use config::HostConfig;
