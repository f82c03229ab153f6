//! Enemy flight system.
//!
//! Moves every pattern-driven enemy to its built-in pattern position for the
//! current session time. Host-reported enemies are left where they were put.

use hecs::World;

use airspace_core::components::{EnemyTag, FlightControl};
use airspace_core::types::Position;

use crate::flight::pattern_position;

pub fn run(world: &mut World, elapsed_secs: f64) {
    for (_entity, (tag, pos, control)) in
        world.query_mut::<(&EnemyTag, &mut Position, &FlightControl)>()
    {
        if *control == FlightControl::Pattern {
            *pos = pattern_position(tag.kind, elapsed_secs);
        }
    }
}
