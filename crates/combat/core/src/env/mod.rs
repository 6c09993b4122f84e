//! Collaborators the combat rules consult while resolving a tick.
//!
//! - [`SpatialOracle`]: path blocking and proximity, owned by physics
//! - [`ArenaBounds`]: the disc combatants are confined to
//! - [`CombatEnv`]: per-tick bundle of both plus the tick delta

mod arena;
mod spatial;

pub use arena::ArenaBounds;
pub use spatial::{Obstacle, SpatialHit, SpatialOracle, StaticField};

/// Read-only environment handed to action execution for one tick.
#[derive(Clone, Copy)]
pub struct CombatEnv<'a> {
    pub spatial: &'a dyn SpatialOracle,
    pub arena: ArenaBounds,
    /// Elapsed seconds of this tick.
    pub dt: f32,
}

impl<'a> CombatEnv<'a> {
    pub fn new(spatial: &'a dyn SpatialOracle, arena: ArenaBounds, dt: f32) -> Self {
        Self { spatial, arena, dt }
    }
}
