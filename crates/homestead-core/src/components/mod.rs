//! Component definitions for the colony simulation.
//!
//! Components are pure data attached to entities or owned by the engine.
//! They have no phase logic - that lives in systems.

mod buildings;
mod colonists;
mod resources;

pub use buildings::*;
pub use colonists::*;
pub use resources::*;
