//! Systems that operate on the simulation state each frame.
//!
//! Systems are free functions over the world and the entity fields.
//! They do not own state; all state lives in components and pools.

pub mod cleanup;
pub mod collision;
pub mod enemy_ai;
pub mod snapshot;
