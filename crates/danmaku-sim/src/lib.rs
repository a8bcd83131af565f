//! Headless danmaku simulation.
//!
//! Pure Rust, no renderer or audio dependency. The engine owns pooled
//! bullets, items, and particles, an ECS world of enemies, the wave
//! director, and the score. Hosts feed it frame times and the player
//! position, queue commands, and read back events and snapshots.

pub mod bullet_field;
pub mod config;
pub mod enemies;
pub mod engine;
pub mod error;
pub mod item_field;
pub mod particle_field;
pub mod player;
pub mod pool;
pub mod score;
pub mod systems;
pub mod waves;

pub use danmaku_core as core;
pub use engine::SimulationEngine;

#[cfg(test)]
mod tests;
