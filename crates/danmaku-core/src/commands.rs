//! Commands sent by the host to the simulation.
//!
//! Commands are queued and processed at the next frame boundary.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimCommand {
    /// Spend a bomb: clear enemy bullets and damage every enemy.
    TriggerBomb,
    /// Deactivate every entity and reset waves, boss flow, and score.
    ResetAll,
    /// Start the boss wave now instead of waiting for the kill trigger.
    StartBossWave,
    /// Spawn the boss immediately, skipping the wave delay.
    SpawnBoss,
    /// Fire the player's weapon from `origin` using the current evolution level.
    FirePlayerWeapon { origin: Vec2 },
}
