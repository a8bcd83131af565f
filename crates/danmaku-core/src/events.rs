//! Events emitted by the simulation for audio, effects, and UI feedback.
//!
//! Events are one-shot: each is produced once and drained by the caller
//! at the end of the frame that raised it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A player bullet (or bomb) damaged an enemy.
    EnemyHit {
        enemy_id: u32,
        position: Vec2,
        damage: f32,
    },
    /// An enemy's health reached zero with no spell cards left.
    EnemyKilled {
        enemy_id: u32,
        kind: EnemyKind,
        position: Vec2,
    },
    /// An enemy bullet reached the player's hitbox.
    PlayerHit { position: Vec2 },
    /// An enemy bullet passed close to the player without hitting.
    Graze { position: Vec2 },
    ItemCollected { kind: ItemKind, position: Vec2 },
    /// A boss burned a spell card and refilled its health.
    BossSpellAdvanced {
        enemy_id: u32,
        spell: u32,
        remaining: u32,
    },
    /// The boss slot of the wave cycle began. The boss itself follows
    /// after the spawn delay.
    BossWaveStarted { wave: u32 },
    BossSpawned { enemy_id: u32 },
    /// The boss death animation finished.
    BossDefeated { enemy_id: u32 },
    /// Every enemy of a wave is gone and the next wave is about to spawn.
    WaveCleared { wave: u32 },
    BombUsed { bombs_left: u32 },
}
