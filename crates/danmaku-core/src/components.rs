//! Entity records for pooled entities and hecs components for enemies.
//!
//! Records are plain data structs with no behavior.
//! Game logic lives in the enemy AI crate and the simulation systems.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Color;

/// A pooled bullet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub position: Vec2,
    pub velocity: Vec2,
    pub color: Color,
    pub radius: f32,
    /// Heading in radians, kept in sync with velocity when turning.
    pub angle: f32,
    /// Heading change per second. Zero for straight-line bullets.
    pub angular_velocity: f32,
    pub kind: BulletKind,
    pub owner: Owner,
    /// Steers toward the nearest enemy each step.
    pub homing: bool,
    pub active: bool,
}

/// Enemy hecs component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    /// Stable id for events and snapshots.
    pub id: u32,
    pub kind: EnemyKind,
    pub state: EnemyState,
    pub position: Vec2,
    /// Position the enemy flies in to and moves around.
    pub anchor: Vec2,
    pub health: f32,
    pub max_health: f32,
    /// Eased health shown by health bars; never below `health`.
    pub display_health: f32,
    pub radius: f32,
    pub speed: f32,
    /// Time since the last volley. Reset when the pattern fires.
    pub shoot_timer: f32,
    /// Time since the current pattern began. Drives rotation and boss motion.
    pub pattern_timer: f32,
    /// Time spent in the Active state.
    pub lifetime: f32,
    pub pattern_id: u32,
    pub invincible_timer: f32,
    pub death_timer: f32,
    pub flash_timer: f32,
}

/// Boss-only component tracking spell card progress.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpellCards {
    pub total: u32,
    /// Index of the running spell card, always `< total`.
    pub current: u32,
    /// Set while the spell change cut-in is on screen.
    pub showing_cut_in: bool,
}

/// A pooled pickup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub position: Vec2,
    pub velocity: Vec2,
    pub kind: ItemKind,
    pub radius: f32,
    pub lifetime: f32,
    /// Pulled toward the player instead of falling.
    pub being_collected: bool,
    pub collect_speed: f32,
    pub active: bool,
}

/// A pooled visual particle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub color: Color,
    pub size: f32,
    pub life: f32,
    pub max_life: f32,
    pub active: bool,
}
