//! Kind-specific enemy profiles.
//!
//! Consolidates per-kind parameters so the FSM and the spawners never
//! branch on kind for tuning values.

use danmaku_core::constants::*;
use danmaku_core::enums::EnemyKind;
use danmaku_core::types::Color;

/// Behavioral and presentation profile for an enemy kind.
pub struct EnemyProfile {
    /// Collision radius.
    pub radius: f32,
    /// Base movement speed.
    pub speed: f32,
    pub glow: Color,
    /// Active time before leaving the field, None for enemies that stay.
    pub max_lifetime: Option<f32>,
    /// Crosses the field sideways and leaves past the far edge.
    pub crosses_field: bool,
    /// Tier passed to the item drop table on a kill.
    pub drop_tier: u32,
}

/// Get the profile for a given kind.
pub fn get_profile(kind: EnemyKind) -> EnemyProfile {
    match kind {
        EnemyKind::Fodder => EnemyProfile {
            radius: 24.0,
            speed: ENEMY_DEFAULT_SPEED,
            glow: Color::rgba(0.6, 0.4, 0.2, 0.5),
            max_lifetime: Some(ENEMY_MAX_LIFETIME_SECS),
            crosses_field: false,
            drop_tier: KILL_DROP_TIER,
        },
        EnemyKind::MediumFoe => EnemyProfile {
            radius: 28.0,
            speed: ENEMY_DEFAULT_SPEED,
            glow: Color::rgba(0.9, 0.6, 0.2, 0.5),
            max_lifetime: Some(ENEMY_MAX_LIFETIME_SECS),
            crosses_field: false,
            drop_tier: KILL_DROP_TIER,
        },
        EnemyKind::HeavyFoe => EnemyProfile {
            radius: 20.0,
            speed: ENEMY_DEFAULT_SPEED,
            glow: Color::rgba(0.4, 0.7, 0.9, 0.5),
            max_lifetime: Some(ENEMY_MAX_LIFETIME_SECS),
            crosses_field: false,
            drop_tier: KILL_DROP_TIER,
        },
        EnemyKind::Skirmisher => EnemyProfile {
            radius: 16.0,
            speed: ENEMY_DEFAULT_SPEED,
            glow: Color::rgba(0.8, 0.5, 1.0, 0.4),
            max_lifetime: Some(ENEMY_MAX_LIFETIME_SECS),
            crosses_field: true,
            drop_tier: KILL_DROP_TIER,
        },
        EnemyKind::Boss => EnemyProfile {
            radius: 48.0,
            speed: ENEMY_DEFAULT_SPEED,
            glow: Color::rgba(1.0, 0.8, 0.3, 0.6),
            max_lifetime: None,
            crosses_field: false,
            drop_tier: KILL_DROP_TIER,
        },
    }
}
