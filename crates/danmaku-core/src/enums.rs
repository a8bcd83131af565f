//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Who fired a bullet. Player bullets damage enemies, enemy bullets
/// threaten the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    Player,
    #[default]
    Enemy,
}

/// Bullet shape/size class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BulletKind {
    /// Player main weapon and homing missiles.
    PlayerShot,
    #[default]
    EnemySmall,
    EnemyMedium,
    EnemyLarge,
    EnemyLaser,
}

/// Enemy archetype.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Basic slow enemy.
    #[default]
    Fodder,
    MediumFoe,
    /// Small, tough enemy.
    HeavyFoe,
    /// Crosses the field horizontally and exits at the far edge.
    Skirmisher,
    Boss,
}

/// Enemy life-cycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    /// Flying in toward the anchor position.
    #[default]
    Entering,
    /// At the anchor, shooting.
    Active,
    /// Moving up off the field.
    Leaving,
    /// Boss death animation.
    Dying,
    /// Terminal; awaiting despawn.
    Dead,
}

impl EnemyState {
    /// Whether player shots and bombs can hit an enemy in this state.
    pub fn is_hittable(self) -> bool {
        matches!(self, Self::Entering | Self::Active | Self::Leaving)
    }
}

/// Pickup type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    #[default]
    SmallPower,
    BigPower,
    PointDrop,
    Bomb,
    ExtraLife,
    FullPower,
    StarBonus,
}
