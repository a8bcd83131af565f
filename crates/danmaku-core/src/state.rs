//! Frame snapshot: the complete visible state handed to the host each frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{Color, PlayField, SimTime};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub time: SimTime,
    pub field: PlayField,
    pub wave: WaveView,
    pub bullets: Vec<BulletView>,
    pub enemies: Vec<EnemyView>,
    pub items: Vec<ItemView>,
    pub particles: Vec<ParticleView>,
    pub score: ScoreView,
    pub events: Vec<SimEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub wave: u32,
    pub boss_wave: bool,
    /// Seconds until the pending boss appears, if one is on its way.
    pub boss_spawn_in: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletView {
    pub position: Vec2,
    pub radius: f32,
    pub angle: f32,
    pub color: Color,
    pub kind: BulletKind,
    pub owner: Owner,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u32,
    pub kind: EnemyKind,
    pub state: EnemyState,
    pub position: Vec2,
    pub radius: f32,
    pub glow: Color,
    /// Health / max health (0.0 - 1.0).
    pub health_fraction: f32,
    /// Eased health bar fraction.
    pub display_health_fraction: f32,
    pub invincible: bool,
    pub flashing: bool,
    pub spell: Option<SpellView>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpellView {
    pub current: u32,
    pub total: u32,
    pub showing_cut_in: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemView {
    pub position: Vec2,
    pub kind: ItemKind,
    pub radius: f32,
    pub being_collected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleView {
    pub position: Vec2,
    pub color: Color,
    pub size: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub score: u64,
    pub combo: u32,
    pub graze: u32,
    pub kills: u32,
    pub lives: u32,
    pub bombs: u32,
    pub power: u32,
    pub evolution_level: u32,
    pub special_gauge: f32,
    pub special_ready: bool,
    pub full_power: bool,
}
