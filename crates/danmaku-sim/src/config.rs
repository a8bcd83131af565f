//! Simulation configuration.
//!
//! Every field has a default, so a JSON file only needs the values it
//! overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use danmaku_core::constants::*;

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for drops and particles. Same seed = same run.
    pub seed: u64,
    pub bullet_capacity: usize,
    pub item_capacity: usize,
    pub particle_capacity: usize,
    pub player_hitbox_radius: f32,
    pub graze_radius: f32,
    pub collect_radius: f32,
    /// Player above this y auto-collects every item.
    pub auto_collect_line_y: f32,
    pub player_shot_damage: f32,
    pub bomb_damage: f32,
    pub wave_cooldown_secs: f32,
    pub boss_health: f32,
    pub boss_spell_cards: u32,
    pub boss_spawn_delay_secs: f32,
    /// Kills that bring in the boss wave. Zero disables the trigger.
    pub boss_kill_trigger: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            bullet_capacity: BULLET_POOL_CAPACITY,
            item_capacity: ITEM_POOL_CAPACITY,
            particle_capacity: PARTICLE_POOL_CAPACITY,
            player_hitbox_radius: PLAYER_HITBOX_RADIUS,
            graze_radius: GRAZE_RADIUS,
            collect_radius: ITEM_COLLECT_RADIUS,
            auto_collect_line_y: AUTO_COLLECT_LINE_Y,
            player_shot_damage: PLAYER_SHOT_DAMAGE,
            bomb_damage: BOMB_DAMAGE,
            wave_cooldown_secs: WAVE_COOLDOWN_SECS,
            boss_health: BOSS_HEALTH,
            boss_spell_cards: BOSS_SPELL_CARDS,
            boss_spawn_delay_secs: BOSS_SPAWN_DELAY_SECS,
            boss_kill_trigger: BOSS_KILL_TRIGGER,
        }
    }
}

impl SimConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let capacities = [
            ("bullet_capacity", self.bullet_capacity),
            ("item_capacity", self.item_capacity),
            ("particle_capacity", self.particle_capacity),
        ];
        for (name, value) in capacities {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{name} must be at least 1")));
            }
        }

        let positive = [
            ("player_hitbox_radius", self.player_hitbox_radius),
            ("graze_radius", self.graze_radius),
            ("collect_radius", self.collect_radius),
            ("boss_health", self.boss_health),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }

        let non_negative = [
            ("player_shot_damage", self.player_shot_damage),
            ("bomb_damage", self.bomb_damage),
            ("wave_cooldown_secs", self.wave_cooldown_secs),
            ("boss_spawn_delay_secs", self.boss_spawn_delay_secs),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must not be negative, got {value}")));
            }
        }

        if self.boss_spell_cards == 0 {
            return Err(ConfigError::Invalid("boss_spell_cards must be at least 1".into()));
        }
        Ok(())
    }
}
