//! Player movement, power, and weapon layouts.
//!
//! The host owns input. It drives a `PlayerMover` with a directional input
//! and passes the resulting position to the engine each frame; the engine
//! owns `PlayerStatus` because pickups feed it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use danmaku_core::constants::*;
use danmaku_core::types::{normalize_input, PlayField};

/// One frame of player input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerInput {
    /// Each axis in {-1, 0, 1}.
    pub direction: Vec2,
    /// Slow, precise movement.
    pub focus: bool,
    pub shoot: bool,
}

#[derive(Debug, Clone)]
pub struct PlayerMover {
    pub position: Vec2,
    cooldown: f32,
}

impl PlayerMover {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            cooldown: 0.0,
        }
    }

    /// Spawn point near the bottom center of the field.
    pub fn at_start(field: PlayField) -> Self {
        Self::new(Vec2::new(field.width * 0.5, field.height - 100.0))
    }

    /// Move for one frame. Returns true when the weapon should fire.
    pub fn step(&mut self, input: PlayerInput, dt: f32, field: PlayField) -> bool {
        let speed = if input.focus {
            PLAYER_FOCUS_SPEED
        } else {
            PLAYER_SPEED
        };
        self.position += normalize_input(input.direction) * speed * dt;
        self.position = field.clamp_inside(self.position, PLAYER_SIZE * 0.5);

        self.cooldown -= dt;
        if input.shoot && self.cooldown <= 0.0 {
            self.cooldown = PLAYER_SHOT_COOLDOWN_SECS;
            return true;
        }
        false
    }
}

/// Weapon power and evolution level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatus {
    pub power: u32,
    pub evolution_level: u32,
}

impl PlayerStatus {
    /// Add power. Every full bar of power evolves the weapon one level.
    /// Returns the number of levels gained.
    pub fn add_power(&mut self, amount: u32) -> u32 {
        self.power += amount;
        let mut gained = 0;
        while self.power >= POWER_PER_LEVEL && self.evolution_level < MAX_EVOLUTION_LEVEL {
            self.power -= POWER_PER_LEVEL;
            self.evolution_level += 1;
            gained += 1;
        }
        if self.evolution_level >= MAX_EVOLUTION_LEVEL {
            self.power = self.power.min(POWER_PER_LEVEL);
        }
        gained
    }

    pub fn max_out(&mut self) {
        self.evolution_level = MAX_EVOLUTION_LEVEL;
        self.power = POWER_PER_LEVEL;
    }
}

/// One projectile of a weapon volley, relative to the player.
#[derive(Debug, Clone, Copy)]
pub struct ShotSpec {
    pub offset: Vec2,
    pub velocity: Vec2,
    pub homing: bool,
}

const fn shot(ox: f32, oy: f32, vx: f32, vy: f32) -> ShotSpec {
    ShotSpec {
        offset: Vec2::new(ox, oy),
        velocity: Vec2::new(vx, vy),
        homing: false,
    }
}

const fn missile(ox: f32, oy: f32, vx: f32, vy: f32) -> ShotSpec {
    ShotSpec {
        offset: Vec2::new(ox, oy),
        velocity: Vec2::new(vx, vy),
        homing: true,
    }
}

const LEVEL_0: [ShotSpec; 1] = [shot(0.0, -20.0, 0.0, -1600.0)];

const LEVEL_1: [ShotSpec; 2] = [
    shot(-10.0, -20.0, 0.0, -1600.0),
    shot(10.0, -20.0, 0.0, -1600.0),
];

const LEVEL_2: [ShotSpec; 3] = [
    shot(0.0, -20.0, 0.0, -1600.0),
    shot(-15.0, -10.0, 0.0, -1600.0),
    shot(15.0, -10.0, 0.0, -1600.0),
];

const LEVEL_3: [ShotSpec; 5] = [
    shot(0.0, -20.0, 0.0, -1600.0),
    shot(-15.0, -10.0, 0.0, -1600.0),
    shot(15.0, -10.0, 0.0, -1600.0),
    missile(-30.0, 0.0, -50.0, -400.0),
    missile(30.0, 0.0, 50.0, -400.0),
];

const LEVEL_4: [ShotSpec; 9] = [
    shot(0.0, -20.0, 0.0, -1800.0),
    shot(-12.0, -15.0, 0.0, -1700.0),
    shot(12.0, -15.0, 0.0, -1700.0),
    shot(-24.0, -10.0, -50.0, -1600.0),
    shot(24.0, -10.0, 50.0, -1600.0),
    missile(-35.0, 0.0, -80.0, -400.0),
    missile(35.0, 0.0, 80.0, -400.0),
    missile(-20.0, 10.0, -40.0, -350.0),
    missile(20.0, 10.0, 40.0, -350.0),
];

/// Volley fired at an evolution level. Levels above the max use the max.
pub fn weapon_layout(level: u32) -> &'static [ShotSpec] {
    match level {
        0 => &LEVEL_0,
        1 => &LEVEL_1,
        2 => &LEVEL_2,
        3 => &LEVEL_3,
        _ => &LEVEL_4,
    }
}
