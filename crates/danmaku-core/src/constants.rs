//! Simulation constants and tuning parameters.
//!
//! Distances are in field units (pixels), times in seconds.

use crate::types::Color;

/// Largest frame step the simulation will integrate. Longer frames are clamped.
pub const MAX_FRAME_DT: f32 = 0.1;

// --- Field ---

pub const DEFAULT_FIELD_WIDTH: f32 = 640.0;
pub const DEFAULT_FIELD_HEIGHT: f32 = 960.0;

// --- Pools ---

pub const BULLET_POOL_CAPACITY: usize = 2000;
pub const ITEM_POOL_CAPACITY: usize = 200;
pub const PARTICLE_POOL_CAPACITY: usize = 500;

// --- Bullets ---

/// Bullets are culled once they leave the field by more than this.
pub const BULLET_CULL_MARGIN: f32 = 50.0;

pub const SMALL_BULLET_RADIUS: f32 = 4.0;
pub const MEDIUM_BULLET_RADIUS: f32 = 8.0;
pub const LARGE_BULLET_RADIUS: f32 = 12.0;
pub const LASER_BULLET_RADIUS: f32 = 4.0;

pub const PLAYER_SHOT_RADIUS: f32 = 5.0;
pub const PLAYER_SHOT_COLOR: Color = Color::rgba(0.8, 1.0, 1.0, 1.0);

pub const HOMING_MISSILE_RADIUS: f32 = 8.0;
pub const HOMING_MISSILE_COLOR: Color = Color::rgba(0.4, 1.0, 0.5, 1.0);

/// Maximum heading change of a homing bullet (radians per second).
pub const HOMING_TURN_RATE: f32 = 6.0;

/// Rose pattern petal count (k in r = cos(kθ)).
pub const ROSE_PETALS: f32 = 5.0;

// --- Enemies ---

pub const ENEMY_DEFAULT_SPEED: f32 = 100.0;

/// Enemies spawn above the field and fly in to their anchor.
pub const ENEMY_SPAWN_Y: f32 = -50.0;

/// Entering enemies move at this multiple of their base speed.
pub const ENEMY_ENTER_SPEED_FACTOR: f32 = 2.0;

/// Distance at which an entering enemy snaps onto its anchor.
pub const ENEMY_ARRIVE_DISTANCE: f32 = 5.0;

/// Non-boss enemies start leaving after this long in the Active state.
pub const ENEMY_MAX_LIFETIME_SECS: f32 = 8.0;

/// Leaving enemies are dead once above this y.
pub const ENEMY_LEAVE_Y: f32 = -100.0;

/// Rate at which the displayed health bar eases toward real health.
pub const HEALTH_EASE_RATE: f32 = 5.0;

pub const HIT_FLASH_SECS: f32 = 0.1;

pub const SKIRMISHER_SPEED: f32 = 200.0;

/// Skirmishers leave once this far outside the left or right edge.
pub const SKIRMISHER_EXIT_MARGIN: f32 = 50.0;

// --- Boss ---

pub const BOSS_HEALTH: f32 = 500.0;
pub const BOSS_SPELL_CARDS: u32 = 5;
pub const BOSS_SPAWN_Y: f32 = 150.0;
pub const BOSS_OPENING_PATTERN: u32 = 3;

/// Invincibility granted when a boss moves on to its next spell card.
pub const BOSS_SPELL_INVINCIBLE_SECS: f32 = 2.0;

pub const BOSS_DEATH_DURATION_SECS: f32 = 2.0;

/// Fraction of the gap to its motion target a boss closes per second.
pub const BOSS_FOLLOW_RATE: f32 = 8.0;

/// Horizontal keep-out from the field edges beyond the boss radius.
pub const BOSS_EDGE_MARGIN: f32 = 50.0;

/// Lowest y a boss will move to.
pub const BOSS_MAX_Y: f32 = 300.0;

/// Delay between the boss wave starting and the boss appearing.
pub const BOSS_SPAWN_DELAY_SECS: f32 = 2.0;

/// Kill count that brings the boss in early.
pub const BOSS_KILL_TRIGGER: u32 = 10;

// --- Waves ---

pub const WAVE_COOLDOWN_SECS: f32 = 2.0;

/// Number of wave layouts before the cycle repeats.
pub const WAVE_CYCLE: u32 = 4;

/// `wave % WAVE_CYCLE` value reserved for the boss.
pub const BOSS_WAVE_SLOT: u32 = 3;

// --- Collision and scoring ---

pub const PLAYER_HITBOX_RADIUS: f32 = 3.0;
pub const GRAZE_RADIUS: f32 = 30.0;

/// Bullets closer than this never count as a graze.
pub const GRAZE_MIN_DISTANCE: f32 = 5.0;

pub const PLAYER_SHOT_DAMAGE: f32 = 10.0;
pub const BOMB_DAMAGE: f32 = 100.0;

pub const HIT_SCORE: u64 = 100;
pub const COMBO_BONUS: u64 = 10;
pub const COMBO_WINDOW_SECS: f32 = 2.0;
pub const KILL_SCORE: u64 = 500;
pub const GRAZE_SCORE: u64 = 10;

pub const GRAZE_GAUGE_GAIN: f32 = 0.5;
pub const SPECIAL_GAUGE_MAX: f32 = 100.0;

pub const STARTING_LIVES: u32 = 3;
pub const STARTING_BOMBS: u32 = 3;

/// Drop tier used for regular kills.
pub const KILL_DROP_TIER: u32 = 1;

// --- Items ---

pub const ITEM_LIFETIME_SECS: f32 = 10.0;
pub const ITEM_GRAVITY: f32 = 200.0;
pub const ITEM_MAX_FALL_SPEED: f32 = 150.0;

/// Acceleration of an item being pulled toward the player.
pub const ITEM_COLLECT_ACCEL: f32 = 2000.0;

/// Pull speed when the whole field is being auto-collected.
pub const ITEM_AUTO_COLLECT_SPEED: f32 = 100.0;

/// Pull speed for items that drift into the player's magnet range.
pub const ITEM_MAGNET_SPEED: f32 = 200.0;

/// Magnet range as a multiple of the collect radius.
pub const ITEM_MAGNET_FACTOR: f32 = 3.0;

/// Pulled items stop steering once this close to the player.
pub const ITEM_SNAP_DISTANCE: f32 = 5.0;

pub const ITEM_COLLECT_RADIUS: f32 = 20.0;

/// Player above this y auto-collects every item on the field.
pub const AUTO_COLLECT_LINE_Y: f32 = 200.0;

pub const ITEM_CULL_MARGIN: f32 = 50.0;

pub const BOMB_DROP_CHANCE: f64 = 0.05;
pub const LIFE_DROP_CHANCE: f64 = 0.01;

// --- Player ---

pub const PLAYER_SPEED: f32 = 400.0;
pub const PLAYER_FOCUS_SPEED: f32 = 150.0;
pub const PLAYER_SIZE: f32 = 48.0;
pub const PLAYER_SHOT_COOLDOWN_SECS: f32 = 0.08;

/// Power needed for one evolution level.
pub const POWER_PER_LEVEL: u32 = 100;
pub const MAX_EVOLUTION_LEVEL: u32 = 4;

// --- Particles ---

pub const PARTICLE_GRAVITY: f32 = 50.0;
pub const EXPLOSION_PARTICLES: u32 = 40;
pub const HIT_SPARK_PARTICLES: u32 = 6;
pub const BOMB_BURST_PARTICLES: u32 = 60;
