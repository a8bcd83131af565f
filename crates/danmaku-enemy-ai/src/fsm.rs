//! Enemy behavior finite state machine.
//!
//! Pure functions that advance an enemy's state, motion, and timers, and
//! apply damage including boss spell card revival. No ECS dependency;
//! callers pass the enemy record and, for bosses, its spell cards.

use glam::Vec2;

use danmaku_core::components::{Enemy, SpellCards};
use danmaku_core::constants::*;
use danmaku_core::enums::{EnemyKind, EnemyState};
use danmaku_core::types::{clamp_axis, PlayField};

use crate::patterns::{self, PatternRequest, PATTERN_COUNT};
use crate::profiles::get_profile;

/// Per-frame input shared by every enemy.
pub struct EnemyContext {
    pub dt: f32,
    pub field: PlayField,
    /// Where aimed shots go (the player).
    pub target: Vec2,
}

/// Output from one FSM step.
#[derive(Debug)]
pub struct EnemyUpdate {
    pub previous_state: EnemyState,
    pub state_changed: bool,
    /// Volleys to spawn at the enemy's position.
    pub volleys: Vec<PatternRequest>,
    /// The spell change cut-in finished this frame.
    pub cut_in_ended: bool,
}

/// Result of applying damage to an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Invincible or already down; nothing changed.
    Ignored,
    Damaged,
    /// A boss burned a spell card and refilled its health.
    SpellAdvanced { spell: u32, remaining: u32 },
    /// Health reached zero for good. Bosses are now Dying, others Dead.
    Killed,
}

/// Build a freshly spawned enemy. It starts above the field at the
/// anchor's x and flies in.
pub fn new_enemy(id: u32, kind: EnemyKind, anchor: Vec2, health: f32, pattern_id: u32) -> Enemy {
    let profile = get_profile(kind);
    let health = health.max(1.0);
    Enemy {
        id,
        kind,
        state: EnemyState::Entering,
        position: Vec2::new(anchor.x, ENEMY_SPAWN_Y),
        anchor,
        health,
        max_health: health,
        display_health: health,
        radius: profile.radius,
        speed: profile.speed,
        shoot_timer: 0.0,
        pattern_timer: 0.0,
        lifetime: 0.0,
        pattern_id,
        invincible_timer: 0.0,
        death_timer: 0.0,
        flash_timer: 0.0,
    }
}

pub fn new_spell_cards(total: u32) -> SpellCards {
    SpellCards {
        total: total.max(1),
        current: 0,
        showing_cut_in: false,
    }
}

/// Advance one enemy by `ctx.dt`.
pub fn advance(enemy: &mut Enemy, spells: Option<&mut SpellCards>, ctx: &EnemyContext) -> EnemyUpdate {
    let previous_state = enemy.state;
    let mut cut_in_ended = false;
    let mut volleys = Vec::new();

    if enemy.invincible_timer > 0.0 {
        enemy.invincible_timer -= ctx.dt;
        if enemy.invincible_timer <= 0.0 {
            enemy.invincible_timer = 0.0;
            if let Some(spells) = spells {
                cut_in_ended = spells.showing_cut_in;
                spells.showing_cut_in = false;
            }
        }
    }
    if enemy.flash_timer > 0.0 {
        enemy.flash_timer = (enemy.flash_timer - ctx.dt).max(0.0);
    }

    match enemy.state {
        EnemyState::Entering => advance_entering(enemy, ctx.dt),
        EnemyState::Active => advance_active(enemy, ctx, &mut volleys),
        EnemyState::Leaving => {
            enemy.position.y -= enemy.speed * ctx.dt;
            if enemy.position.y < ENEMY_LEAVE_Y {
                enemy.state = EnemyState::Dead;
            }
        }
        EnemyState::Dying => {
            enemy.death_timer += ctx.dt;
            let t = enemy.death_timer;
            enemy.position += Vec2::new((t * 50.0).sin() * 5.0, (t * 40.0).cos() * 3.0);
            if enemy.death_timer >= BOSS_DEATH_DURATION_SECS {
                enemy.state = EnemyState::Dead;
            }
        }
        EnemyState::Dead => {}
    }

    EnemyUpdate {
        previous_state,
        state_changed: enemy.state != previous_state,
        volleys,
        cut_in_ended,
    }
}

fn advance_entering(enemy: &mut Enemy, dt: f32) {
    let to_anchor = enemy.anchor - enemy.position;
    let dist = to_anchor.length();
    let step = enemy.speed * ENEMY_ENTER_SPEED_FACTOR * dt;

    if dist < ENEMY_ARRIVE_DISTANCE || step >= dist {
        enemy.position = enemy.anchor;
        enemy.state = EnemyState::Active;
    } else {
        enemy.position += to_anchor / dist * step;
    }
}

fn advance_active(enemy: &mut Enemy, ctx: &EnemyContext, volleys: &mut Vec<PatternRequest>) {
    let dt = ctx.dt;
    enemy.shoot_timer += dt;
    enemy.pattern_timer += dt;
    enemy.lifetime += dt;

    if enemy.display_health > enemy.health {
        enemy.display_health -= (enemy.display_health - enemy.health) * HEALTH_EASE_RATE * dt;
        if enemy.display_health < enemy.health {
            enemy.display_health = enemy.health;
        }
    }

    if enemy.kind == EnemyKind::Boss {
        enemy.pattern_id = patterns::boss_pattern_for_health(enemy.health / enemy.max_health);
        let target = boss_motion_target(
            enemy.pattern_id,
            enemy.pattern_timer,
            enemy.anchor,
            enemy.radius,
            ctx.field,
        );
        enemy.position += (target - enemy.position) * (BOSS_FOLLOW_RATE * dt).min(1.0);
    } else {
        let profile = get_profile(enemy.kind);
        if profile.crosses_field {
            let heading = if enemy.anchor.x < ctx.field.width * 0.5 { 1.0 } else { -1.0 };
            enemy.position.x += heading * SKIRMISHER_SPEED * dt;
            if enemy.position.x < -SKIRMISHER_EXIT_MARGIN
                || enemy.position.x > ctx.field.width + SKIRMISHER_EXIT_MARGIN
            {
                enemy.state = EnemyState::Leaving;
            }
        }
        if let Some(max_lifetime) = profile.max_lifetime {
            if enemy.lifetime > max_lifetime {
                enemy.state = EnemyState::Leaving;
            }
        }
    }

    if enemy.state == EnemyState::Active {
        volleys.extend(patterns::schedule(
            enemy.pattern_id,
            &mut enemy.shoot_timer,
            enemy.pattern_timer,
            ctx.target,
        ));
    }
}

/// Where a boss wants to be for its current pattern, `t` seconds in.
/// The result is kept clear of the side edges and above `BOSS_MAX_Y`.
pub fn boss_motion_target(pattern_id: u32, t: f32, anchor: Vec2, radius: f32, field: PlayField) -> Vec2 {
    let offset = match pattern_id {
        // Slow sway.
        0 => Vec2::new((t * 0.3).sin() * 100.0, (t * 0.5).sin() * 20.0),
        // Figure eight.
        4 => Vec2::new((t * 0.6).sin() * 120.0, (t * 1.2).sin() * 40.0),
        // Hold, dash right, drift back on a 4 s cycle.
        2 => {
            let phase = t.rem_euclid(4.0);
            let x = if phase < 1.5 {
                (t * 3.0).sin() * 10.0
            } else if phase < 2.5 {
                (phase - 1.5) * 200.0
            } else {
                200.0 - (phase - 2.5) / 1.5 * 200.0
            };
            Vec2::new(x, 0.0)
        }
        // Erratic.
        3 => Vec2::new(
            (t * 2.0).sin() * (t * 1.7).cos() * 150.0,
            (t * 2.5).sin() * 50.0 + (t * 1.3).cos() * 30.0,
        ),
        _ => Vec2::new((t * 0.5).sin() * 100.0, (t * 0.8).sin() * 30.0),
    };

    let target = anchor + offset;
    Vec2::new(
        clamp_axis(
            target.x,
            radius + BOSS_EDGE_MARGIN,
            field.width - radius - BOSS_EDGE_MARGIN,
        ),
        clamp_axis(target.y, radius, BOSS_MAX_Y),
    )
}

/// Apply damage. Bosses with spell cards left come back at full health on
/// the next card, invincible for a moment. Amounts that are not positive
/// are ignored, so health never rises above its max.
pub fn take_damage(enemy: &mut Enemy, spells: Option<&mut SpellCards>, amount: f32) -> DamageOutcome {
    if !(amount > 0.0) || enemy.invincible_timer > 0.0 || !enemy.state.is_hittable() {
        return DamageOutcome::Ignored;
    }

    enemy.health -= amount;
    enemy.flash_timer = HIT_FLASH_SECS;
    if enemy.health > 0.0 {
        return DamageOutcome::Damaged;
    }

    if enemy.kind == EnemyKind::Boss {
        if let Some(spells) = spells {
            if spells.current + 1 < spells.total {
                spells.current += 1;
                spells.showing_cut_in = true;
                enemy.health = enemy.max_health;
                enemy.display_health = enemy.max_health;
                enemy.pattern_timer = 0.0;
                enemy.shoot_timer = 0.0;
                enemy.pattern_id = spells.current.min(PATTERN_COUNT - 1);
                enemy.invincible_timer = BOSS_SPELL_INVINCIBLE_SECS;
                return DamageOutcome::SpellAdvanced {
                    spell: spells.current,
                    remaining: spells.total - spells.current - 1,
                };
            }
        }
    }

    enemy.health = 0.0;
    if enemy.kind == EnemyKind::Boss {
        enemy.state = EnemyState::Dying;
        enemy.death_timer = 0.0;
    } else {
        enemy.state = EnemyState::Dead;
    }
    DamageOutcome::Killed
}
