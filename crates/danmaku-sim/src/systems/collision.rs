//! Collision system: player shots against enemies and enemy bullets
//! against the player.
//!
//! Overlap tests only. This system consumes bullets and applies damage;
//! scoring, drops, and events are left to the caller.

use glam::Vec2;
use hecs::Entity;

use danmaku_core::components::Enemy;
use danmaku_core::constants::GRAZE_MIN_DISTANCE;
use danmaku_core::enums::Owner;
use danmaku_core::types::circles_overlap;
use danmaku_enemy_ai::fsm::DamageOutcome;

use crate::bullet_field::BulletField;
use crate::enemies::{EnemyRoster, HitReport};

/// A player bullet that struck an enemy.
#[derive(Debug, Clone, Copy)]
pub struct ShotHit {
    pub report: HitReport,
    pub bullet_position: Vec2,
}

/// Enemy bullets near the player this frame.
#[derive(Debug, Default)]
pub struct PlayerContact {
    /// Positions of bullets that grazed the player.
    pub grazes: Vec<Vec2>,
    /// Positions of bullets that hit the player's hitbox.
    pub hits: Vec<Vec2>,
}

/// Test active player bullets against hittable, non-invincible enemies.
/// Each bullet hits at most one enemy and is consumed by it.
pub fn player_shots_vs_enemies(
    bullets: &mut BulletField,
    enemies: &mut EnemyRoster,
    damage: f32,
) -> Vec<ShotHit> {
    let mut targets: Vec<(Entity, Vec2, f32)> = enemies
        .world()
        .query::<&Enemy>()
        .iter()
        .filter(|(_, e)| e.state.is_hittable() && e.invincible_timer <= 0.0)
        .map(|(entity, e)| (entity, e.position, e.radius))
        .collect();

    let mut hits = Vec::new();
    if targets.is_empty() {
        return hits;
    }

    for (_, bullet) in bullets.pool_mut().iter_active_mut() {
        if bullet.owner != Owner::Player {
            continue;
        }
        let Some(slot) = targets
            .iter()
            .position(|&(_, pos, r)| circles_overlap(bullet.position, bullet.radius, pos, r))
        else {
            continue;
        };

        let Some(report) = enemies.damage(targets[slot].0, damage) else {
            targets.remove(slot);
            continue;
        };
        bullet.active = false;

        // Killed or revived-and-invincible enemies take no more hits this frame.
        if report.outcome != DamageOutcome::Damaged {
            targets.remove(slot);
        }
        hits.push(ShotHit {
            report,
            bullet_position: bullet.position,
        });

        if targets.is_empty() {
            break;
        }
    }

    hits
}

/// Test enemy bullets against the player. Hits consume the bullet; grazes
/// are bullets inside the graze ring but not too close.
pub fn enemy_bullets_vs_player(
    bullets: &mut BulletField,
    player: Vec2,
    hitbox_radius: f32,
    graze_radius: f32,
) -> PlayerContact {
    let mut contact = PlayerContact::default();

    for (_, bullet) in bullets.pool_mut().iter_active_mut() {
        if bullet.owner != Owner::Enemy {
            continue;
        }
        let dist = player.distance(bullet.position);
        if dist < bullet.radius + hitbox_radius {
            bullet.active = false;
            contact.hits.push(bullet.position);
        } else if dist < graze_radius && dist > GRAZE_MIN_DISTANCE {
            contact.grazes.push(bullet.position);
        }
    }

    contact
}
