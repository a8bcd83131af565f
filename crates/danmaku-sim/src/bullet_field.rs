//! Bullet field: owns the bullet pool, spawns patterns, and steps physics.

use std::f32::consts::{PI, TAU};

use glam::Vec2;

use danmaku_core::components::Bullet;
use danmaku_core::constants::*;
use danmaku_core::enums::{BulletKind, Owner};
use danmaku_core::types::{direction, Color, PlayField};
use danmaku_enemy_ai::patterns::PatternRequest;

use crate::pool::EntityPool;

/// Collision radius for a bullet kind.
pub fn radius_for(kind: BulletKind) -> f32 {
    match kind {
        BulletKind::PlayerShot => PLAYER_SHOT_RADIUS,
        BulletKind::EnemySmall => SMALL_BULLET_RADIUS,
        BulletKind::EnemyMedium => MEDIUM_BULLET_RADIUS,
        BulletKind::EnemyLarge => LARGE_BULLET_RADIUS,
        BulletKind::EnemyLaser => LASER_BULLET_RADIUS,
    }
}

pub struct BulletField {
    pool: EntityPool<Bullet>,
}

impl Default for BulletField {
    fn default() -> Self {
        Self::new(BULLET_POOL_CAPACITY)
    }
}

impl BulletField {
    pub fn new(capacity: usize) -> Self {
        Self {
            pool: EntityPool::with_capacity(capacity),
        }
    }

    pub fn pool(&self) -> &EntityPool<Bullet> {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut EntityPool<Bullet> {
        &mut self.pool
    }

    pub fn active_count(&self) -> usize {
        self.pool.active_count()
    }

    pub fn enemy_bullet_count(&self) -> usize {
        self.pool
            .iter_active()
            .filter(|(_, b)| b.owner == Owner::Enemy)
            .count()
    }

    // --- Player weapons ---

    pub fn spawn_player_shot(&mut self, origin: Vec2, velocity: Vec2) -> Option<usize> {
        self.pool.spawn(Bullet {
            position: origin,
            velocity,
            color: PLAYER_SHOT_COLOR,
            radius: PLAYER_SHOT_RADIUS,
            angle: velocity.y.atan2(velocity.x),
            kind: BulletKind::PlayerShot,
            owner: Owner::Player,
            ..Default::default()
        })
    }

    pub fn spawn_homing_missile(&mut self, origin: Vec2, velocity: Vec2) -> Option<usize> {
        self.pool.spawn(Bullet {
            position: origin,
            velocity,
            color: HOMING_MISSILE_COLOR,
            radius: HOMING_MISSILE_RADIUS,
            angle: velocity.y.atan2(velocity.x),
            kind: BulletKind::PlayerShot,
            owner: Owner::Player,
            homing: true,
            ..Default::default()
        })
    }

    // --- Enemy primitives ---

    pub fn spawn_enemy_bullet(
        &mut self,
        origin: Vec2,
        velocity: Vec2,
        kind: BulletKind,
        color: Color,
    ) -> Option<usize> {
        self.pool.spawn(Bullet {
            position: origin,
            velocity,
            color,
            radius: radius_for(kind),
            angle: velocity.y.atan2(velocity.x),
            kind,
            owner: Owner::Enemy,
            ..Default::default()
        })
    }

    /// One bullet toward `target`. Does nothing when the target is the origin.
    pub fn spawn_aimed(&mut self, origin: Vec2, target: Vec2, speed: f32, kind: BulletKind, color: Color) {
        let Some(dir) = (target - origin).try_normalize() else {
            return;
        };
        self.spawn_enemy_bullet(origin, dir * speed, kind, color);
    }

    /// `count` bullets evenly spaced around a full circle.
    pub fn spawn_ring(&mut self, origin: Vec2, count: u32, speed: f32, kind: BulletKind, color: Color) {
        self.spawn_spiral(origin, count, speed, 0.0, kind, color);
    }

    /// A ring rotated by `angle_offset`.
    pub fn spawn_spiral(
        &mut self,
        origin: Vec2,
        count: u32,
        speed: f32,
        angle_offset: f32,
        kind: BulletKind,
        color: Color,
    ) {
        for i in 0..count {
            let angle = angle_offset + TAU * i as f32 / count as f32;
            self.spawn_enemy_bullet(origin, direction(angle) * speed, kind, color);
        }
    }

    /// Petals of bullets fanning out with increasing speed and opacity.
    pub fn spawn_flower(
        &mut self,
        origin: Vec2,
        petals: u32,
        per_petal: u32,
        speed: f32,
        angle_offset: f32,
        color: Color,
    ) {
        for p in 0..petals {
            let petal_angle = angle_offset + TAU * p as f32 / petals as f32;
            for b in 0..per_petal {
                let frac = b as f32 / per_petal as f32;
                let angle = petal_angle + (PI / 8.0) * (b as f32 * PI / per_petal as f32).sin();
                let velocity = direction(angle) * speed * (0.7 + 0.3 * frac);
                self.spawn_enemy_bullet(
                    origin,
                    velocity,
                    BulletKind::EnemySmall,
                    color.with_alpha(0.7 + 0.3 * frac),
                );
            }
        }
    }

    /// Speeds follow the rose curve r = cos(kθ); colors rotate with θ.
    pub fn spawn_rose_curve(&mut self, origin: Vec2, count: u32, speed: f32, time: f32) {
        for i in 0..count {
            let theta = time + TAU * i as f32 / count as f32;
            let r = (ROSE_PETALS * theta).cos();
            let velocity = direction(theta) * speed * (0.5 + 0.5 * r.abs());
            let hue = (theta / TAU).rem_euclid(1.0);
            self.spawn_enemy_bullet(origin, velocity, BulletKind::EnemySmall, Color::from_hue(hue));
        }
    }

    /// A ring whose angles wobble sinusoidally with time.
    pub fn spawn_wave(
        &mut self,
        origin: Vec2,
        count: u32,
        speed: f32,
        amplitude: f32,
        frequency: f32,
        time: f32,
        color: Color,
    ) {
        for i in 0..count {
            let base = time + TAU * i as f32 / count as f32;
            let angle = base + amplitude * (frequency * time + i as f32 * 0.5).sin();
            self.spawn_enemy_bullet(origin, direction(angle) * speed, BulletKind::EnemySmall, color);
        }
    }

    /// An outer ring plus an inner ring offset by half a step at 0.7x speed.
    pub fn spawn_double_ring(
        &mut self,
        origin: Vec2,
        count: u32,
        speed: f32,
        kind: BulletKind,
        color_a: Color,
        color_b: Color,
    ) {
        self.spawn_spiral(origin, count, speed, 0.0, kind, color_a);
        if count > 0 {
            self.spawn_spiral(origin, count, speed * 0.7, PI / count as f32, kind, color_b);
        }
    }

    /// Spawn the volley described by a pattern request.
    pub fn fire(&mut self, origin: Vec2, request: &PatternRequest) {
        match *request {
            PatternRequest::Ring { count, speed, kind, color } => {
                self.spawn_ring(origin, count, speed, kind, color)
            }
            PatternRequest::Spiral {
                count,
                speed,
                angle_offset,
                kind,
                color,
            } => self.spawn_spiral(origin, count, speed, angle_offset, kind, color),
            PatternRequest::Flower {
                petals,
                per_petal,
                speed,
                angle_offset,
                color,
            } => self.spawn_flower(origin, petals, per_petal, speed, angle_offset, color),
            PatternRequest::Rose { count, speed, time } => {
                self.spawn_rose_curve(origin, count, speed, time)
            }
            PatternRequest::Wave {
                count,
                speed,
                amplitude,
                frequency,
                time,
                color,
            } => self.spawn_wave(origin, count, speed, amplitude, frequency, time, color),
            PatternRequest::DoubleRing {
                count,
                speed,
                kind,
                color_a,
                color_b,
            } => self.spawn_double_ring(origin, count, speed, kind, color_a, color_b),
            PatternRequest::Aimed {
                target,
                speed,
                kind,
                color,
            } => self.spawn_aimed(origin, target, speed, kind, color),
        }
    }

    // --- Physics ---

    /// Advance every active bullet. Homing bullets turn toward the nearest
    /// of `homing_targets`. Bullets that leave the field by more than the
    /// cull margin are deactivated.
    pub fn step(&mut self, dt: f32, field: PlayField, homing_targets: &[Vec2]) {
        for (_, bullet) in self.pool.iter_active_mut() {
            if bullet.angular_velocity != 0.0 {
                bullet.angle += bullet.angular_velocity * dt;
                bullet.velocity = direction(bullet.angle) * bullet.velocity.length();
            }

            if bullet.homing {
                steer_toward_nearest(bullet, homing_targets, dt);
            }

            bullet.position += bullet.velocity * dt;

            if !field.contains_with_margin(bullet.position, BULLET_CULL_MARGIN) {
                bullet.active = false;
            }
        }
    }

    /// Deactivate enemy bullets only (bombs and spell changes).
    pub fn clear_enemy_bullets(&mut self) -> usize {
        let mut cleared = 0;
        for (_, bullet) in self.pool.iter_active_mut() {
            if bullet.owner == Owner::Enemy {
                bullet.active = false;
                cleared += 1;
            }
        }
        cleared
    }

    pub fn clear(&mut self) {
        self.pool.deactivate_all();
    }
}

fn steer_toward_nearest(bullet: &mut Bullet, targets: &[Vec2], dt: f32) {
    let nearest = targets.iter().copied().min_by(|a, b| {
        a.distance_squared(bullet.position)
            .total_cmp(&b.distance_squared(bullet.position))
    });
    let Some(target) = nearest else {
        return;
    };
    let to_target = target - bullet.position;
    if to_target == Vec2::ZERO {
        return;
    }

    let speed = bullet.velocity.length();
    let current = bullet.velocity.y.atan2(bullet.velocity.x);
    let desired = to_target.y.atan2(to_target.x);
    let diff = (desired - current + PI).rem_euclid(TAU) - PI;
    let max_turn = HOMING_TURN_RATE * dt;

    bullet.angle = current + diff.clamp(-max_turn, max_turn);
    bullet.velocity = direction(bullet.angle) * speed;
}
