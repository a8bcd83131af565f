//! Visual-only particles: explosions, hit sparks, and bomb bursts.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use danmaku_core::components::Particle;
use danmaku_core::constants::*;
use danmaku_core::types::{direction, Color};

use crate::pool::EntityPool;

pub struct ParticleField {
    pool: EntityPool<Particle>,
}

impl Default for ParticleField {
    fn default() -> Self {
        Self::new(PARTICLE_POOL_CAPACITY)
    }
}

impl ParticleField {
    pub fn new(capacity: usize) -> Self {
        Self {
            pool: EntityPool::with_capacity(capacity),
        }
    }

    pub fn pool(&self) -> &EntityPool<Particle> {
        &self.pool
    }

    pub fn active_count(&self) -> usize {
        self.pool.active_count()
    }

    /// Burst of `count` particles flung outward with a slight upward kick.
    pub fn spawn_explosion(&mut self, origin: Vec2, color: Color, count: u32, rng: &mut impl Rng) {
        for i in 0..count {
            let angle = TAU * i as f32 / count as f32 + rng.gen_range(0.0f32..0.5);
            let speed = rng.gen_range(100.0f32..300.0);
            let hue_shift: f32 = rng.gen_range(0.0f32..0.3);
            let life = rng.gen_range(0.5f32..1.0);
            self.pool.spawn(Particle {
                position: origin,
                velocity: direction(angle) * speed - Vec2::new(0.0, 100.0),
                color: Color::rgba(
                    (color.r + hue_shift).min(1.0),
                    (color.g + hue_shift * 0.5).min(1.0),
                    (color.b + 1.0 - hue_shift).min(1.0),
                    1.0,
                ),
                size: rng.gen_range(4.0f32..12.0),
                life,
                max_life: life,
                active: true,
            });
        }
    }

    /// Evenly spaced ring of fixed-size particles.
    pub fn spawn_star_burst(&mut self, origin: Vec2, color: Color, count: u32, rng: &mut impl Rng) {
        for i in 0..count {
            let angle = TAU * i as f32 / count as f32;
            let speed = rng.gen_range(150.0f32..250.0);
            self.pool.spawn(Particle {
                position: origin,
                velocity: direction(angle) * speed,
                color,
                size: 6.0,
                life: 0.8,
                max_life: 0.8,
                active: true,
            });
        }
    }

    /// Apply gravity, age particles, and fade them out.
    pub fn update(&mut self, dt: f32) {
        for (_, p) in self.pool.iter_active_mut() {
            p.velocity.y += PARTICLE_GRAVITY * dt;
            p.position += p.velocity * dt;
            p.life -= dt;
            if p.life <= 0.0 {
                p.active = false;
                continue;
            }
            let ratio = p.life / p.max_life;
            p.color.a = ratio;
            p.size *= 0.95 + 0.05 * ratio;
        }
    }

    pub fn clear(&mut self) {
        self.pool.deactivate_all();
    }
}
