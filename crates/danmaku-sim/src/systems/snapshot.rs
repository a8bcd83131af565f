//! Snapshot system: builds a FrameSnapshot from the pools and the world.
//!
//! This system is read-only; it never modifies simulation state.

use hecs::World;

use danmaku_core::components::{Enemy, SpellCards};
use danmaku_core::events::SimEvent;
use danmaku_core::state::*;
use danmaku_core::types::{PlayField, SimTime};
use danmaku_enemy_ai::profiles::get_profile;

use crate::bullet_field::BulletField;
use crate::item_field::ItemField;
use crate::particle_field::ParticleField;
use crate::score::ScoreState;

/// Pool and world references the snapshot is built from.
pub struct SnapshotSources<'a> {
    pub time: SimTime,
    pub field: PlayField,
    pub wave: WaveView,
    pub bullets: &'a BulletField,
    pub enemies: &'a World,
    pub items: &'a ItemField,
    pub particles: &'a ParticleField,
    pub score: &'a ScoreState,
}

pub fn build_snapshot(src: SnapshotSources<'_>, events: Vec<SimEvent>) -> FrameSnapshot {
    FrameSnapshot {
        time: src.time,
        field: src.field,
        wave: src.wave,
        bullets: build_bullets(src.bullets),
        enemies: build_enemies(src.enemies),
        items: build_items(src.items),
        particles: build_particles(src.particles),
        score: src.score.view(),
        events,
    }
}

fn build_bullets(bullets: &BulletField) -> Vec<BulletView> {
    bullets
        .pool()
        .iter_active()
        .map(|(_, b)| BulletView {
            position: b.position,
            radius: b.radius,
            angle: b.angle,
            color: b.color,
            kind: b.kind,
            owner: b.owner,
        })
        .collect()
}

/// Enemy views sorted by id for a stable order.
fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&Enemy, Option<&SpellCards>)>()
        .iter()
        .map(|(_, (enemy, spells))| EnemyView {
            id: enemy.id,
            kind: enemy.kind,
            state: enemy.state,
            position: enemy.position,
            radius: enemy.radius,
            glow: get_profile(enemy.kind).glow,
            health_fraction: enemy.health / enemy.max_health,
            display_health_fraction: enemy.display_health / enemy.max_health,
            invincible: enemy.invincible_timer > 0.0,
            flashing: enemy.flash_timer > 0.0,
            spell: spells.map(|s| SpellView {
                current: s.current,
                total: s.total,
                showing_cut_in: s.showing_cut_in,
            }),
        })
        .collect();
    enemies.sort_by_key(|e| e.id);
    enemies
}

fn build_items(items: &ItemField) -> Vec<ItemView> {
    items
        .pool()
        .iter_active()
        .map(|(_, item)| ItemView {
            position: item.position,
            kind: item.kind,
            radius: item.radius,
            being_collected: item.being_collected,
        })
        .collect()
}

fn build_particles(particles: &ParticleField) -> Vec<ParticleView> {
    particles
        .pool()
        .iter_active()
        .map(|(_, p)| ParticleView {
            position: p.position,
            color: p.color,
            size: p.size,
        })
        .collect()
}
