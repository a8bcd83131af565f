//! Enemy roster: owns the hecs world holding every live enemy.
//!
//! Each enemy is an entity with an `Enemy` component; bosses also carry
//! `SpellCards`. Dead enemies stay in the world until the cleanup system
//! despawns them at the end of the frame.

use glam::Vec2;
use hecs::{Entity, World};

use danmaku_core::components::{Enemy, SpellCards};
use danmaku_core::enums::{EnemyKind, EnemyState};
use danmaku_core::events::SimEvent;
use danmaku_enemy_ai::fsm::{self, DamageOutcome, EnemyContext};

use crate::bullet_field::BulletField;
use crate::systems;

/// Result of damaging one enemy, with what the caller needs for effects.
#[derive(Debug, Clone, Copy)]
pub struct HitReport {
    pub enemy_id: u32,
    pub kind: EnemyKind,
    pub position: Vec2,
    pub outcome: DamageOutcome,
}

#[derive(Default)]
pub struct EnemyRoster {
    world: World,
    next_id: u32,
    despawn_buffer: Vec<Entity>,
}

impl EnemyRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only access to the underlying world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn spawn(&mut self, kind: EnemyKind, anchor: Vec2, health: f32, pattern_id: u32) -> Entity {
        let id = self.allocate_id();
        self.world
            .spawn((fsm::new_enemy(id, kind, anchor, health, pattern_id),))
    }

    pub fn spawn_boss(&mut self, anchor: Vec2, health: f32, pattern_id: u32, spell_cards: u32) -> Entity {
        let id = self.allocate_id();
        self.world.spawn((
            fsm::new_enemy(id, EnemyKind::Boss, anchor, health, pattern_id),
            fsm::new_spell_cards(spell_cards),
        ))
    }

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Number of enemies in the world, including ones that died this frame.
    pub fn len(&self) -> usize {
        self.world.len() as usize
    }

    /// True once every enemy has been despawned.
    pub fn is_empty(&self) -> bool {
        self.world.len() == 0
    }

    pub fn boss_present(&self) -> bool {
        self.world
            .query::<&Enemy>()
            .iter()
            .any(|(_, e)| e.kind == EnemyKind::Boss && e.state != EnemyState::Dead)
    }

    /// Positions of enemies that homing shots may chase.
    pub fn hittable_positions(&self) -> Vec<Vec2> {
        self.world
            .query::<&Enemy>()
            .iter()
            .filter(|(_, e)| e.state.is_hittable())
            .map(|(_, e)| e.position)
            .collect()
    }

    /// Advance every enemy and spawn the volleys they fire.
    pub fn update(&mut self, ctx: &EnemyContext, bullets: &mut BulletField, events: &mut Vec<SimEvent>) {
        systems::enemy_ai::run(&mut self.world, ctx, bullets, events);
    }

    /// Damage one enemy. Returns None if the entity no longer exists.
    pub fn damage(&mut self, entity: Entity, amount: f32) -> Option<HitReport> {
        let (enemy, spells) = self
            .world
            .query_one_mut::<(&mut Enemy, Option<&mut SpellCards>)>(entity)
            .ok()?;
        let outcome = fsm::take_damage(enemy, spells, amount);
        Some(HitReport {
            enemy_id: enemy.id,
            kind: enemy.kind,
            position: enemy.position,
            outcome,
        })
    }

    /// Damage every hittable, non-invincible enemy.
    pub fn damage_all(&mut self, amount: f32) -> Vec<HitReport> {
        let mut reports = Vec::new();
        for (_entity, (enemy, spells)) in self
            .world
            .query_mut::<(&mut Enemy, Option<&mut SpellCards>)>()
        {
            let outcome = fsm::take_damage(enemy, spells, amount);
            if outcome != DamageOutcome::Ignored {
                reports.push(HitReport {
                    enemy_id: enemy.id,
                    kind: enemy.kind,
                    position: enemy.position,
                    outcome,
                });
            }
        }
        reports
    }

    /// Remove every enemy except bosses.
    pub fn clear_non_boss(&mut self) {
        self.despawn_buffer.clear();
        for (entity, enemy) in self.world.query_mut::<&Enemy>() {
            if enemy.kind != EnemyKind::Boss {
                self.despawn_buffer.push(entity);
            }
        }
        for entity in self.despawn_buffer.drain(..) {
            let _ = self.world.despawn(entity);
        }
    }

    /// Despawn dead enemies.
    pub fn cleanup(&mut self) {
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }

    pub fn clear(&mut self) {
        self.world.clear();
        self.despawn_buffer.clear();
    }
}
