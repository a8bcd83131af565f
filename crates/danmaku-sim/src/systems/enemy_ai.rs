//! Enemy AI system: steps every enemy's FSM and fires its volleys.
//!
//! Calls the FSM from danmaku-enemy-ai, then turns its pattern requests
//! into bullets and its boss transitions into events.

use hecs::World;

use danmaku_core::components::{Enemy, SpellCards};
use danmaku_core::enums::{EnemyKind, EnemyState};
use danmaku_core::events::SimEvent;
use danmaku_enemy_ai::fsm::{advance, EnemyContext};

use crate::bullet_field::BulletField;

pub fn run(world: &mut World, ctx: &EnemyContext, bullets: &mut BulletField, events: &mut Vec<SimEvent>) {
    for (_entity, (enemy, spells)) in world.query_mut::<(&mut Enemy, Option<&mut SpellCards>)>() {
        let update = advance(enemy, spells, ctx);

        for volley in &update.volleys {
            bullets.fire(enemy.position, volley);
        }

        if update.state_changed
            && enemy.kind == EnemyKind::Boss
            && update.previous_state == EnemyState::Dying
            && enemy.state == EnemyState::Dead
        {
            log::info!("boss {} defeated", enemy.id);
            events.push(SimEvent::BossDefeated { enemy_id: enemy.id });
        }
    }
}
