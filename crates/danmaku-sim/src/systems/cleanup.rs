//! Cleanup system: removes dead enemies from the world.

use hecs::{Entity, World};

use danmaku_core::components::Enemy;
use danmaku_core::enums::EnemyState;

/// Despawn every enemy in the Dead state.
/// Uses a pre-allocated buffer to avoid per-frame allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, enemy) in world.query_mut::<&Enemy>() {
        if enemy.state == EnemyState::Dead {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
