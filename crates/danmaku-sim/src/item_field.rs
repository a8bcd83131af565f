//! Item field: pickups dropped by enemies, their fall and magnet pull,
//! and collection into rewards.

use glam::Vec2;
use rand::Rng;

use danmaku_core::components::Item;
use danmaku_core::constants::*;
use danmaku_core::enums::ItemKind;
use danmaku_core::types::PlayField;

use crate::pool::EntityPool;

/// Collision radius for an item kind.
pub fn radius_for(kind: ItemKind) -> f32 {
    match kind {
        ItemKind::SmallPower => 24.0,
        ItemKind::BigPower => 36.0,
        ItemKind::PointDrop => 20.0,
        ItemKind::StarBonus => 30.0,
        ItemKind::Bomb => 30.0,
        ItemKind::ExtraLife => 40.0,
        ItemKind::FullPower => 48.0,
    }
}

/// Rewards gathered by one collection pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectedRewards {
    pub power: u32,
    pub points: u64,
    pub bombs: u32,
    pub lives: u32,
    pub full_power: bool,
    /// Each pickup, for feedback events.
    pub pickups: Vec<(ItemKind, Vec2)>,
}

impl CollectedRewards {
    fn add(&mut self, kind: ItemKind, position: Vec2) {
        match kind {
            ItemKind::SmallPower => self.power += 1,
            ItemKind::BigPower => self.power += 8,
            ItemKind::PointDrop => self.points += 100,
            ItemKind::StarBonus => self.points += 500,
            ItemKind::Bomb => self.bombs += 1,
            ItemKind::ExtraLife => self.lives += 1,
            ItemKind::FullPower => self.full_power = true,
        }
        self.pickups.push((kind, position));
    }

    pub fn is_empty(&self) -> bool {
        self.pickups.is_empty()
    }
}

pub struct ItemField {
    pool: EntityPool<Item>,
}

impl Default for ItemField {
    fn default() -> Self {
        Self::new(ITEM_POOL_CAPACITY)
    }
}

impl ItemField {
    pub fn new(capacity: usize) -> Self {
        Self {
            pool: EntityPool::with_capacity(capacity),
        }
    }

    pub fn pool(&self) -> &EntityPool<Item> {
        &self.pool
    }

    pub fn active_count(&self) -> usize {
        self.pool.active_count()
    }

    /// Spawn one item that pops upward before falling.
    pub fn spawn_item(
        &mut self,
        position: Vec2,
        kind: ItemKind,
        rng: &mut impl Rng,
    ) -> Option<usize> {
        let velocity = Vec2::new(
            rng.gen_range(-50.0f32..50.0),
            -100.0 - rng.gen_range(0.0f32..100.0),
        );
        self.pool.spawn(Item {
            position,
            velocity,
            kind,
            radius: radius_for(kind),
            lifetime: ITEM_LIFETIME_SECS,
            being_collected: false,
            collect_speed: 0.0,
            active: true,
        })
    }

    /// Drop table for a defeated enemy. Higher tiers drop more.
    pub fn spawn_drops(&mut self, origin: Vec2, tier: u32, rng: &mut impl Rng) {
        for _ in 0..2 + tier {
            let offset = Vec2::new(
                rng.gen_range(-30.0f32..30.0),
                rng.gen_range(-20.0f32..20.0),
            );
            self.spawn_item(origin + offset, ItemKind::SmallPower, rng);
        }
        for _ in 0..3 + 2 * tier {
            let offset = Vec2::new(
                rng.gen_range(-40.0f32..40.0),
                rng.gen_range(-25.0f32..25.0),
            );
            self.spawn_item(origin + offset, ItemKind::PointDrop, rng);
        }
        if rng.gen_bool(BOMB_DROP_CHANCE) {
            self.spawn_item(origin, ItemKind::Bomb, rng);
        }
        if rng.gen_bool(LIFE_DROP_CHANCE) {
            self.spawn_item(origin, ItemKind::ExtraLife, rng);
        }
    }

    /// Move items: pulled ones chase the player, the rest fall. Items expire
    /// after their lifetime or once below the field.
    pub fn update(&mut self, dt: f32, player: Vec2, field: PlayField) {
        for (_, item) in self.pool.iter_active_mut() {
            if item.being_collected {
                let to_player = player - item.position;
                let dist = to_player.length();
                if dist > ITEM_SNAP_DISTANCE {
                    item.collect_speed += ITEM_COLLECT_ACCEL * dt;
                    item.position += to_player / dist * item.collect_speed * dt;
                }
            } else {
                item.velocity.y = (item.velocity.y + ITEM_GRAVITY * dt).min(ITEM_MAX_FALL_SPEED);
                item.position += item.velocity * dt;
            }

            item.lifetime -= dt;
            if item.lifetime <= 0.0 || item.position.y > field.height + ITEM_CULL_MARGIN {
                item.active = false;
            }
        }
    }

    /// Collect items touching the player and start pulling nearby ones.
    /// With `auto_collect` every item on the field starts homing.
    pub fn collect(&mut self, player: Vec2, radius: f32, auto_collect: bool) -> CollectedRewards {
        let mut rewards = CollectedRewards::default();

        for (_, item) in self.pool.iter_active_mut() {
            let dist = player.distance(item.position);

            if auto_collect && !item.being_collected {
                item.being_collected = true;
                item.collect_speed = ITEM_AUTO_COLLECT_SPEED;
            }

            if dist < radius + item.radius {
                item.active = false;
                rewards.add(item.kind, item.position);
            } else if dist < radius * ITEM_MAGNET_FACTOR && item.collect_speed < ITEM_MAGNET_SPEED {
                item.being_collected = true;
                item.collect_speed = ITEM_MAGNET_SPEED;
            }
        }

        rewards
    }

    pub fn clear(&mut self) {
        self.pool.deactivate_all();
    }
}
