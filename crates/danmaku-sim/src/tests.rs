//! Tests for pools, bullet patterns, items, scoring, collisions, waves, and
//! the engine frame pipeline.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use danmaku_core::commands::SimCommand;
use danmaku_core::components::Bullet;
use danmaku_core::constants::*;
use danmaku_core::enums::*;
use danmaku_core::events::SimEvent;
use danmaku_core::types::{direction, Color, PlayField};
use danmaku_enemy_ai::fsm::DamageOutcome;

use crate::bullet_field::BulletField;
use crate::config::SimConfig;
use crate::enemies::EnemyRoster;
use crate::error::ConfigError;
use crate::item_field::ItemField;
use crate::player::{weapon_layout, PlayerInput, PlayerMover, PlayerStatus};
use crate::pool::EntityPool;
use crate::score::ScoreState;
use crate::systems::collision;
use crate::waves::{WaveDirector, WaveLayout, WaveSpawn};
use crate::SimulationEngine;

const DT: f32 = 1.0 / 60.0;
const WIDTH: f32 = 640.0;
const HEIGHT: f32 = 960.0;

fn player_home() -> Vec2 {
    Vec2::new(320.0, 860.0)
}

fn approx(a: Vec2, b: Vec2, tol: f32) -> bool {
    a.distance(b) < tol
}

/// Engine with no wave layouts and no kill trigger, for placing entities by hand.
fn quiet_engine(config: SimConfig) -> SimulationEngine {
    SimulationEngine::with_wave_layouts(
        SimConfig {
            boss_kill_trigger: 0,
            ..config
        },
        Vec::new(),
    )
}

fn step(engine: &mut SimulationEngine) -> Vec<SimEvent> {
    engine.update(DT, WIDTH, HEIGHT, player_home())
}

/// Drop a motionless player shot on every active enemy.
fn shoot_active_enemies(engine: &mut SimulationEngine) {
    let targets: Vec<Vec2> = engine
        .snapshot()
        .enemies
        .iter()
        .filter(|e| e.state == EnemyState::Active)
        .map(|e| e.position)
        .collect();
    for target in targets {
        engine.bullets_mut().spawn_player_shot(target, Vec2::ZERO);
    }
}

// ---- Pool ----

#[test]
fn test_pool_full_drops_spawn_and_reuses_first_free_slot() {
    let mut pool: EntityPool<Bullet> = EntityPool::with_capacity(3);
    for i in 0..3 {
        assert_eq!(pool.spawn(Bullet::default()), Some(i));
    }
    assert_eq!(pool.spawn(Bullet::default()), None, "Full pool should refuse");
    assert_eq!(pool.len(), 3);

    pool.get_mut(0).unwrap().active = false;
    assert_eq!(pool.spawn(Bullet::default()), Some(0));
    assert_eq!(pool.active_count(), 3);
}

#[test]
fn test_pool_acquire_reuses_slot_zero_when_all_free() {
    let mut pool: EntityPool<Bullet> = EntityPool::with_capacity(4);
    for _ in 0..4 {
        pool.spawn(Bullet::default());
    }
    pool.deactivate_all();

    for _ in 0..5 {
        assert_eq!(pool.acquire(), Some(0));
        assert_eq!(pool.len(), 4, "Acquire must not grow a full-capacity pool");
    }
    assert_eq!(pool.active_count(), 0, "Acquire does not activate the slot");
}

#[test]
fn test_pool_deactivate_all_keeps_storage() {
    let mut pool: EntityPool<Bullet> = EntityPool::with_capacity(8);
    for _ in 0..5 {
        pool.spawn(Bullet::default());
    }
    pool.deactivate_all();
    pool.deactivate_all();
    assert_eq!(pool.active_count(), 0);
    assert_eq!(pool.len(), 5);
    assert_eq!(pool.iter_active().count(), 0);
}

// ---- Bullet patterns ----

#[test]
fn test_ring_is_evenly_spaced() {
    let mut bullets = BulletField::default();
    let origin = Vec2::new(320.0, 300.0);
    bullets.spawn_ring(origin, 8, 100.0, BulletKind::EnemySmall, Color::WHITE);

    assert_eq!(bullets.active_count(), 8);
    for (i, (_, b)) in bullets.pool().iter_active().enumerate() {
        let expected = direction(TAU * i as f32 / 8.0) * 100.0;
        assert!(approx(b.velocity, expected, 1e-3), "Bullet {i}: {:?}", b.velocity);
        assert_eq!(b.position, origin);
        assert_eq!(b.owner, Owner::Enemy);
        assert_eq!(b.radius, SMALL_BULLET_RADIUS);
    }
}

#[test]
fn test_spiral_offset_rotates_ring() {
    let mut bullets = BulletField::default();
    bullets.spawn_spiral(Vec2::ZERO, 4, 50.0, FRAC_PI_2, BulletKind::EnemyMedium, Color::WHITE);
    let first = bullets.pool().get(0).unwrap();
    assert!(approx(first.velocity, Vec2::new(0.0, 50.0), 1e-3));
    assert_eq!(first.radius, MEDIUM_BULLET_RADIUS);
}

#[test]
fn test_aimed_bullet_points_at_target() {
    let mut bullets = BulletField::default();
    bullets.spawn_aimed(
        Vec2::ZERO,
        Vec2::new(3.0, 4.0),
        50.0,
        BulletKind::EnemySmall,
        Color::WHITE,
    );
    let b = bullets.pool().get(0).unwrap();
    assert!(approx(b.velocity, Vec2::new(30.0, 40.0), 1e-3));
}

#[test]
fn test_aimed_bullet_at_origin_spawns_nothing() {
    let mut bullets = BulletField::default();
    let origin = Vec2::new(100.0, 100.0);
    bullets.spawn_aimed(origin, origin, 50.0, BulletKind::EnemySmall, Color::WHITE);
    assert_eq!(bullets.active_count(), 0);
}

#[test]
fn test_flower_and_double_ring_counts() {
    let mut bullets = BulletField::default();
    bullets.spawn_flower(Vec2::ZERO, 5, 6, 150.0, 0.0, Color::WHITE);
    assert_eq!(bullets.active_count(), 30);

    let mut bullets = BulletField::default();
    bullets.spawn_double_ring(
        Vec2::ZERO,
        12,
        100.0,
        BulletKind::EnemySmall,
        Color::WHITE,
        Color::WHITE,
    );
    assert_eq!(bullets.active_count(), 24);
    let inner = bullets.pool().get(12).unwrap();
    assert!((inner.velocity.length() - 70.0).abs() < 1e-3);
    let inner_angle = inner.velocity.y.atan2(inner.velocity.x);
    assert!((inner_angle - PI / 12.0).abs() < 1e-4);
}

#[test]
fn test_rose_curve_speeds_stay_in_band() {
    let mut bullets = BulletField::default();
    bullets.spawn_rose_curve(Vec2::ZERO, 36, 200.0, 0.3);
    assert_eq!(bullets.active_count(), 36);
    for (_, b) in bullets.pool().iter_active() {
        let speed = b.velocity.length();
        assert!((100.0 - 1e-3..=200.0 + 1e-3).contains(&speed), "speed {speed}");
    }
}

#[test]
fn test_flower_petal_spread_speed_and_alpha() {
    let mut bullets = BulletField::default();
    let color = Color::rgba(1.0, 0.4, 0.6, 1.0);
    let (petals, per_petal, speed, offset) = (3u32, 4u32, 120.0f32, 0.4f32);
    bullets.spawn_flower(Vec2::ZERO, petals, per_petal, speed, offset, color);
    assert_eq!(bullets.active_count(), (petals * per_petal) as usize);

    for p in 0..petals {
        let base = offset + TAU * p as f32 / petals as f32;
        for b in 0..per_petal {
            let frac = b as f32 / per_petal as f32;
            let angle = base + (PI / 8.0) * (b as f32 * PI / per_petal as f32).sin();
            let expected = direction(angle) * speed * (0.7 + 0.3 * frac);

            let bullet = bullets.pool().get((p * per_petal + b) as usize).unwrap();
            assert!(
                approx(bullet.velocity, expected, 1e-3),
                "Petal {p} bullet {b}: {:?} vs {:?}",
                bullet.velocity,
                expected
            );
            assert!((bullet.color.a - (0.7 + 0.3 * frac)).abs() < 1e-6);
            assert_eq!((bullet.color.r, bullet.color.g, bullet.color.b), (1.0, 0.4, 0.6));
            assert_eq!(bullet.kind, BulletKind::EnemySmall);
        }
    }
}

#[test]
fn test_rose_curve_heading_speed_and_hue() {
    let mut bullets = BulletField::default();
    let (count, speed, time) = (8u32, 150.0f32, 0.9f32);
    bullets.spawn_rose_curve(Vec2::ZERO, count, speed, time);
    assert_eq!(bullets.active_count(), count as usize);

    for i in 0..count {
        let theta = time + TAU * i as f32 / count as f32;
        let expected_speed = speed * (0.5 + 0.5 * (5.0 * theta).cos().abs());
        let bullet = bullets.pool().get(i as usize).unwrap();

        assert!(approx(bullet.velocity, direction(theta) * expected_speed, 1e-3));
        assert!((bullet.velocity.length() - expected_speed).abs() < 1e-3);

        let hue = Color::from_hue((theta / TAU).rem_euclid(1.0));
        assert!((bullet.color.r - hue.r).abs() < 1e-5, "Bullet {i} red");
        assert!((bullet.color.g - hue.g).abs() < 1e-5, "Bullet {i} green");
        assert!((bullet.color.b - hue.b).abs() < 1e-5, "Bullet {i} blue");
        assert_eq!(bullet.color.a, 1.0);
    }
}

#[test]
fn test_wave_angles_wobble_with_time() {
    let mut bullets = BulletField::default();
    let color = Color::rgba(0.4, 1.0, 0.6, 1.0);
    let (count, speed, amplitude, frequency, time) = (12u32, 140.0f32, 0.3f32, 5.0f32, 1.7f32);
    bullets.spawn_wave(Vec2::ZERO, count, speed, amplitude, frequency, time, color);
    assert_eq!(bullets.active_count(), count as usize);

    for i in 0..count {
        let angle = time
            + TAU * i as f32 / count as f32
            + amplitude * (frequency * time + 0.5 * i as f32).sin();
        let bullet = bullets.pool().get(i as usize).unwrap();
        assert!(
            approx(bullet.velocity, direction(angle) * speed, 1e-3),
            "Bullet {i}: {:?}",
            bullet.velocity
        );
        assert_eq!(bullet.color, color);
    }
}

#[test]
fn test_full_pool_drops_extra_pattern_bullets() {
    let mut bullets = BulletField::new(10);
    bullets.spawn_ring(Vec2::ZERO, 16, 100.0, BulletKind::EnemySmall, Color::WHITE);
    assert_eq!(bullets.active_count(), 10);
}

proptest! {
    #[test]
    fn prop_ring_speeds_uniform_and_balanced(count in 2u32..64, speed in 1.0f32..500.0) {
        let mut bullets = BulletField::default();
        bullets.spawn_ring(Vec2::ZERO, count, speed, BulletKind::EnemySmall, Color::WHITE);
        prop_assert_eq!(bullets.active_count(), count as usize);

        let mut sum = Vec2::ZERO;
        for (_, b) in bullets.pool().iter_active() {
            prop_assert!((b.velocity.length() - speed).abs() < speed * 1e-4);
            sum += b.velocity;
        }
        prop_assert!(sum.length() < speed * 1e-3 * count as f32);
    }
}

// ---- Bullet physics ----

#[test]
fn test_step_culls_bullets_past_margin() {
    let mut bullets = BulletField::default();
    let field = PlayField::default();
    bullets.spawn_enemy_bullet(
        Vec2::new(320.0, -40.0),
        Vec2::new(0.0, -100.0),
        BulletKind::EnemySmall,
        Color::WHITE,
    );
    bullets.spawn_enemy_bullet(
        Vec2::new(320.0, 480.0),
        Vec2::new(0.0, 100.0),
        BulletKind::EnemySmall,
        Color::WHITE,
    );

    bullets.step(0.2, field, &[]);
    assert_eq!(bullets.active_count(), 1);
    let survivor = bullets.pool().get(1).unwrap();
    assert!(approx(survivor.position, Vec2::new(320.0, 500.0), 1e-3));
}

#[test]
fn test_angular_velocity_curves_bullet() {
    let mut bullets = BulletField::default();
    let index = bullets
        .spawn_enemy_bullet(
            Vec2::new(320.0, 480.0),
            Vec2::new(100.0, 0.0),
            BulletKind::EnemySmall,
            Color::WHITE,
        )
        .unwrap();
    bullets.pool_mut().get_mut(index).unwrap().angular_velocity = FRAC_PI_2;

    bullets.step(1.0, PlayField::default(), &[]);
    let b = bullets.pool().get(index).unwrap();
    assert!(approx(b.velocity, Vec2::new(0.0, 100.0), 1e-3));
    assert!(approx(b.position, Vec2::new(320.0, 580.0), 1e-2));
}

#[test]
fn test_homing_missile_turns_at_limited_rate() {
    let mut bullets = BulletField::default();
    let index = bullets
        .spawn_homing_missile(Vec2::new(320.0, 800.0), Vec2::new(0.0, -400.0))
        .unwrap();

    bullets.step(0.1, PlayField::default(), &[Vec2::new(600.0, 800.0)]);
    let b = bullets.pool().get(index).unwrap();
    assert!(b.velocity.x > 0.0, "Missile should turn toward the target");
    assert!((b.velocity.length() - 400.0).abs() < 1e-2, "Turning keeps speed");
    assert!((b.angle - (-FRAC_PI_2 + HOMING_TURN_RATE * 0.1)).abs() < 1e-4);
}

#[test]
fn test_homing_missile_without_targets_flies_straight() {
    let mut bullets = BulletField::default();
    let index = bullets
        .spawn_homing_missile(Vec2::new(320.0, 800.0), Vec2::new(0.0, -400.0))
        .unwrap();
    bullets.step(0.1, PlayField::default(), &[]);
    let b = bullets.pool().get(index).unwrap();
    assert!(approx(b.velocity, Vec2::new(0.0, -400.0), 1e-3));
}

#[test]
fn test_clear_enemy_bullets_keeps_player_shots() {
    let mut bullets = BulletField::default();
    for _ in 0..3 {
        bullets.spawn_enemy_bullet(Vec2::ZERO, Vec2::ZERO, BulletKind::EnemySmall, Color::WHITE);
    }
    bullets.spawn_player_shot(Vec2::ZERO, Vec2::new(0.0, -1600.0));
    bullets.spawn_player_shot(Vec2::ZERO, Vec2::new(0.0, -1600.0));

    assert_eq!(bullets.clear_enemy_bullets(), 3);
    assert_eq!(bullets.active_count(), 2);
    assert_eq!(bullets.enemy_bullet_count(), 0);
}

// ---- Items ----

#[test]
fn test_drop_table_counts_by_tier() {
    let mut items = ItemField::default();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    items.spawn_drops(Vec2::new(320.0, 200.0), 1, &mut rng);

    let count = |kind: ItemKind| {
        items
            .pool()
            .iter_active()
            .filter(|(_, item)| item.kind == kind)
            .count()
    };
    assert_eq!(count(ItemKind::SmallPower), 3);
    assert_eq!(count(ItemKind::PointDrop), 5);
}

#[test]
fn test_item_fall_speed_is_capped() {
    let mut items = ItemField::default();
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    items.spawn_item(Vec2::new(320.0, 100.0), ItemKind::PointDrop, &mut rng);

    for _ in 0..100 {
        items.update(0.05, Vec2::ZERO, PlayField::default());
        for (_, item) in items.pool().iter_active() {
            assert!(item.velocity.y <= ITEM_MAX_FALL_SPEED);
        }
    }
}

#[test]
fn test_collect_sums_rewards() {
    let mut items = ItemField::default();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let spot = Vec2::new(200.0, 400.0);
    for kind in [
        ItemKind::SmallPower,
        ItemKind::BigPower,
        ItemKind::PointDrop,
        ItemKind::StarBonus,
        ItemKind::Bomb,
    ] {
        items.spawn_item(spot, kind, &mut rng);
    }

    let rewards = items.collect(spot, ITEM_COLLECT_RADIUS, false);
    assert_eq!(rewards.power, 9);
    assert_eq!(rewards.points, 600);
    assert_eq!(rewards.bombs, 1);
    assert_eq!(rewards.pickups.len(), 5);
    assert_eq!(items.active_count(), 0);
}

#[test]
fn test_nearby_item_is_magnetized() {
    let mut items = ItemField::default();
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let player = Vec2::new(100.0, 150.0);
    items.spawn_item(Vec2::new(100.0, 100.0), ItemKind::PointDrop, &mut rng);

    let rewards = items.collect(player, ITEM_COLLECT_RADIUS, false);
    assert!(rewards.is_empty());
    items.update(0.1, player, PlayField::default());

    let (_, item) = items.pool().iter_active().next().unwrap();
    assert!(item.being_collected);
    assert!(item.position.distance(player) < 50.0);
}

#[test]
fn test_auto_collect_pulls_distant_items() {
    let mut items = ItemField::default();
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    items.spawn_item(Vec2::new(500.0, 800.0), ItemKind::SmallPower, &mut rng);

    items.collect(Vec2::new(100.0, 100.0), ITEM_COLLECT_RADIUS, true);
    let (_, item) = items.pool().iter_active().next().unwrap();
    assert!(item.being_collected);
    assert_eq!(item.collect_speed, ITEM_AUTO_COLLECT_SPEED);
}

#[test]
fn test_items_expire_after_lifetime() {
    let mut items = ItemField::default();
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    let tall = PlayField::new(640.0, 100_000.0);
    items.spawn_item(Vec2::new(320.0, 100.0), ItemKind::PointDrop, &mut rng);

    for _ in 0..19 {
        items.update(0.5, Vec2::ZERO, tall);
    }
    assert_eq!(items.active_count(), 1);
    for _ in 0..2 {
        items.update(0.5, Vec2::ZERO, tall);
    }
    assert_eq!(items.active_count(), 0);
}

// ---- Player ----

#[test]
fn test_weapon_layouts_by_level() {
    assert_eq!(weapon_layout(0).len(), 1);
    assert_eq!(weapon_layout(1).len(), 2);
    assert_eq!(weapon_layout(2).len(), 3);
    assert_eq!(weapon_layout(3).iter().filter(|s| s.homing).count(), 2);
    assert_eq!(weapon_layout(4).len(), 9);
    assert_eq!(weapon_layout(99).len(), weapon_layout(4).len());
}

#[test]
fn test_power_evolves_weapon() {
    let mut status = PlayerStatus::default();
    assert_eq!(status.add_power(250), 2);
    assert_eq!(status.evolution_level, 2);
    assert_eq!(status.power, 50);
}

#[test]
fn test_power_caps_at_max_level() {
    let mut status = PlayerStatus::default();
    status.add_power(1000);
    assert_eq!(status.evolution_level, MAX_EVOLUTION_LEVEL);
    assert_eq!(status.power, POWER_PER_LEVEL);
    assert_eq!(status.add_power(10), 0);
}

#[test]
fn test_mover_clamps_to_field() {
    let mut mover = PlayerMover::new(Vec2::new(10.0, 10.0));
    let input = PlayerInput {
        direction: Vec2::new(-1.0, -1.0),
        ..Default::default()
    };
    mover.step(input, 0.1, PlayField::default());
    assert_eq!(mover.position, Vec2::splat(PLAYER_SIZE * 0.5));
}

#[test]
fn test_mover_diagonal_is_not_faster() {
    let start = Vec2::new(320.0, 480.0);
    let mut mover = PlayerMover::new(start);
    let input = PlayerInput {
        direction: Vec2::new(1.0, 1.0),
        ..Default::default()
    };
    mover.step(input, 0.1, PlayField::default());
    assert!((mover.position.distance(start) - PLAYER_SPEED * 0.1).abs() < 1e-3);

    let mut focused = PlayerMover::new(start);
    let input = PlayerInput {
        direction: Vec2::new(1.0, 0.0),
        focus: true,
        ..Default::default()
    };
    focused.step(input, 0.1, PlayField::default());
    assert!((focused.position.x - start.x - PLAYER_FOCUS_SPEED * 0.1).abs() < 1e-3);
}

#[test]
fn test_mover_fire_cooldown() {
    let mut mover = PlayerMover::at_start(PlayField::default());
    let input = PlayerInput {
        shoot: true,
        ..Default::default()
    };
    assert!(mover.step(input, 0.05, PlayField::default()));
    assert!(!mover.step(input, 0.05, PlayField::default()));
    assert!(mover.step(input, 0.05, PlayField::default()));
}

// ---- Score ----

#[test]
fn test_combo_builds_and_expires() {
    let mut score = ScoreState::default();
    score.register_hit();
    score.register_hit();
    assert_eq!(score.combo, 2);
    assert_eq!(score.score, 2 * HIT_SCORE + 3 * COMBO_BONUS);

    score.tick(1.0);
    assert_eq!(score.combo, 2);
    score.tick(1.1);
    assert_eq!(score.combo, 0);
}

#[test]
fn test_graze_fills_special_gauge() {
    let mut score = ScoreState::default();
    for _ in 0..199 {
        score.register_graze();
    }
    assert!(!score.special_ready);
    score.register_graze();
    score.register_graze();
    assert!(score.special_ready);
    assert_eq!(score.special_gauge, SPECIAL_GAUGE_MAX);
    assert_eq!(score.graze, 201);
}

// ---- Config ----

#[test]
fn test_config_partial_json_uses_defaults() {
    let config = SimConfig::from_json_str(r#"{ "seed": 7, "graze_radius": 40.0 }"#).unwrap();
    assert_eq!(config.seed, 7);
    assert_eq!(config.graze_radius, 40.0);
    assert_eq!(config.bullet_capacity, BULLET_POOL_CAPACITY);
    assert_eq!(config.boss_kill_trigger, BOSS_KILL_TRIGGER);
}

#[test]
fn test_config_default_round_trips() {
    let json = serde_json::to_string(&SimConfig::default()).unwrap();
    assert_eq!(SimConfig::from_json_str(&json).unwrap(), SimConfig::default());
}

#[test]
fn test_config_rejects_bad_values() {
    let zero_pool = SimConfig::from_json_str(r#"{ "bullet_capacity": 0 }"#);
    assert!(matches!(zero_pool, Err(ConfigError::Invalid(_))));

    let negative = SimConfig::from_json_str(r#"{ "bomb_damage": -1.0 }"#);
    assert!(matches!(negative, Err(ConfigError::Invalid(_))));

    let no_spells = SimConfig::from_json_str(r#"{ "boss_spell_cards": 0 }"#);
    assert!(matches!(no_spells, Err(ConfigError::Invalid(_))));

    let garbage = SimConfig::from_json_str("not json");
    assert!(matches!(garbage, Err(ConfigError::Parse(_))));
}

#[test]
fn test_config_missing_file_is_io_error() {
    let result = SimConfig::from_json_file("/nonexistent/danmaku.json");
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

// ---- Collision ----

#[test]
fn test_player_shot_hits_enemy_once() {
    let mut roster = EnemyRoster::new();
    roster.spawn(EnemyKind::Fodder, Vec2::new(320.0, 150.0), 100.0, 0);
    let mut bullets = BulletField::default();
    let enemy_pos = Vec2::new(320.0, ENEMY_SPAWN_Y);
    bullets.spawn_player_shot(enemy_pos, Vec2::ZERO);

    let hits = collision::player_shots_vs_enemies(&mut bullets, &mut roster, 10.0);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].report.outcome, DamageOutcome::Damaged);
    assert_eq!(bullets.active_count(), 0, "Shot should be consumed");
}

#[test]
fn test_invincible_boss_lets_shots_pass() {
    let mut roster = EnemyRoster::new();
    roster.spawn_boss(Vec2::new(320.0, 150.0), 10.0, 0, 3);
    let mut bullets = BulletField::default();
    let boss_pos = Vec2::new(320.0, ENEMY_SPAWN_Y);
    bullets.spawn_player_shot(boss_pos, Vec2::ZERO);
    bullets.spawn_player_shot(boss_pos, Vec2::ZERO);

    let hits = collision::player_shots_vs_enemies(&mut bullets, &mut roster, 10.0);
    assert_eq!(hits.len(), 1);
    assert!(matches!(
        hits[0].report.outcome,
        DamageOutcome::SpellAdvanced { spell: 1, .. }
    ));
    assert_eq!(bullets.active_count(), 1);

    let again = collision::player_shots_vs_enemies(&mut bullets, &mut roster, 10.0);
    assert!(again.is_empty());
    assert_eq!(bullets.active_count(), 1);
}

#[test]
fn test_enemy_bullets_graze_and_hit() {
    let mut bullets = BulletField::default();
    let player = player_home();
    bullets.spawn_enemy_bullet(
        player + Vec2::new(0.0, 20.0),
        Vec2::ZERO,
        BulletKind::EnemySmall,
        Color::WHITE,
    );
    bullets.spawn_enemy_bullet(
        player + Vec2::new(1.0, 0.0),
        Vec2::ZERO,
        BulletKind::EnemySmall,
        Color::WHITE,
    );
    bullets.spawn_enemy_bullet(
        player + Vec2::new(0.0, 200.0),
        Vec2::ZERO,
        BulletKind::EnemySmall,
        Color::WHITE,
    );

    let contact = collision::enemy_bullets_vs_player(
        &mut bullets,
        player,
        PLAYER_HITBOX_RADIUS,
        GRAZE_RADIUS,
    );
    assert_eq!(contact.grazes.len(), 1);
    assert_eq!(contact.hits.len(), 1);
    assert_eq!(bullets.active_count(), 2, "Only the hit consumes its bullet");
}

// ---- Waves ----

fn single_fodder_layouts(slots: usize) -> Vec<WaveLayout> {
    (0..slots)
        .map(|_| WaveLayout::new(vec![WaveSpawn::new(EnemyKind::Fodder, 320.0, 150.0, 50.0, 0)]))
        .collect()
}

#[test]
fn test_wave_advance_skips_boss_slot() {
    let mut roster = EnemyRoster::new();
    let mut director = WaveDirector::new(single_fodder_layouts(4), 0.0);
    let mut events = Vec::new();
    director.start(&mut roster);
    assert_eq!(roster.len(), 1);

    for _ in 0..3 {
        roster.clear();
        director.update(0.1, &mut roster, &mut events);
    }
    assert_eq!(director.wave(), 4);
    let cleared: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            SimEvent::WaveCleared { wave } => Some(*wave),
            _ => None,
        })
        .collect();
    assert_eq!(cleared, vec![0, 1, 2]);
}

#[test]
fn test_wave_waits_for_cooldown_and_empty_roster() {
    let mut roster = EnemyRoster::new();
    let mut director = WaveDirector::new(single_fodder_layouts(4), 2.0);
    let mut events = Vec::new();
    director.start(&mut roster);

    director.update(3.0, &mut roster, &mut events);
    assert_eq!(director.wave(), 0, "Live enemies hold the wave");

    roster.clear();
    director.update(0.1, &mut roster, &mut events);
    assert_eq!(director.wave(), 1);
    assert_eq!(events.len(), 1);
}

#[test]
fn test_boss_wave_pauses_regular_waves() {
    let mut roster = EnemyRoster::new();
    let mut director = WaveDirector::new(single_fodder_layouts(4), 0.0);
    let mut events = Vec::new();

    assert!(director.begin_boss_wave(&mut events));
    assert!(!director.begin_boss_wave(&mut events));
    director.update(1.0, &mut roster, &mut events);
    assert_eq!(director.wave(), 0);
    assert_eq!(events, vec![SimEvent::BossWaveStarted { wave: 0 }]);

    director.finish_boss_wave();
    director.update(1.0, &mut roster, &mut events);
    assert_eq!(director.wave(), 1);
}

// ---- Engine ----

#[test]
fn test_frame_time_is_clamped() {
    let mut engine = quiet_engine(SimConfig::default());
    engine.update(5.0, WIDTH, HEIGHT, player_home());
    assert!((engine.time().elapsed_secs - MAX_FRAME_DT as f64).abs() < 1e-6);

    engine.update(-1.0, WIDTH, HEIGHT, player_home());
    engine.update(f32::NAN, WIDTH, HEIGHT, player_home());
    assert!((engine.time().elapsed_secs - MAX_FRAME_DT as f64).abs() < 1e-6);
    assert_eq!(engine.time().frame, 3);
}

#[test]
fn test_bomb_clears_bullets_and_kills_weak_enemies() {
    let mut engine = quiet_engine(SimConfig::default());
    engine
        .enemies_mut()
        .spawn(EnemyKind::Fodder, Vec2::new(320.0, 150.0), 50.0, 0);
    for x in [100.0, 200.0, 300.0] {
        engine.bullets_mut().spawn_enemy_bullet(
            Vec2::new(x, 400.0),
            Vec2::ZERO,
            BulletKind::EnemySmall,
            Color::WHITE,
        );
    }

    engine.queue_command(SimCommand::TriggerBomb);
    let events = step(&mut engine);

    assert!(events.contains(&SimEvent::BombUsed { bombs_left: 2 }));
    assert!(events
        .iter()
        .any(|e| matches!(e, SimEvent::EnemyKilled { kind: EnemyKind::Fodder, .. })));
    assert_eq!(engine.bullets().enemy_bullet_count(), 0);
    assert_eq!(engine.score().kills, 1);
    assert!(engine.items().active_count() > 0, "Bomb kills should drop items");
    assert!(engine.enemies().is_empty());
}

#[test]
fn test_bomb_refused_without_stock() {
    let mut engine = quiet_engine(SimConfig::default());
    for _ in 0..STARTING_BOMBS {
        assert!(engine.trigger_bomb());
    }
    assert!(!engine.trigger_bomb());
    assert_eq!(engine.score().bombs, 0);
}

#[test]
fn test_player_hit_costs_a_life() {
    let mut engine = quiet_engine(SimConfig::default());
    engine.bullets_mut().spawn_enemy_bullet(
        player_home(),
        Vec2::ZERO,
        BulletKind::EnemySmall,
        Color::WHITE,
    );
    let events = step(&mut engine);
    assert!(events
        .iter()
        .any(|e| matches!(e, SimEvent::PlayerHit { .. })));
    assert_eq!(engine.score().lives, STARTING_LIVES - 1);
    assert_eq!(engine.bullets().active_count(), 0);
}

#[test]
fn test_graze_scores_every_frame() {
    let mut engine = quiet_engine(SimConfig::default());
    engine.bullets_mut().spawn_enemy_bullet(
        player_home() + Vec2::new(0.0, 20.0),
        Vec2::ZERO,
        BulletKind::EnemySmall,
        Color::WHITE,
    );
    step(&mut engine);
    step(&mut engine);
    assert_eq!(engine.score().graze, 2);
    assert_eq!(engine.score().score, 2 * GRAZE_SCORE);
}

#[test]
fn test_fire_player_weapon_uses_evolution_level() {
    let mut engine = quiet_engine(SimConfig::default());
    engine.queue_command(SimCommand::FirePlayerWeapon {
        origin: player_home(),
    });
    step(&mut engine);
    assert_eq!(engine.bullets().active_count(), weapon_layout(0).len());
}

#[test]
fn test_reset_all_restarts_everything() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    for i in 0..120 {
        if i % 5 == 0 {
            engine.fire_player_weapon(player_home());
        }
        step(&mut engine);
    }
    engine.trigger_bomb();

    engine.queue_command(SimCommand::ResetAll);
    step(&mut engine);
    engine.reset_all();

    assert_eq!(engine.bullets().active_count(), 0);
    assert_eq!(engine.items().active_count(), 0);
    assert_eq!(engine.particles().active_count(), 0);
    assert_eq!(engine.score().score, 0);
    assert_eq!(engine.score().lives, STARTING_LIVES);
    assert_eq!(engine.score().bombs, STARTING_BOMBS);
    assert_eq!(engine.waves().wave(), 0);
    assert_eq!(engine.time().frame, 0);
    assert_eq!(engine.enemies().len(), 2, "First wave respawns");
}

#[test]
fn test_clearing_a_wave_spawns_the_next() {
    let layouts = vec![
        WaveLayout::new(
            (0..6)
                .map(|i| WaveSpawn::new(EnemyKind::Fodder, 80.0 + 96.0 * i as f32, 150.0, 10.0, 0))
                .collect(),
        ),
        WaveLayout::new(vec![WaveSpawn::new(EnemyKind::Fodder, 320.0, 150.0, 10.0, 0)]),
    ];
    let mut engine = SimulationEngine::with_wave_layouts(
        SimConfig {
            boss_kill_trigger: 0,
            ..Default::default()
        },
        layouts,
    );
    assert_eq!(engine.enemies().len(), 6);

    // Let every enemy finish its entry.
    for _ in 0..90 {
        step(&mut engine);
    }
    shoot_active_enemies(&mut engine);

    let mut events = Vec::new();
    for _ in 0..300 {
        events.extend(step(&mut engine));
    }

    let kills = events
        .iter()
        .filter(|e| matches!(e, SimEvent::EnemyKilled { .. }))
        .count();
    let clears = events
        .iter()
        .filter(|e| matches!(e, SimEvent::WaveCleared { .. }))
        .count();
    assert_eq!(kills, 6);
    assert_eq!(clears, 1);
    assert_eq!(engine.waves().wave(), 1);
    assert_eq!(engine.enemies().len(), 1);
}

#[test]
fn test_kill_trigger_brings_in_boss() {
    let layouts = vec![WaveLayout::new(vec![
        WaveSpawn::new(EnemyKind::Fodder, 220.0, 150.0, 10.0, 0),
        WaveSpawn::new(EnemyKind::Fodder, 420.0, 150.0, 10.0, 0),
    ])];
    let mut engine = SimulationEngine::with_wave_layouts(
        SimConfig {
            boss_kill_trigger: 2,
            ..Default::default()
        },
        layouts,
    );
    for _ in 0..90 {
        step(&mut engine);
    }
    shoot_active_enemies(&mut engine);

    let mut events = Vec::new();
    for _ in 0..240 {
        events.extend(step(&mut engine));
    }

    let started = events
        .iter()
        .position(|e| matches!(e, SimEvent::BossWaveStarted { .. }))
        .expect("boss wave should start");
    let spawned = events
        .iter()
        .position(|e| matches!(e, SimEvent::BossSpawned { .. }))
        .expect("boss should spawn");
    assert!(started < spawned);
    assert!(engine.waves().in_boss_wave());
    assert!(engine.enemies().boss_present());
}

#[test]
fn test_kills_until_boss_counts_down() {
    let mut engine = SimulationEngine::with_wave_layouts(
        SimConfig {
            boss_kill_trigger: 3,
            ..Default::default()
        },
        Vec::new(),
    );
    assert_eq!(engine.kills_until_boss(), Some(3));

    engine
        .enemies_mut()
        .spawn(EnemyKind::Fodder, Vec2::new(320.0, 150.0), 10.0, 0);
    engine.trigger_bomb();
    assert_eq!(engine.kills_until_boss(), Some(2));

    engine.start_boss_wave();
    assert_eq!(engine.kills_until_boss(), None);
    assert_eq!(quiet_engine(SimConfig::default()).kills_until_boss(), None);
}

#[test]
fn test_boss_spell_change_clears_enemy_bullets() {
    let mut engine = quiet_engine(SimConfig {
        boss_health: 10.0,
        ..Default::default()
    });
    engine.spawn_boss();
    for x in [100.0, 200.0, 300.0, 400.0, 500.0] {
        engine.bullets_mut().spawn_enemy_bullet(
            Vec2::new(x, 400.0),
            Vec2::ZERO,
            BulletKind::EnemySmall,
            Color::WHITE,
        );
    }
    engine
        .bullets_mut()
        .spawn_player_shot(Vec2::new(320.0, -40.0), Vec2::ZERO);

    let events = step(&mut engine);
    assert!(events.iter().any(|e| matches!(
        e,
        SimEvent::BossSpellAdvanced {
            spell: 1,
            remaining: 3,
            ..
        }
    )));
    assert_eq!(engine.bullets().enemy_bullet_count(), 0);

    let snap = engine.snapshot();
    let boss = &snap.enemies[0];
    assert!(boss.invincible);
    let spell = boss.spell.unwrap();
    assert_eq!(spell.current, 1);
    assert!(spell.showing_cut_in);
}

#[test]
fn test_boss_defeat_ends_boss_wave() {
    let mut engine = quiet_engine(SimConfig {
        boss_health: 10.0,
        boss_spell_cards: 1,
        ..Default::default()
    });
    let mut events = Vec::new();
    engine.queue_command(SimCommand::SpawnBoss);
    events.extend(step(&mut engine));
    assert!(engine.waves().in_boss_wave());

    engine
        .bullets_mut()
        .spawn_player_shot(Vec2::new(320.0, -40.0), Vec2::ZERO);
    for _ in 0..200 {
        events.extend(step(&mut engine));
    }

    assert!(events
        .iter()
        .any(|e| matches!(e, SimEvent::EnemyKilled { kind: EnemyKind::Boss, .. })));
    assert!(events
        .iter()
        .any(|e| matches!(e, SimEvent::BossDefeated { .. })));
    assert!(!engine.waves().in_boss_wave());
    assert!(!engine.enemies().boss_present());
}

#[test]
fn test_second_spawn_boss_is_ignored() {
    let mut engine = quiet_engine(SimConfig::default());
    engine.queue_command(SimCommand::SpawnBoss);
    step(&mut engine);
    engine.queue_command(SimCommand::SpawnBoss);
    step(&mut engine);
    assert_eq!(engine.enemies().len(), 1);
}

#[test]
fn test_spawn_boss_refuses_while_boss_on_field() {
    let mut engine = quiet_engine(SimConfig::default());
    assert!(engine.spawn_boss().is_some());
    assert!(engine.spawn_boss().is_none());
    let events = step(&mut engine);

    let bosses = engine
        .snapshot()
        .enemies
        .iter()
        .filter(|e| e.kind == EnemyKind::Boss)
        .count();
    assert_eq!(bosses, 1);
    let spawned = events
        .iter()
        .filter(|e| matches!(e, SimEvent::BossSpawned { .. }))
        .count();
    assert_eq!(spawned, 1);
}

#[test]
fn test_snapshot_reports_pending_boss() {
    let mut engine = quiet_engine(SimConfig::default());
    assert!(engine.start_boss_wave());
    let snap = engine.snapshot();
    assert!(snap.wave.boss_wave);
    assert_eq!(snap.wave.boss_spawn_in, Some(BOSS_SPAWN_DELAY_SECS));
    assert!(snap.enemies.is_empty());
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let config = SimConfig {
        seed: 7,
        ..Default::default()
    };
    let mut engine_a = SimulationEngine::new(config.clone());
    let mut engine_b = SimulationEngine::new(config);

    for i in 0..600 {
        if i % 5 == 0 {
            let fire = SimCommand::FirePlayerWeapon {
                origin: player_home(),
            };
            engine_a.queue_command(fire.clone());
            engine_b.queue_command(fire);
        }
        step(&mut engine_a);
        step(&mut engine_b);

        let json_a = serde_json::to_string(&engine_a.snapshot()).unwrap();
        let json_b = serde_json::to_string(&engine_b.snapshot()).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged at frame {i}");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = quiet_engine(SimConfig {
        seed: 111,
        ..Default::default()
    });
    let mut engine_b = quiet_engine(SimConfig {
        seed: 222,
        ..Default::default()
    });
    engine_a.queue_command(SimCommand::TriggerBomb);
    engine_b.queue_command(SimCommand::TriggerBomb);
    step(&mut engine_a);
    step(&mut engine_b);

    let json_a = serde_json::to_string(&engine_a.snapshot().particles).unwrap();
    let json_b = serde_json::to_string(&engine_b.snapshot().particles).unwrap();
    assert_ne!(json_a, json_b, "Different seeds should produce different bursts");
}
