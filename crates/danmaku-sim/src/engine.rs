//! Simulation engine: the per-frame orchestrator.
//!
//! `SimulationEngine` owns every pool, the enemy roster, the wave director,
//! and the score. The host calls `update` once per frame with the frame
//! time, the field size, and the player position, and gets back the events
//! raised during that frame. Completely headless; no renderer, audio, or
//! input dependency.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use danmaku_core::commands::SimCommand;
use danmaku_core::components::Enemy;
use danmaku_core::constants::*;
use danmaku_core::events::SimEvent;
use danmaku_core::state::{FrameSnapshot, WaveView};
use danmaku_core::types::{Color, PlayField, SimTime};
use danmaku_enemy_ai::fsm::{DamageOutcome, EnemyContext};
use danmaku_enemy_ai::profiles::get_profile;

use crate::bullet_field::BulletField;
use crate::enemies::{EnemyRoster, HitReport};
use crate::item_field::{CollectedRewards, ItemField};
use crate::particle_field::ParticleField;
use crate::player::weapon_layout;
use crate::score::ScoreState;
use crate::systems;
use crate::systems::snapshot::SnapshotSources;
use crate::waves::{WaveDirector, WaveLayout};

pub use crate::config::SimConfig;

const HIT_SPARK_COLOR: Color = Color::rgba(1.0, 0.9, 0.5, 1.0);
const EXPLOSION_COLOR: Color = Color::rgba(1.0, 0.5, 0.3, 1.0);
const BOMB_COLOR: Color = Color::rgba(1.0, 0.8, 0.3, 1.0);

/// Where the boss fight stands.
#[derive(Debug, Clone, Copy, PartialEq)]
enum BossFlow {
    Idle,
    /// Boss wave started; the boss appears when the delay runs out.
    Pending { remaining: f32 },
    Fighting,
}

/// The simulation engine. Owns all entity state.
pub struct SimulationEngine {
    config: SimConfig,
    field: PlayField,
    time: SimTime,
    rng: ChaCha8Rng,
    command_queue: VecDeque<SimCommand>,
    events: Vec<SimEvent>,
    last_events: Vec<SimEvent>,
    player_position: Vec2,

    bullets: BulletField,
    items: ItemField,
    particles: ParticleField,
    enemies: EnemyRoster,
    waves: WaveDirector,
    boss: BossFlow,
    next_boss_at_kills: u32,
    score: ScoreState,
}

impl SimulationEngine {
    /// Create an engine running the default wave cycle.
    pub fn new(config: SimConfig) -> Self {
        let layouts = crate::waves::default_cycle();
        Self::with_wave_layouts(config, layouts)
    }

    /// Create an engine running custom wave layouts, indexed by
    /// `wave % WAVE_CYCLE`.
    pub fn with_wave_layouts(config: SimConfig, layouts: Vec<WaveLayout>) -> Self {
        let field = PlayField::default();
        let mut engine = Self {
            field,
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            events: Vec::new(),
            last_events: Vec::new(),
            player_position: Vec2::new(field.width * 0.5, field.height - 100.0),
            bullets: BulletField::new(config.bullet_capacity),
            items: ItemField::new(config.item_capacity),
            particles: ParticleField::new(config.particle_capacity),
            enemies: EnemyRoster::new(),
            waves: WaveDirector::new(layouts, config.wave_cooldown_secs),
            boss: BossFlow::Idle,
            next_boss_at_kills: config.boss_kill_trigger,
            score: ScoreState::default(),
            config,
        };
        engine.waves.start(&mut engine.enemies);
        log::info!("simulation started (seed {})", engine.config.seed);
        engine
    }

    /// Queue a command for processing at the next frame boundary.
    pub fn queue_command(&mut self, command: SimCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SimCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one frame and return the events it raised.
    /// `dt` is clamped to `[0, MAX_FRAME_DT]`.
    pub fn update(
        &mut self,
        dt: f32,
        field_width: f32,
        field_height: f32,
        player_position: Vec2,
    ) -> Vec<SimEvent> {
        let dt = if dt > 0.0 { dt.min(MAX_FRAME_DT) } else { 0.0 };
        self.field = PlayField::new(field_width, field_height);
        self.player_position = player_position;

        self.process_commands();
        self.run_systems(dt);
        self.time.advance(dt);

        let events = std::mem::take(&mut self.events);
        self.last_events.clone_from(&events);
        events
    }

    /// Build a snapshot of the current state, carrying the last frame's events.
    pub fn snapshot(&self) -> FrameSnapshot {
        let wave = WaveView {
            wave: self.waves.wave(),
            boss_wave: self.waves.in_boss_wave(),
            boss_spawn_in: match self.boss {
                BossFlow::Pending { remaining } => Some(remaining),
                _ => None,
            },
        };
        systems::snapshot::build_snapshot(
            SnapshotSources {
                time: self.time,
                field: self.field,
                wave,
                bullets: &self.bullets,
                enemies: self.enemies.world(),
                items: &self.items,
                particles: &self.particles,
                score: &self.score,
            },
            self.last_events.clone(),
        )
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn field(&self) -> PlayField {
        self.field
    }

    pub fn bullets(&self) -> &BulletField {
        &self.bullets
    }

    /// Direct access for hosts and tests that spawn bullets themselves.
    pub fn bullets_mut(&mut self) -> &mut BulletField {
        &mut self.bullets
    }

    pub fn items(&self) -> &ItemField {
        &self.items
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn enemies(&self) -> &EnemyRoster {
        &self.enemies
    }

    /// Direct access for hosts and tests that place enemies themselves.
    pub fn enemies_mut(&mut self) -> &mut EnemyRoster {
        &mut self.enemies
    }

    pub fn waves(&self) -> &WaveDirector {
        &self.waves
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    /// Kills still needed before the boss wave starts on its own. None when
    /// the trigger is disabled or a boss wave is already underway.
    pub fn kills_until_boss(&self) -> Option<u32> {
        if self.config.boss_kill_trigger == 0 || self.boss != BossFlow::Idle {
            return None;
        }
        Some(self.next_boss_at_kills.saturating_sub(self.score.kills))
    }

    /// Spend a bomb: clear enemy bullets and damage every hittable,
    /// non-invincible enemy. Returns false with no bombs left.
    pub fn trigger_bomb(&mut self) -> bool {
        if self.score.bombs == 0 {
            log::warn!("bomb requested with none left");
            return false;
        }
        self.score.bombs -= 1;
        self.events.push(SimEvent::BombUsed {
            bombs_left: self.score.bombs,
        });

        let cleared = self.bullets.clear_enemy_bullets();
        let reports = self.enemies.damage_all(self.config.bomb_damage);
        log::debug!(
            "bomb cleared {} bullets and hit {} enemies",
            cleared,
            reports.len()
        );
        for report in reports {
            self.resolve_hit(report, self.config.bomb_damage);
        }
        self.particles.spawn_explosion(
            self.player_position,
            BOMB_COLOR,
            BOMB_BURST_PARTICLES,
            &mut self.rng,
        );
        true
    }

    /// Deactivate every pooled entity, clear the roster, and restart waves,
    /// the boss flow, and the score.
    pub fn reset_all(&mut self) {
        self.bullets.clear();
        self.items.clear();
        self.particles.clear();
        self.enemies.clear();
        self.command_queue.clear();
        self.events.clear();
        self.last_events.clear();
        self.score = ScoreState::default();
        self.boss = BossFlow::Idle;
        self.next_boss_at_kills = self.config.boss_kill_trigger;
        self.time = SimTime::default();
        self.waves.start(&mut self.enemies);
        log::info!("simulation reset");
    }

    /// Start the boss wave: clear regular enemies and schedule the boss.
    /// Returns false if a boss wave is already running.
    pub fn start_boss_wave(&mut self) -> bool {
        if !self.waves.begin_boss_wave(&mut self.events) {
            log::warn!("boss wave requested while one is running");
            return false;
        }
        self.enemies.clear_non_boss();
        self.boss = BossFlow::Pending {
            remaining: self.config.boss_spawn_delay_secs,
        };
        true
    }

    /// Spawn the boss at the top center of the field now. Returns None
    /// while a boss is already on the field.
    pub fn spawn_boss(&mut self) -> Option<hecs::Entity> {
        if self.boss == BossFlow::Fighting {
            log::warn!("boss spawn requested while the boss is on the field");
            return None;
        }
        if !self.waves.in_boss_wave() {
            self.waves.begin_boss_wave(&mut self.events);
            self.enemies.clear_non_boss();
        }
        self.bullets.clear_enemy_bullets();
        let entity = self.enemies.spawn_boss(
            Vec2::new(self.field.width * 0.5, BOSS_SPAWN_Y),
            self.config.boss_health,
            BOSS_OPENING_PATTERN,
            self.config.boss_spell_cards,
        );
        self.boss = BossFlow::Fighting;
        if let Ok(enemy) = self.enemies.world().get::<&Enemy>(entity) {
            self.events.push(SimEvent::BossSpawned { enemy_id: enemy.id });
            log::debug!("boss {} spawned", enemy.id);
        }
        Some(entity)
    }

    /// Fire the player's weapon from `origin` at the current evolution level.
    pub fn fire_player_weapon(&mut self, origin: Vec2) {
        for shot in weapon_layout(self.score.player.evolution_level) {
            if shot.homing {
                self.bullets
                    .spawn_homing_missile(origin + shot.offset, shot.velocity);
            } else {
                self.bullets.spawn_player_shot(origin + shot.offset, shot.velocity);
            }
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: SimCommand) {
        match command {
            SimCommand::TriggerBomb => {
                self.trigger_bomb();
            }
            SimCommand::ResetAll => self.reset_all(),
            SimCommand::StartBossWave => {
                self.start_boss_wave();
            }
            SimCommand::SpawnBoss => {
                self.spawn_boss();
            }
            SimCommand::FirePlayerWeapon { origin } => self.fire_player_weapon(origin),
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32) {
        // 1. Waves
        self.waves.update(dt, &mut self.enemies, &mut self.events);
        // 2. Boss flow (kill trigger, spawn delay)
        self.update_boss_flow(dt);
        // 3. Enemy AI and pattern fire
        let ctx = EnemyContext {
            dt,
            field: self.field,
            target: self.player_position,
        };
        self.enemies.update(&ctx, &mut self.bullets, &mut self.events);
        // 4. Bullet physics
        let homing_targets = self.enemies.hittable_positions();
        self.bullets.step(dt, self.field, &homing_targets);
        // 5. Collisions
        self.resolve_collisions();
        // 6. Items
        self.items.update(dt, self.player_position, self.field);
        let auto_collect = self.player_position.y < self.config.auto_collect_line_y;
        let rewards = self.items.collect(
            self.player_position,
            self.config.collect_radius,
            auto_collect,
        );
        self.apply_rewards(rewards);
        // 7. Particles
        self.particles.update(dt);
        // 8. Combo window
        self.score.tick(dt);
        // 9. Boss defeat bookkeeping
        if self.boss == BossFlow::Fighting && !self.enemies.boss_present() {
            self.boss = BossFlow::Idle;
            self.next_boss_at_kills = self.score.kills + self.config.boss_kill_trigger;
            self.waves.finish_boss_wave();
        }
        // 10. Cleanup
        self.enemies.cleanup();
    }

    fn update_boss_flow(&mut self, dt: f32) {
        match self.boss {
            BossFlow::Idle => {
                if self.config.boss_kill_trigger > 0
                    && self.score.kills >= self.next_boss_at_kills
                    && self.start_boss_wave()
                {
                    log::debug!("kill trigger reached at {} kills", self.score.kills);
                }
            }
            BossFlow::Pending { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.spawn_boss();
                } else {
                    self.boss = BossFlow::Pending { remaining };
                }
            }
            BossFlow::Fighting => {}
        }
    }

    fn resolve_collisions(&mut self) {
        let hits = systems::collision::player_shots_vs_enemies(
            &mut self.bullets,
            &mut self.enemies,
            self.config.player_shot_damage,
        );
        for hit in hits {
            self.particles.spawn_star_burst(
                hit.bullet_position,
                HIT_SPARK_COLOR,
                HIT_SPARK_PARTICLES,
                &mut self.rng,
            );
            self.score.register_hit();
            self.resolve_hit(hit.report, self.config.player_shot_damage);
        }

        let contact = systems::collision::enemy_bullets_vs_player(
            &mut self.bullets,
            self.player_position,
            self.config.player_hitbox_radius,
            self.config.graze_radius,
        );
        for position in contact.grazes {
            self.score.register_graze();
            self.events.push(SimEvent::Graze { position });
        }
        for position in contact.hits {
            self.score.lives = self.score.lives.saturating_sub(1);
            self.events.push(SimEvent::PlayerHit { position });
        }
    }

    /// Turn a damage report into events, score, drops, and effects.
    fn resolve_hit(&mut self, report: HitReport, damage: f32) {
        match report.outcome {
            DamageOutcome::Ignored => return,
            DamageOutcome::Damaged => {}
            DamageOutcome::SpellAdvanced { spell, remaining } => {
                self.bullets.clear_enemy_bullets();
                self.events.push(SimEvent::BossSpellAdvanced {
                    enemy_id: report.enemy_id,
                    spell,
                    remaining,
                });
            }
            DamageOutcome::Killed => {}
        }

        self.events.push(SimEvent::EnemyHit {
            enemy_id: report.enemy_id,
            position: report.position,
            damage,
        });

        if report.outcome == DamageOutcome::Killed {
            self.score.register_kill();
            self.events.push(SimEvent::EnemyKilled {
                enemy_id: report.enemy_id,
                kind: report.kind,
                position: report.position,
            });
            self.particles.spawn_explosion(
                report.position,
                EXPLOSION_COLOR,
                EXPLOSION_PARTICLES,
                &mut self.rng,
            );
            let tier = get_profile(report.kind).drop_tier;
            self.items.spawn_drops(report.position, tier, &mut self.rng);
        }
    }

    fn apply_rewards(&mut self, rewards: CollectedRewards) {
        if rewards.is_empty() {
            return;
        }
        let gained = self.score.player.add_power(rewards.power);
        if gained > 0 {
            log::debug!(
                "weapon evolved to level {}",
                self.score.player.evolution_level
            );
        }
        if rewards.full_power {
            self.score.player.max_out();
            self.score.full_power = true;
        }
        self.score.score += rewards.points;
        self.score.bombs += rewards.bombs;
        self.score.lives += rewards.lives;
        for (kind, position) in rewards.pickups {
            self.events.push(SimEvent::ItemCollected { kind, position });
        }
    }
}
