//! Wave director: spawns declarative enemy layouts and advances through
//! the wave cycle as waves are cleared.
//!
//! The cycle has `WAVE_CYCLE` slots indexed by `wave % WAVE_CYCLE`. The
//! boss slot has no layout: automatic advancement skips over it, and the
//! boss wave is entered explicitly with `begin_boss_wave`.

use glam::Vec2;

use danmaku_core::constants::*;
use danmaku_core::enums::EnemyKind;
use danmaku_core::events::SimEvent;

use crate::enemies::EnemyRoster;

/// One enemy placement within a wave.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveSpawn {
    pub kind: EnemyKind,
    pub anchor: Vec2,
    pub health: f32,
    pub pattern_id: u32,
}

impl WaveSpawn {
    pub fn new(kind: EnemyKind, x: f32, y: f32, health: f32, pattern_id: u32) -> Self {
        Self {
            kind,
            anchor: Vec2::new(x, y),
            health,
            pattern_id,
        }
    }
}

/// The enemies of one wave slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaveLayout {
    pub spawns: Vec<WaveSpawn>,
}

impl WaveLayout {
    pub fn new(spawns: Vec<WaveSpawn>) -> Self {
        Self { spawns }
    }
}

/// Default layouts per cycle slot. The boss slot is left empty.
pub fn default_cycle() -> Vec<WaveLayout> {
    use EnemyKind::*;
    vec![
        WaveLayout::new(vec![
            WaveSpawn::new(Fodder, 220.0, 150.0, 200.0, 0),
            WaveSpawn::new(Fodder, 420.0, 150.0, 200.0, 0),
        ]),
        WaveLayout::new(vec![
            WaveSpawn::new(MediumFoe, 100.0, 120.0, 150.0, 1),
            WaveSpawn::new(MediumFoe, 220.0, 120.0, 150.0, 1),
            WaveSpawn::new(MediumFoe, 420.0, 120.0, 150.0, 1),
            WaveSpawn::new(MediumFoe, 540.0, 120.0, 150.0, 1),
        ]),
        WaveLayout::new(vec![
            WaveSpawn::new(HeavyFoe, 220.0, 100.0, 300.0, 2),
            WaveSpawn::new(HeavyFoe, 420.0, 100.0, 300.0, 2),
            WaveSpawn::new(Fodder, 100.0, 180.0, 100.0, 0),
            WaveSpawn::new(Fodder, 260.0, 180.0, 100.0, 0),
            WaveSpawn::new(Fodder, 380.0, 180.0, 100.0, 0),
            WaveSpawn::new(Fodder, 540.0, 180.0, 100.0, 0),
        ]),
        WaveLayout::default(),
    ]
}

pub fn is_boss_slot(wave: u32) -> bool {
    wave % WAVE_CYCLE == BOSS_WAVE_SLOT
}

#[derive(Debug, Clone)]
pub struct WaveDirector {
    wave: u32,
    timer: f32,
    cooldown: f32,
    layouts: Vec<WaveLayout>,
    boss_wave: bool,
}

impl Default for WaveDirector {
    fn default() -> Self {
        Self::new(default_cycle(), WAVE_COOLDOWN_SECS)
    }
}

impl WaveDirector {
    /// Layouts are indexed by `wave % WAVE_CYCLE`; missing slots spawn nothing.
    pub fn new(layouts: Vec<WaveLayout>, cooldown: f32) -> Self {
        Self {
            wave: 0,
            timer: 0.0,
            cooldown,
            layouts,
            boss_wave: false,
        }
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn in_boss_wave(&self) -> bool {
        self.boss_wave
    }

    /// Reset to the first wave and spawn it.
    pub fn start(&mut self, roster: &mut EnemyRoster) {
        self.wave = 0;
        self.boss_wave = false;
        self.spawn_current(roster);
    }

    fn spawn_current(&mut self, roster: &mut EnemyRoster) {
        self.timer = 0.0;
        let slot = (self.wave % WAVE_CYCLE) as usize;
        let Some(layout) = self.layouts.get(slot) else {
            return;
        };
        for spawn in &layout.spawns {
            roster.spawn(spawn.kind, spawn.anchor, spawn.health, spawn.pattern_id);
        }
        log::debug!("wave {} spawned {} enemies", self.wave, layout.spawns.len());
    }

    /// Advance the cooldown. Once every enemy is gone and the cooldown has
    /// elapsed, the wave counts as cleared and the next one spawns.
    pub fn update(&mut self, dt: f32, roster: &mut EnemyRoster, events: &mut Vec<SimEvent>) {
        self.timer += dt;
        if self.boss_wave || !roster.is_empty() || self.timer <= self.cooldown {
            return;
        }

        events.push(SimEvent::WaveCleared { wave: self.wave });
        self.wave += 1;
        if is_boss_slot(self.wave) {
            self.wave += 1;
        }
        self.spawn_current(roster);
    }

    /// Enter the boss wave. Regular waves pause until `finish_boss_wave`.
    /// Returns false if a boss wave is already running.
    pub fn begin_boss_wave(&mut self, events: &mut Vec<SimEvent>) -> bool {
        if self.boss_wave {
            return false;
        }
        self.boss_wave = true;
        events.push(SimEvent::BossWaveStarted { wave: self.wave });
        log::debug!("boss wave started at wave {}", self.wave);
        true
    }

    /// Resume regular waves after the boss is gone. The next wave spawns
    /// once the cooldown elapses.
    pub fn finish_boss_wave(&mut self) {
        self.boss_wave = false;
        self.timer = 0.0;
    }
}
