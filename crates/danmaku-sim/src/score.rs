//! Running score state tracked by the engine.

use danmaku_core::constants::*;
use danmaku_core::state::ScoreView;

use crate::player::PlayerStatus;

#[derive(Debug, Clone)]
pub struct ScoreState {
    pub score: u64,
    pub combo: u32,
    pub combo_timer: f32,
    pub graze: u32,
    pub kills: u32,
    pub lives: u32,
    pub bombs: u32,
    pub special_gauge: f32,
    pub special_ready: bool,
    pub full_power: bool,
    pub player: PlayerStatus,
}

impl Default for ScoreState {
    fn default() -> Self {
        Self {
            score: 0,
            combo: 0,
            combo_timer: 0.0,
            graze: 0,
            kills: 0,
            lives: STARTING_LIVES,
            bombs: STARTING_BOMBS,
            special_gauge: 0.0,
            special_ready: false,
            full_power: false,
            player: PlayerStatus::default(),
        }
    }
}

impl ScoreState {
    /// Score a player shot hit and extend the combo.
    pub fn register_hit(&mut self) {
        self.combo += 1;
        self.combo_timer = COMBO_WINDOW_SECS;
        self.score += HIT_SCORE + self.combo as u64 * COMBO_BONUS;
    }

    pub fn register_kill(&mut self) {
        self.score += KILL_SCORE;
        self.kills += 1;
    }

    pub fn register_graze(&mut self) {
        self.graze += 1;
        self.score += GRAZE_SCORE;
        self.special_gauge += GRAZE_GAUGE_GAIN;
        if self.special_gauge >= SPECIAL_GAUGE_MAX {
            self.special_gauge = SPECIAL_GAUGE_MAX;
            self.special_ready = true;
        }
    }

    /// Run down the combo window; the combo drops when it expires.
    pub fn tick(&mut self, dt: f32) {
        if self.combo_timer > 0.0 {
            self.combo_timer -= dt;
            if self.combo_timer <= 0.0 {
                self.combo_timer = 0.0;
                self.combo = 0;
            }
        }
    }

    pub fn view(&self) -> ScoreView {
        ScoreView {
            score: self.score,
            combo: self.combo,
            graze: self.graze,
            kills: self.kills,
            lives: self.lives,
            bombs: self.bombs,
            power: self.player.power,
            evolution_level: self.player.evolution_level,
            special_gauge: self.special_gauge,
            special_ready: self.special_ready,
            full_power: self.full_power,
        }
    }
}
