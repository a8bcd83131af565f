//! Fundamental geometric and simulation types.
//!
//! Positions and velocities are `glam::Vec2` in field units (pixels),
//! with +x to the right and +y down the screen.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// RGBA color with components in [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Fully saturated color for a hue in turns (0.0..1.0 is one full rotation).
    pub fn from_hue(hue: f32) -> Self {
        let h = hue * TAU;
        Self {
            r: h.sin().abs(),
            g: (h + 2.0 * PI / 3.0).sin().abs(),
            b: (h + 4.0 * PI / 3.0).sin().abs(),
            a: 1.0,
        }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

/// Size of the playfield the simulation runs in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayField {
    pub width: f32,
    pub height: f32,
}

impl Default for PlayField {
    fn default() -> Self {
        Self {
            width: crate::constants::DEFAULT_FIELD_WIDTH,
            height: crate::constants::DEFAULT_FIELD_HEIGHT,
        }
    }
}

impl PlayField {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Whether a point lies inside the field grown by `margin` on every side.
    pub fn contains_with_margin(&self, p: Vec2, margin: f32) -> bool {
        p.x >= -margin
            && p.x <= self.width + margin
            && p.y >= -margin
            && p.y <= self.height + margin
    }

    /// Clamp a point so a body of `half_extent` stays fully inside the field.
    pub fn clamp_inside(&self, p: Vec2, half_extent: f32) -> Vec2 {
        Vec2::new(
            clamp_axis(p.x, half_extent, self.width - half_extent),
            clamp_axis(p.y, half_extent, self.height - half_extent),
        )
    }
}

/// Clamp one axis. Unlike `f32::clamp` this never panics when `min > max`
/// (a body larger than the field); the lower bound wins.
pub fn clamp_axis(value: f32, min: f32, max: f32) -> f32 {
    if value > max {
        max.max(min)
    } else if value < min {
        min
    } else {
        value
    }
}

/// Normalize a directional input so diagonals move at the same speed as
/// straight lines. Axis-aligned and zero inputs are returned unchanged.
pub fn normalize_input(dir: Vec2) -> Vec2 {
    if dir.x != 0.0 && dir.y != 0.0 {
        dir.normalize_or_zero()
    } else {
        dir
    }
}

/// Circle overlap test: strictly closer than the sum of radii.
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// Unit vector for an angle in radians.
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of frames advanced.
    pub frame: u64,
    /// Elapsed simulation time in seconds (after dt clamping).
    pub elapsed_secs: f64,
}

impl SimTime {
    pub fn advance(&mut self, dt: f32) {
        self.frame += 1;
        self.elapsed_secs += dt as f64;
    }
}
