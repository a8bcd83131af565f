//! Bullet pattern requests and the firing schedule for each pattern id.
//!
//! The schedule never touches a bullet pool. It returns requests that the
//! simulation hands to its bullet field, with the rotation phase taken
//! from the emitting enemy's own pattern timer.

use glam::Vec2;

use danmaku_core::enums::BulletKind;
use danmaku_core::types::Color;

/// Number of pattern ids with a dedicated routine. Any other id fires the
/// default ring.
pub const PATTERN_COUNT: u32 = 5;

/// A single volley to spawn at the emitting enemy's position.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternRequest {
    Ring {
        count: u32,
        speed: f32,
        kind: BulletKind,
        color: Color,
    },
    Spiral {
        count: u32,
        speed: f32,
        angle_offset: f32,
        kind: BulletKind,
        color: Color,
    },
    Flower {
        petals: u32,
        per_petal: u32,
        speed: f32,
        angle_offset: f32,
        color: Color,
    },
    /// Rose curve; colors come from the bullet's own angle.
    Rose { count: u32, speed: f32, time: f32 },
    Wave {
        count: u32,
        speed: f32,
        amplitude: f32,
        frequency: f32,
        time: f32,
        color: Color,
    },
    DoubleRing {
        count: u32,
        speed: f32,
        kind: BulletKind,
        color_a: Color,
        color_b: Color,
    },
    Aimed {
        target: Vec2,
        speed: f32,
        kind: BulletKind,
        color: Color,
    },
}

/// Seconds between volleys for a pattern id.
pub fn cadence(pattern_id: u32) -> f32 {
    match pattern_id {
        0 => 0.5,
        1 => 0.05,
        2 => 0.07,
        3 => 0.27,
        4 => 0.03,
        _ => 1.0,
    }
}

/// Pattern a boss runs for its current health fraction.
pub fn boss_pattern_for_health(fraction: f32) -> u32 {
    if fraction > 0.75 {
        0
    } else if fraction > 0.5 {
        4
    } else if fraction > 0.25 {
        2
    } else {
        3
    }
}

/// Run the firing schedule for one enemy this frame.
///
/// `shoot_timer` is reset when the main volley fires. `pattern_timer` is
/// the rotation phase and `target` is where aimed shots go.
pub fn schedule(
    pattern_id: u32,
    shoot_timer: &mut f32,
    pattern_timer: f32,
    target: Vec2,
) -> Vec<PatternRequest> {
    let mut requests = Vec::new();

    if *shoot_timer >= cadence(pattern_id) {
        requests.push(main_volley(pattern_id, pattern_timer));
        *shoot_timer = 0.0;
    }

    // Pattern 2 adds aimed shots during one half-second window every 2.5 s.
    if pattern_id == 2 && (pattern_timer * 2.0) as i32 % 5 == 0 && *shoot_timer < 0.1 {
        requests.push(PatternRequest::Aimed {
            target,
            speed: 200.0,
            kind: BulletKind::EnemyMedium,
            color: Color::rgba(1.0, 0.8, 0.2, 1.0),
        });
    }

    requests
}

fn main_volley(pattern_id: u32, t: f32) -> PatternRequest {
    match pattern_id {
        0 => PatternRequest::Flower {
            petals: 6,
            per_petal: 5,
            speed: 120.0,
            angle_offset: t,
            color: Color::rgba(1.0, 0.4, 0.6, 1.0),
        },
        1 => PatternRequest::Rose {
            count: 8,
            speed: 150.0,
            time: t * 3.0,
        },
        2 => PatternRequest::Wave {
            count: 12,
            speed: 140.0,
            amplitude: 0.3,
            frequency: 5.0,
            time: t,
            color: Color::rgba(0.4, 1.0, 0.6, 1.0),
        },
        3 => PatternRequest::DoubleRing {
            count: 20,
            speed: 130.0,
            kind: BulletKind::EnemySmall,
            color_a: Color::rgba(1.0, 0.3, 0.8, 1.0),
            color_b: Color::rgba(0.3, 0.8, 1.0, 1.0),
        },
        4 => PatternRequest::Spiral {
            count: 4,
            speed: 180.0,
            angle_offset: t * 3.0,
            kind: BulletKind::EnemySmall,
            color: Color::from_hue((t * 0.5).rem_euclid(1.0)),
        },
        _ => PatternRequest::Ring {
            count: 16,
            speed: 150.0,
            kind: BulletKind::EnemySmall,
            color: Color::rgba(1.0, 0.3, 0.3, 1.0),
        },
    }
}
