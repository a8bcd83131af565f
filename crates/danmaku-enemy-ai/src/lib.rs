//! Enemy AI for the danmaku simulation.
//!
//! Implements the enemy life-cycle state machine, boss spell cards and
//! motion, and the bullet pattern schedule each enemy fires on.
//! Operates on plain data; no ECS dependency.

pub mod fsm;
pub mod patterns;
pub mod profiles;

pub use danmaku_core as core;
