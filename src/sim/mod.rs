//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One unit of game time per tick
//! - Seeded RNG only
//! - Stable iteration order (row-major brick scan)
//! - No rendering or platform dependencies

pub mod collision;
pub mod phase;
pub mod state;
pub mod tick;

pub use collision::{Bounds, Rect, Wall, bounce_velocity, circle_overlaps_rect};
pub use phase::InputEvent;
pub use state::{
    Ball, Brick, BrickGrid, GameContext, GameEvent, GameState, MessageKind, MoveIntent, Paddle,
    Snapshot,
};
pub use tick::tick;
