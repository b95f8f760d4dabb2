//! Brick Breaker - a single-screen paddle and ball arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collisions, scoring, game state machine)
//! - `renderer`: Backend-agnostic scene description for render surfaces
//! - `platform`: Host-facing adapters (input mapping, HUD, frame driver)
//! - `settings`: Data-driven layout and rules

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use std::f32::consts::PI;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 875.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    pub const PADDLE_SPEED: f32 = 7.0;
    /// Gap between the paddle's bottom edge and the playfield bottom
    pub const PADDLE_BOTTOM_MARGIN: f32 = 20.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    pub const BALL_SPEED: f32 = 4.0;

    /// Brick grid layout
    pub const BRICK_ROWS: usize = 5;
    pub const BRICK_COLS: usize = 9;
    pub const BRICK_WIDTH: f32 = 75.0;
    pub const BRICK_HEIGHT: f32 = 25.0;
    pub const BRICK_PADDING: f32 = 15.0;
    pub const BRICK_OFFSET_X: f32 = 40.0;
    pub const BRICK_OFFSET_Y: f32 = 60.0;

    /// Points per brick in the bottom row; each row above adds this again
    pub const BASE_POINTS: u32 = 10;
    pub const STARTING_LIVES: u8 = 3;

    /// Serve angle limit, measured from straight up (30 degrees)
    pub const MAX_LAUNCH_ANGLE: f32 = PI / 6.0;
    /// Paddle deflection limit at the paddle edges (60 degrees)
    pub const MAX_BOUNCE_ANGLE: f32 = PI / 3.0;
}

/// Unit direction for an angle measured clockwise from straight up.
///
/// Screen coordinates grow downward, so "up" is `-y`.
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.sin(), -angle.cos())
}

/// Angle of a velocity vector measured from straight up (inverse of [`heading`])
#[inline]
pub fn angle_from_vertical(vel: Vec2) -> f32 {
    vel.x.atan2(-vel.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_heading_straight_up() {
        let dir = heading(0.0);
        assert!(dir.x.abs() < 1e-6);
        assert!((dir.y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_heading_roundtrip() {
        for angle in [-PI / 3.0, -0.2, 0.0, 0.4, PI / 6.0] {
            let back = angle_from_vertical(heading(angle) * 4.0);
            assert!((back - angle).abs() < 1e-5, "{angle} -> {back}");
        }
    }
}
