//! Scene description
//!
//! Converts the current game context into a flat, ordered list of draw
//! commands. Any render surface can replay the list; the simulation never
//! draws anything itself.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{GameContext, Rect};

/// RGBA color, components in 0..=1
pub type Color = [f32; 4];

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = [0.0, 0.0, 0.0, 1.0];
    pub const PADDLE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const BALL: Color = [1.0, 1.0, 1.0, 1.0];
    pub const BRICK_OUTLINE: Color = [0.0, 0.0, 0.0, 1.0];

    /// Brick fill per row, top to bottom (cycled for taller grids)
    pub const BRICK_ROWS: [Color; 5] = [
        [1.0, 0.420, 0.420, 1.0], // #FF6B6B
        [1.0, 0.647, 0.0, 1.0],   // #FFA500
        [1.0, 0.843, 0.0, 1.0],   // #FFD700
        [0.306, 0.804, 0.769, 1.0], // #4ECDC4
        [0.271, 0.718, 0.820, 1.0], // #45B7D1
    ];

    pub fn brick_row(row: usize) -> Color {
        BRICK_ROWS[row % BRICK_ROWS.len()]
    }
}

/// Convert a color to a CSS `rgba()` string
pub fn css_color(color: Color) -> String {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({}, {}, {}, {})",
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        color[3].clamp(0.0, 1.0)
    )
}

/// A single drawing instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Fill the whole surface
    Clear { color: Color },
    Rect {
        rect: Rect,
        fill: Color,
        /// Stroke color and line width
        outline: Option<(Color, f32)>,
    },
    Circle {
        center: Vec2,
        radius: f32,
        fill: Color,
    },
}

/// Build the draw list for the current frame: background, bricks, paddle,
/// ball, in that order
pub fn build_scene(ctx: &GameContext) -> Vec<DrawCommand> {
    let mut scene = Vec::with_capacity(ctx.bricks.alive_count() + 3);

    scene.push(DrawCommand::Clear {
        color: colors::BACKGROUND,
    });

    scene.extend(ctx.bricks.alive().map(|brick| DrawCommand::Rect {
        rect: brick.rect,
        fill: colors::brick_row(brick.row),
        outline: Some((colors::BRICK_OUTLINE, 2.0)),
    }));

    scene.push(DrawCommand::Rect {
        rect: ctx.paddle.rect(),
        fill: colors::PADDLE,
        outline: None,
    });

    scene.push(DrawCommand::Circle {
        center: ctx.ball.pos,
        radius: ctx.ball.radius,
        fill: colors::BALL,
    });

    scene
}
