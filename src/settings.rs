//! Game settings: playfield layout, entity tuning and rules
//!
//! Defaults reproduce the classic layout. A settings document is JSON with
//! one object per section; any missing section or field falls back to its
//! default.

use std::f32::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::collision::Rect;

/// Settings errors
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

fn invalid(field: &'static str, reason: &'static str) -> SettingsError {
    SettingsError::Invalid { field, reason }
}

fn require_non_negative(field: &'static str, value: f32) -> Result<(), SettingsError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, "must not be negative"))
    }
}

fn require_positive(field: &'static str, value: f32) -> Result<(), SettingsError> {
    // Also rejects NaN
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, "must be a positive finite number"))
    }
}

/// Playfield bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayfieldSettings {
    pub width: f32,
    pub height: f32,
}

impl Default for PlayfieldSettings {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddleSettings {
    pub width: f32,
    pub height: f32,
    /// Horizontal distance covered per tick while a direction is held
    pub speed: f32,
    pub bottom_margin: f32,
}

impl Default for PaddleSettings {
    fn default() -> Self {
        Self {
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            speed: PADDLE_SPEED,
            bottom_margin: PADDLE_BOTTOM_MARGIN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallSettings {
    pub radius: f32,
    /// Distance travelled per tick
    pub speed: f32,
}

impl Default for BallSettings {
    fn default() -> Self {
        Self {
            radius: BALL_RADIUS,
            speed: BALL_SPEED,
        }
    }
}

/// Brick grid layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrickSettings {
    pub rows: usize,
    pub cols: usize,
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Default for BrickSettings {
    fn default() -> Self {
        Self {
            rows: BRICK_ROWS,
            cols: BRICK_COLS,
            width: BRICK_WIDTH,
            height: BRICK_HEIGHT,
            padding: BRICK_PADDING,
            offset_x: BRICK_OFFSET_X,
            offset_y: BRICK_OFFSET_Y,
        }
    }
}

impl BrickSettings {
    /// Rectangle of the cell at (row, col)
    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        Rect::new(
            col as f32 * (self.width + self.padding) + self.offset_x,
            row as f32 * (self.height + self.padding) + self.offset_y,
            self.width,
            self.height,
        )
    }

    /// Bounding box of the whole grid
    pub fn extent(&self) -> Rect {
        let last = self.cell_rect(self.rows.saturating_sub(1), self.cols.saturating_sub(1));
        Rect::new(
            self.offset_x,
            self.offset_y,
            last.right() - self.offset_x,
            last.bottom() - self.offset_y,
        )
    }
}

/// Scoring, lives and angle limits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSettings {
    pub base_points: u32,
    pub starting_lives: u8,
    /// Serve angle limit in radians, measured from straight up
    pub max_launch_angle: f32,
    /// Bounce angle at the paddle edges, in radians
    pub max_bounce_angle: f32,
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            base_points: BASE_POINTS,
            starting_lives: STARTING_LIVES,
            max_launch_angle: MAX_LAUNCH_ANGLE,
            max_bounce_angle: MAX_BOUNCE_ANGLE,
        }
    }
}

/// Complete game settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playfield: PlayfieldSettings,
    pub paddle: PaddleSettings,
    pub ball: BallSettings,
    pub bricks: BrickSettings,
    pub rules: RuleSettings,
}

impl Settings {
    /// Parse and validate a JSON settings document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replace the playfield bounds (e.g. with a render surface's size)
    pub fn with_playfield(mut self, width: f32, height: f32) -> Self {
        self.playfield = PlayfieldSettings { width, height };
        self
    }

    /// Check that every dimension is usable and the layout fits the playfield
    pub fn validate(&self) -> Result<(), SettingsError> {
        require_positive("playfield.width", self.playfield.width)?;
        require_positive("playfield.height", self.playfield.height)?;

        require_positive("paddle.width", self.paddle.width)?;
        require_positive("paddle.height", self.paddle.height)?;
        require_positive("paddle.speed", self.paddle.speed)?;
        require_non_negative("paddle.bottom_margin", self.paddle.bottom_margin)?;
        if self.paddle.width >= self.playfield.width {
            return Err(invalid("paddle.width", "must be narrower than the playfield"));
        }
        if self.paddle.height + self.paddle.bottom_margin >= self.playfield.height {
            return Err(invalid("paddle.height", "paddle does not fit inside the playfield"));
        }

        require_positive("ball.radius", self.ball.radius)?;
        require_positive("ball.speed", self.ball.speed)?;
        if self.ball.radius * 2.0 >= self.playfield.width {
            return Err(invalid("ball.radius", "ball is wider than the playfield"));
        }

        if self.bricks.rows == 0 {
            return Err(invalid("bricks.rows", "must be at least 1"));
        }
        if self.bricks.cols == 0 {
            return Err(invalid("bricks.cols", "must be at least 1"));
        }
        require_positive("bricks.width", self.bricks.width)?;
        require_positive("bricks.height", self.bricks.height)?;
        require_non_negative("bricks.padding", self.bricks.padding)?;
        require_non_negative("bricks.offset_x", self.bricks.offset_x)?;
        require_non_negative("bricks.offset_y", self.bricks.offset_y)?;
        let grid = self.bricks.extent();
        let paddle_top = self.playfield.height - self.paddle.height - self.paddle.bottom_margin;
        if grid.right() > self.playfield.width {
            return Err(invalid("bricks", "grid is wider than the playfield"));
        }
        // The serve position sits on top of the paddle; keep it clear of the grid
        if grid.bottom() >= paddle_top - self.ball.radius * 2.0 {
            return Err(invalid("bricks", "grid overlaps the serve area"));
        }

        if self.rules.base_points == 0 {
            return Err(invalid("rules.base_points", "must be at least 1"));
        }
        if self.rules.starting_lives == 0 {
            return Err(invalid("rules.starting_lives", "must be at least 1"));
        }
        for (field, angle) in [
            ("rules.max_launch_angle", self.rules.max_launch_angle),
            ("rules.max_bounce_angle", self.rules.max_bounce_angle),
        ] {
            if !(angle > 0.0 && angle < FRAC_PI_2) {
                return Err(invalid(field, "must be between 0 and 90 degrees"));
            }
        }

        Ok(())
    }

    /// Load settings from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.bricks.rows * settings.bricks.cols, 45);
    }

    #[test]
    fn test_default_grid_fits_playfield() {
        let grid = BrickSettings::default().extent();
        assert_eq!(grid.x, 40.0);
        assert_eq!(grid.y, 60.0);
        assert_eq!(grid.right(), 835.0);
        assert_eq!(grid.bottom(), 245.0);
    }

    #[test]
    fn test_cell_rect() {
        let bricks = BrickSettings::default();
        let rect = bricks.cell_rect(2, 3);
        assert_eq!(rect.x, 3.0 * 90.0 + 40.0);
        assert_eq!(rect.y, 2.0 * 40.0 + 60.0);
        assert_eq!(rect.w, 75.0);
        assert_eq!(rect.h, 25.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "ball": { "speed": 6.0 } }"#).unwrap();
        assert_eq!(settings.ball.speed, 6.0);
        assert_eq!(settings.ball.radius, BALL_RADIUS);
        assert_eq!(settings.bricks, BrickSettings::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = Settings::default().with_playfield(900.0, 700.0);
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_malformed_json() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_rejects_non_positive_radius() {
        let mut settings = Settings::default();
        settings.ball.radius = 0.0;
        let err = settings.validate().unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid {
                field: "ball.radius",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_nan_speed() {
        let mut settings = Settings::default();
        settings.paddle.speed = f32::NAN;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_grid() {
        let mut settings = Settings::default();
        settings.bricks.cols = 0;
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::Invalid {
                field: "bricks.cols",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_grid_wider_than_playfield() {
        let settings = Settings::default().with_playfield(800.0, 600.0);
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::Invalid { field: "bricks", .. })
        ));
    }

    #[test]
    fn test_rejects_paddle_wider_than_playfield() {
        let mut settings = Settings::default();
        settings.paddle.width = 2000.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_lives() {
        let mut settings = Settings::default();
        settings.rules.starting_lives = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_flat_bounce_angle() {
        let mut settings = Settings::default();
        settings.rules.max_bounce_angle = FRAC_PI_2;
        assert!(settings.validate().is_err());
    }
}
