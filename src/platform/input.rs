//! Input mapping
//!
//! Translates raw key names (as reported by `KeyboardEvent.key`) into
//! simulation input events, and provides a simple autopilot for demo runs.

use crate::sim::{GameContext, GameState, InputEvent};

/// Map a key name to an input event.
///
/// Arrow keys and A/D steer; space confirms on key down only.
pub fn key_event(key: &str, pressed: bool) -> Option<InputEvent> {
    match key {
        "ArrowLeft" | "Left" | "a" | "A" => Some(InputEvent::MoveLeft(pressed)),
        "ArrowRight" | "Right" | "d" | "D" => Some(InputEvent::MoveRight(pressed)),
        " " | "Spacebar" if pressed => Some(InputEvent::Confirm),
        _ => None,
    }
}

/// True for keys whose default browser action (scrolling) should be suppressed
pub fn is_game_key(key: &str) -> bool {
    key_event(key, true).is_some()
}

/// Demo player: serves automatically and keeps the paddle under the ball
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Dead zone around the paddle center, in pixels
    pub tolerance: f32,
    /// Restart after a game ends instead of stopping
    pub restart: bool,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            tolerance: 10.0,
            restart: false,
        }
    }
}

impl Autopilot {
    /// Input events for this frame, computed from the current context
    pub fn plan(&self, ctx: &GameContext) -> Vec<InputEvent> {
        match ctx.state {
            GameState::Ready => return vec![InputEvent::Confirm],
            GameState::GameOver | GameState::Win => {
                return if self.restart {
                    vec![InputEvent::Confirm]
                } else {
                    Vec::new()
                };
            }
            GameState::Playing => {}
        }

        // Lead the ball slightly so edge hits happen now and then
        let target = ctx.ball.pos.x + ctx.ball.vel.x * 2.0;
        let offset = target - ctx.paddle.center_x();
        let (left, right) = if offset < -self.tolerance {
            (true, false)
        } else if offset > self.tolerance {
            (false, true)
        } else {
            (false, false)
        };
        vec![InputEvent::MoveLeft(left), InputEvent::MoveRight(right)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use glam::Vec2;

    #[test]
    fn test_arrow_and_letter_keys() {
        assert_eq!(key_event("ArrowLeft", true), Some(InputEvent::MoveLeft(true)));
        assert_eq!(key_event("a", false), Some(InputEvent::MoveLeft(false)));
        assert_eq!(key_event("Right", true), Some(InputEvent::MoveRight(true)));
        assert_eq!(key_event("D", false), Some(InputEvent::MoveRight(false)));
    }

    #[test]
    fn test_space_confirms_on_press_only() {
        assert_eq!(key_event(" ", true), Some(InputEvent::Confirm));
        assert_eq!(key_event("Spacebar", true), Some(InputEvent::Confirm));
        assert_eq!(key_event(" ", false), None);
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(key_event("Enter", true), None);
        assert_eq!(key_event("w", true), None);
        assert!(!is_game_key("Escape"));
        assert!(is_game_key(" "));
    }

    #[test]
    fn test_autopilot_serves() {
        let ctx = GameContext::new(Settings::default(), 1).unwrap();
        assert_eq!(Autopilot::default().plan(&ctx), vec![InputEvent::Confirm]);
    }

    #[test]
    fn test_autopilot_restart_after_game_over() {
        let mut ctx = GameContext::new(Settings::default(), 1).unwrap();
        ctx.state = GameState::GameOver;
        assert!(Autopilot::default().plan(&ctx).is_empty());

        let looping = Autopilot {
            restart: true,
            ..Autopilot::default()
        };
        assert_eq!(looping.plan(&ctx), vec![InputEvent::Confirm]);
        ctx.apply_input(InputEvent::Confirm);
        assert_eq!(ctx.state, GameState::Ready);
    }

    #[test]
    fn test_autopilot_tracks_ball() {
        let mut ctx = GameContext::new(Settings::default(), 1).unwrap();
        ctx.confirm();
        ctx.ball.vel = Vec2::new(0.0, 4.0);
        ctx.ball.pos = Vec2::new(100.0, 300.0);
        let plan = Autopilot::default().plan(&ctx);
        assert_eq!(plan, vec![InputEvent::MoveLeft(true), InputEvent::MoveRight(false)]);

        ctx.ball.pos = Vec2::new(ctx.paddle.center_x(), 300.0);
        let plan = Autopilot::default().plan(&ctx);
        assert_eq!(plan, vec![InputEvent::MoveLeft(false), InputEvent::MoveRight(false)]);
    }
}
