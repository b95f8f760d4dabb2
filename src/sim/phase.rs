//! Game state machine and input intents
//!
//! ```text
//! Ready --confirm--> Playing
//! Playing --ball lost, lives > 0--> Ready
//! Playing --ball lost, lives == 0--> GameOver
//! Playing --all bricks destroyed--> Win
//! GameOver | Win --confirm--> Ready (fresh game)
//! ```
//!
//! Input handlers only record paddle intent or request a transition. They
//! never touch the ball or bricks directly.

use super::state::{Direction, GameContext, GameEvent, GameState};

/// Discrete input delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    MoveLeft(bool),
    MoveRight(bool),
    /// Serve from Ready, restart from GameOver/Win
    Confirm,
}

impl GameContext {
    /// Record a state change and notify the host
    pub(crate) fn transition(&mut self, to: GameState) {
        let from = self.state;
        if from == to {
            return;
        }
        self.state = to;
        log::info!("{:?} -> {:?} (score {}, lives {})", from, to, self.score, self.lives);
        self.emit(GameEvent::StateChanged { from, to });
    }

    /// Serve or restart depending on the current state.
    ///
    /// Returns true if the state changed.
    pub fn confirm(&mut self) -> bool {
        match self.state {
            GameState::Ready => {
                self.transition(GameState::Playing);
                self.emit(GameEvent::ClearMessage);
                true
            }
            GameState::GameOver | GameState::Win => {
                self.restart();
                true
            }
            GameState::Playing => {
                log::trace!("Confirm ignored while playing");
                false
            }
        }
    }

    /// Start a fresh game: full grid, zero score, starting lives, paddle
    /// recentered and a new serve
    pub fn restart(&mut self) {
        self.bricks.revive_all();
        self.score = 0;
        self.lives = self.settings.rules.starting_lives;
        self.paddle.recenter(&self.settings);
        self.reset_ball();

        self.transition(GameState::Ready);
        self.emit(GameEvent::ScoreChanged(self.score));
        self.emit(GameEvent::LivesChanged(self.lives));
        self.emit(GameEvent::ClearMessage);
    }

    pub fn move_left(&mut self, pressed: bool) {
        self.set_direction_held(Direction::Left, pressed);
    }

    pub fn move_right(&mut self, pressed: bool) {
        self.set_direction_held(Direction::Right, pressed);
    }

    fn set_direction_held(&mut self, direction: Direction, pressed: bool) {
        match direction {
            Direction::Left => self.intent.left = pressed,
            Direction::Right => self.intent.right = pressed,
        }
        if pressed {
            self.intent.last = Some(direction);
        }
        // Takes effect on the next tick; Ready/GameOver/Win keep the paddle still
        self.paddle.dx = self.intent.axis() * self.paddle.speed;
    }

    /// Route one input event
    pub fn apply_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::MoveLeft(pressed) => self.move_left(pressed),
            InputEvent::MoveRight(pressed) => self.move_right(pressed),
            InputEvent::Confirm => {
                self.confirm();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::MessageKind;
    use crate::sim::tick;
    use glam::Vec2;

    fn context() -> GameContext {
        GameContext::new(Settings::default(), 5).unwrap()
    }

    #[test]
    fn test_confirm_serves() {
        let mut ctx = context();
        assert!(ctx.confirm());
        assert_eq!(ctx.state, GameState::Playing);
        assert_eq!(
            ctx.drain_events(),
            vec![
                GameEvent::StateChanged {
                    from: GameState::Ready,
                    to: GameState::Playing
                },
                GameEvent::ClearMessage,
            ]
        );
    }

    #[test]
    fn test_confirm_ignored_while_playing() {
        let mut ctx = context();
        ctx.confirm();
        ctx.drain_events();
        assert!(!ctx.confirm());
        assert_eq!(ctx.state, GameState::Playing);
        assert!(ctx.pending_events().is_empty());
    }

    #[test]
    fn test_restart_from_game_over() {
        let mut ctx = context();
        ctx.confirm();
        ctx.bricks.destroy(0, 0);
        ctx.bricks.destroy(3, 2);
        ctx.score = 70;
        ctx.lives = 1;
        ctx.paddle.pos.x = 700.0;
        ctx.ball.vel = Vec2::new(0.0, 4.0);
        ctx.ball.pos = Vec2::new(50.0, 596.0);
        tick(&mut ctx);
        assert_eq!(ctx.state, GameState::GameOver);
        assert_eq!(ctx.lives, 0);
        ctx.drain_events();

        assert!(ctx.confirm());
        assert_eq!(ctx.state, GameState::Ready);
        assert_eq!(ctx.lives, 3);
        assert_eq!(ctx.score, 0);
        assert_eq!(ctx.bricks.alive_count(), 45);
        assert_eq!(ctx.paddle.center_x(), 875.0 / 2.0);
        let events = ctx.drain_events();
        assert!(events.contains(&GameEvent::ScoreChanged(0)));
        assert!(events.contains(&GameEvent::LivesChanged(3)));
        assert!(events.contains(&GameEvent::ClearMessage));
    }

    #[test]
    fn test_restart_from_win() {
        let mut ctx = context();
        ctx.confirm();
        for row in 0..5 {
            for col in 0..9 {
                ctx.bricks.destroy(row, col);
            }
        }
        // Move the ball somewhere harmless; the win check fires this tick
        ctx.ball.pos = Vec2::new(400.0, 400.0);
        tick(&mut ctx);
        assert_eq!(ctx.state, GameState::Win);
        assert!(ctx.pending_events().contains(&GameEvent::ShowMessage(MessageKind::Win)));

        ctx.apply_input(InputEvent::Confirm);
        assert_eq!(ctx.state, GameState::Ready);
        assert_eq!(ctx.bricks.alive_count(), 45);
    }

    #[test]
    fn test_intent_sets_paddle_velocity() {
        let mut ctx = context();
        ctx.apply_input(InputEvent::MoveRight(true));
        assert_eq!(ctx.paddle.dx, 7.0);
        ctx.apply_input(InputEvent::MoveLeft(true));
        assert_eq!(ctx.paddle.dx, -7.0);
        ctx.apply_input(InputEvent::MoveLeft(false));
        assert_eq!(ctx.paddle.dx, 7.0);
        ctx.apply_input(InputEvent::MoveRight(false));
        assert_eq!(ctx.paddle.dx, 0.0);
    }

    #[test]
    fn test_paddle_still_while_ready() {
        let mut ctx = context();
        let x = ctx.paddle.pos.x;
        ctx.move_left(true);
        tick(&mut ctx);
        assert_eq!(ctx.paddle.pos.x, x);
    }
}
