//! Game state and core simulation types
//!
//! `GameContext` owns every entity for the lifetime of the host. Restarting
//! a game resets entities in place rather than rebuilding the context.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Bounds, Rect};
use crate::heading;
use crate::settings::{BrickSettings, Settings, SettingsError};

/// Current state of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Ball resting on the paddle, waiting for a serve
    Ready,
    /// Active gameplay; the only state in which the simulation advances
    Playing,
    /// All lives lost; waits for a restart
    GameOver,
    /// Every brick destroyed; waits for a restart
    Win,
}

impl GameState {
    /// Terminal states only leave through an explicit restart
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameState::GameOver | GameState::Win)
    }
}

/// Kind of banner message shown to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    None,
    Win,
    Lose,
}

impl MessageKind {
    /// Banner text for this kind of message
    pub fn text(&self) -> &'static str {
        match self {
            MessageKind::None => "",
            MessageKind::Win => "Congratulations! You destroyed every brick!",
            MessageKind::Lose => "Game Over!",
        }
    }

    /// CSS class suffix used by the browser host
    pub fn class_name(&self) -> &'static str {
        match self {
            MessageKind::None => "",
            MessageKind::Win => "win",
            MessageKind::Lose => "lose",
        }
    }
}

/// Notifications for the host, queued during input handling and ticks
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    ScoreChanged(u32),
    LivesChanged(u8),
    BrickDestroyed { row: usize, col: usize, points: u32 },
    /// Ball bounced off the paddle at the given normalized offset
    PaddleHit { hit_pos: f32 },
    StateChanged { from: GameState, to: GameState },
    ShowMessage(MessageKind),
    ClearMessage,
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Magnitude of `dx` while a direction is held
    pub speed: f32,
    /// Horizontal velocity, driven by input
    pub dx: f32,
}

impl Paddle {
    /// Paddle centered horizontally, resting above the bottom margin
    pub fn new(settings: &Settings) -> Self {
        let mut paddle = Self {
            pos: Vec2::ZERO,
            width: settings.paddle.width,
            height: settings.paddle.height,
            speed: settings.paddle.speed,
            dx: 0.0,
        };
        paddle.recenter(settings);
        paddle
    }

    /// Move back to the starting position
    pub fn recenter(&mut self, settings: &Settings) {
        self.pos = Vec2::new(
            settings.playfield.width / 2.0 - self.width / 2.0,
            settings.playfield.height - self.height - settings.paddle.bottom_margin,
        );
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }

    /// Apply one tick of movement, keeping the paddle inside the playfield
    pub fn step(&mut self, bounds: &Bounds) {
        self.pos.x += self.dx;
        self.clamp_to(bounds);
    }

    /// Clamp x into `[0, bounds.width - width]`
    pub fn clamp_to(&mut self, bounds: &Bounds) {
        let max_x = (bounds.width - self.width).max(0.0);
        self.pos.x = self.pos.x.clamp(0.0, max_x);
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Constant speed; collisions only change direction
    pub speed: f32,
}

impl Ball {
    pub fn new(settings: &Settings) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: settings.ball.radius,
            speed: settings.ball.speed,
        }
    }

    /// Advance by the current velocity. Boundaries are handled by the tick.
    pub fn step(&mut self) {
        self.pos += self.vel;
    }

    /// Serve position: horizontally centered, resting on top of the paddle
    pub fn serve_position(&self, paddle: &Paddle, bounds: &Bounds) -> Vec2 {
        Vec2::new(bounds.width / 2.0, paddle.pos.y - self.radius)
    }

    /// Place the ball at the serve position with a random launch angle in
    /// `[-max_angle, max_angle]` from straight up
    pub fn reset(&mut self, paddle: &Paddle, bounds: &Bounds, max_angle: f32, rng: &mut Pcg32) {
        let angle = rng.random_range(-max_angle..=max_angle);
        self.reset_with_angle(paddle, bounds, angle);
    }

    /// Deterministic variant of [`Ball::reset`]
    pub fn reset_with_angle(&mut self, paddle: &Paddle, bounds: &Bounds, angle: f32) {
        self.pos = self.serve_position(paddle, bounds);
        self.vel = heading(angle) * self.speed;
    }
}

/// One cell of the brick grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub row: usize,
    pub col: usize,
    pub rect: Rect,
    pub alive: bool,
}

/// Fixed grid of bricks, stored row-major
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrickGrid {
    rows: usize,
    cols: usize,
    base_points: u32,
    cells: Vec<Brick>,
}

impl BrickGrid {
    /// Build a grid with every brick alive
    pub fn new(layout: &BrickSettings, base_points: u32) -> Self {
        let cells = (0..layout.rows)
            .flat_map(|row| (0..layout.cols).map(move |col| (row, col)))
            .map(|(row, col)| Brick {
                row,
                col,
                rect: layout.cell_rect(row, col),
                alive: true,
            })
            .collect();
        Self {
            rows: layout.rows,
            cols: layout.cols,
            base_points,
            cells,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell at (row, col); `None` when out of range
    pub fn cell(&self, row: usize, col: usize) -> Option<&Brick> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col)
    }

    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.cell(row, col).is_some_and(|b| b.alive)
    }

    /// Mark a brick dead. Returns false if it was already dead or out of range.
    pub fn destroy(&mut self, row: usize, col: usize) -> bool {
        if row >= self.rows || col >= self.cols {
            return false;
        }
        match self.cells.get_mut(row * self.cols + col) {
            Some(brick) if brick.alive => {
                brick.alive = false;
                true
            }
            _ => false,
        }
    }

    /// Points for destroying a brick in `row`; the top row is worth the most
    pub fn points_for_row(&self, row: usize) -> u32 {
        self.rows.saturating_sub(row) as u32 * self.base_points
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Brick> {
        self.cells.iter_mut()
    }

    pub fn alive(&self) -> impl Iterator<Item = &Brick> {
        self.cells.iter().filter(|b| b.alive)
    }

    pub fn alive_count(&self) -> usize {
        self.alive().count()
    }

    /// True once every brick has been destroyed
    pub fn all_destroyed(&self) -> bool {
        self.cells.iter().all(|b| !b.alive)
    }

    /// Bring every brick back (new game only)
    pub fn revive_all(&mut self) {
        for brick in &mut self.cells {
            brick.alive = true;
        }
    }

    /// Highest score obtainable from a full grid
    pub fn total_points(&self) -> u32 {
        (0..self.rows)
            .map(|row| self.points_for_row(row) * self.cols as u32)
            .sum()
    }
}

/// Paddle movement intent written by input handlers and read by the tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub left: bool,
    pub right: bool,
    /// Direction pressed most recently; wins while both are held
    pub last: Option<Direction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl MoveIntent {
    /// Signed direction: -1, 0 or +1
    pub fn axis(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            (true, true) => match self.last {
                Some(Direction::Left) => -1.0,
                _ => 1.0,
            },
            (false, false) => 0.0,
        }
    }
}

/// Renderer-facing summary of a frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub seed: u64,
    pub state: GameState,
    pub score: u32,
    pub lives: u8,
    pub time_ticks: u64,
    pub paddle: Paddle,
    pub ball: Ball,
    pub bricks_alive: usize,
    pub bricks_total: usize,
}

/// Complete game context. Constructed once by the host.
#[derive(Debug, Clone)]
pub struct GameContext {
    pub settings: Settings,
    pub state: GameState,
    pub score: u32,
    pub lives: u8,
    pub paddle: Paddle,
    pub ball: Ball,
    pub bricks: BrickGrid,
    pub intent: MoveIntent,
    /// Ticks simulated since the context was created
    pub time_ticks: u64,
    seed: u64,
    rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameContext {
    /// Validate settings and set up a fresh game in the Ready state
    pub fn new(settings: Settings, seed: u64) -> Result<Self, SettingsError> {
        settings.validate()?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let paddle = Paddle::new(&settings);
        let mut ball = Ball::new(&settings);
        let bounds = Bounds::new(settings.playfield.width, settings.playfield.height);
        ball.reset(&paddle, &bounds, settings.rules.max_launch_angle, &mut rng);
        let bricks = BrickGrid::new(&settings.bricks, settings.rules.base_points);

        log::info!(
            "New game: seed {}, {} bricks, {} lives",
            seed,
            bricks.alive_count(),
            settings.rules.starting_lives
        );

        Ok(Self {
            state: GameState::Ready,
            score: 0,
            lives: settings.rules.starting_lives,
            paddle,
            ball,
            bricks,
            intent: MoveIntent::default(),
            time_ticks: 0,
            seed,
            rng,
            events: Vec::new(),
            settings,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.settings.playfield.width, self.settings.playfield.height)
    }

    /// Reset the ball to the serve position with a fresh random angle
    pub fn reset_ball(&mut self) {
        let bounds = self.bounds();
        let max_angle = self.settings.rules.max_launch_angle;
        self.ball.reset(&self.paddle, &bounds, max_angle, &mut self.rng);
    }

    /// Queue a notification for the host
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events queued since the last drain, oldest first
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Add points and notify
    pub fn award(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        self.emit(GameEvent::ScoreChanged(self.score));
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            seed: self.seed,
            state: self.state,
            score: self.score,
            lives: self.lives,
            time_ticks: self.time_ticks,
            paddle: self.paddle.clone(),
            ball: self.ball.clone(),
            bricks_alive: self.bricks.alive_count(),
            bricks_total: self.bricks.rows() * self.bricks.cols(),
        }
    }
}
