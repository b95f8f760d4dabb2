//! Per-frame simulation tick
//!
//! One call advances the game by exactly one unit of game time. Collision
//! resolution runs in a fixed order: paddle, ball, side walls, top wall,
//! paddle bounce, bottom edge, bricks, win check.

use super::collision::{
    Wall, ball_strikes_paddle, bounce_velocity, circle_overlaps_rect, hits_top_wall,
    out_of_bounds, paddle_hit_offset, side_wall,
};
use super::state::{GameContext, GameEvent, GameState, MessageKind};

/// Advance the game by one frame. Does nothing unless the state is Playing.
pub fn tick(ctx: &mut GameContext) {
    if ctx.state != GameState::Playing {
        return;
    }

    ctx.time_ticks += 1;
    let bounds = ctx.bounds();

    // Paddle
    ctx.paddle.step(&bounds);

    // Ball
    ctx.ball.step();

    // Side walls: only reflect while still heading into the wall, so a ball
    // that is already separating is not flipped back
    match side_wall(ctx.ball.pos, ctx.ball.radius, &bounds) {
        Some(Wall::Left) if ctx.ball.vel.x < 0.0 => ctx.ball.vel.x = -ctx.ball.vel.x,
        Some(Wall::Right) if ctx.ball.vel.x > 0.0 => ctx.ball.vel.x = -ctx.ball.vel.x,
        _ => {}
    }

    // Top wall
    if hits_top_wall(ctx.ball.pos, ctx.ball.radius) && ctx.ball.vel.y < 0.0 {
        ctx.ball.vel.y = -ctx.ball.vel.y;
    }

    // Paddle bounce
    let paddle_rect = ctx.paddle.rect();
    if ball_strikes_paddle(ctx.ball.pos, ctx.ball.radius, ctx.ball.vel, &paddle_rect) {
        let hit_pos = paddle_hit_offset(ctx.ball.pos.x, &paddle_rect);
        let max_angle = ctx.settings.rules.max_bounce_angle;
        ctx.ball.vel = bounce_velocity(hit_pos, ctx.ball.speed, max_angle);
        ctx.emit(GameEvent::PaddleHit { hit_pos });
    }

    // Bottom edge
    if out_of_bounds(ctx.ball.pos, ctx.ball.radius, &bounds) {
        lose_ball(ctx);
    }

    // Bricks
    resolve_bricks(ctx);

    if ctx.state == GameState::Playing && ctx.bricks.all_destroyed() {
        ctx.transition(GameState::Win);
        ctx.emit(GameEvent::ShowMessage(MessageKind::Win));
    }
}

/// Ball fell past the bottom: lose a life, then re-serve or end the game
fn lose_ball(ctx: &mut GameContext) {
    ctx.lives = ctx.lives.saturating_sub(1);
    ctx.emit(GameEvent::LivesChanged(ctx.lives));
    log::debug!("Ball lost at tick {}, {} lives left", ctx.time_ticks, ctx.lives);

    if ctx.lives == 0 {
        ctx.transition(GameState::GameOver);
        ctx.emit(GameEvent::ShowMessage(MessageKind::Lose));
    } else {
        ctx.reset_ball();
        ctx.transition(GameState::Ready);
    }
}

/// Destroy every alive brick the ball overlaps.
///
/// The whole grid is scanned, so a ball touching two bricks at once destroys
/// both and reflects twice.
fn resolve_bricks(ctx: &mut GameContext) {
    let center = ctx.ball.pos;
    let radius = ctx.ball.radius;

    let mut hits = Vec::new();
    for brick in ctx.bricks.iter_mut() {
        if brick.alive && circle_overlaps_rect(center, radius, &brick.rect) {
            brick.alive = false;
            ctx.ball.vel.y = -ctx.ball.vel.y;
            hits.push((brick.row, brick.col));
        }
    }

    for (row, col) in hits {
        let points = ctx.bricks.points_for_row(row);
        log::debug!("Brick ({}, {}) destroyed for {} points", row, col, points);
        ctx.emit(GameEvent::BrickDestroyed { row, col, points });
        ctx.award(points);
    }
}
