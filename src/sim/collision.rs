//! Collision tests for the ball against walls, the paddle and bricks
//!
//! Everything here is a pure function of positions and sizes. Resolving a
//! hit (reflection, scoring, life loss) is the tick's job.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::heading;

/// Axis-aligned rectangle in playfield coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Playfield bounds; the origin is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Which side wall a ball is touching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Left,
    Right,
}

/// Radius-expanded AABB overlap test.
///
/// This is the classic approximation: the circle is treated as its bounding
/// square, so corners report a hit slightly early.
#[inline]
pub fn circle_overlaps_rect(center: Vec2, radius: f32, rect: &Rect) -> bool {
    center.x + radius > rect.x
        && center.x - radius < rect.right()
        && center.y + radius > rect.y
        && center.y - radius < rect.bottom()
}

#[inline]
pub fn hits_left_wall(center: Vec2, radius: f32) -> bool {
    center.x - radius < 0.0
}

#[inline]
pub fn hits_right_wall(center: Vec2, radius: f32, bounds: &Bounds) -> bool {
    center.x + radius > bounds.width
}

#[inline]
pub fn hits_top_wall(center: Vec2, radius: f32) -> bool {
    center.y - radius < 0.0
}

/// Ball's bottom edge has passed the bottom of the playfield
#[inline]
pub fn out_of_bounds(center: Vec2, radius: f32, bounds: &Bounds) -> bool {
    center.y + radius > bounds.height
}

/// Side wall the ball overlaps, if any (left wins when both apply)
pub fn side_wall(center: Vec2, radius: f32, bounds: &Bounds) -> Option<Wall> {
    if hits_left_wall(center, radius) {
        Some(Wall::Left)
    } else if hits_right_wall(center, radius, bounds) {
        Some(Wall::Right)
    } else {
        None
    }
}

/// Paddle contact test.
///
/// Triggers when the ball's bottom edge is past the paddle's top edge, its
/// center is strictly within the paddle's horizontal span, and it is moving
/// down. The downward check stops a ball that was just bounced from
/// re-triggering while it separates.
pub fn ball_strikes_paddle(center: Vec2, radius: f32, velocity: Vec2, paddle: &Rect) -> bool {
    center.y + radius > paddle.y
        && center.x > paddle.x
        && center.x < paddle.right()
        && velocity.y > 0.0
}

/// Normalized hit position along the paddle: -1 at the left edge, 0 at the
/// center, +1 at the right edge
pub fn paddle_hit_offset(ball_x: f32, paddle: &Rect) -> f32 {
    let half = paddle.w / 2.0;
    ((ball_x - (paddle.x + half)) / half).clamp(-1.0, 1.0)
}

/// Outgoing velocity after a paddle hit.
///
/// The angle from vertical is `hit_pos * max_angle`, so center hits go
/// straight up and edge hits leave at `max_angle`. Speed is preserved.
pub fn bounce_velocity(hit_pos: f32, speed: f32, max_angle: f32) -> Vec2 {
    let angle = hit_pos.clamp(-1.0, 1.0) * max_angle;
    heading(angle) * speed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle_from_vertical;
    use proptest::prelude::*;
    use std::f32::consts::PI;

    const BOUNDS: Bounds = Bounds::new(875.0, 600.0);

    #[test]
    fn test_circle_overlaps_rect() {
        let rect = Rect::new(100.0, 100.0, 75.0, 25.0);

        // Center inside
        assert!(circle_overlaps_rect(Vec2::new(120.0, 110.0), 8.0, &rect));
        // Touching from above by less than the radius
        assert!(circle_overlaps_rect(Vec2::new(120.0, 95.0), 8.0, &rect));
        // Clear miss to the left
        assert!(!circle_overlaps_rect(Vec2::new(80.0, 110.0), 8.0, &rect));
        // Exactly touching the edge is not an overlap
        assert!(!circle_overlaps_rect(Vec2::new(92.0, 110.0), 8.0, &rect));
    }

    #[test]
    fn test_corner_counts_as_overlap() {
        // Bounding-square approximation: diagonal distance ~9.9 > radius 8,
        // but both axis intervals overlap
        let rect = Rect::new(100.0, 100.0, 75.0, 25.0);
        assert!(circle_overlaps_rect(Vec2::new(93.0, 93.0), 8.0, &rect));
    }

    #[test]
    fn test_wall_tests() {
        assert!(hits_left_wall(Vec2::new(7.0, 300.0), 8.0));
        assert!(!hits_left_wall(Vec2::new(8.0, 300.0), 8.0));
        assert!(hits_right_wall(Vec2::new(870.0, 300.0), 8.0, &BOUNDS));
        assert!(!hits_right_wall(Vec2::new(867.0, 300.0), 8.0, &BOUNDS));
        assert!(hits_top_wall(Vec2::new(400.0, 5.0), 8.0));
        assert!(out_of_bounds(Vec2::new(400.0, 595.0), 8.0, &BOUNDS));
        assert!(!out_of_bounds(Vec2::new(400.0, 592.0), 8.0, &BOUNDS));
    }

    #[test]
    fn test_side_wall() {
        assert_eq!(side_wall(Vec2::new(3.0, 10.0), 8.0, &BOUNDS), Some(Wall::Left));
        assert_eq!(side_wall(Vec2::new(872.0, 10.0), 8.0, &BOUNDS), Some(Wall::Right));
        assert_eq!(side_wall(Vec2::new(400.0, 10.0), 8.0, &BOUNDS), None);
    }

    #[test]
    fn test_ball_strikes_paddle() {
        let paddle = Rect::new(400.0, 565.0, 100.0, 15.0);
        let down = Vec2::new(0.0, 4.0);
        let up = Vec2::new(0.0, -4.0);

        assert!(ball_strikes_paddle(Vec2::new(450.0, 560.0), 8.0, down, &paddle));
        // Moving up: already separating
        assert!(!ball_strikes_paddle(Vec2::new(450.0, 560.0), 8.0, up, &paddle));
        // Above the paddle
        assert!(!ball_strikes_paddle(Vec2::new(450.0, 550.0), 8.0, down, &paddle));
        // Center exactly on the paddle edge does not count
        assert!(!ball_strikes_paddle(Vec2::new(400.0, 560.0), 8.0, down, &paddle));
        assert!(!ball_strikes_paddle(Vec2::new(500.0, 560.0), 8.0, down, &paddle));
    }

    #[test]
    fn test_paddle_hit_offset() {
        let paddle = Rect::new(400.0, 565.0, 100.0, 15.0);
        assert_eq!(paddle_hit_offset(450.0, &paddle), 0.0);
        assert_eq!(paddle_hit_offset(400.0, &paddle), -1.0);
        assert_eq!(paddle_hit_offset(475.0, &paddle), 0.5);
        assert_eq!(paddle_hit_offset(1000.0, &paddle), 1.0);
    }

    #[test]
    fn test_center_bounce_goes_straight_up() {
        let vel = bounce_velocity(0.0, 4.0, PI / 3.0);
        assert!(vel.x.abs() < 1e-6);
        assert!((vel.y + 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_edge_bounce_uses_max_angle() {
        let vel = bounce_velocity(1.0, 4.0, PI / 3.0);
        assert!((angle_from_vertical(vel) - PI / 3.0).abs() < 1e-5);
        assert!(vel.x > 0.0 && vel.y < 0.0);
    }

    proptest! {
        #[test]
        fn bounce_angle_and_speed_bounded(hit_pos in -1.0f32..=1.0, speed in 0.5f32..50.0) {
            let vel = bounce_velocity(hit_pos, speed, PI / 3.0);
            let angle = angle_from_vertical(vel);
            prop_assert!(angle.abs() <= PI / 3.0 + 1e-5);
            prop_assert!((vel.length() - speed).abs() < speed * 1e-5);
            // Always leaves the paddle upward
            prop_assert!(vel.y < 0.0);
        }

        #[test]
        fn hit_offset_in_unit_range(ball_x in -200.0f32..1200.0) {
            let paddle = Rect::new(400.0, 565.0, 100.0, 15.0);
            let offset = paddle_hit_offset(ball_x, &paddle);
            prop_assert!((-1.0..=1.0).contains(&offset));
        }
    }
}
