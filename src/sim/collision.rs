//! Collision detection and response
//!
//! The ball is treated as its bounding square for every test. Resolution
//! happens in a fixed order each tick: bricks, then the paddle, then walls.
//!
//! Brick policy: bricks are scanned row-major and only the first overlapping
//! live brick is resolved. A ball touching two bricks at once destroys one
//! per tick, and can occasionally slip past the neighbour unresolved.

use glam::Vec2;

use super::speed::normalize_speed;
use super::state::{Ball, Brick, BrickGrid, Paddle, Viewport, Wall};
use crate::settings::Settings;

/// Which walls the ball bounced off this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallFlags {
    pub left: bool,
    pub right: bool,
    pub top: bool,
}

impl WallFlags {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top
    }

    /// Walls that were hit, in left/right/top order
    pub fn walls(&self) -> impl Iterator<Item = Wall> {
        [
            (self.left, Wall::Left),
            (self.right, Wall::Right),
            (self.top, Wall::Top),
        ]
        .into_iter()
        .filter_map(|(hit, wall)| hit.then_some(wall))
    }
}

/// Outcome of resolving one tick of collisions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// (row, col) of the brick destroyed this tick
    pub brick: Option<(usize, usize)>,
    /// Impact offset from the paddle center, if the paddle was hit
    pub paddle_offset: Option<f32>,
    pub walls: WallFlags,
    pub score_delta: u64,
}

/// How the ball struck a brick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrickHit {
    /// Top or bottom face: dy flips
    Vertical,
    /// Left or right face: dx flips
    Horizontal,
}

/// Bounding-square overlap between ball and brick (strict on all sides)
pub fn ball_brick_overlap(ball: &Ball, brick: &Brick) -> bool {
    let r = ball.radius;
    ball.pos.x + r > brick.left()
        && ball.pos.x - r < brick.right()
        && ball.pos.y + r > brick.top()
        && ball.pos.y - r < brick.bottom()
}

/// Classify a hit by whether the ball center lies within the brick's span
pub fn classify_brick_hit(ball: &Ball, brick: &Brick) -> BrickHit {
    if ball.pos.x > brick.left() && ball.pos.x < brick.right() {
        BrickHit::Vertical
    } else {
        BrickHit::Horizontal
    }
}

/// Resolve at most one brick collision. Returns the destroyed brick's (row, col).
pub fn resolve_bricks(ball: &mut Ball, bricks: &mut BrickGrid, speed: f32) -> Option<(usize, usize)> {
    let (coords, hit) = bricks
        .iter()
        .find(|(_, brick)| brick.is_alive() && ball_brick_overlap(ball, brick))
        .map(|(coords, brick)| (coords, classify_brick_hit(ball, brick)))?;

    match hit {
        BrickHit::Vertical => ball.vel.y = -ball.vel.y,
        BrickHit::Horizontal => ball.vel.x = -ball.vel.x,
    }
    ball.vel = normalize_speed(ball.vel, speed);

    let (row, col) = coords;
    if let Some(brick) = bricks.get_mut(row, col) {
        brick.destroy();
    }
    log::debug!("Brick ({}, {}) destroyed ({:?} hit)", row, col, hit);
    Some(coords)
}

/// Whether the ball is touching the paddle's top edge
pub fn ball_on_paddle(ball: &Ball, paddle: &Paddle, viewport: Viewport) -> bool {
    let bottom = ball.bottom();
    bottom >= paddle.top(viewport)
        && bottom <= viewport.height
        && ball.pos.x > paddle.x
        && ball.pos.x < paddle.x + paddle.width
}

/// Velocity after bouncing off the paddle.
///
/// The ball always leaves upward; its horizontal component is proportional to
/// how far from the paddle center it struck.
pub fn paddle_return_velocity(
    vel: Vec2,
    offset: f32,
    steering_coefficient: f32,
    speed: f32,
) -> Vec2 {
    let steered = Vec2::new(offset * steering_coefficient, -vel.y.abs());
    normalize_speed(steered, speed)
}

/// Resolve a paddle bounce. Returns the impact offset from the paddle center.
pub fn resolve_paddle(
    ball: &mut Ball,
    paddle: &Paddle,
    viewport: Viewport,
    settings: &Settings,
) -> Option<f32> {
    if !ball_on_paddle(ball, paddle, viewport) {
        return None;
    }
    let offset = ball.pos.x - paddle.center_x();
    ball.vel = paddle_return_velocity(
        ball.vel,
        offset,
        settings.steering_coefficient,
        settings.ball_speed,
    );
    Some(offset)
}

/// Bounce off the side and top walls based on the ball's next position.
///
/// There is no bottom wall: leaving through the bottom is a loss.
pub fn resolve_walls(ball: &mut Ball, viewport: Viewport, speed: f32) -> WallFlags {
    let mut flags = WallFlags::default();
    let next = ball.pos + ball.vel;

    if next.x > viewport.width - ball.radius || next.x < ball.radius {
        if next.x < ball.radius {
            flags.left = true;
        } else {
            flags.right = true;
        }
        ball.vel.x = -ball.vel.x;
        ball.vel = normalize_speed(ball.vel, speed);
    }

    if next.y < ball.radius {
        flags.top = true;
        ball.vel.y = -ball.vel.y;
        ball.vel = normalize_speed(ball.vel, speed);
    }

    flags
}

/// Run every collision stage for one tick
pub fn resolve(
    ball: &mut Ball,
    paddle: &Paddle,
    bricks: &mut BrickGrid,
    viewport: Viewport,
    settings: &Settings,
) -> CollisionReport {
    let brick = resolve_bricks(ball, bricks, settings.ball_speed);
    let paddle_offset = resolve_paddle(ball, paddle, viewport, settings);
    let walls = resolve_walls(ball, viewport, settings.ball_speed);

    CollisionReport {
        brick,
        paddle_offset,
        walls,
        score_delta: u64::from(brick.is_some()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::speed::launch_velocity;
    use crate::sim::state::BrickStatus;

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    fn ball_at(x: f32, y: f32, vel: Vec2) -> Ball {
        Ball {
            pos: Vec2::new(x, y),
            vel,
            radius: 10.0,
        }
    }

    fn grid() -> BrickGrid {
        BrickGrid::new(viewport(), &Settings::default())
    }

    #[test]
    fn test_vertical_brick_hit_flips_dy() {
        let mut bricks = grid();
        let target = *bricks.get(3, 1).unwrap();
        // Center inside the brick's span, just under its bottom face
        let mut ball = ball_at(
            target.left() + target.size.x / 2.0,
            target.bottom() + 5.0,
            launch_velocity(6.0),
        );

        let hit = resolve_bricks(&mut ball, &mut bricks, 6.0);
        assert_eq!(hit, Some((3, 1)));
        assert!((ball.vel.x - 4.2426).abs() < 1e-3);
        assert!((ball.vel.y - 4.2426).abs() < 1e-3);
        assert!((ball.vel.length() - 6.0).abs() < 1e-4);
        assert_eq!(bricks.get(3, 1).unwrap().status, BrickStatus::Destroyed);
        assert_eq!(bricks.alive_count(), 23);
    }

    #[test]
    fn test_horizontal_brick_hit_flips_dx() {
        let mut bricks = grid();
        let target = *bricks.get(2, 0).unwrap();
        // Center left of the brick, bounding square overlapping its left face
        let mut ball = ball_at(
            target.left() - 2.0,
            target.top() + target.size.y / 2.0,
            Vec2::new(4.0, 1.0),
        );

        let hit = resolve_bricks(&mut ball, &mut bricks, 6.0);
        assert_eq!(hit, Some((2, 0)));
        assert!(ball.vel.x < 0.0);
        assert!(ball.vel.y > 0.0);
        assert!((ball.vel.length() - 6.0).abs() < 1e-4);
    }

    #[test]
    fn test_first_brick_in_scan_order_wins() {
        let mut bricks = grid();
        let upper = *bricks.get(0, 0).unwrap();
        let lower = *bricks.get(1, 0).unwrap();
        // Straddle the gap between rows 0 and 1 so both overlap
        let gap_center = (upper.bottom() + lower.top()) / 2.0;
        let mut ball = ball_at(upper.left() + 20.0, gap_center, Vec2::new(0.0, -6.0));
        assert!(ball_brick_overlap(&ball, &upper));
        assert!(ball_brick_overlap(&ball, &lower));

        assert_eq!(resolve_bricks(&mut ball, &mut bricks, 6.0), Some((0, 0)));
        assert!(bricks.get(1, 0).unwrap().is_alive());
        assert_eq!(bricks.alive_count(), 23);
    }

    #[test]
    fn test_destroyed_bricks_are_skipped() {
        let mut bricks = grid();
        bricks.get_mut(0, 0).unwrap().destroy();
        let target = *bricks.get(0, 0).unwrap();
        let mut ball = ball_at(target.left() + 20.0, target.top(), Vec2::new(0.0, -6.0));

        assert_eq!(resolve_bricks(&mut ball, &mut bricks, 6.0), None);
        assert_eq!(ball.vel, Vec2::new(0.0, -6.0));
    }

    #[test]
    fn test_paddle_steering() {
        let vp = viewport();
        let paddle = Paddle {
            x: 340.0,
            width: 120.0,
            height: 20.0,
        };
        assert_eq!(paddle.center_x(), 400.0);

        let mut ball = ball_at(450.0, 575.0, Vec2::new(1.0, 5.9));
        let offset = resolve_paddle(&mut ball, &paddle, vp, &Settings::default());

        assert_eq!(offset, Some(50.0));
        assert!(ball.vel.y < 0.0);
        assert!((ball.vel.length() - 6.0).abs() < 1e-4);
        // Direction is (10, -5.9) before rescaling
        let expected = Vec2::new(10.0, -5.9).normalize() * 6.0;
        assert!((ball.vel - expected).length() < 1e-4);
    }

    #[test]
    fn test_paddle_return_velocity_forces_upward() {
        let vel = paddle_return_velocity(Vec2::new(3.0, -4.0), -25.0, 0.2, 5.0);
        assert!(vel.y < 0.0);
        assert!(vel.x < 0.0);
        assert!((vel.length() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_paddle_edges_not_collidable() {
        let vp = viewport();
        let paddle = Paddle {
            x: 350.0,
            width: 100.0,
            height: 20.0,
        };
        // Exactly on the paddle's right edge
        let ball = ball_at(450.0, 575.0, Vec2::new(0.0, 6.0));
        assert!(!ball_on_paddle(&ball, &paddle, vp));
        // Above the paddle's top edge
        let ball = ball_at(400.0, 569.0, Vec2::new(0.0, 6.0));
        assert!(!ball_on_paddle(&ball, &paddle, vp));
        // Bottom edge below the viewport
        let ball = ball_at(400.0, 595.0, Vec2::new(0.0, 6.0));
        assert!(!ball_on_paddle(&ball, &paddle, vp));
        // Bottom edge exactly on the paddle top
        let ball = ball_at(400.0, 570.0, Vec2::new(0.0, 6.0));
        assert!(ball_on_paddle(&ball, &paddle, vp));
    }

    #[test]
    fn test_side_walls() {
        let vp = viewport();
        let mut ball = ball_at(788.0, 300.0, Vec2::new(4.0, 3.0));
        let flags = resolve_walls(&mut ball, vp, 5.0);
        assert!(flags.right && !flags.left && !flags.top);
        assert_eq!(ball.vel, Vec2::new(-4.0, 3.0));

        let mut ball = ball_at(12.0, 300.0, Vec2::new(-4.0, 3.0));
        let flags = resolve_walls(&mut ball, vp, 5.0);
        assert!(flags.left);
        assert_eq!(flags.walls().collect::<Vec<_>>(), vec![Wall::Left]);
        assert_eq!(ball.vel, Vec2::new(4.0, 3.0));
    }

    #[test]
    fn test_top_wall_and_corner() {
        let vp = viewport();
        let mut ball = ball_at(12.0, 12.0, Vec2::new(-3.0, -4.0));
        let flags = resolve_walls(&mut ball, vp, 5.0);
        assert!(flags.left && flags.top);
        assert_eq!(ball.vel, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_no_bottom_wall() {
        let vp = viewport();
        let mut ball = ball_at(400.0, 598.0, Vec2::new(3.0, 4.0));
        let flags = resolve_walls(&mut ball, vp, 5.0);
        assert!(!flags.any());
        assert_eq!(ball.vel, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_resolve_reports_score() {
        let vp = viewport();
        let settings = Settings::default();
        let mut bricks = grid();
        let paddle = Paddle::centered(vp, &settings);
        let target = *bricks.get(3, 3).unwrap();
        let mut ball = ball_at(target.left() + 30.0, target.bottom() + 4.0, launch_velocity(6.0));

        let report = resolve(&mut ball, &paddle, &mut bricks, vp, &settings);
        assert_eq!(report.brick, Some((3, 3)));
        assert_eq!(report.score_delta, 1);
        assert_eq!(report.paddle_offset, None);

        let report = resolve(&mut ball, &paddle, &mut bricks, vp, &settings);
        assert_eq!(report.brick, None);
        assert_eq!(report.score_delta, 0);
    }
}
