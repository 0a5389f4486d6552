//! Game state and core simulation types
//!
//! Screen coordinates: origin at the top-left, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Playing,
    /// Ball passed the paddle (terminal until restart)
    GameOver,
    /// Every brick destroyed (terminal until restart)
    Victory,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// Drawable area, re-read from the host every tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Center position
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// Ball resting just above the paddle, launched up and to the right
    pub fn launch_position(viewport: Viewport, settings: &Settings) -> Self {
        Self {
            pos: Vec2::new(
                viewport.width / 2.0,
                viewport.height - settings.paddle_height - settings.ball_radius - 1.0,
            ),
            vel: super::speed::launch_velocity(settings.ball_speed),
            radius: settings.ball_radius,
        }
    }

    /// Top edge (y of the highest point)
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    /// Bottom edge
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }

    /// Advance by one tick of velocity
    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }
}

/// The player's paddle, pinned to the bottom of the viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    /// Centered paddle sized from the viewport width
    pub fn centered(viewport: Viewport, settings: &Settings) -> Self {
        let width = viewport.width * settings.paddle_width_fraction;
        Self {
            x: (viewport.width - width) / 2.0,
            width,
            height: settings.paddle_height,
        }
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Top edge for the given viewport
    #[inline]
    pub fn top(&self, viewport: Viewport) -> f32 {
        viewport.height - self.height
    }

    /// Apply one tick of keyboard movement.
    ///
    /// Left and right are applied independently, so holding both cancels out.
    /// The result is clamped to `[0, viewport.width - width]`.
    pub fn step(&mut self, left: bool, right: bool, step: f32, viewport: Viewport) {
        if left {
            self.x -= step;
        }
        if right {
            self.x += step;
        }
        let max_x = (viewport.width - self.width).max(0.0);
        self.x = self.x.clamp(0.0, max_x);
    }
}

/// Brick status; only ever moves from Alive to Destroyed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickStatus {
    Alive,
    Destroyed,
}

/// A single brick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub status: BrickStatus,
}

impl Brick {
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.status == BrickStatus::Alive
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Mark destroyed. Returns false if it already was.
    pub fn destroy(&mut self) -> bool {
        let was_alive = self.is_alive();
        self.status = BrickStatus::Destroyed;
        was_alive
    }
}

/// Fixed rows x cols grid of bricks, stored row-major
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickGrid {
    rows: usize,
    cols: usize,
    bricks: Vec<Brick>,
}

impl BrickGrid {
    /// Build a full grid spanning the viewport width
    pub fn new(viewport: Viewport, settings: &Settings) -> Self {
        let rows = settings.brick_rows;
        let cols = settings.brick_cols;
        let padding = settings.brick_padding;
        let width = ((viewport.width - padding * (cols as f32 + 1.0)) / cols as f32).max(0.0);
        let height = settings.brick_height;

        let mut bricks = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                bricks.push(Brick {
                    pos: Vec2::new(
                        padding + col as f32 * (width + padding),
                        settings.brick_offset_top + row as f32 * (height + padding),
                    ),
                    size: Vec2::new(width, height),
                    status: BrickStatus::Alive,
                });
            }
        }

        Self { rows, cols, bricks }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Brick> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.bricks.get(row * self.cols + col)
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Brick> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.bricks.get_mut(row * self.cols + col)
    }

    /// Bricks in row-major order with their (row, col)
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &Brick)> {
        let cols = self.cols;
        self.bricks
            .iter()
            .enumerate()
            .map(move |(i, b)| ((i / cols, i % cols), b))
    }

    pub fn alive_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.is_alive()).count()
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BrickDestroyed { row: usize, col: usize },
    PaddleHit { offset: f32 },
    WallHit { side: Wall },
    Victory,
    GameOver { score: u64 },
}

/// Which wall the ball bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    Left,
    Right,
    Top,
}

/// Complete state of one game (serializable snapshot)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub score: u64,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub ball: Ball,
    pub paddle: Paddle,
    pub bricks: BrickGrid,
}

impl GameState {
    /// Fresh game laid out for the given viewport
    pub fn new(viewport: Viewport, settings: &Settings) -> Self {
        Self {
            score: 0,
            phase: GamePhase::Playing,
            time_ticks: 0,
            ball: Ball::launch_position(viewport, settings),
            paddle: Paddle::centered(viewport, settings),
            bricks: BrickGrid::new(viewport, settings),
        }
    }
}
