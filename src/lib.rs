//! Brickfall - a constant-speed brick breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, lifecycle)
//! - `game`: Tick scheduler that owns the live game and its collaborators
//! - `display`: Presentation capability consumed by the scheduler
//! - `highscores`: Persisted single-slot high score
//! - `platform`: Keyboard input and viewport helpers
//! - `settings`: Data-driven game tuning

pub mod display;
pub mod error;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;

pub use display::{DisplaySink, Frame, LogDisplay};
pub use error::{GameError, GameResult};
pub use game::Game;
pub use highscores::{HighScoreStore, MemoryStore};
pub use settings::Settings;

/// Game configuration constants (defaults for [`Settings`])
pub mod consts {
    /// Ball speed in pixels per tick; the velocity magnitude never deviates from it
    pub const BALL_SPEED: f32 = 6.0;
    pub const BALL_RADIUS: f32 = 10.0;

    /// Paddle width is this fraction of the viewport width at game start
    pub const PADDLE_WIDTH_FRACTION: f32 = 1.0 / 8.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    /// Horizontal paddle displacement per tick while a direction is held
    pub const PADDLE_STEP: f32 = 7.0;
    /// dx gained per pixel of impact offset from the paddle center
    pub const STEERING_COEFFICIENT: f32 = 0.2;

    /// Brick grid layout
    pub const BRICK_ROWS: usize = 4;
    pub const BRICK_COLS: usize = 6;
    pub const BRICK_PADDING: f32 = 5.0;
    pub const BRICK_HEIGHT: f32 = 30.0;
    pub const BRICK_OFFSET_TOP: f32 = 50.0;
    /// Upper bound on rows x cols accepted from settings
    pub const MAX_BRICKS: usize = 10_000;

    /// Launch direction (45 degrees, upward in screen space)
    pub const LAUNCH_ANGLE: f32 = std::f32::consts::FRAC_PI_4;
}
