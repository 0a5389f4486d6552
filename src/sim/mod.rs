//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, no frame-time scaling
//! - Stable row-major brick iteration
//! - No rendering, input, or storage dependencies

pub mod collision;
pub mod lifecycle;
pub mod speed;
pub mod state;
pub mod tick;

pub use collision::{CollisionReport, WallFlags, resolve};
pub use lifecycle::{Transition, high_score_update};
pub use speed::{launch_velocity, normalize_speed};
pub use state::{
    Ball, Brick, BrickGrid, BrickStatus, GameEvent, GamePhase, GameState, Paddle, Viewport, Wall,
};
pub use tick::{TickInput, TickOutcome, tick};
