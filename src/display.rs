//! Presentation capability
//!
//! The scheduler hands frames and end-of-game notices to a [`DisplaySink`];
//! how they reach the screen is up to the host.

use serde::Serialize;

use crate::error::{GameError, GameResult};
use crate::sim::{Ball, BrickGrid, Paddle, Viewport};

/// Everything needed to draw one frame
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Frame<'a> {
    pub viewport: Viewport,
    pub ball: &'a Ball,
    pub paddle: &'a Paddle,
    pub bricks: &'a BrickGrid,
    pub score: u64,
    pub high_score: u64,
    /// Score for clearing every brick
    pub max_score: u64,
}

impl Frame<'_> {
    /// Frame as a JSON object, for hosts that draw outside Rust
    pub fn to_json(&self) -> GameResult<String> {
        serde_json::to_string(self).map_err(|source| GameError::Parse {
            context: "frame".to_string(),
            source,
        })
    }
}

/// Receives draw requests from the game loop
pub trait DisplaySink {
    /// Called once per tick while the game is running
    fn render(&mut self, frame: &Frame<'_>);

    /// Called exactly once when the ball is lost
    fn show_game_over(&mut self, score: u64, high_score: u64);

    /// Called exactly once when the last brick falls
    fn show_victory(&mut self);
}

/// Display that reports through the `log` facade
#[derive(Debug, Default)]
pub struct LogDisplay {
    frames: u64,
}

impl LogDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl DisplaySink for LogDisplay {
    fn render(&mut self, frame: &Frame<'_>) {
        self.frames += 1;
        log::trace!(
            "frame {}: ball=({:.1}, {:.1}) paddle={:.1} bricks={} score={}/{} high={}",
            self.frames,
            frame.ball.pos.x,
            frame.ball.pos.y,
            frame.paddle.x,
            frame.bricks.alive_count(),
            frame.score,
            frame.max_score,
            frame.high_score
        );
    }

    fn show_game_over(&mut self, score: u64, high_score: u64) {
        log::info!("GAME OVER - score {} (high score {})", score, high_score);
    }

    fn show_victory(&mut self) {
        log::info!("YOU WIN!");
    }
}
