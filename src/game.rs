//! Game loop scheduler
//!
//! Owns the live game and drives one tick per host frame. The host calls
//! [`Game::tick`] from its frame callback (or a test calls it in a loop) and
//! keeps requesting frames while [`Game::wants_next_tick`] is true.

use crate::display::{DisplaySink, Frame};
use crate::highscores::HighScoreStore;
use crate::settings::Settings;
use crate::sim::{self, GamePhase, GameState, TickInput, TickOutcome, Transition, Viewport};

pub struct Game<D: DisplaySink, S: HighScoreStore> {
    state: GameState,
    settings: Settings,
    display: D,
    store: S,
    /// Cached copy of the persisted high score
    high_score: u64,
}

impl<D: DisplaySink, S: HighScoreStore> Game<D, S> {
    /// Start a game laid out for `viewport`
    pub fn new(settings: Settings, viewport: Viewport, display: D, store: S) -> Self {
        let high_score = store.high_score();
        log::info!(
            "New game: {}x{} viewport, {}x{} bricks, high score {}",
            viewport.width,
            viewport.height,
            settings.brick_rows,
            settings.brick_cols,
            high_score
        );
        Self {
            state: GameState::new(viewport, &settings),
            settings,
            display,
            store,
            high_score,
        }
    }

    /// Run one tick. Returns whether another tick should be scheduled.
    pub fn tick(&mut self, input: &TickInput, viewport: Viewport) -> bool {
        let outcome = sim::tick(&mut self.state, input, viewport, &self.settings);
        self.dispatch(&outcome, viewport);
        self.wants_next_tick()
    }

    fn dispatch(&mut self, outcome: &TickOutcome, viewport: Viewport) {
        match outcome.transition {
            Some(Transition::Victory) => self.display.show_victory(),
            Some(Transition::GameOver) => {
                let score = self.state.score;
                let shown = self.high_score;
                self.display.show_game_over(score, shown);
                self.record_high_score(score);
            }
            None if self.state.phase == GamePhase::Playing => {
                let frame = Frame {
                    viewport,
                    ball: &self.state.ball,
                    paddle: &self.state.paddle,
                    bricks: &self.state.bricks,
                    score: self.state.score,
                    high_score: self.high_score,
                    max_score: self.settings.max_score(),
                };
                self.display.render(&frame);
            }
            None => {}
        }
    }

    fn record_high_score(&mut self, score: u64) {
        let Some(new_high) = sim::high_score_update(score, self.high_score) else {
            return;
        };
        log::info!("New high score: {} (was {})", new_high, self.high_score);
        self.high_score = new_high;
        if let Err(e) = self.store.set_high_score(new_high) {
            log::warn!("Failed to persist high score: {}", e);
        }
    }

    /// Throw away the current game and start over, keeping the high score
    pub fn restart(&mut self, viewport: Viewport) {
        log::info!("Restarting (previous score {})", self.state.score);
        self.state = GameState::new(viewport, &self.settings);
    }

    /// True while the game is still being played
    pub fn wants_next_tick(&self) -> bool {
        !self.state.phase.is_terminal()
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
