//! Fixed-step simulation tick
//!
//! One call advances the game by exactly one frame:
//! paddle move, collisions, lifecycle check, then integration.

use super::collision;
use super::lifecycle::{self, Transition};
use super::state::{GameEvent, GameState, Viewport};
use crate::settings::Settings;

/// Input state sampled at the start of a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move left held
    pub left: bool,
    /// Move right held
    pub right: bool,
}

/// Everything a tick produced besides the mutated state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    pub events: Vec<GameEvent>,
    /// Set on the single tick that ends the game
    pub transition: Option<Transition>,
}

impl TickOutcome {
    pub fn bricks_destroyed(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, GameEvent::BrickDestroyed { .. }))
            .count()
    }
}

/// Advance the game state by one tick.
///
/// Does nothing once the phase is terminal. On the tick that ends the game the
/// ball is not moved.
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    viewport: Viewport,
    settings: &Settings,
) -> TickOutcome {
    let mut outcome = TickOutcome::default();
    if state.phase.is_terminal() {
        return outcome;
    }

    state.time_ticks += 1;

    state
        .paddle
        .step(input.left, input.right, settings.paddle_step, viewport);

    let report = collision::resolve(
        &mut state.ball,
        &state.paddle,
        &mut state.bricks,
        viewport,
        settings,
    );
    state.score += report.score_delta;

    if let Some((row, col)) = report.brick {
        outcome.events.push(GameEvent::BrickDestroyed { row, col });
    }
    if let Some(offset) = report.paddle_offset {
        outcome.events.push(GameEvent::PaddleHit { offset });
    }
    outcome
        .events
        .extend(report.walls.walls().map(|side| GameEvent::WallHit { side }));

    if let Some(transition) = lifecycle::advance(state, viewport) {
        outcome.events.push(match transition {
            Transition::Victory => GameEvent::Victory,
            Transition::GameOver => GameEvent::GameOver { score: state.score },
        });
        outcome.transition = Some(transition);
        return outcome;
    }

    state.ball.integrate();
    outcome
}
