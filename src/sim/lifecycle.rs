//! Phase transitions
//!
//! Checked once per tick after collisions. Victory is checked before the loss
//! condition, so clearing the last brick on the same tick the ball drops out
//! still counts as a win.

use super::state::{GamePhase, GameState, Viewport};

/// A terminal transition produced this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Victory,
    GameOver,
}

impl Transition {
    pub fn phase(&self) -> GamePhase {
        match self {
            Transition::Victory => GamePhase::Victory,
            Transition::GameOver => GamePhase::GameOver,
        }
    }
}

/// Ball has fully left through the bottom of the viewport
#[inline]
pub fn ball_lost(state: &GameState, viewport: Viewport) -> bool {
    state.ball.top() > viewport.height
}

/// Decide whether this tick ends the game. Terminal phases never transition again.
pub fn evaluate(state: &GameState, viewport: Viewport) -> Option<Transition> {
    if state.phase.is_terminal() {
        return None;
    }
    if state.bricks.alive_count() == 0 {
        return Some(Transition::Victory);
    }
    if ball_lost(state, viewport) {
        return Some(Transition::GameOver);
    }
    None
}

/// Evaluate and apply in one step
pub fn advance(state: &mut GameState, viewport: Viewport) -> Option<Transition> {
    let transition = evaluate(state, viewport)?;
    state.phase = transition.phase();
    log::info!(
        "Game ended: {:?} with score {} after {} ticks",
        transition,
        state.score,
        state.time_ticks
    );
    Some(transition)
}

/// New high score to persist, if `score` beats `previous`.
///
/// Only the game-over path consults this; a victory leaves the stored high
/// score untouched.
pub fn high_score_update(score: u64, previous: u64) -> Option<u64> {
    (score > previous).then_some(score)
}
