use common::{
    model::game::{Move, Outcome},
    utility::Console,
};
use serde::{Deserialize, Serialize};

use crate::strategy::{
    AdaptiveStrategy, DecayPolicy, HumanStrategy, SelectionError, Strategy,
};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerState {
    pub current_move: Option<Move>,
    pub score: u8,
}

/// A seat at the table: score bookkeeping plus whatever strategy picks the moves.
#[derive(Debug)]
pub struct Player {
    state: PlayerState,
    strategy: Box<dyn Strategy>,
}

impl Player {
    pub fn new(strategy: Box<dyn Strategy>) -> Self {
        Player {
            state: PlayerState::default(),
            strategy,
        }
    }

    pub fn human() -> Self {
        Self::new(Box::new(HumanStrategy::new()))
    }

    pub fn computer(policy: DecayPolicy, seed: Option<u64>) -> Self {
        Self::new(Box::new(AdaptiveStrategy::new(policy, seed)))
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn score(&self) -> u8 {
        self.state.score
    }

    pub fn current_move(&self) -> Option<Move> {
        self.state.current_move
    }

    pub fn choose(
        &mut self,
        moves: &[Move],
        console: &mut dyn Console,
    ) -> Result<Move, SelectionError> {
        let next_move = self.strategy.make_move(moves, console)?;
        self.state.current_move = Some(next_move);
        Ok(next_move)
    }

    pub fn increment_score(&mut self) {
        self.state.score += 1;
    }

    pub fn reset_score(&mut self) {
        self.state.score = 0;
    }

    /// Let the strategy learn from a finished round in which this seat played `played`.
    pub fn observe(&mut self, outcome: Outcome, played: Move) {
        self.strategy.observe(outcome, played);
    }
}
