use std::fmt::Debug;

use clap::ValueEnum;
use common::{
    model::game::{parse_choice, Move, Outcome},
    utility::{prompt_until, Console, InputClosed},
};
use rand::{seq::IndexedRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    #[error(transparent)]
    Input(#[from] InputClosed),
    #[error("no moves to choose from")]
    NoMoves,
}

/// How a player picks its move each round.
pub trait Strategy: Debug {
    fn make_move(
        &mut self,
        moves: &[Move],
        console: &mut dyn Console,
    ) -> Result<Move, SelectionError>;

    /// Called once per round after the outcome is known, with the move this strategy played.
    fn observe(&mut self, _outcome: Outcome, _played: Move) {}
}

/// Asks the person at the console, re-prompting until the answer names a move.
#[derive(Debug, Default)]
pub struct HumanStrategy {}

impl HumanStrategy {
    pub fn new() -> Self {
        HumanStrategy {}
    }

    fn menu(moves: &[Move]) -> String {
        let mut menu = String::from("\nPlease choose a move");
        for mv in moves {
            menu.push_str(&format!("\n'{}' for {}", mv.abbreviation(), mv));
        }
        menu
    }
}

impl Strategy for HumanStrategy {
    fn make_move(
        &mut self,
        moves: &[Move],
        console: &mut dyn Console,
    ) -> Result<Move, SelectionError> {
        if moves.is_empty() {
            return Err(SelectionError::NoMoves);
        }
        let menu = Self::menu(moves);
        Ok(prompt_until(console, &menu, |line| parse_choice(moves, line))?)
    }
}

/// What the adaptive computer does with its win history when it loses.
#[derive(Serialize, Deserialize, ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DecayPolicy {
    /// Winning moves are remembered forever.
    #[default]
    ReinforceOnly,
    /// A losing move also forgets one of its past wins.
    ReinforceAndDecay,
}

/// Multiset of moves that have beaten the human, in the order they won.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct AdaptiveWeights {
    moves: Vec<Move>,
}

impl AdaptiveWeights {
    pub fn new() -> Self {
        AdaptiveWeights { moves: Vec::new() }
    }

    pub fn reinforce(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    /// Remove one occurrence of `mv`. Returns whether there was one.
    pub fn decay(&mut self, mv: Move) -> bool {
        match self.moves.iter().position(|m| *m == mv) {
            Some(index) => {
                self.moves.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn count(&self, mv: Move) -> usize {
        self.moves.iter().filter(|m| **m == mv).count()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        self.moves.iter().copied()
    }
}

/// Computer player that favours moves which have beaten the human before.
///
/// Each round it draws uniformly from the legal moves plus every move in its
/// [`AdaptiveWeights`], so a move that has won `k` times is `k + 1` times as likely as one
/// that never has. The weights live as long as the strategy does, across rematches.
#[derive(Debug)]
pub struct AdaptiveStrategy {
    weights: AdaptiveWeights,
    policy: DecayPolicy,
    rng: ChaCha8Rng,
}

impl AdaptiveStrategy {
    pub fn new(policy: DecayPolicy, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        };
        AdaptiveStrategy {
            weights: AdaptiveWeights::new(),
            policy,
            rng,
        }
    }

    pub fn weights(&self) -> &AdaptiveWeights {
        &self.weights
    }

    pub fn policy(&self) -> DecayPolicy {
        self.policy
    }

    fn pool(&self, moves: &[Move]) -> Vec<Move> {
        moves.iter().copied().chain(self.weights.iter()).collect()
    }

    /// Chance that the next call to `make_move` with `moves` returns `mv`.
    pub fn selection_probability(&self, mv: Move, moves: &[Move]) -> f64 {
        let pool = self.pool(moves);
        if pool.is_empty() {
            return 0.0;
        }
        pool.iter().filter(|m| **m == mv).count() as f64 / pool.len() as f64
    }
}

impl Strategy for AdaptiveStrategy {
    fn make_move(
        &mut self,
        moves: &[Move],
        _console: &mut dyn Console,
    ) -> Result<Move, SelectionError> {
        if moves.is_empty() {
            return Err(SelectionError::NoMoves);
        }
        let pool = self.pool(moves);
        pool.choose(&mut self.rng)
            .copied()
            .ok_or(SelectionError::NoMoves)
    }

    fn observe(&mut self, outcome: Outcome, played: Move) {
        match (outcome, self.policy) {
            (Outcome::Computer, _) => self.weights.reinforce(played),
            (Outcome::Human, DecayPolicy::ReinforceAndDecay) => {
                self.weights.decay(played);
            }
            (Outcome::Human, DecayPolicy::ReinforceOnly) | (Outcome::Tie, _) => {}
        }
        debug!("Adaptive weights: {:?}", self.weights);
    }
}

/// Plays a fixed sequence of moves, starting over when it runs out.
#[derive(Debug, Clone)]
pub struct ScriptedStrategy {
    script: Vec<Move>,
    next: usize,
}

impl ScriptedStrategy {
    pub fn new(script: Vec<Move>) -> Self {
        ScriptedStrategy { script, next: 0 }
    }
}

impl Strategy for ScriptedStrategy {
    fn make_move(
        &mut self,
        _moves: &[Move],
        _console: &mut dyn Console,
    ) -> Result<Move, SelectionError> {
        if self.script.is_empty() {
            return Err(SelectionError::NoMoves);
        }
        let mv = self.script[self.next % self.script.len()];
        self.next += 1;
        Ok(mv)
    }
}
