use std::collections::VecDeque;

use agent::{player::Player, strategy::SelectionError};
use common::{
    model::{
        game::{Move, Outcome, Side},
        messages::RoundRecord,
    },
    utility::Console,
};

/// Append-only log of rounds, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundHistory {
    rounds: VecDeque<RoundRecord>,
}

impl RoundHistory {
    pub fn new() -> Self {
        RoundHistory {
            rounds: VecDeque::new(),
        }
    }

    pub fn record(&mut self, entry: RoundRecord) {
        self.rounds.push_front(entry);
    }

    /// Up to `n` of the latest rounds, numbered from 1. The iterator can be cloned to walk
    /// the same rounds again.
    pub fn recent(
        &self,
        n: usize,
    ) -> impl Iterator<Item = (usize, &RoundRecord)> + Clone + '_ {
        (1..).zip(self.rounds.iter().take(n))
    }

    pub fn latest(&self) -> Option<&RoundRecord> {
        self.rounds.front()
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }
}

/// Everything a session plays with: both players, the rounds so far and the target score.
#[derive(Debug)]
pub struct Match {
    human: Player,
    computer: Player,
    history: RoundHistory,
    winning_score: u8,
}

impl Match {
    pub fn new(human: Player, computer: Player, winning_score: u8) -> Self {
        Match {
            human,
            computer,
            history: RoundHistory::new(),
            winning_score,
        }
    }

    pub fn human(&self) -> &Player {
        &self.human
    }

    pub fn computer(&self) -> &Player {
        &self.computer
    }

    pub fn history(&self) -> &RoundHistory {
        &self.history
    }

    pub fn winning_score(&self) -> u8 {
        self.winning_score
    }

    /// (human, computer)
    pub fn scores(&self) -> (u8, u8) {
        (self.human.score(), self.computer.score())
    }

    /// Ask both players for their move, human first.
    pub fn choose_moves(
        &mut self,
        moves: &[Move],
        console: &mut dyn Console,
    ) -> Result<(Move, Move), SelectionError> {
        let human_move = self.human.choose(moves, console)?;
        let computer_move = self.computer.choose(moves, console)?;
        Ok((human_move, computer_move))
    }

    /// Score the round, log it and let the computer learn from it.
    pub fn record(&mut self, round: RoundRecord) {
        match round.outcome {
            Outcome::Human => self.human.increment_score(),
            Outcome::Computer => self.computer.increment_score(),
            Outcome::Tie => {}
        }
        self.history.record(round);
        self.computer.observe(round.outcome, round.computer_move);
    }

    pub fn winner(&self) -> Option<Side> {
        if self.human.score() >= self.winning_score {
            Some(Side::Human)
        } else if self.computer.score() >= self.winning_score {
            Some(Side::Computer)
        } else {
            None
        }
    }

    /// Start over at 0-0. The computer keeps what it has learned.
    pub fn rematch(&mut self, keep_history: bool) {
        self.human.reset_score();
        self.computer.reset_score();
        if !keep_history {
            self.history = RoundHistory::new();
        }
    }
}
