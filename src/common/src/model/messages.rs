use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::game::{Move, Outcome};

/// Identifies one match within a session, mainly so log lines can be grouped.
#[derive(Debug, Hash, Eq, PartialEq, Clone, Copy)]
pub struct Id(pub Uuid);

impl Id {
    pub fn new() -> Self {
        Id(Uuid::new_v4())
    }
}

impl Default for Id {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A finished round. Never mutated after it is recorded.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundRecord {
    pub human_move: Move,
    pub computer_move: Move,
    pub outcome: Outcome,
}

impl RoundRecord {
    pub fn new(human_move: Move, computer_move: Move, outcome: Outcome) -> Self {
        RoundRecord {
            human_move,
            computer_move,
            outcome,
        }
    }
}

impl fmt::Display for RoundRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} => {}",
            self.human_move, self.computer_move, self.outcome
        )
    }
}
