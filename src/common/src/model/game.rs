use std::collections::BTreeMap;
use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Rock,
    Paper,
    Scissors,
    Lizard,
    Spock,
}

impl Move {
    pub fn name(&self) -> &'static str {
        match self {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
            Move::Lizard => "lizard",
            Move::Spock => "spock",
        }
    }

    /// The two-character shorthand a player may type instead of the full name.
    pub fn abbreviation(&self) -> &'static str {
        &self.name()[..2]
    }

    pub fn capitalized(&self) -> String {
        let name = self.name();
        name[..1].to_uppercase() + &name[1..]
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Human,
    Computer,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Human,
    Computer,
    Tie,
}

impl Outcome {
    pub fn winner(&self) -> Option<Side> {
        match self {
            Outcome::Human => Some(Side::Human),
            Outcome::Computer => Some(Side::Computer),
            Outcome::Tie => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Human => write!(f, "human"),
            Outcome::Computer => write!(f, "computer"),
            Outcome::Tie => write!(f, "tie"),
        }
    }
}

/// One edge of a move graph: `winner` defeats `loser`, described by `verb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub winner: Move,
    pub verb: &'static str,
    pub loser: Move,
}

impl Rule {
    pub const fn new(winner: Move, verb: &'static str, loser: Move) -> Self {
        Rule {
            winner,
            verb,
            loser,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.winner, self.verb, self.loser)
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    #[error("a move graph needs at least one move")]
    Empty,
    #[error("move '{0}' is not part of this game")]
    UnknownMove(Move),
    #[error("move '{0}' is listed more than once")]
    DuplicateMove(Move),
    #[error("moves '{0}' and '{1}' share the same abbreviation")]
    AmbiguousAbbreviation(Move, Move),
    #[error("move '{0}' cannot defeat itself")]
    SelfDefeat(Move),
    #[error("'{0}' and '{1}' each defeat the other")]
    Symmetric(Move, Move),
    #[error("no rule decides between '{0}' and '{1}'")]
    Incomparable(Move, Move),
}

/// Static relation of which moves defeat which others.
///
/// A `MoveGraph` can only be built through [`MoveGraph::new`], which checks that every
/// pair of distinct moves is decided in exactly one direction. Lookups never fall back
/// to a tie for moves outside the alphabet; they return [`GraphError::UnknownMove`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveGraph {
    alphabet: Vec<Move>,
    defeats: BTreeMap<Move, BTreeMap<Move, &'static str>>,
}

impl MoveGraph {
    pub fn new(alphabet: Vec<Move>, rules: &[Rule]) -> Result<Self, GraphError> {
        if alphabet.is_empty() {
            return Err(GraphError::Empty);
        }
        let mut defeats: BTreeMap<Move, BTreeMap<Move, &'static str>> = BTreeMap::new();
        for (index, mv) in alphabet.iter().enumerate() {
            if alphabet[..index].contains(mv) {
                return Err(GraphError::DuplicateMove(*mv));
            }
            if let Some(other) = alphabet[..index]
                .iter()
                .find(|other| other.abbreviation() == mv.abbreviation())
            {
                return Err(GraphError::AmbiguousAbbreviation(*other, *mv));
            }
            defeats.insert(*mv, BTreeMap::new());
        }

        for rule in rules {
            for mv in [rule.winner, rule.loser] {
                if !defeats.contains_key(&mv) {
                    return Err(GraphError::UnknownMove(mv));
                }
            }
            if rule.winner == rule.loser {
                return Err(GraphError::SelfDefeat(rule.winner));
            }
            if defeats[&rule.loser].contains_key(&rule.winner) {
                return Err(GraphError::Symmetric(rule.winner, rule.loser));
            }
            if let Some(losers) = defeats.get_mut(&rule.winner) {
                losers.insert(rule.loser, rule.verb);
            }
        }

        for (index, a) in alphabet.iter().enumerate() {
            for b in &alphabet[index + 1..] {
                if !defeats[a].contains_key(b) && !defeats[b].contains_key(a) {
                    return Err(GraphError::Incomparable(*a, *b));
                }
            }
        }

        Ok(MoveGraph { alphabet, defeats })
    }

    /// Moves in display order.
    pub fn moves(&self) -> &[Move] {
        &self.alphabet
    }

    pub fn contains(&self, mv: Move) -> bool {
        self.defeats.contains_key(&mv)
    }

    fn losers(&self, mv: Move) -> Result<&BTreeMap<Move, &'static str>, GraphError> {
        self.defeats.get(&mv).ok_or(GraphError::UnknownMove(mv))
    }

    pub fn beats(&self, a: Move, b: Move) -> Result<bool, GraphError> {
        let losers = self.losers(a)?;
        self.losers(b)?;
        Ok(losers.contains_key(&b))
    }

    /// The rule under which `winner` defeats `loser`, if there is one.
    pub fn rule(&self, winner: Move, loser: Move) -> Result<Option<Rule>, GraphError> {
        self.losers(loser)?;
        Ok(self
            .losers(winner)?
            .get(&loser)
            .map(|verb| Rule::new(winner, *verb, loser)))
    }

    pub fn resolve(&self, human: Move, computer: Move) -> Result<Outcome, GraphError> {
        let human_wins = self.beats(human, computer)?;
        let computer_wins = self.beats(computer, human)?;
        match (human_wins, computer_wins) {
            _ if human == computer => Ok(Outcome::Tie),
            (true, false) => Ok(Outcome::Human),
            (false, true) => Ok(Outcome::Computer),
            // Unreachable for a graph that passed validation
            _ => Err(GraphError::Incomparable(human, computer)),
        }
    }

    pub fn parse_choice(&self, text: &str) -> Option<Move> {
        parse_choice(&self.alphabet, text)
    }
}

/// Match raw player text against the full names of `moves` or their abbreviations.
pub fn parse_choice(moves: &[Move], text: &str) -> Option<Move> {
    let choice = text.trim().to_lowercase();
    moves
        .iter()
        .copied()
        .find(|mv| mv.name() == choice || mv.abbreviation() == choice)
}

static CLASSIC_RULES: [Rule; 3] = [
    Rule::new(Move::Scissors, "cuts", Move::Paper),
    Rule::new(Move::Paper, "covers", Move::Rock),
    Rule::new(Move::Rock, "crushes", Move::Scissors),
];

static LIZARD_SPOCK_RULES: [Rule; 10] = [
    Rule::new(Move::Scissors, "cuts", Move::Paper),
    Rule::new(Move::Paper, "covers", Move::Rock),
    Rule::new(Move::Rock, "crushes", Move::Lizard),
    Rule::new(Move::Lizard, "poisons", Move::Spock),
    Rule::new(Move::Spock, "smashes", Move::Scissors),
    Rule::new(Move::Scissors, "decapitates", Move::Lizard),
    Rule::new(Move::Lizard, "eats", Move::Paper),
    Rule::new(Move::Paper, "disproves", Move::Spock),
    Rule::new(Move::Spock, "vaporizes", Move::Rock),
    Rule::new(Move::Rock, "crushes", Move::Scissors),
];

#[derive(Serialize, Deserialize, ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    Classic,
    #[default]
    LizardSpock,
}

impl Variant {
    pub fn moves(&self) -> Vec<Move> {
        match self {
            Variant::Classic => vec![Move::Rock, Move::Paper, Move::Scissors],
            Variant::LizardSpock => vec![
                Move::Lizard,
                Move::Rock,
                Move::Paper,
                Move::Scissors,
                Move::Spock,
            ],
        }
    }

    pub fn rules(&self) -> &'static [Rule] {
        match self {
            Variant::Classic => &CLASSIC_RULES,
            Variant::LizardSpock => &LIZARD_SPOCK_RULES,
        }
    }

    pub fn graph(&self) -> MoveGraph {
        MoveGraph::new(self.moves(), self.rules()).expect("Failed to build built-in move graph")
    }

    /// Capitalised moves in display order, e.g. "Rock Paper Scissors".
    pub fn title(&self) -> String {
        self.moves()
            .iter()
            .map(Move::capitalized)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn instructions(&self) -> String {
        let sentences = self
            .rules()
            .iter()
            .map(Rule::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}.", sentences)
    }
}
