// Text shown to the player
use common::model::{
    game::{GraphError, MoveGraph, Outcome, Side, Variant},
    messages::RoundRecord,
};
use itertools::Itertools;

use super::internal::{Match, RoundHistory};

pub const REPLAY_QUESTION: &str = "Do you want to play again?";
pub const GOODBYE: &str = "\nThanks for playing. Goodbye!";

pub fn welcome(variant: Variant, winning_score: u8) -> String {
    format!(
        "Welcome to {}!\n\n{}\n\nFirst to score {} wins the game",
        variant.title(),
        variant.instructions(),
        winning_score
    )
}

pub fn choices(round: &RoundRecord) -> String {
    format!(
        "You chose: {}\nComputer chose: {}\n",
        round.human_move, round.computer_move
    )
}

/// The rule that decided the round (e.g. "lizard poisons spock") and who took it.
pub fn round_outcome(graph: &MoveGraph, round: &RoundRecord) -> Result<String, GraphError> {
    let (winner, loser, verdict) = match round.outcome {
        Outcome::Human => (round.human_move, round.computer_move, "You win!"),
        Outcome::Computer => (round.computer_move, round.human_move, "The Computer wins!"),
        Outcome::Tie => return Ok("It's a tie!".to_string()),
    };
    let rule = match graph.rule(winner, loser)? {
        Some(rule) => rule.to_string(),
        None => format!("{} beats {}", winner, loser),
    };
    Ok(format!("{}\n{}", rule, verdict))
}

pub fn score(game: &Match) -> String {
    let (human, computer) = game.scores();
    format!("\nHuman score: {}\nComputer score: {}\n", human, computer)
}

pub fn history(history: &RoundHistory, n: usize) -> String {
    let rounds = history
        .recent(n)
        .map(|(index, round)| format!("{}. {}", index, round))
        .join("\n");
    format!("Last {} rounds\n{}", n, rounds)
}

pub fn match_outcome(winner: Side) -> &'static str {
    match winner {
        Side::Human => "\nYou win the game!",
        Side::Computer => "\nYou lose the game!",
    }
}
