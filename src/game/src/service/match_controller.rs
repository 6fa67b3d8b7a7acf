use common::{
    model::{
        game::{MoveGraph, Side},
        messages::RoundRecord,
    },
    utility::Console,
};
use tracing::{debug, info};

use crate::{
    error::SessionError,
    model::{external, internal::Match},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    AwaitingMoves,
    OutcomeResolved(RoundRecord),
    ScoreUpdated(RoundRecord),
    RoundComplete,
    MatchComplete { winner: Side },
}

/// Drives one match round by round until a player reaches the winning score.
pub struct MatchController<'a> {
    graph: &'a MoveGraph,
    history_len: usize,
}

impl<'a> MatchController<'a> {
    pub fn new(graph: &'a MoveGraph, history_len: usize) -> Self {
        MatchController { graph, history_len }
    }

    pub fn play_match(
        &self,
        game: &mut Match,
        console: &mut dyn Console,
    ) -> Result<Side, SessionError> {
        let mut phase = GamePhase::AwaitingMoves;
        loop {
            phase = self.update(game, phase, console)?;
            if let GamePhase::MatchComplete { winner } = phase {
                return Ok(winner);
            }
        }
    }

    /// Advance the state machine by one step.
    pub fn update(
        &self,
        game: &mut Match,
        phase: GamePhase,
        console: &mut dyn Console,
    ) -> Result<GamePhase, SessionError> {
        debug!("Phase: {:?}", phase);
        match phase {
            GamePhase::AwaitingMoves => {
                let (human_move, computer_move) =
                    game.choose_moves(self.graph.moves(), console)?;
                let outcome = self.graph.resolve(human_move, computer_move)?;
                Ok(GamePhase::OutcomeResolved(RoundRecord::new(
                    human_move,
                    computer_move,
                    outcome,
                )))
            }
            GamePhase::OutcomeResolved(round) => {
                game.record(round);
                console.show(&external::choices(&round));
                console.show(&external::round_outcome(self.graph, &round)?);
                console.show(&external::score(game));
                Ok(GamePhase::ScoreUpdated(round))
            }
            GamePhase::ScoreUpdated(round) => {
                console.show(&external::history(game.history(), self.history_len));
                match game.winner() {
                    Some(winner) => {
                        info!("{:?} won {:?} after {}", winner, game.scores(), round);
                        Ok(GamePhase::MatchComplete { winner })
                    }
                    None => Ok(GamePhase::RoundComplete),
                }
            }
            GamePhase::RoundComplete => Ok(GamePhase::AwaitingMoves),
            GamePhase::MatchComplete { .. } => Ok(phase),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use agent::{
        player::Player,
        strategy::{ScriptedStrategy, SelectionError, Strategy},
    };
    use common::{
        model::game::{GraphError, Move, Outcome, Variant},
        test::ScriptedConsole,
        utility::InputClosed,
    };

    use super::*;

    /// Scripted computer that also remembers every outcome it was told about.
    #[derive(Debug)]
    struct Listening {
        inner: ScriptedStrategy,
        heard: Heard,
    }

    impl Strategy for Listening {
        fn make_move(
            &mut self,
            moves: &[Move],
            console: &mut dyn Console,
        ) -> Result<Move, SelectionError> {
            self.inner.make_move(moves, console)
        }

        fn observe(&mut self, outcome: Outcome, played: Move) {
            self.heard.borrow_mut().push((outcome, played));
        }
    }

    type Heard = Rc<RefCell<Vec<(Outcome, Move)>>>;

    fn versus(computer: Vec<Move>, winning_score: u8) -> (Match, Heard) {
        let heard = Rc::new(RefCell::new(Vec::new()));
        let computer = Listening {
            inner: ScriptedStrategy::new(computer),
            heard: heard.clone(),
        };
        let game = Match::new(Player::human(), Player::new(Box::new(computer)), winning_score);
        (game, heard)
    }

    #[test]
    fn phases_of_a_single_round() {
        let graph = Variant::Classic.graph();
        let controller = MatchController::new(&graph, 10);
        let (mut game, _) = versus(vec![Move::Scissors], 1);
        let mut console = ScriptedConsole::new(["rock"]);

        let round = RoundRecord::new(Move::Rock, Move::Scissors, Outcome::Human);
        let phase = controller
            .update(&mut game, GamePhase::AwaitingMoves, &mut console)
            .unwrap();
        assert_eq!(phase, GamePhase::OutcomeResolved(round));
        assert_eq!(game.scores(), (0, 0));

        let phase = controller.update(&mut game, phase, &mut console).unwrap();
        assert_eq!(phase, GamePhase::ScoreUpdated(round));
        assert_eq!(game.scores(), (1, 0));

        let phase = controller.update(&mut game, phase, &mut console).unwrap();
        assert_eq!(
            phase,
            GamePhase::MatchComplete {
                winner: Side::Human
            }
        );
        let phase = controller.update(&mut game, phase, &mut console).unwrap();
        assert!(matches!(phase, GamePhase::MatchComplete { .. }));
    }

    #[test]
    fn two_human_wins_complete_the_match() {
        let graph = Variant::Classic.graph();
        let controller = MatchController::new(&graph, 10);
        let (mut game, heard) = versus(vec![Move::Scissors, Move::Rock], 2);
        let mut console = ScriptedConsole::new(["rock", "paper"]);

        let winner = controller.play_match(&mut game, &mut console).unwrap();
        assert_eq!(winner, Side::Human);
        assert_eq!(game.scores(), (2, 0));
        assert_eq!(game.history().len(), 2);
        assert_eq!(
            *heard.borrow(),
            vec![(Outcome::Human, Move::Scissors), (Outcome::Human, Move::Rock)]
        );
        assert!(console.lines().any(|line| line == "paper covers rock"));
    }

    #[test]
    fn ties_keep_the_match_going() {
        let graph = Variant::Classic.graph();
        let controller = MatchController::new(&graph, 10);
        let (mut game, _) = versus(vec![Move::Rock, Move::Rock, Move::Paper], 1);
        let mut console = ScriptedConsole::new(["rock", "ro", "rock"]);

        let winner = controller.play_match(&mut game, &mut console).unwrap();
        assert_eq!(winner, Side::Computer);
        assert_eq!(game.scores(), (0, 1));
        assert_eq!(game.history().len(), 3);
        assert_eq!(console.count("It's a tie!"), 2);
    }

    #[test]
    fn lizard_spock_rounds() {
        let graph = Variant::LizardSpock.graph();
        let controller = MatchController::new(&graph, 10);
        let (mut game, _) = versus(vec![Move::Spock, Move::Rock], 2);
        let mut console = ScriptedConsole::new(["lizard", "spock"]);

        let winner = controller.play_match(&mut game, &mut console).unwrap();
        assert_eq!(winner, Side::Human);
        assert!(console.lines().any(|line| line == "lizard poisons spock"));
        assert!(console.lines().any(|line| line == "spock vaporizes rock"));
    }

    #[test]
    fn foreign_moves_fail_fast() {
        let graph = Variant::Classic.graph();
        let controller = MatchController::new(&graph, 10);
        let (mut game, _) = versus(vec![Move::Spock], 1);
        let mut console = ScriptedConsole::new(["rock"]);

        let result = controller.play_match(&mut game, &mut console);
        assert_eq!(
            result,
            Err(SessionError::Graph(GraphError::UnknownMove(Move::Spock)))
        );
        assert!(game.history().is_empty());
    }

    #[test]
    fn exhausted_input_ends_the_match() {
        let graph = Variant::Classic.graph();
        let controller = MatchController::new(&graph, 10);
        let (mut game, _) = versus(vec![Move::Rock], 3);
        let mut console = ScriptedConsole::new(["paper"]);

        let result = controller.play_match(&mut game, &mut console);
        assert_eq!(
            result,
            Err(SessionError::Selection(SelectionError::Input(InputClosed)))
        );
        assert!(result.unwrap_err().is_input_closed());
        assert_eq!(game.scores(), (1, 0));
    }
}
