use agent::player::Player;
use common::{
    model::{game::MoveGraph, messages::Id},
    utility::{confirm, Console},
};
use tracing::{debug, info, info_span};

use crate::{
    entrypoint::GameConfig,
    error::SessionError,
    model::{external, internal::Match},
    service::match_controller::MatchController,
};

/// One sitting at the terminal: matches are played back to back until the player
/// declines a rematch.
pub struct Session {
    config: GameConfig,
    graph: MoveGraph,
    game: Match,
}

impl Session {
    pub fn new(config: GameConfig) -> Result<Self, SessionError> {
        let computer = Player::computer(config.policy, config.seed);
        Self::with_players(config, Player::human(), computer)
    }

    pub fn with_players(
        config: GameConfig,
        human: Player,
        computer: Player,
    ) -> Result<Self, SessionError> {
        config.validate()?;
        let graph = config.variant.graph();
        let game = Match::new(human, computer, config.winning_score);
        Ok(Session {
            config,
            graph,
            game,
        })
    }

    pub fn game(&self) -> &Match {
        &self.game
    }

    pub fn run(&mut self, console: &mut dyn Console) -> Result<(), SessionError> {
        let mut matches_played = 0;
        loop {
            console.show(&external::welcome(
                self.config.variant,
                self.config.winning_score,
            ));

            let id = Id::new();
            let span = info_span!("match", %id);
            let winner = span.in_scope(|| {
                info!("Match started");
                MatchController::new(&self.graph, self.config.history_len)
                    .play_match(&mut self.game, &mut *console)
            })?;
            matches_played += 1;
            console.show(external::match_outcome(winner));

            if !confirm(console, external::REPLAY_QUESTION)? {
                break;
            }
            debug!("Rematch requested");
            self.game.rematch(self.config.keep_history());
        }
        info!("Session over after {} matches", matches_played);
        console.show(external::GOODBYE);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use agent::strategy::ScriptedStrategy;
    use common::{
        model::game::{Move, Variant},
        test::ScriptedConsole,
        utility::INVALID_CHOICE,
    };

    use super::*;

    fn classic(winning_score: u8, reset_history: bool) -> GameConfig {
        GameConfig {
            variant: Variant::Classic,
            winning_score,
            reset_history,
            ..GameConfig::default()
        }
    }

    fn session(config: GameConfig, computer: Vec<Move>) -> Session {
        let computer = Player::new(Box::new(ScriptedStrategy::new(computer)));
        Session::with_players(config, Player::human(), computer).unwrap()
    }

    #[test]
    fn decline_ends_the_session() {
        let mut session = session(classic(1, false), vec![Move::Scissors]);
        let mut console = ScriptedConsole::new(["rock", "n"]);
        session.run(&mut console).unwrap();
        assert_eq!(console.count("You win the game!"), 1);
        assert_eq!(
            console.transcript().last().map(String::as_str),
            Some(external::GOODBYE)
        );
    }

    #[test]
    fn rematch_resets_scores_but_keeps_history() {
        let mut session = session(classic(1, false), vec![Move::Scissors, Move::Paper]);
        let mut console = ScriptedConsole::new(["rock", "what", "Y", "rock", "no"]);
        session.run(&mut console).unwrap();

        assert_eq!(console.count("Welcome to Rock Paper Scissors!"), 2);
        assert_eq!(console.count(INVALID_CHOICE), 1);
        assert_eq!(console.count("You lose the game!"), 1);
        assert_eq!(session.game().scores(), (0, 1));
        assert_eq!(session.game().history().len(), 2);
    }

    #[test]
    fn rematch_can_reset_history() {
        let mut session = session(classic(1, true), vec![Move::Scissors]);
        let mut console = ScriptedConsole::new(["rock", "yes", "rock", "n"]);
        session.run(&mut console).unwrap();
        assert_eq!(session.game().history().len(), 1);
        assert!(console.lines().all(|line| !line.starts_with("2. ")));
    }

    #[test]
    fn missing_replay_answer_is_reported() {
        let mut session = session(classic(1, false), vec![Move::Scissors]);
        let mut console = ScriptedConsole::new(["rock"]);
        let result = session.run(&mut console);
        assert!(result.unwrap_err().is_input_closed());
    }

    #[test]
    fn zero_winning_score_is_rejected() {
        let result = Session::new(classic(0, false));
        assert!(matches!(result, Err(SessionError::InvalidConfig(_))));
    }
}
