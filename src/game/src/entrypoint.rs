use agent::strategy::DecayPolicy;
use clap::{ArgAction, Parser};
use common::{model::game::Variant, utility::Console};
use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::{error::SessionError, service::session::Session};

#[derive(Parser, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[command(author, version, about = "Rock Paper Scissors against a computer that learns", long_about = None)]
#[serde(default)]
pub struct GameConfig {
    /// Move set to play with
    #[arg(long, value_enum, default_value_t = Variant::LizardSpock)]
    pub variant: Variant,

    /// Points needed to win a match
    #[arg(long, default_value_t = 5)]
    pub winning_score: u8,

    /// Whether the computer forgets a winning move when it loses with it
    #[arg(long, value_enum, default_value_t = DecayPolicy::ReinforceOnly)]
    pub policy: DecayPolicy,

    /// Seed for the computer's choices
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of past rounds shown after each round
    #[arg(long, default_value_t = 10)]
    pub history_len: usize,

    /// Forget past rounds when a rematch starts
    #[arg(long)]
    pub reset_history: bool,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            variant: Variant::LizardSpock,
            winning_score: 5,
            policy: DecayPolicy::ReinforceOnly,
            seed: None,
            history_len: 10,
            reset_history: false,
            verbose: 0,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.winning_score == 0 {
            return Err(SessionError::InvalidConfig("winning score must be at least 1"));
        }
        Ok(())
    }

    pub fn keep_history(&self) -> bool {
        !self.reset_history
    }

    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

/// Logs go to stderr so they never interleave with the game on stdout.
pub fn init_logging(level: Level) {
    // Ignore error if already set
    let _ = tracing_subscriber::fmt()
        .with_line_number(true)
        .with_file(true)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn serve(config: GameConfig, console: &mut dyn Console) -> Result<(), SessionError> {
    Session::new(config)?.run(console)
}
