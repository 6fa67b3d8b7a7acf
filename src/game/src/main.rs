use std::process::ExitCode;

use clap::Parser;
use common::utility::StdConsole;
use game::entrypoint::{init_logging, serve, GameConfig};
use tracing::{error, info};

fn main() -> ExitCode {
    let config = GameConfig::parse();
    init_logging(config.log_level());
    info!("{:#?}", &config);

    let mut console = StdConsole::new();
    match serve(config, &mut console) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_input_closed() => {
            info!("Input closed, leaving the game");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
