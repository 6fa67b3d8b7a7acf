use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::{debug, warn};

pub const INVALID_CHOICE: &str = "Sorry, invalid choice.";

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("input closed before a valid answer was read")]
pub struct InputClosed;

/// Line-oriented boundary between the game and whoever is playing it.
pub trait Console {
    /// Blocks until a line is available. Returns `None` once input is exhausted.
    fn read_line(&mut self) -> Option<String>;

    fn show(&mut self, text: &str);
}

/// Console backed by the process' stdin and stdout.
pub struct StdConsole {
    stdin: io::Stdin,
    stdout: io::Stdout,
}

impl StdConsole {
    pub fn new() -> Self {
        StdConsole {
            stdin: io::stdin(),
            stdout: io::stdout(),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for StdConsole {
    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.stdin.lock().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line),
            Err(e) => {
                warn!("Failed to read from stdin: {}", e);
                None
            }
        }
    }

    fn show(&mut self, text: &str) {
        let mut out = self.stdout.lock();
        // Nothing in the game depends on output being seen
        if let Err(e) = writeln!(out, "{}", text).and_then(|_| out.flush()) {
            debug!("Failed to write to stdout: {}", e);
        }
    }
}

/// Show `prompt` and read lines until `parse` accepts one.
///
/// Rejected lines are answered with [`INVALID_CHOICE`] and the prompt is repeated; there is
/// no upper bound on attempts. The only way out without a value is exhausted input.
pub fn prompt_until<T>(
    console: &mut dyn Console,
    prompt: &str,
    mut parse: impl FnMut(&str) -> Option<T>,
) -> Result<T, InputClosed> {
    loop {
        console.show(prompt);
        let Some(line) = console.read_line() else {
            warn!("Input closed while waiting for an answer");
            return Err(InputClosed);
        };
        if let Some(value) = parse(&line) {
            return Ok(value);
        }
        warn!("Rejected input {:?}", line.trim());
        console.show(INVALID_CHOICE);
    }
}

/// Ask a yes/no question. Accepts `yes`, `y`, `no` and `n` in any case.
pub fn confirm(console: &mut dyn Console, question: &str) -> Result<bool, InputClosed> {
    prompt_until(console, question, |line| {
        match line.trim().to_lowercase().as_str() {
            "yes" | "y" => Some(true),
            "no" | "n" => Some(false),
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::ScriptedConsole;

    #[test]
    fn prompt_repeats_until_accepted() {
        let mut console = ScriptedConsole::new(["x", "", "42"]);
        let value = prompt_until(&mut console, "Number?", |line| line.trim().parse::<u32>().ok());
        assert_eq!(value, Ok(42));
        assert_eq!(console.count(INVALID_CHOICE), 2);
        assert_eq!(console.count("Number?"), 3);
    }

    #[test]
    fn prompt_reports_exhausted_input() {
        let mut console = ScriptedConsole::new(["nope"]);
        let value = prompt_until(&mut console, "Number?", |line| line.trim().parse::<u32>().ok());
        assert_eq!(value, Err(InputClosed));
        assert_eq!(console.count(INVALID_CHOICE), 1);
    }

    #[test]
    fn confirm_is_permissive_about_case() {
        let mut console = ScriptedConsole::new(["maybe", "YES", "n", "No"]);
        assert_eq!(confirm(&mut console, "Again?"), Ok(true));
        assert_eq!(confirm(&mut console, "Again?"), Ok(false));
        assert_eq!(confirm(&mut console, "Again?"), Ok(false));
        assert_eq!(console.count(INVALID_CHOICE), 1);
    }
}
