use crate::code::Code;
use crate::error::FeedbackError;
use crate::game_state::{GameInterface, Opening, RoundOutcome, RoundRecord, Session, UserAction};
use crate::solver::Strategy;
use clap::Parser;
use std::io::{BufRead, ErrorKind};
use std::path::PathBuf;

/// Mastermind solver for the four-arrow, four-position game
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// How the next guess is picked
    #[arg(short, long, value_enum, default_value_t = Strategy::Naive)]
    pub strategy: Strategy,

    /// First guess (e.g. UDRL), or "auto" to let the strategy pick it
    #[arg(short, long, default_value = "UDRL")]
    pub opening: Opening,

    /// Use the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,

    /// Append logs to this file instead of the default location
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Reads one line of user input as an action.
fn parse_action(input: &str) -> Result<UserAction, FeedbackError> {
    match input.trim().to_lowercase().as_str() {
        "exit" | "quit" => Ok(UserAction::Exit),
        "reset" | "new" | "next" => Ok(UserAction::Reset),
        "history" => Ok(UserAction::ShowHistory),
        other => other.parse().map(UserAction::Feedback),
    }
}

fn format_code(code: &Code) -> String {
    format!("{code} {}", code.arrows())
}

fn format_record(round: usize, record: &RoundRecord) -> String {
    format!(
        "{round:>2}. {}  black {} white {}",
        format_code(&record.guess),
        record.feedback.exact(),
        record.feedback.partial()
    )
}

pub fn display_state(session: &Session) {
    println!(
        "\nGuess number: {} | Remaining possibilities: {} | Best-case remaining turns: ≤ {}",
        session.guess_number(),
        session.candidates().len(),
        session.remaining_rounds_estimate()
    );

    if let Some(codes) = session.endgame_candidates() {
        println!("Possible codes remaining:");
        for code in codes {
            let marker = if Some(*code) == session.current_guess() {
                "  (suggested)"
            } else {
                ""
            };
            println!("  {}{marker}", format_code(code));
        }
    }

    if session.is_over() {
        println!("{}", session.message());
        println!("Type 'reset' to start a new game or 'exit' to quit.");
    } else if let Some(guess) = session.current_guess() {
        println!("Current guess: {}", format_code(&guess));
    }
}

pub fn read_action<R: BufRead>(reader: &mut R) -> Option<UserAction> {
    println!("Enter feedback as 'black white' (or 'history', 'reset', 'exit'):");
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) => return Some(UserAction::Exit),
        Ok(_) => {}
        // the bad line is consumed, so the next read starts fresh
        Err(e) if e.kind() == ErrorKind::InvalidData => {
            println!("Could not read input: {e}");
            return None;
        }
        Err(e) => {
            log::error!("read_action() - input closed: {e}");
            return Some(UserAction::Exit);
        }
    }

    match parse_action(&input) {
        Ok(action) => Some(action),
        Err(e) => {
            println!("{e}");
            None
        }
    }
}

pub fn display_outcome(outcome: &RoundOutcome) {
    println!("{}", outcome.message());
}

pub fn display_history(history: &[RoundRecord]) {
    if history.is_empty() {
        println!("No guesses yet.");
        return;
    }
    println!("History:");
    for (i, record) in history.iter().enumerate() {
        println!("{}", format_record(i + 1, record));
    }
}

pub fn display_error(message: &str) {
    println!("{message}");
}

pub fn display_new_game_message(session: &Session) {
    println!(
        "New game started. {} possible codes.",
        session.candidates().len()
    );
}

pub fn display_exit_message() {
    println!("Exiting.");
}

/// Line-oriented front end over any `BufRead`.
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_state(&mut self, session: &Session) {
        display_state(session);
    }

    fn read_action(&mut self) -> Option<UserAction> {
        read_action(&mut self.reader)
    }

    fn display_outcome(&mut self, outcome: &RoundOutcome) {
        display_outcome(outcome);
    }

    fn display_history(&mut self, history: &[RoundRecord]) {
        display_history(history);
    }

    fn display_error(&mut self, message: &str) {
        display_error(message);
    }

    fn display_new_game_message(&mut self, session: &Session) {
        display_new_game_message(session);
    }

    fn display_exit_message(&mut self) {
        display_exit_message();
    }
}
