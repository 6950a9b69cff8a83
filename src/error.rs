use thiserror::Error;

/// Rejected text for a code such as `UDRL`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeParseError {
    #[error("'{0}' is not a symbol (use U, D, R, L or an arrow)")]
    InvalidSymbol(char),
    #[error("a code has exactly 4 symbols, got {0}")]
    WrongLength(usize),
}

/// Rejected black/white peg counts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedbackError {
    #[error("Invalid input. Please enter numbers for black and white pegs.")]
    NotANumber,
    #[error("Invalid feedback. Each value must be 0-4 and their sum ≤ 4.")]
    OutOfRange,
    #[error("Invalid feedback. Each value must be 0-4 and their sum ≤ 4.")]
    SumTooLarge,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("The game is over. Reset to start a new one.")]
    GameOver,
    #[error("saved session is inconsistent: {0}")]
    InvalidState(&'static str),
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("could not open log file: {0}")]
    Io(#[from] std::io::Error),
    #[error("a logger is already installed: {0}")]
    AlreadyInitialized(#[from] log::SetLoggerError),
}
