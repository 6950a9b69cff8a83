// Library interface for mastermind-solver
// This allows integration tests to access internal modules

pub mod cli;
pub mod code;
pub mod error;
pub mod game_state;
pub mod logging;
pub mod solver;
pub mod tui;

// Re-export commonly used items for easier testing
pub use code::{Code, Symbol, generate_code_space};
pub use error::{CodeParseError, FeedbackError, LoggingError, SessionError};
pub use game_state::{
    GameInterface, Opening, RoundOutcome, RoundRecord, Session, SessionStatus, UserAction,
    game_loop,
};
pub use solver::{
    Feedback, GuessSelector, MinimaxSelector, NaiveSelector, Strategy, estimate_remaining_rounds,
    filter_candidates, minimax_guess, naive_guess, score, worst_case_partition,
};
