use crate::code::{Code, Symbol, generate_code_space};
use crate::error::{CodeParseError, SessionError};
use crate::solver::{Feedback, GuessSelector, estimate_remaining_rounds, filter_candidates};
use crate::{debug_log, info_log};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default first guess: one of each symbol.
pub const DEFAULT_OPENING: Code =
    Code::new([Symbol::Up, Symbol::Down, Symbol::Right, Symbol::Left]);

/// Guess number at which all remaining codes are listed, if few enough.
const ENDGAME_GUESS_NUMBER: usize = 4;
const ENDGAME_MAX_CANDIDATES: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    InProgress,
    Solved,
    Contradiction,
}

/// One guess and the feedback it received.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub guess: Code,
    pub feedback: Feedback,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoundOutcome {
    Solved { guess: Code, rounds: usize },
    Narrowed { next_guess: Code, remaining: usize },
    Contradiction,
}

impl RoundOutcome {
    pub fn message(&self) -> String {
        match self {
            Self::Solved { .. } => "Correct! The solver found your code.".to_string(),
            Self::Narrowed { remaining: 1, .. } => {
                "Only one possibility remains. Enter feedback to confirm.".to_string()
            }
            Self::Narrowed { remaining, .. } => {
                format!("Filtered to {remaining} possible codes. Enter feedback for the next guess.")
            }
            Self::Contradiction => {
                "No codes match that feedback. Review prior feedback or reset.".to_string()
            }
        }
    }
}

/// How the first guess of a game is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Opening {
    Fixed(Code),
    /// Ask the selector, with every code still possible.
    Auto,
}

impl Default for Opening {
    fn default() -> Self {
        Opening::Fixed(DEFAULT_OPENING)
    }
}

impl FromStr for Opening {
    type Err = CodeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("auto") {
            Ok(Opening::Auto)
        } else {
            s.parse().map(Opening::Fixed)
        }
    }
}

/// Everything that changes from round to round.
///
/// Owned by the caller and handed to the solver functions one round at a
/// time; the solver keeps nothing between calls. The guess counter is the
/// history length, so the two cannot drift apart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SavedSession")]
pub struct Session {
    #[serde(skip)]
    universe: Vec<Code>,
    candidates: Vec<Code>,
    history: Vec<RoundRecord>,
    current_guess: Option<Code>,
    status: SessionStatus,
    opening: Code,
}

impl Session {
    pub fn new(opening: Code) -> Self {
        let universe = generate_code_space();
        Self {
            candidates: universe.clone(),
            universe,
            history: Vec::new(),
            current_guess: Some(opening),
            status: SessionStatus::InProgress,
            opening,
        }
    }

    pub fn with_opening(opening: Opening, selector: &dyn GuessSelector) -> Self {
        let code = match opening {
            Opening::Fixed(code) => code,
            Opening::Auto => {
                let universe = generate_code_space();
                selector
                    .select(&universe, &universe)
                    .unwrap_or(DEFAULT_OPENING)
            }
        };
        info_log!("Session::with_opening() - {} opening {}", selector.name(), code);
        Self::new(code)
    }

    /// Records feedback for the current guess and moves to the next round.
    ///
    /// A win is recorded without filtering. An empty candidate set ends the
    /// game; only [`Session::reset`] recovers from it.
    pub fn apply_feedback(
        &mut self,
        feedback: Feedback,
        selector: &dyn GuessSelector,
    ) -> Result<RoundOutcome, SessionError> {
        let guess = match (self.status, self.current_guess) {
            (SessionStatus::InProgress, Some(guess)) => guess,
            _ => return Err(SessionError::GameOver),
        };
        self.history.push(RoundRecord { guess, feedback });
        let round = self.history.len();
        debug_log!("apply_feedback() - round {}: {} -> {}", round, guess, feedback);

        if feedback.is_win() {
            self.status = SessionStatus::Solved;
            info_log!("apply_feedback() - solved {} in {} rounds", guess, round);
            return Ok(RoundOutcome::Solved {
                guess,
                rounds: round,
            });
        }

        self.candidates = filter_candidates(&self.candidates, &guess, feedback);
        match selector.select(&self.candidates, &self.universe) {
            Some(next_guess) => {
                self.current_guess = Some(next_guess);
                info_log!(
                    "apply_feedback() - {} candidates left, next guess {}",
                    self.candidates.len(),
                    next_guess
                );
                Ok(RoundOutcome::Narrowed {
                    next_guess,
                    remaining: self.candidates.len(),
                })
            }
            None => {
                self.candidates.clear();
                self.current_guess = None;
                self.status = SessionStatus::Contradiction;
                info_log!("apply_feedback() - feedback history is contradictory");
                Ok(RoundOutcome::Contradiction)
            }
        }
    }

    /// Back to the full code space and the same opening guess.
    pub fn reset(&mut self) {
        self.candidates = generate_code_space();
        self.history.clear();
        self.current_guess = Some(self.opening);
        self.status = SessionStatus::InProgress;
    }

    pub fn candidates(&self) -> &[Code] {
        &self.candidates
    }

    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    pub fn guesses_made(&self) -> usize {
        self.history.len()
    }

    /// Number shown next to the current guess; stays on the last guess once
    /// the game is over.
    pub fn guess_number(&self) -> usize {
        match self.status {
            SessionStatus::InProgress => self.guesses_made() + 1,
            _ => self.guesses_made(),
        }
    }

    pub fn current_guess(&self) -> Option<Code> {
        self.current_guess
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn opening(&self) -> Code {
        self.opening
    }

    pub fn is_over(&self) -> bool {
        self.status != SessionStatus::InProgress
    }

    /// Advisory only; see [`estimate_remaining_rounds`].
    pub fn remaining_rounds_estimate(&self) -> usize {
        estimate_remaining_rounds(self.candidates.len())
    }

    /// Every remaining code, when the fourth guess is up and at most four
    /// are left.
    pub fn endgame_candidates(&self) -> Option<&[Code]> {
        let left = self.candidates.len();
        (self.status == SessionStatus::InProgress
            && self.guess_number() == ENDGAME_GUESS_NUMBER
            && (1..=ENDGAME_MAX_CANDIDATES).contains(&left))
        .then_some(self.candidates.as_slice())
    }

    pub fn message(&self) -> String {
        match (self.status, self.history.last()) {
            (SessionStatus::Solved, _) => "Correct! The solver found your code.".to_string(),
            (SessionStatus::Contradiction, _) => RoundOutcome::Contradiction.message(),
            (SessionStatus::InProgress, None) => "Enter feedback for the current guess.".to_string(),
            (SessionStatus::InProgress, Some(_)) => match self.current_guess {
                Some(next_guess) => RoundOutcome::Narrowed {
                    next_guess,
                    remaining: self.candidates.len(),
                }
                .message(),
                None => "Enter feedback for the current guess.".to_string(),
            },
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_OPENING)
    }
}

/// Wire form of [`Session`], checked before it becomes one.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SavedSession {
    candidates: Vec<Code>,
    history: Vec<RoundRecord>,
    current_guess: Option<Code>,
    status: SessionStatus,
    opening: Code,
}

impl TryFrom<SavedSession> for Session {
    type Error = SessionError;

    fn try_from(saved: SavedSession) -> Result<Self, Self::Error> {
        // filtering keeps canonical order and never duplicates
        if !saved.candidates.windows(2).all(|w| w[0] < w[1]) {
            return Err(SessionError::InvalidState(
                "candidates must be distinct and in canonical order",
            ));
        }
        let won = saved.history.iter().any(|r| r.feedback.is_win());
        let consistent = match saved.status {
            SessionStatus::InProgress => {
                !won && saved.current_guess.is_some() && !saved.candidates.is_empty()
            }
            SessionStatus::Solved => {
                saved.history.last().is_some_and(|r| r.feedback.is_win())
                    && saved.history.iter().filter(|r| r.feedback.is_win()).count() == 1
                    && saved.current_guess == saved.history.last().map(|r| r.guess)
            }
            SessionStatus::Contradiction => {
                !won
                    && !saved.history.is_empty()
                    && saved.current_guess.is_none()
                    && saved.candidates.is_empty()
            }
        };
        if !consistent {
            return Err(SessionError::InvalidState(
                "status does not agree with the guess and history",
            ));
        }

        Ok(Self {
            universe: generate_code_space(),
            candidates: saved.candidates,
            history: saved.history,
            current_guess: saved.current_guess,
            status: saved.status,
            opening: saved.opening,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Feedback(Feedback),
    ShowHistory,
    Reset,
    Exit,
}

/// A front end the game loop can drive.
pub trait GameInterface {
    fn display_state(&mut self, session: &Session);
    /// `None` means the input was rejected and should be asked for again.
    fn read_action(&mut self) -> Option<UserAction>;
    fn display_outcome(&mut self, outcome: &RoundOutcome);
    fn display_history(&mut self, history: &[RoundRecord]);
    fn display_error(&mut self, message: &str);
    fn display_new_game_message(&mut self, session: &Session);
    fn display_exit_message(&mut self);
}

/// Runs rounds until the interface asks to exit and returns the final state.
pub fn game_loop<I: GameInterface + ?Sized>(
    interface: &mut I,
    selector: &dyn GuessSelector,
    opening: Opening,
) -> Session {
    let mut session = Session::with_opening(opening, selector);
    interface.display_state(&session);

    loop {
        let Some(action) = interface.read_action() else {
            continue;
        };
        debug_log!("game_loop() - action {:?}", action);

        match action {
            UserAction::Exit => {
                interface.display_exit_message();
                break;
            }
            UserAction::Reset => {
                session.reset();
                interface.display_new_game_message(&session);
                interface.display_state(&session);
            }
            UserAction::ShowHistory => interface.display_history(session.history()),
            UserAction::Feedback(feedback) => match session.apply_feedback(feedback, selector) {
                Ok(outcome) => {
                    interface.display_outcome(&outcome);
                    interface.display_state(&session);
                }
                Err(e) => interface.display_error(&e.to_string()),
            },
        }
    }

    session
}
