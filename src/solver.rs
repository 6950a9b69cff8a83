use crate::code::{CODE_LENGTH, Code, SYMBOL_COUNT};
use crate::debug_log;
use crate::error::FeedbackError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MAX_PEGS: u8 = CODE_LENGTH as u8;
const FEEDBACK_SLOTS: usize = (CODE_LENGTH + 1) * (CODE_LENGTH + 1);

/// Black (`exact`) and white (`partial`) peg counts for one guess.
///
/// Always satisfies `exact + partial <= 4`; the only public constructor
/// checks it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct Feedback {
    exact: u8,
    partial: u8,
}

impl Feedback {
    pub const WIN: Feedback = Feedback {
        exact: MAX_PEGS,
        partial: 0,
    };

    pub fn new(exact: u8, partial: u8) -> Result<Self, FeedbackError> {
        if exact > MAX_PEGS || partial > MAX_PEGS {
            return Err(FeedbackError::OutOfRange);
        }
        if exact + partial > MAX_PEGS {
            return Err(FeedbackError::SumTooLarge);
        }
        Ok(Self { exact, partial })
    }

    pub const fn exact(&self) -> u8 {
        self.exact
    }

    pub const fn partial(&self) -> u8 {
        self.partial
    }

    pub const fn is_win(&self) -> bool {
        self.exact == MAX_PEGS
    }

    fn slot(self) -> usize {
        self.exact as usize * (CODE_LENGTH + 1) + self.partial as usize
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} black, {} white", self.exact, self.partial)
    }
}

/// Parses `"black white"`, `"black,white"` or `"black/white"`.
impl FromStr for Feedback {
    type Err = FeedbackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s
            .split(|c: char| c.is_whitespace() || c == ',' || c == '/')
            .filter(|p| !p.is_empty())
            .collect();
        let [black, white] = parts.as_slice() else {
            return Err(FeedbackError::NotANumber);
        };
        let black: i64 = black.parse().map_err(|_| FeedbackError::NotANumber)?;
        let white: i64 = white.parse().map_err(|_| FeedbackError::NotANumber)?;
        let to_pegs = |n: i64| u8::try_from(n).map_err(|_| FeedbackError::OutOfRange);
        Feedback::new(to_pegs(black)?, to_pegs(white)?)
    }
}

impl TryFrom<(u8, u8)> for Feedback {
    type Error = FeedbackError;

    fn try_from((exact, partial): (u8, u8)) -> Result<Self, Self::Error> {
        Feedback::new(exact, partial)
    }
}

impl From<Feedback> for (u8, u8) {
    fn from(feedback: Feedback) -> Self {
        (feedback.exact, feedback.partial)
    }
}

/// Scores `guess` against `candidate`.
///
/// Positions that match exactly are counted first; `partial` is the size of
/// the multiset intersection of the remaining symbols.
pub fn score(guess: &Code, candidate: &Code) -> Feedback {
    let mut exact = 0;
    let mut guess_counts = [0u8; SYMBOL_COUNT];
    let mut candidate_counts = [0u8; SYMBOL_COUNT];
    for (g, c) in guess.symbols().iter().zip(candidate.symbols()) {
        if g == c {
            exact += 1;
        } else {
            guess_counts[g.rank()] += 1;
            candidate_counts[c.rank()] += 1;
        }
    }
    let partial = guess_counts
        .iter()
        .zip(&candidate_counts)
        .map(|(g, c)| (*g).min(*c))
        .sum();
    Feedback { exact, partial }
}

/// Candidates that would have produced `observed` for `guess`, in input
/// order. An empty result means the feedback history contradicts itself.
pub fn filter_candidates(candidates: &[Code], guess: &Code, observed: Feedback) -> Vec<Code> {
    candidates
        .iter()
        .filter(|candidate| score(guess, candidate) == observed)
        .copied()
        .collect()
}

/// Size of the largest group of candidates sharing one feedback for `guess`.
pub fn worst_case_partition(guess: &Code, candidates: &[Code]) -> usize {
    let mut partitions = [0usize; FEEDBACK_SLOTS];
    for candidate in candidates {
        partitions[score(guess, candidate).slot()] += 1;
    }
    partitions.into_iter().max().unwrap_or(0)
}

pub fn naive_guess(candidates: &[Code]) -> Option<Code> {
    candidates.first().copied()
}

/// Guess from `universe` whose worst-case partition of `candidates` is
/// smallest; ties go to the earliest code in `universe`.
///
/// Scans the whole universe, not only live candidates, so a guess that is
/// already ruled out can still be chosen for its discriminating power. A
/// single remaining candidate is returned as-is.
///
/// Cost is `|universe| * |candidates|` scorings: 65,536 on the first round of
/// the 4x4 game. That grows with the square of the universe size, so a larger
/// alphabet or code length needs a cheaper strategy or an abortable scan.
pub fn minimax_guess(candidates: &[Code], universe: &[Code]) -> Option<Code> {
    let mut best = match candidates {
        [] => return None,
        [only] => return Some(*only),
        [first, ..] => *first,
    };
    let mut best_worst = usize::MAX;
    for guess in universe {
        let worst = worst_case_partition(guess, candidates);
        if worst < best_worst {
            best_worst = worst;
            best = *guess;
        }
    }
    debug_log!(
        "minimax_guess() - {} candidates, {} guesses scanned, chose {} (worst case {})",
        candidates.len(),
        universe.len(),
        best,
        best_worst
    );
    Some(best)
}

/// Picks the next guess for a round.
pub trait GuessSelector {
    fn name(&self) -> &'static str;

    /// `None` when no candidate is left.
    fn select(&self, candidates: &[Code], universe: &[Code]) -> Option<Code>;
}

/// First remaining candidate in canonical order.
#[derive(Debug, Default, Clone, Copy)]
pub struct NaiveSelector;

impl GuessSelector for NaiveSelector {
    fn name(&self) -> &'static str {
        "naive"
    }

    fn select(&self, candidates: &[Code], _universe: &[Code]) -> Option<Code> {
        naive_guess(candidates)
    }
}

/// See [`minimax_guess`].
#[derive(Debug, Default, Clone, Copy)]
pub struct MinimaxSelector;

impl GuessSelector for MinimaxSelector {
    fn name(&self) -> &'static str {
        "minimax"
    }

    fn select(&self, candidates: &[Code], universe: &[Code]) -> Option<Code> {
        minimax_guess(candidates, universe)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Strategy {
    #[default]
    Naive,
    Minimax,
}

impl Strategy {
    pub fn selector(self) -> Box<dyn GuessSelector> {
        match self {
            Strategy::Naive => Box::new(NaiveSelector),
            Strategy::Minimax => Box::new(MinimaxSelector),
        }
    }
}

/// Rough number of rounds still needed with `remaining` candidates.
///
/// A display hint only, not a proven bound.
pub fn estimate_remaining_rounds(remaining: usize) -> usize {
    match remaining {
        0..=1 => 1,
        2..=4 => 2,
        5..=16 => 3,
        _ => 4,
    }
}
