//! The fixed universe of codes.
//!
//! Canonical order: codes are ordered lexicographically by position, each
//! position ranked `Up < Down < Right < Left`. A code's index in
//! [`generate_code_space`] is therefore its base-4 number (`UUUU` is 0,
//! `LLLL` is 255). Guess selection and every test that names a specific
//! suggestion depend on this order.

use crate::error::CodeParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const CODE_LENGTH: usize = 4;
pub const SYMBOL_COUNT: usize = 4;
pub const CODE_SPACE_SIZE: usize = SYMBOL_COUNT.pow(CODE_LENGTH as u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Symbol {
    Up,
    Down,
    Right,
    Left,
}

impl Symbol {
    /// All symbols in rank order.
    pub const ALL: [Symbol; SYMBOL_COUNT] = [Symbol::Up, Symbol::Down, Symbol::Right, Symbol::Left];

    pub const fn rank(self) -> usize {
        self as usize
    }

    pub const fn letter(self) -> char {
        match self {
            Symbol::Up => 'U',
            Symbol::Down => 'D',
            Symbol::Right => 'R',
            Symbol::Left => 'L',
        }
    }

    pub const fn arrow(self) -> char {
        match self {
            Symbol::Up => '↑',
            Symbol::Down => '↓',
            Symbol::Right => '→',
            Symbol::Left => '←',
        }
    }

    /// Accepts a letter (any case) or an arrow glyph.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'U' | '↑' => Some(Symbol::Up),
            'D' | '↓' => Some(Symbol::Down),
            'R' | '→' => Some(Symbol::Right),
            'L' | '←' => Some(Symbol::Left),
            _ => None,
        }
    }
}

/// Four symbols, one per position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Code([Symbol; CODE_LENGTH]);

impl Code {
    pub const fn new(symbols: [Symbol; CODE_LENGTH]) -> Self {
        Self(symbols)
    }

    pub const fn symbols(&self) -> &[Symbol; CODE_LENGTH] {
        &self.0
    }

    /// Position in the canonical enumeration.
    pub fn index(&self) -> usize {
        self.0
            .iter()
            .fold(0, |acc, symbol| acc * SYMBOL_COUNT + symbol.rank())
    }

    /// Inverse of [`Code::index`]. Indices wrap modulo the space size.
    pub fn from_index(index: usize) -> Self {
        let mut rest = index % CODE_SPACE_SIZE;
        let mut symbols = [Symbol::Up; CODE_LENGTH];
        for slot in symbols.iter_mut().rev() {
            *slot = Symbol::ALL[rest % SYMBOL_COUNT];
            rest /= SYMBOL_COUNT;
        }
        Self(symbols)
    }

    pub fn arrows(&self) -> String {
        self.0.iter().map(|s| s.arrow()).collect()
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.0 {
            write!(f, "{}", symbol.letter())?;
        }
        Ok(())
    }
}

impl FromStr for Code {
    type Err = CodeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .map(|c| Symbol::from_char(c).ok_or(CodeParseError::InvalidSymbol(c)))
            .collect::<Result<Vec<_>, _>>()?;
        let symbols: [Symbol; CODE_LENGTH] = symbols
            .try_into()
            .map_err(|v: Vec<Symbol>| CodeParseError::WrongLength(v.len()))?;
        Ok(Self(symbols))
    }
}

impl TryFrom<String> for Code {
    type Error = CodeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Code> for String {
    fn from(code: Code) -> Self {
        code.to_string()
    }
}

/// Every code, in canonical order.
pub fn generate_code_space() -> Vec<Code> {
    (0..CODE_SPACE_SIZE).map(Code::from_index).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_code_space_has_256_distinct_codes() {
        let space = generate_code_space();
        assert_eq!(space.len(), 256);
        let unique: HashSet<Code> = space.iter().copied().collect();
        assert_eq!(unique.len(), 256);
    }

    #[test]
    fn test_code_space_is_in_canonical_order() {
        let space = generate_code_space();
        assert_eq!(space[0].to_string(), "UUUU");
        assert_eq!(space[1].to_string(), "UUUD");
        assert_eq!(space[4].to_string(), "UUDU");
        assert_eq!(space[255].to_string(), "LLLL");
        assert!(space.windows(2).all(|w| w[0] < w[1]));
        for (i, code) in space.iter().enumerate() {
            assert_eq!(code.index(), i);
        }
    }

    #[test]
    fn test_code_space_is_deterministic() {
        assert_eq!(generate_code_space(), generate_code_space());
    }

    #[test]
    fn test_parse_letters_and_arrows() {
        let expected = Code::new([Symbol::Up, Symbol::Down, Symbol::Right, Symbol::Left]);
        assert_eq!("UDRL".parse::<Code>(), Ok(expected));
        assert_eq!("udrl".parse::<Code>(), Ok(expected));
        assert_eq!("U, D, R, L".parse::<Code>(), Ok(expected));
        assert_eq!("↑↓→←".parse::<Code>(), Ok(expected));
        assert_eq!(expected.arrows(), "↑↓→←");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!("UDRX".parse::<Code>(), Err(CodeParseError::InvalidSymbol('X')));
        assert_eq!("UDR".parse::<Code>(), Err(CodeParseError::WrongLength(3)));
        assert_eq!("UDRLU".parse::<Code>(), Err(CodeParseError::WrongLength(5)));
        assert_eq!("".parse::<Code>(), Err(CodeParseError::WrongLength(0)));
    }

    #[test]
    fn test_from_index_wraps() {
        assert_eq!(Code::from_index(256), Code::from_index(0));
    }
}
