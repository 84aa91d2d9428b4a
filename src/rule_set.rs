use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Rules of Conway's Game of Life.
pub const B3S23: RuleSet = RuleSet::new(0b1000, 0b1100);

/// # Representation
/// Life rules are represented as
/// ```notrust
/// |------birth------|
/// 0000_0000_0000_0000_0000_0000_0000_0000
///                     |----survival-----|
/// ```
///
/// # Examples
/// ```notrust
/// b3s23:                0000_0000_0000_1000_0000_0000_0000_1100
///
/// b0s0:                 0000_0000_0000_0000_0000_0000_0000_0000
/// b012345678s012345678: 0000_0001_1111_1111_0000_0001_1111_1111
/// ```
///
/// See: https://conwaylife.com/wiki/Rulestring
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RuleSet {
    rule: u32,
}

impl Default for RuleSet {
    fn default() -> Self {
        B3S23
    }
}

impl RuleSet {
    /// Create a new `RuleSet` for the given births and survivals. For both `b` and
    /// `s`, numbers are set on a bit basis. For instance if bit `i` in `b` is on, it
    /// means `i` is included in the set of births. Any bit past the 8th is ignored.
    pub const fn new(b: u16, s: u16) -> Self {
        let b = b & 0x1FF;
        let s = s & 0x1FF;

        Self {
            rule: (b as u32) << 16 | s as u32,
        }
    }

    pub fn births(&self) -> u16 {
        ((self.rule & 0x1FF0000) >> 0x10) as u16
    }

    pub fn survivals(&self) -> u16 {
        (self.rule & 0x1FF) as u16
    }

    /// Whether a dead cell with `n` live neighbours comes alive
    pub fn is_born(&self, n: u8) -> bool {
        n <= 8 && self.births() & (1 << n) != 0
    }

    /// Whether a live cell with `n` live neighbours stays alive
    pub fn survives(&self, n: u8) -> bool {
        n <= 8 && self.survivals() & (1 << n) != 0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("Empty rule string")]
    Empty,

    #[error("Invalid token '{got}' in rule string")]
    InvalidToken { got: char },

    #[error("Neighbour count {got} is out of range, expected 0 to 8")]
    OutOfRange { got: u32 },

    #[error("Rule string has no survival part")]
    MissingSurvival,

    #[error("B0 rules fill the whole plane and can't be stepped sparsely")]
    BirthOnZero,
}

enum State {
    Birth,
    Survival,
}

impl FromStr for RuleSet {
    type Err = RuleError;

    /// Accepts `B3/S23`, `b3s23` and the nameless `3/23` form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(RuleError::Empty);
        }

        let named = s.starts_with(['b', 'B']);

        let mut state = State::Birth;
        let mut seen_survival = false;
        let (mut b, mut s_bits) = (0u16, 0u16);

        for c in s.chars() {
            match c {
                'b' | 'B' if named => {
                    state = State::Birth;
                }
                's' | 'S' if named => {
                    state = State::Survival;
                    seen_survival = true;
                }
                '/' if named => {}
                '/' => {
                    state = State::Survival;
                    seen_survival = true;
                }
                n => {
                    let n = n.to_digit(10).ok_or(RuleError::InvalidToken { got: n })?;

                    if n > 8 {
                        return Err(RuleError::OutOfRange { got: n });
                    }

                    match state {
                        State::Birth => b |= 1 << n,
                        State::Survival => s_bits |= 1 << n,
                    }
                }
            }
        }

        if !seen_survival {
            return Err(RuleError::MissingSurvival);
        }

        if b & 1 != 0 {
            return Err(RuleError::BirthOnZero);
        }

        Ok(RuleSet::new(b, s_bits))
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = |bits: u16| -> String {
            (0..=8u8)
                .filter(|n| bits & (1 << n) != 0)
                .map(|n| char::from(b'0' + n))
                .collect()
        };

        write!(f, "B{}/S{}", digits(self.births()), digits(self.survivals()))
    }
}
