//! Reel digits and the sources they are drawn from.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Errors raised when building digits or digit sources.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DigitError {
    /// Value outside `[1, 9]`.
    #[error("digit {0} is out of range 1..=9")]
    OutOfRange(u8),

    /// A scripted source needs at least one digit.
    #[error("scripted digit source is empty")]
    EmptyScript,
}

/// A single reel digit, always in `[1, 9]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    /// Smallest digit a reel can show.
    pub const MIN: u8 = 1;
    /// Largest digit a reel can show.
    pub const MAX: u8 = 9;
    /// The digit every reel shows before the first spin.
    pub const ONE: Digit = Digit(1);

    /// Build a digit, rejecting values outside `[1, 9]`.
    pub fn new(value: u8) -> Result<Self, DigitError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DigitError::OutOfRange(value))
        }
    }

    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Digit {
    type Error = DigitError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Draw one uniformly distributed digit.
pub fn sample_digit<R: Rng + ?Sized>(rng: &mut R) -> Digit {
    Digit(rng.gen_range(Digit::MIN..=Digit::MAX))
}

/// Anything that can hand out digits one at a time.
pub trait DigitSource: Send {
    /// Produce the next digit.
    fn next_digit(&mut self) -> Digit;
}

/// Uniform pseudo-random digits backed by `StdRng`.
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    /// Seed from operating system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence for a given seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl DigitSource for RandomSource {
    fn next_digit(&mut self) -> Digit {
        sample_digit(&mut self.rng)
    }
}

/// Replays a fixed list of digits, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    script: Vec<Digit>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(script: Vec<Digit>) -> Result<Self, DigitError> {
        if script.is_empty() {
            return Err(DigitError::EmptyScript);
        }
        Ok(Self { script, cursor: 0 })
    }

    /// Build from raw values, validating each one.
    pub fn from_values(values: &[u8]) -> Result<Self, DigitError> {
        let script = values
            .iter()
            .map(|&v| Digit::new(v))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(script)
    }
}

impl DigitSource for ScriptedSource {
    fn next_digit(&mut self) -> Digit {
        let digit = self.script[self.cursor];
        self.cursor = (self.cursor + 1) % self.script.len();
        digit
    }
}
