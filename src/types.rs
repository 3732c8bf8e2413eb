//! This module defines the core data structures and types used throughout the Busy Beaver
//! enumerator, including machine configurations, directions, run outcomes, per-machine
//! records, and error types.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// A tape symbol. Symbol 0 is the blank.
pub type Symbol = u8;
/// A machine state. Values `0..states` are live; the value `states` is the halt sentinel.
pub type State = u32;
/// A packed output code: direction in the lowest bit, written symbol in the next
/// block, next state in the remaining high bits.
pub type OutputCode = u32;

/// The blank symbol that every tape cell starts out holding.
pub const BLANK_SYMBOL: Symbol = 0;

/// A machine configuration: the number of non-halting states and the number of
/// tape symbols. Fixed for the lifetime of a codec, machine, or enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    /// Number of non-halting states. The halt state is not counted.
    pub states: u32,
    /// Number of tape symbols, including the blank.
    pub symbols: u32,
}

impl Shape {
    pub fn new(states: u32, symbols: u32) -> Self {
        Self { states, symbols }
    }
}

impl Display for Shape {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}x{}", self.states, self.symbols)
    }
}

impl FromStr for Shape {
    type Err = BeaverError;

    /// Parses a `STATESxSYMBOLS` pair such as `3x2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (states, symbols) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| BeaverError::ParseError(format!("expected STATESxSYMBOLS, got {s:?}")))?;

        let states = states
            .trim()
            .parse::<u32>()
            .map_err(|e| BeaverError::ParseError(format!("bad state count in {s:?}: {e}")))?;
        let symbols = symbols
            .trim()
            .parse::<u32>()
            .map_err(|e| BeaverError::ParseError(format!("bad symbol count in {s:?}: {e}")))?;

        if states == 0 || symbols == 0 {
            return Err(BeaverError::ValidationError(format!(
                "shape {s:?} must have at least one state and one symbol"
            )));
        }

        Ok(Shape::new(states, symbols))
    }
}

/// The two directions a tape head can move. There is no stay move; every
/// transition shifts the head by exactly one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one cell to the left.
    Left,
    /// Move the head one cell to the right.
    Right,
}

impl Direction {
    /// The head offset in tape cells.
    pub fn offset(self) -> isize {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Direction::Left => write!(f, "L"),
            Direction::Right => write!(f, "R"),
        }
    }
}

/// The outcome of a single simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The machine performed a transition and remains in a live state.
    Continue,
    /// The machine performed a transition into the halt state.
    Halted,
}

/// The outcome of a bounded machine run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// The machine halted after this many steps (1-based).
    Halted(u64),
    /// The machine was still running when the step bound ran out.
    DidNotHalt,
}

impl RunOutcome {
    /// The `steps_to_halt` wire value: a positive step count, or -1 for a
    /// machine that did not halt within its bound.
    pub fn steps_field(self) -> i64 {
        match self {
            RunOutcome::Halted(steps) => steps as i64,
            RunOutcome::DidNotHalt => -1,
        }
    }

    pub fn halted(self) -> bool {
        matches!(self, RunOutcome::Halted(_))
    }
}

/// One emitted record per simulated machine.
///
/// `halting_probability` is the running percentage over every machine
/// aggregated so far, not just the current configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineRecord {
    pub state_count: u32,
    pub symbol_count: u32,
    /// 0-based enumeration index of the machine within its configuration.
    /// Positional only; carries no meaning beyond reproducibility.
    pub machine_id: u128,
    /// Positive step count, or -1 if the machine did not halt within bound.
    pub steps_to_halt: i64,
    /// Running halting percentage in [0, 100].
    pub halting_probability: f64,
}

/// The final aggregate reported once after all configured runs complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub halting: u64,
    pub non_halting: u64,
    pub halting_probability: f64,
}

/// Represents various errors that can occur while driving an enumeration run.
///
/// The simulation path itself is infallible: every table the enumerator
/// produces is in range by construction. Errors arise only at the boundary
/// (parsing machine text, resolving step bounds, writing result files).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BeaverError {
    /// Indicates malformed machine text or shape syntax.
    #[error("parse error: {0}")]
    ParseError(String),
    /// Indicates a configuration the enumerator cannot honor.
    #[error("validation error: {0}")]
    ValidationError(String),
    /// Indicates no trusted step bound is known for a configuration.
    #[error("no known step bound for shape {0}; supply one explicitly")]
    UnknownBound(Shape),
    /// Indicates the step bound for a configuration exists but is unverified.
    #[error("step bound for shape {0} is unverified; opt in to run it")]
    UnverifiedBound(Shape),
    /// Indicates an error while writing result records.
    #[error("file error: {0}")]
    FileError(String),
}
