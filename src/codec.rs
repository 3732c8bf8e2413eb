//! This module implements the packed transition encoding shared by the simulator
//! and the enumerator. A transition table is a flat sequence of output codes, one
//! per (state, symbol) input pair; the codec maps input pairs to table indices and
//! output codes to (direction, written symbol, next state) triples.

use crate::types::{Direction, OutputCode, Shape, State, Symbol};

/// Width of the direction field in an output code. Two directions, one bit.
const DIRECTION_WIDTH: u32 = 1;

/// The arithmetic convention for one machine configuration.
///
/// An output code packs, from the least-significant bit upward: the direction
/// bit, `symbol_width` bits of written symbol, and the next state in the
/// remaining high bits. The next-state value `states` is the halt sentinel.
///
/// No validation is performed anywhere in the codec; inputs are in range by
/// construction because the enumerator iterates the full output space. The
/// packed code space `0..output_count()` is dense only when the symbol count
/// is a power of two (the written-symbol field otherwise has unused bit
/// patterns); callers that enumerate must reject other symbol counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codec {
    shape: Shape,
    symbol_width: u32,
    symbol_mask: u32,
}

impl Codec {
    pub fn new(shape: Shape) -> Self {
        // ceil(log2(symbols)): bit length of symbols - 1, zero for a single symbol.
        let symbol_width = u32::BITS - (shape.symbols - 1).leading_zeros();

        Self {
            shape,
            symbol_width,
            symbol_mask: (1 << symbol_width) - 1,
        }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Number of bits the written-symbol field occupies in an output code.
    pub fn symbol_width(&self) -> u32 {
        self.symbol_width
    }

    /// The next-state value that means the machine has stopped.
    pub fn halt_state(&self) -> State {
        self.shape.states
    }

    /// Size of the input space: one table cell per (state, symbol) pair.
    pub fn input_count(&self) -> usize {
        (self.shape.states * self.shape.symbols) as usize
    }

    /// Size of the output space: symbols x directions x (states + halt).
    pub fn output_count(&self) -> OutputCode {
        self.shape.symbols * 2 * (self.shape.states + 1)
    }

    /// Total number of distinct machines of this shape: outputs ^ inputs.
    /// `None` when the count does not fit in a u128.
    pub fn machine_count(&self) -> Option<u128> {
        (self.output_count() as u128).checked_pow(self.input_count() as u32)
    }

    /// Flat table index of the (state, symbol) input pair.
    pub fn input_index(&self, state: State, symbol: Symbol) -> usize {
        (state * self.shape.symbols + symbol as u32) as usize
    }

    /// Packs a (direction, written symbol, next state) triple into an output code.
    pub fn encode(&self, direction: Direction, symbol: Symbol, next_state: State) -> OutputCode {
        let direction_bit = match direction {
            Direction::Left => 0,
            Direction::Right => 1,
        };

        direction_bit
            | ((symbol as OutputCode) << DIRECTION_WIDTH)
            | (next_state << (DIRECTION_WIDTH + self.symbol_width))
    }

    /// Unpacks an output code into its (direction, written symbol, next state) triple.
    pub fn decode(&self, code: OutputCode) -> (Direction, Symbol, State) {
        let direction = if code & 1 == 0 {
            Direction::Left
        } else {
            Direction::Right
        };
        let symbol = ((code >> DIRECTION_WIDTH) & self.symbol_mask) as Symbol;
        let next_state = code >> (DIRECTION_WIDTH + self.symbol_width);

        (direction, symbol, next_state)
    }
}
