//! This module defines the `MachineTable` type, a complete transition table for one
//! machine, along with its standard text representation. The text format follows the
//! bbchallenge.org convention: one `_`-separated group per state, one three-character
//! `{symbol}{direction}{state}` code per tape symbol, with `Z` as the halt state.

use crate::codec::Codec;
use crate::types::{BeaverError, Direction, OutputCode, Shape, State, Symbol};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// An ordered transition table: one packed output code per (state, symbol)
/// input pair, in input-index order. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineTable {
    shape: Shape,
    cells: Vec<OutputCode>,
}

impl MachineTable {
    /// Builds a table from raw cells. The cell count must match the shape's
    /// input space.
    pub fn new(shape: Shape, cells: Vec<OutputCode>) -> Result<Self, BeaverError> {
        let expected = Codec::new(shape).input_count();
        if cells.len() != expected {
            return Err(BeaverError::ValidationError(format!(
                "shape {} needs {} transitions, got {}",
                shape,
                expected,
                cells.len()
            )));
        }

        Ok(Self { shape, cells })
    }

    /// The all-zero table: every transition decodes to (left, blank, state 0).
    pub fn zeroed(shape: Shape) -> Self {
        let cells = vec![0; Codec::new(shape).input_count()];
        Self { shape, cells }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn cells(&self) -> &[OutputCode] {
        &self.cells
    }

    /// The output code for one (state, symbol) input pair.
    pub fn cell(&self, state: State, symbol: Symbol) -> OutputCode {
        self.cells[Codec::new(self.shape).input_index(state, symbol)]
    }
}

/// Renders one decoded transition as its three-character text code.
fn write_transition(
    f: &mut Formatter,
    direction: Direction,
    symbol: Symbol,
    next_state: State,
    halt_state: State,
) -> std::fmt::Result {
    let symbol_char = char::from_digit(symbol as u32, 36)
        .map(|c| c.to_ascii_uppercase())
        .unwrap_or('?');
    let state_char = if next_state == halt_state {
        'Z'
    } else {
        char::from_u32('A' as u32 + next_state).unwrap_or('?')
    };

    write!(f, "{}{}{}", symbol_char, direction, state_char)
}

impl Display for MachineTable {
    /// Standard text rendering, e.g. `1RB1LZ_0LA1RA` for a 2x2 machine.
    /// Shapes beyond 25 states or 36 symbols have no text form and render `?`
    /// placeholders.
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let codec = Codec::new(self.shape);

        for state in 0..self.shape.states {
            if state > 0 {
                write!(f, "_")?;
            }
            for symbol in 0..self.shape.symbols {
                let code = self.cells[codec.input_index(state, symbol as Symbol)];
                let (direction, written, next_state) = codec.decode(code);
                write_transition(f, direction, written, next_state, codec.halt_state())?;
            }
        }

        Ok(())
    }
}

impl FromStr for MachineTable {
    type Err = BeaverError;

    /// Parses standard machine text. The shape is inferred: one state per
    /// `_`-separated group, one symbol per three-character code.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let groups: Vec<&str> = text.split('_').collect();
        let states = groups.len() as u32;

        let first_len = groups[0].chars().count();
        if first_len == 0 || first_len % 3 != 0 {
            return Err(BeaverError::ParseError(format!(
                "machine text group {:?} is not a sequence of 3-character transitions",
                groups[0]
            )));
        }
        let symbols = (first_len / 3) as u32;

        let shape = Shape::new(states, symbols);
        let codec = Codec::new(shape);
        let mut cells = Vec::with_capacity(codec.input_count());

        for group in &groups {
            let chars: Vec<char> = group.chars().collect();
            if chars.len() != first_len {
                return Err(BeaverError::ParseError(format!(
                    "machine text groups differ in length: {:?} vs {:?}",
                    groups[0], group
                )));
            }

            for code_chars in chars.chunks(3) {
                cells.push(parse_transition(code_chars, &codec)?);
            }
        }

        MachineTable::new(shape, cells)
    }
}

/// Parses one `{symbol}{direction}{state}` code into a packed output code.
fn parse_transition(chars: &[char], codec: &Codec) -> Result<OutputCode, BeaverError> {
    let symbol = chars[0]
        .to_digit(36)
        .filter(|&s| s < codec.shape().symbols)
        .ok_or_else(|| {
            BeaverError::ParseError(format!("bad written symbol {:?}", chars[0]))
        })? as Symbol;

    let direction = match chars[1].to_ascii_uppercase() {
        'L' => Direction::Left,
        'R' => Direction::Right,
        other => {
            return Err(BeaverError::ParseError(format!("bad direction {other:?}")));
        }
    };

    let next_state = match chars[2].to_ascii_uppercase() {
        'Z' => codec.halt_state(),
        c @ 'A'..='Y' => {
            let state = c as State - 'A' as State;
            if state >= codec.shape().states {
                return Err(BeaverError::ParseError(format!(
                    "state {c:?} is out of range for {} states",
                    codec.shape().states
                )));
            }
            state
        }
        other => {
            return Err(BeaverError::ParseError(format!("bad next state {other:?}")));
        }
    };

    Ok(codec.encode(direction, symbol, next_state))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_table() {
        let table = MachineTable::zeroed(Shape::new(2, 2));
        assert_eq!(table.cells(), &[0, 0, 0, 0]);
        assert_eq!(table.to_string(), "0LA0LA_0LA0LA");
    }

    #[test]
    fn test_new_rejects_wrong_cell_count() {
        let result = MachineTable::new(Shape::new(2, 2), vec![0, 0, 0]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cell_lookup() {
        let codec = Codec::new(Shape::new(2, 2));
        let cells = vec![
            codec.encode(Direction::Right, 1, 1),
            codec.encode(Direction::Left, 0, 2),
            codec.encode(Direction::Left, 1, 0),
            codec.encode(Direction::Right, 0, 1),
        ];
        let table = MachineTable::new(Shape::new(2, 2), cells.clone()).unwrap();

        assert_eq!(table.cell(0, 0), cells[0]);
        assert_eq!(table.cell(0, 1), cells[1]);
        assert_eq!(table.cell(1, 0), cells[2]);
        assert_eq!(table.cell(1, 1), cells[3]);
    }

    #[test]
    fn test_parse_busy_beaver_two() {
        // The 2-state 2-symbol champion: halts after 6 steps.
        let table: MachineTable = "1RB1LB_1LA1RZ".parse().unwrap();
        assert_eq!(table.shape(), Shape::new(2, 2));

        let codec = Codec::new(table.shape());
        let (direction, written, next) = codec.decode(table.cell(0, 0));
        assert_eq!((direction, written, next), (Direction::Right, 1, 1));

        let (_, _, next) = codec.decode(table.cell(1, 1));
        assert_eq!(next, codec.halt_state());
    }

    #[test]
    fn test_display_parse_round_trip() {
        let text = "1RB1LZ_0LA1RA";
        let table: MachineTable = text.parse().unwrap();
        assert_eq!(table.to_string(), text);

        let again: MachineTable = table.to_string().parse().unwrap();
        assert_eq!(again, table);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("not a machine".parse::<MachineTable>().is_err());
        // Direction must be L or R.
        assert!("1XB1LB".parse::<MachineTable>().is_err());
        // State C does not exist in a 2-state machine.
        assert!("1RC1LB_1LA1RZ".parse::<MachineTable>().is_err());
        // Symbol 2 does not exist in a 2-symbol machine.
        assert!("2RB1LB_1LA1RZ".parse::<MachineTable>().is_err());
        // Mismatched group lengths.
        assert!("1RB1LB_1LA".parse::<MachineTable>().is_err());
    }
}
