//! This module implements the exhaustive machine enumerator: an explicit odometer
//! over the full transition-table space of one configuration. The table itself is
//! the counter, treated as a mixed-radix number with the output-space size as its
//! base and the lowest input index as the fastest-changing digit.

use crate::codec::Codec;
use crate::table::MachineTable;
use crate::types::{BeaverError, OutputCode, Shape};

/// Enumerates every distinct transition table of a shape exactly once, in a
/// fixed total order starting from the all-zero table.
///
/// The 0-based visitation index identifies each machine for reporting; it has
/// no meaning beyond positional order, and [`Enumerator::table_at`] recovers
/// any table directly from its index without replaying the odometer.
pub struct Enumerator {
    codec: Codec,
    cells: Vec<OutputCode>,
    index: u128,
    exhausted: bool,
}

impl Enumerator {
    /// Creates an enumerator positioned at the all-zero table.
    ///
    /// Symbol counts that are not powers of two are rejected: their packed
    /// code space has gaps, so counting through `0..output_count` would visit
    /// codes that decode to no valid transition.
    pub fn new(shape: Shape) -> Result<Self, BeaverError> {
        check_dense(shape)?;
        let codec = Codec::new(shape);

        Ok(Self {
            cells: vec![0; codec.input_count()],
            codec,
            index: 0,
            exhausted: false,
        })
    }

    pub fn shape(&self) -> Shape {
        self.codec.shape()
    }

    /// The visitation index of the current table. Once the enumeration is
    /// exhausted this equals the total machine count.
    pub fn index(&self) -> u128 {
        self.index
    }

    /// Whether every table has been visited.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// The current transition table's cells.
    pub fn cells(&self) -> &[OutputCode] {
        &self.cells
    }

    /// An owned copy of the current table.
    pub fn table(&self) -> MachineTable {
        // Construction cannot fail: the cell count is the shape's input count.
        MachineTable::new(self.shape(), self.cells.clone()).unwrap_or_else(|_| unreachable!())
    }

    /// Advances the odometer to the next table: increments the lowest input
    /// index and carries into higher cells on overflow.
    ///
    /// # Returns
    ///
    /// * `true` if a fresh, unvisited table is now current.
    /// * `false` once every cell has wrapped, i.e. after exactly
    ///   `outputs ^ inputs` tables.
    pub fn advance(&mut self) -> bool {
        if self.exhausted {
            return false;
        }

        self.index += 1;
        let max_code = self.codec.output_count() - 1;
        for cell in self.cells.iter_mut() {
            if *cell == max_code {
                *cell = 0;
            } else {
                *cell += 1;
                return true;
            }
        }

        self.exhausted = true;
        false
    }

    /// Decodes an enumeration index directly into its table, without stepping
    /// the odometer: the index is read as a mixed-radix number whose digits
    /// are the table cells, least significant first.
    pub fn table_at(shape: Shape, index: u128) -> Result<MachineTable, BeaverError> {
        check_dense(shape)?;
        let codec = Codec::new(shape);
        let radix = codec.output_count() as u128;

        let mut cells = Vec::with_capacity(codec.input_count());
        let mut rest = index;
        for _ in 0..codec.input_count() {
            cells.push((rest % radix) as OutputCode);
            rest /= radix;
        }

        if rest != 0 {
            return Err(BeaverError::ValidationError(format!(
                "index {index} is out of range for shape {shape}"
            )));
        }

        MachineTable::new(shape, cells)
    }
}

impl Iterator for Enumerator {
    type Item = MachineTable;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let table = self.table();
        self.advance();
        Some(table)
    }
}

/// Rejects shapes whose packed output codes are not contiguous.
fn check_dense(shape: Shape) -> Result<(), BeaverError> {
    if !shape.symbols.is_power_of_two() {
        return Err(BeaverError::ValidationError(format!(
            "cannot enumerate shape {shape}: symbol count must be a power of two"
        )));
    }

    Ok(())
}
