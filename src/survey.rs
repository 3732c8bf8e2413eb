//! This module couples the enumerator, the simulator, and the statistics
//! aggregator into the survey loop for one configuration: every transition table
//! of the shape is simulated once, in enumeration order, and each result is
//! folded into the running statistics and emitted to a record sink.

use crate::enumerator::Enumerator;
use crate::machine::TuringMachine;
use crate::stats::Stats;
use crate::types::{BeaverError, Shape};
use crate::writer::RecordSink;

/// Exhaustively surveys one shape with the given step budget.
///
/// The `stats` value is shared across calls on purpose: passing the same one
/// for several shapes reproduces a cumulative halting percentage over the
/// whole run. A single machine is reused across all tables of the shape, so
/// the tape is allocated once.
///
/// # Returns
///
/// The number of machines enumerated, which is always `outputs ^ inputs` for
/// the shape.
pub fn survey_shape(
    shape: Shape,
    step_bound: u64,
    stats: &mut Stats,
    sink: &mut dyn RecordSink,
) -> Result<u128, BeaverError> {
    let mut enumerator = Enumerator::new(shape)?;
    let mut machine = TuringMachine::new(enumerator.table(), step_bound);

    loop {
        let outcome = machine.run();
        let record = stats.observe(shape, enumerator.index(), outcome);
        sink.emit(&record)?;

        if !enumerator.advance() {
            break;
        }
        machine.load(enumerator.table());
    }

    Ok(enumerator.index())
}
