//! This crate implements a Busy Beaver enumeration: it exhaustively generates every
//! deterministic Turing machine of a configuration (state count x symbol count),
//! simulates each one within a caller-supplied step bound, and aggregates running
//! halting statistics. It includes modules for the packed transition encoding, the
//! bounded tape simulator, the odometer enumerator, the step-bound table, and the
//! record sinks that realize the output stream.

pub mod bounds;
pub mod codec;
pub mod enumerator;
pub mod machine;
pub mod stats;
pub mod survey;
pub mod table;
pub mod types;
pub mod writer;

/// Re-exports the `BoundTable` and `StepBound` types from the bounds module.
pub use bounds::{BoundTable, StepBound};
/// Re-exports the `Codec` struct from the codec module.
pub use codec::Codec;
/// Re-exports the `Enumerator` struct from the enumerator module.
pub use enumerator::Enumerator;
/// Re-exports the `TuringMachine` struct from the machine module.
pub use machine::TuringMachine;
/// Re-exports the `Stats` aggregator from the stats module.
pub use stats::Stats;
/// Re-exports the `survey_shape` driver from the survey module.
pub use survey::survey_shape;
/// Re-exports the `MachineTable` struct from the table module.
pub use table::MachineTable;
/// Re-exports various types related to machine configuration and execution from the types module.
pub use types::{
    BeaverError, Direction, MachineRecord, RunOutcome, Shape, Step, Summary, BLANK_SYMBOL,
};
/// Re-exports the record sinks from the writer module.
pub use writer::{CsvWriter, JsonLinesWriter, RecordSink};
