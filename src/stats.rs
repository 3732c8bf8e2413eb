//! This module implements the streaming statistics aggregator: running halting and
//! non-halting counters plus the derived halting percentage. It holds running totals
//! only and never buffers per-machine results.

use crate::types::{MachineRecord, RunOutcome, Shape, Summary};

/// Running halting statistics, shared across every machine observed so far.
///
/// One `Stats` value typically spans multiple configurations, so the running
/// percentage in each emitted record is cumulative over the whole run, not
/// just the current shape.
#[derive(Debug, Clone, Default)]
pub struct Stats {
    halting: u64,
    non_halting: u64,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one simulation result into the counters and returns the record
    /// to emit for that machine, carrying the running halting percentage at
    /// this point of the stream.
    pub fn observe(&mut self, shape: Shape, machine_id: u128, outcome: RunOutcome) -> MachineRecord {
        if outcome.halted() {
            self.halting += 1;
        } else {
            self.non_halting += 1;
        }

        MachineRecord {
            state_count: shape.states,
            symbol_count: shape.symbols,
            machine_id,
            steps_to_halt: outcome.steps_field(),
            halting_probability: self.halting_probability(),
        }
    }

    pub fn halting(&self) -> u64 {
        self.halting
    }

    pub fn non_halting(&self) -> u64 {
        self.non_halting
    }

    /// Total number of machines observed.
    pub fn total(&self) -> u64 {
        self.halting + self.non_halting
    }

    /// `100 x halting / (halting + nonhalting)`, or 0 before any observation.
    pub fn halting_probability(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            (100.0 * self.halting as f64) / self.total() as f64
        }
    }

    /// The final aggregate for reporting after all runs complete.
    pub fn summary(&self) -> Summary {
        Summary {
            halting: self.halting,
            non_halting: self.non_halting,
            halting_probability: self.halting_probability(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHAPE: Shape = Shape { states: 1, symbols: 2 };

    #[test]
    fn test_counters_and_probability() {
        let mut stats = Stats::new();
        assert_eq!(stats.halting_probability(), 0.0);

        let record = stats.observe(SHAPE, 0, RunOutcome::Halted(1));
        assert_eq!(record.halting_probability, 100.0);
        assert_eq!(record.steps_to_halt, 1);

        let record = stats.observe(SHAPE, 1, RunOutcome::DidNotHalt);
        assert_eq!(record.halting_probability, 50.0);
        assert_eq!(record.steps_to_halt, -1);

        assert_eq!(stats.halting(), 1);
        assert_eq!(stats.non_halting(), 1);
        assert_eq!(stats.total(), 2);
    }

    #[test]
    fn test_probability_moves_with_latest_outcome() {
        let mut stats = Stats::new();
        let mut previous = stats.halting_probability();

        let outcomes = [
            RunOutcome::Halted(3),
            RunOutcome::DidNotHalt,
            RunOutcome::DidNotHalt,
            RunOutcome::Halted(1),
            RunOutcome::Halted(2),
        ];

        for (i, outcome) in outcomes.into_iter().enumerate() {
            let record = stats.observe(SHAPE, i as u128, outcome);
            let current = record.halting_probability;

            assert!((0.0..=100.0).contains(&current));
            if outcome.halted() {
                assert!(current >= previous);
            } else {
                assert!(current <= previous);
            }
            previous = current;
        }
    }

    #[test]
    fn test_record_carries_shape_and_id() {
        let mut stats = Stats::new();
        let shape = Shape::new(4, 2);
        let record = stats.observe(shape, 12345, RunOutcome::Halted(107));

        assert_eq!(record.state_count, 4);
        assert_eq!(record.symbol_count, 2);
        assert_eq!(record.machine_id, 12345);
        assert_eq!(record.steps_to_halt, 107);
    }

    #[test]
    fn test_summary() {
        let mut stats = Stats::new();
        stats.observe(SHAPE, 0, RunOutcome::Halted(1));
        stats.observe(SHAPE, 1, RunOutcome::DidNotHalt);
        stats.observe(SHAPE, 2, RunOutcome::DidNotHalt);
        stats.observe(SHAPE, 3, RunOutcome::DidNotHalt);

        let summary = stats.summary();
        assert_eq!(summary.halting, 1);
        assert_eq!(summary.non_halting, 3);
        assert_eq!(summary.halting_probability, 25.0);
    }
}
