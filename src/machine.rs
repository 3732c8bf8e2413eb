//! This module defines the `TuringMachine` struct, the bounded single-tape simulator.
//! It executes one machine, defined by an immutable transition table, on a fixed-size
//! double-ended tape until the machine halts or exhausts its step budget.

use crate::codec::Codec;
use crate::table::MachineTable;
use crate::types::{RunOutcome, State, Step, Symbol, BLANK_SYMBOL};

/// A bounded single-tape Turing machine.
///
/// The tape holds `2 * step_bound + 2` cells with the head starting at the
/// center, which is exactly enough that a run of `step_bound` steps cannot
/// walk off either end. The step bound is therefore a correctness input, not
/// just a budget: a bound smaller than the machine's true halting step count
/// misreports the machine as non-halting, and there is no cheaper recovery
/// than rerunning with a larger bound.
///
/// Simulation is a pure function of the transition table: the same table
/// always yields the same `run()` result. The machine mutates only its own
/// tape and run state.
pub struct TuringMachine {
    codec: Codec,
    table: MachineTable,
    tape: Vec<Symbol>,
    head: usize,
    state: State,
    step_count: u64,
    step_bound: u64,
}

impl TuringMachine {
    /// Creates a machine for the given table, with a blank tape sized for
    /// `step_bound` steps and the head at the center.
    pub fn new(table: MachineTable, step_bound: u64) -> Self {
        let codec = Codec::new(table.shape());
        let tape = vec![BLANK_SYMBOL; (2 * step_bound + 2) as usize];
        let head = tape.len() / 2;

        Self {
            codec,
            table,
            tape,
            head,
            state: 0,
            step_count: 0,
            step_bound,
        }
    }

    /// Executes a single transition: read the symbol under the head, look up
    /// the output code, write the new symbol, move the head one cell, and
    /// switch state.
    ///
    /// # Returns
    ///
    /// * `Step::Continue` if the machine is still in a live state.
    /// * `Step::Halted` if this transition entered the halt state.
    pub fn step(&mut self) -> Step {
        let symbol = self.tape[self.head];
        let code = self.table.cells()[self.codec.input_index(self.state, symbol)];
        let (direction, written, next_state) = self.codec.decode(code);

        self.tape[self.head] = written;
        self.head = self.head.wrapping_add_signed(direction.offset());
        self.state = next_state;
        self.step_count += 1;

        if next_state == self.codec.halt_state() {
            Step::Halted
        } else {
            Step::Continue
        }
    }

    /// Runs the machine until it halts or the step bound is exhausted.
    ///
    /// A machine that enters the halt state exactly on the final permitted
    /// step still reports its step count, not `DidNotHalt`.
    pub fn run(&mut self) -> RunOutcome {
        while self.step_count < self.step_bound {
            if self.step() == Step::Halted {
                return RunOutcome::Halted(self.step_count);
            }
        }

        RunOutcome::DidNotHalt
    }

    /// Resets the machine to its initial configuration: blank tape, head at
    /// the center, state 0, step count 0.
    pub fn reset(&mut self) {
        self.tape.fill(BLANK_SYMBOL);
        self.head = self.tape.len() / 2;
        self.state = 0;
        self.step_count = 0;
    }

    /// Replaces the transition table and resets the machine. The new table
    /// must have the same shape as the current one; this is what lets an
    /// enumeration reuse one machine instead of reallocating the tape per
    /// table.
    pub fn load(&mut self, table: MachineTable) {
        debug_assert_eq!(table.shape(), self.table.shape());
        self.table = table;
        self.reset();
    }

    /// Returns the current state of the machine.
    pub fn state(&self) -> State {
        self.state
    }

    /// Checks whether the machine has entered the halt state.
    pub fn is_halted(&self) -> bool {
        self.state == self.codec.halt_state()
    }

    /// Returns the number of steps executed so far.
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Returns the current head position as a tape index.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Returns the tape contents.
    pub fn tape(&self) -> &[Symbol] {
        &self.tape
    }

    /// Returns the transition table this machine is running.
    pub fn table(&self) -> &MachineTable {
        &self.table
    }
}
