//! This module holds the step-bound table: the caller-supplied mapping from machine
//! configuration to the maximum number of steps a simulation is given before its
//! machine is declared non-halting. Bounds are configuration data, not something the
//! core derives or verifies; uncertain entries are flagged rather than corrected.

use crate::types::{BeaverError, Shape};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The step bound for one configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepBound {
    /// A known maximum halting step count for the shape. Any machine of the
    /// shape that halts does so within this many steps.
    Trusted(u64),
    /// A bound recorded in the source material with an explicit note of
    /// uncertainty. Running with it risks misreporting halting machines as
    /// non-halting; callers must opt in.
    Unverified(u64),
    /// No known or assumed bound. The caller must decide whether to run the
    /// shape at all, and with what budget.
    Unknown,
}

impl StepBound {
    /// The concrete step count, if one is recorded at all.
    pub fn steps(self) -> Option<u64> {
        match self {
            StepBound::Trusted(steps) | StepBound::Unverified(steps) => Some(steps),
            StepBound::Unknown => None,
        }
    }

    pub fn is_trusted(self) -> bool {
        matches!(self, StepBound::Trusted(_))
    }
}

lazy_static::lazy_static! {
    /// Known and assumed maximum-step values, per shape.
    ///
    /// These are the classic Busy Beaver step counts where settled, carried
    /// over from the source material together with its own caveats: the
    /// 1-symbol entry was annotated as not actually verified there, and every
    /// configuration it padded with a 10000-step placeholder is `Unknown`
    /// here instead of a silent guess.
    static ref KNOWN_BOUNDS: HashMap<Shape, StepBound> = {
        let mut bounds = HashMap::new();

        bounds.insert(Shape::new(1, 1), StepBound::Unverified(1));

        bounds.insert(Shape::new(1, 2), StepBound::Trusted(1));
        bounds.insert(Shape::new(2, 2), StepBound::Trusted(6));
        bounds.insert(Shape::new(3, 2), StepBound::Trusted(21));
        bounds.insert(Shape::new(4, 2), StepBound::Trusted(107));

        // A 1-state machine either halts on its very first transition or
        // loops in state 0 forever, whatever the symbol count.
        bounds.insert(Shape::new(1, 3), StepBound::Trusted(1));
        bounds.insert(Shape::new(2, 3), StepBound::Trusted(38));
        bounds.insert(Shape::new(1, 4), StepBound::Trusted(1));
        bounds.insert(Shape::new(1, 5), StepBound::Trusted(1));
        bounds.insert(Shape::new(1, 6), StepBound::Trusted(1));

        bounds
    };
}

/// An injectable shape-to-bound mapping. Start from [`BoundTable::known`] or
/// [`BoundTable::empty`] and override entries as needed; shapes without an
/// entry resolve to [`StepBound::Unknown`].
#[derive(Debug, Clone, Default)]
pub struct BoundTable {
    bounds: HashMap<Shape, StepBound>,
}

impl BoundTable {
    /// A table with no entries at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in table of known/assumed Busy Beaver bounds.
    pub fn known() -> Self {
        Self {
            bounds: KNOWN_BOUNDS.clone(),
        }
    }

    /// The recorded bound for a shape, `Unknown` if none is recorded.
    pub fn get(&self, shape: Shape) -> StepBound {
        self.bounds.get(&shape).copied().unwrap_or(StepBound::Unknown)
    }

    /// Records or overrides the bound for a shape.
    pub fn set(&mut self, shape: Shape, bound: StepBound) -> &mut Self {
        self.bounds.insert(shape, bound);
        self
    }

    /// Resolves the step budget to actually run a shape with.
    ///
    /// Trusted bounds resolve directly. Unverified bounds resolve only when
    /// `allow_unverified` is set, otherwise they error so the caller cannot
    /// run on a doubtful bound by accident. Unknown bounds always error; the
    /// caller must supply an explicit budget instead.
    pub fn resolve(&self, shape: Shape, allow_unverified: bool) -> Result<u64, BeaverError> {
        match self.get(shape) {
            StepBound::Trusted(steps) => Ok(steps),
            StepBound::Unverified(steps) if allow_unverified => Ok(steps),
            StepBound::Unverified(_) => Err(BeaverError::UnverifiedBound(shape)),
            StepBound::Unknown => Err(BeaverError::UnknownBound(shape)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_two_symbol_bounds() {
        let table = BoundTable::known();

        assert_eq!(table.get(Shape::new(1, 2)), StepBound::Trusted(1));
        assert_eq!(table.get(Shape::new(2, 2)), StepBound::Trusted(6));
        assert_eq!(table.get(Shape::new(3, 2)), StepBound::Trusted(21));
        assert_eq!(table.get(Shape::new(4, 2)), StepBound::Trusted(107));
    }

    #[test]
    fn test_unrecorded_shape_is_unknown() {
        let table = BoundTable::known();
        assert_eq!(table.get(Shape::new(5, 2)), StepBound::Unknown);
        assert_eq!(table.get(Shape::new(3, 3)), StepBound::Unknown);
    }

    #[test]
    fn test_one_symbol_bound_is_unverified() {
        let table = BoundTable::known();
        assert_eq!(table.get(Shape::new(1, 1)), StepBound::Unverified(1));
    }

    #[test]
    fn test_resolve_trusted() {
        let table = BoundTable::known();
        assert_eq!(table.resolve(Shape::new(2, 2), false).unwrap(), 6);
    }

    #[test]
    fn test_resolve_unverified_requires_opt_in() {
        let table = BoundTable::known();
        let shape = Shape::new(1, 1);

        assert_eq!(
            table.resolve(shape, false),
            Err(BeaverError::UnverifiedBound(shape))
        );
        assert_eq!(table.resolve(shape, true).unwrap(), 1);
    }

    #[test]
    fn test_resolve_unknown_always_errors() {
        let table = BoundTable::known();
        let shape = Shape::new(6, 2);

        assert_eq!(
            table.resolve(shape, true),
            Err(BeaverError::UnknownBound(shape))
        );
    }

    #[test]
    fn test_override_entry() {
        let mut table = BoundTable::known();
        table.set(Shape::new(5, 2), StepBound::Trusted(47_176_870));

        assert_eq!(table.resolve(Shape::new(5, 2), false).unwrap(), 47_176_870);
    }

    #[test]
    fn test_steps_accessor() {
        assert_eq!(StepBound::Trusted(6).steps(), Some(6));
        assert_eq!(StepBound::Unverified(1).steps(), Some(1));
        assert_eq!(StepBound::Unknown.steps(), None);
        assert!(StepBound::Trusted(6).is_trusted());
        assert!(!StepBound::Unverified(1).is_trusted());
    }
}
