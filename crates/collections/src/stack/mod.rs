//! Stack family: an unbounded [`Stack`] and capacity-bounded variants.
//!
//! Bounded stacks track an occupied weight next to their capacity. The
//! weight of each element comes from a [`WeightOf`] capability chosen at
//! construction; [`UnitWeight`] counts every element as 1.
//!
//! Capacity is enforced strictly at push time: a push that would exceed the
//! capacity is rejected (returns `false`) and leaves the stack untouched, so
//! `0 <= occupied <= capacity` holds after every call.

mod dynamic;
mod linked;
mod weighted;

pub use dynamic::DynamicWeightedStack;
pub use linked::{Iter, Stack};
pub use weighted::{LimitedCapacityStack, WeightedStack};

use crate::error::{ErrorSeverity, GameError};

/// Computes how much capacity an element consumes.
pub trait WeightOf<T> {
    fn weight_of(&self, value: &T) -> u32;
}

/// Every element weighs 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UnitWeight;

impl<T> WeightOf<T> for UnitWeight {
    fn weight_of(&self, _value: &T) -> u32 {
        1
    }
}

impl<T, F> WeightOf<T> for F
where
    F: Fn(&T) -> u32,
{
    fn weight_of(&self, value: &T) -> u32 {
        self(value)
    }
}

/// Common interface for capacity-bounded stacks.
pub trait BoundedStack<T> {
    /// Pushes `value` on top if it fits. Returns `false` (and changes nothing)
    /// when it does not.
    fn push(&mut self, value: T) -> bool;

    /// Removes the top element, releasing its weight.
    fn pop(&mut self) -> Option<T>;

    fn peek(&self) -> Option<&T>;

    /// Number of elements held.
    fn len(&self) -> usize;

    /// Sum of the weights of every element held.
    fn occupied(&self) -> u32;

    fn capacity(&self) -> u32;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_full(&self) -> bool {
        self.occupied() >= self.capacity()
    }

    /// Returns true if an element of `weight` would fit.
    fn can_push(&self, weight: u32) -> bool {
        self.occupied()
            .checked_add(weight)
            .is_some_and(|total| total <= self.capacity())
    }

    fn available(&self) -> u32 {
        self.capacity().saturating_sub(self.occupied())
    }
}

/// Errors raised by stack operations that cannot be expressed as a rejected push.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StackError {
    /// Shrinking below the currently occupied weight.
    #[error(
        "The stack cannot be shrunk to {requested} while {occupied} is occupied. Remove some elements first, then retry shrinking"
    )]
    CannotShrink { occupied: u32, requested: u32 },
}

impl GameError for StackError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::CannotShrink { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CannotShrink { .. } => "STACK_CANNOT_SHRINK",
        }
    }
}
