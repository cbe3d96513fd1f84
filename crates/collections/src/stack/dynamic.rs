//! Weighted stack with a resizable capacity.

use std::fmt;

use super::{BoundedStack, Iter, StackError, UnitWeight, WeightOf, WeightedStack};

/// A [`WeightedStack`] whose capacity can be changed on demand.
///
/// Growing always succeeds. Shrinking is refused while the occupied weight
/// exceeds the requested capacity.
pub struct DynamicWeightedStack<T, W = UnitWeight> {
    inner: WeightedStack<T, W>,
}

impl<T> DynamicWeightedStack<T, UnitWeight> {
    pub fn new(capacity: u32) -> Self {
        Self {
            inner: WeightedStack::new(capacity),
        }
    }
}

impl<T, W: WeightOf<T>> DynamicWeightedStack<T, W> {
    pub fn with_weigher(capacity: u32, weigher: W) -> Self {
        Self {
            inner: WeightedStack::with_weigher(capacity, weigher),
        }
    }

    /// Changes the capacity limit of the stack.
    pub fn resize(&mut self, new_capacity: u32) -> Result<(), StackError> {
        let occupied = self.inner.occupied();
        if occupied > new_capacity {
            return Err(StackError::CannotShrink {
                occupied,
                requested: new_capacity,
            });
        }

        tracing::debug!(
            from = self.inner.capacity(),
            to = new_capacity,
            occupied,
            "stack resized"
        );
        self.inner.set_capacity(new_capacity);
        Ok(())
    }

    pub fn weight_of(&self, value: &T) -> u32 {
        self.inner.weight_of(value)
    }

    /// Iterates from top to bottom.
    pub fn iter(&self) -> Iter<'_, T> {
        self.inner.iter()
    }
}

impl<T, W: WeightOf<T>> BoundedStack<T> for DynamicWeightedStack<T, W> {
    fn push(&mut self, value: T) -> bool {
        self.inner.push(value)
    }

    fn pop(&mut self) -> Option<T> {
        self.inner.pop()
    }

    fn peek(&self) -> Option<&T> {
        self.inner.peek()
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn occupied(&self) -> u32 {
        self.inner.occupied()
    }

    fn capacity(&self) -> u32 {
        self.inner.capacity()
    }
}

impl<T: fmt::Debug, W> fmt::Debug for DynamicWeightedStack<T, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DynamicWeightedStack")
            .field(&self.inner)
            .finish()
    }
}
