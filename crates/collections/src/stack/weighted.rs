//! Fixed-capacity stacks.

use std::fmt;

use super::{BoundedStack, Stack, UnitWeight, WeightOf};

/// A stack that stops receiving elements once their summed weight would
/// exceed a fixed capacity.
pub struct WeightedStack<T, W = UnitWeight> {
    items: Stack<T>,
    capacity: u32,
    occupied: u32,
    weigher: W,
}

/// A stack bounded by element count: every element weighs 1.
pub type LimitedCapacityStack<T> = WeightedStack<T, UnitWeight>;

impl<T> WeightedStack<T, UnitWeight> {
    /// Creates a stack where every element weighs 1.
    pub fn new(capacity: u32) -> Self {
        Self::with_weigher(capacity, UnitWeight)
    }
}

impl<T, W: WeightOf<T>> WeightedStack<T, W> {
    /// Creates a stack that weighs each element with `weigher`.
    pub fn with_weigher(capacity: u32, weigher: W) -> Self {
        Self {
            items: Stack::new(),
            capacity,
            occupied: 0,
            weigher,
        }
    }

    /// Weight `value` would consume if pushed.
    pub fn weight_of(&self, value: &T) -> u32 {
        self.weigher.weight_of(value)
    }

    /// Iterates from top to bottom.
    pub fn iter(&self) -> super::Iter<'_, T> {
        self.items.iter()
    }

    pub(super) fn set_capacity(&mut self, capacity: u32) {
        self.capacity = capacity;
    }
}

impl<T, W: WeightOf<T>> BoundedStack<T> for WeightedStack<T, W> {
    fn push(&mut self, value: T) -> bool {
        let weight = self.weigher.weight_of(&value);
        if !self.can_push(weight) {
            tracing::trace!(
                weight,
                occupied = self.occupied,
                capacity = self.capacity,
                "push rejected"
            );
            return false;
        }

        self.items.push(value);
        self.occupied += weight;
        true
    }

    fn pop(&mut self) -> Option<T> {
        let value = self.items.pop()?;
        let weight = self.weigher.weight_of(&value);
        self.occupied = self.occupied.saturating_sub(weight);
        Some(value)
    }

    fn peek(&self) -> Option<&T> {
        self.items.peek()
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn occupied(&self) -> u32 {
        self.occupied
    }

    fn capacity(&self) -> u32 {
        self.capacity
    }
}

impl<T: fmt::Debug, W> fmt::Debug for WeightedStack<T, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeightedStack")
            .field("capacity", &self.capacity)
            .field("occupied", &self.occupied)
            .field("items", &self.items)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Crate {
        name: &'static str,
        weight: u32,
    }

    fn crate_weight(value: &Crate) -> u32 {
        value.weight
    }

    #[test]
    fn limited_capacity_rejects_when_full() {
        let mut stack = LimitedCapacityStack::new(3);
        assert!(stack.push('a'));
        assert!(stack.push('b'));
        assert!(stack.push('c'));

        assert!(stack.is_full());
        assert!(!stack.can_push(1));
        assert!(!stack.push('d'));
        assert_eq!(stack.len(), 3);
        assert_eq!(stack.peek(), Some(&'c'));
    }

    #[test]
    fn popping_makes_room() {
        let mut stack = LimitedCapacityStack::new(2);
        stack.push(1);
        stack.push(2);

        assert_eq!(stack.pop(), Some(2));
        assert!(!stack.is_full());
        assert!(stack.push(3));
    }

    #[test]
    fn pop_on_empty_is_none() {
        let mut stack: LimitedCapacityStack<u8> = LimitedCapacityStack::new(1);
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.occupied(), 0);
    }

    #[test]
    fn weighs_elements_with_closure() {
        let mut stack = WeightedStack::with_weigher(10, crate_weight);

        assert!(stack.push(Crate { name: "Foo", weight: 3 }));
        assert!(stack.push(Crate { name: "Bar", weight: 4 }));
        assert!(stack.push(Crate { name: "Baz", weight: 2 }));
        assert_eq!(stack.occupied(), 9);

        // 9 + 5 > 10
        assert!(!stack.push(Crate { name: "Qux", weight: 5 }));
        assert_eq!(stack.occupied(), 9);
        assert!(!stack.is_full());
        assert_eq!(stack.available(), 1);

        assert_eq!(stack.pop().map(|c| c.name), Some("Baz"));
        assert_eq!(stack.occupied(), 7);
    }

    #[test]
    fn occupied_stays_within_capacity() {
        let mut stack = WeightedStack::with_weigher(7, |value: &u32| *value);
        let script: [u32; 11] = [3, 0, 4, 2, 0, 0, 1, 5, 0, 6, 1];

        for step in script {
            if step == 0 {
                stack.pop();
            } else {
                stack.push(step);
            }
            assert!(stack.occupied() <= stack.capacity());
            let summed: u32 = stack.iter().sum();
            assert_eq!(stack.occupied(), summed);
        }
    }

    #[test]
    fn can_push_does_not_overflow() {
        let mut stack = WeightedStack::with_weigher(u32::MAX, |value: &u32| *value);
        assert!(stack.push(u32::MAX));

        assert!(stack.is_full());
        assert!(!stack.can_push(1));
        assert!(!stack.push(1));
    }
}
