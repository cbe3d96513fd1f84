//! Unbounded last-in-first-out stack over an owned chain of nodes.

use std::fmt;

struct Node<T> {
    value: T,
    next: Option<Box<Node<T>>>,
}

/// A pile of elements from top to bottom.
///
/// Each node owns the next one; there are no back-references.
pub struct Stack<T> {
    top: Option<Box<Node<T>>>,
    len: usize,
}

impl<T> Stack<T> {
    pub const fn new() -> Self {
        Self { top: None, len: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the top element without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.top.as_deref().map(|node| &node.value)
    }

    /// Adds a value to the top of the stack.
    pub fn push(&mut self, value: T) {
        let node = Box::new(Node {
            value,
            next: self.top.take(),
        });
        self.top = Some(node);
        self.len += 1;
    }

    /// Removes the top element and returns it, or `None` on an empty stack.
    pub fn pop(&mut self) -> Option<T> {
        let node = self.top.take()?;
        let Node { value, next } = *node;
        self.top = next;
        self.len -= 1;
        Some(value)
    }

    /// Iterates from top to bottom.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.top.as_deref(),
        }
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Stack<T> {
    // Unlink iteratively so long chains don't recurse through Box drops.
    fn drop(&mut self) {
        let mut current = self.top.take();
        while let Some(mut node) = current {
            current = node.next.take();
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Top-to-bottom iterator over a [`Stack`].
pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();
        Some(&node.value)
    }
}
