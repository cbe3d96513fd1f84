//! Keyed collection with lifecycle notifications.
//!
//! [`IndexedCollection`] stores elements under a key each element provides
//! through [`Keyed`]. Lookup is by key; [`IndexedCollection::get_all`] and
//! [`IndexedCollection::iter`] preserve insertion order.
//!
//! Mutations can be routed through a [`CollectionObserver`]. The observer is
//! the fixed set of lifecycle hooks (before/after add, remove, remove-all):
//! `before_*` hooks may veto the mutation by returning an error, `after_*`
//! hooks see the result. Hooks run synchronously, in this order:
//!
//! ```text
//! validate keys → before_add → insert → after_add
//! lookup        → before_remove → delete → after_remove
//! before_remove_all → clear → after_remove_all
//! ```
//!
//! A vetoed mutation leaves the collection untouched.

use std::collections::{HashMap, HashSet};

use crate::error::{ErrorSeverity, GameError};

/// Provides the key an element is indexed under.
pub trait Keyed {
    fn key(&self) -> &str;
}

/// Errors raised by [`IndexedCollection`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CollectionError {
    /// An element with this key is already stored (or appears twice in a batch).
    #[error("An item already exists with key: {key}")]
    DuplicateKey { key: String },
}

impl GameError for CollectionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::DuplicateKey { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateKey { .. } => "COLLECTION_DUPLICATE_KEY",
        }
    }
}

/// Lifecycle hooks invoked around collection mutations.
///
/// All hooks default to no-ops, so implementors only override what they need.
/// `Error` must absorb [`CollectionError`] because key validation runs before
/// `before_add` and reports through the same channel.
pub trait CollectionObserver<T> {
    type Error: From<CollectionError>;

    /// Called with the whole batch before anything is inserted.
    fn before_add(&mut self, _items: &[T]) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called once the whole batch has been inserted.
    fn after_add(&mut self, _items: &[&T]) {}

    /// Called with the stored element before it is deleted.
    fn before_remove(&mut self, _item: &T) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called with the element that was deleted.
    fn after_remove(&mut self, _item: &T) {}

    fn before_remove_all(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called with every deleted element, in insertion order.
    fn after_remove_all(&mut self, _removed: &[T]) {}
}

/// Observer that accepts every mutation and ignores every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl<T> CollectionObserver<T> for NoopObserver {
    type Error = CollectionError;
}

/// A mapping from each element's key to the element.
#[derive(Clone, Debug)]
pub struct IndexedCollection<T> {
    entries: HashMap<String, T>,
    order: Vec<String>,
}

impl<T: Keyed> Default for IndexedCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Keyed> IndexedCollection<T> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Builds a collection from existing elements with a single batch add.
    pub fn from_items(items: impl IntoIterator<Item = T>) -> Result<Self, CollectionError> {
        let mut collection = Self::new();
        collection.add(items)?;
        Ok(collection)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in insertion order.
    pub fn get_all_keys(&self) -> &[String] {
        &self.order
    }

    /// Iterates elements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.order.iter().filter_map(|key| self.entries.get(key))
    }

    /// All elements in insertion order.
    pub fn get_all(&self) -> Vec<&T> {
        self.iter().collect()
    }

    /// Elements matching `predicate`, in insertion order.
    pub fn filter<P>(&self, mut predicate: P) -> Vec<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().filter(|item| predicate(item)).collect()
    }

    /// Adds a batch of elements without lifecycle hooks.
    pub fn add(&mut self, items: impl IntoIterator<Item = T>) -> Result<(), CollectionError> {
        self.add_observed(&mut NoopObserver, items)
    }

    /// Adds a batch of elements, notifying `observer` before and after.
    ///
    /// Fails without inserting anything if any key is already present or
    /// repeated within the batch, or if `before_add` vetoes the batch.
    pub fn add_observed<O>(
        &mut self,
        observer: &mut O,
        items: impl IntoIterator<Item = T>,
    ) -> Result<(), O::Error>
    where
        O: CollectionObserver<T>,
    {
        let batch: Vec<T> = items.into_iter().collect();
        self.ensure_unique(&batch)?;
        observer.before_add(&batch)?;

        let keys: Vec<String> = batch.iter().map(|item| item.key().to_owned()).collect();
        for (key, item) in keys.iter().zip(batch) {
            self.order.push(key.clone());
            self.entries.insert(key.clone(), item);
        }

        let added: Vec<&T> = keys.iter().filter_map(|key| self.entries.get(key)).collect();
        observer.after_add(&added);
        Ok(())
    }

    /// Removes the element stored under `key`. Absent keys are a no-op.
    pub fn remove(&mut self, key: &str) -> Option<T> {
        self.take(key)
    }

    /// Removes the element stored under `key`, notifying `observer`.
    ///
    /// Absent keys are a no-op and fire no hooks.
    pub fn remove_observed<O>(&mut self, observer: &mut O, key: &str) -> Result<Option<T>, O::Error>
    where
        O: CollectionObserver<T>,
    {
        let Some(item) = self.entries.get(key) else {
            return Ok(None);
        };
        observer.before_remove(item)?;

        let Some(removed) = self.take(key) else {
            return Ok(None);
        };
        observer.after_remove(&removed);
        Ok(Some(removed))
    }

    /// Removes every element, returning them in insertion order.
    pub fn remove_all(&mut self) -> Vec<T> {
        self.drain()
    }

    /// Removes every element, notifying `observer`.
    pub fn remove_all_observed<O>(&mut self, observer: &mut O) -> Result<Vec<T>, O::Error>
    where
        O: CollectionObserver<T>,
    {
        observer.before_remove_all()?;
        let removed = self.drain();
        observer.after_remove_all(&removed);
        Ok(removed)
    }

    fn ensure_unique(&self, batch: &[T]) -> Result<(), CollectionError> {
        let mut seen = HashSet::with_capacity(batch.len());
        for item in batch {
            let key = item.key();
            if self.entries.contains_key(key) || !seen.insert(key) {
                return Err(CollectionError::DuplicateKey {
                    key: key.to_owned(),
                });
            }
        }
        Ok(())
    }

    fn take(&mut self, key: &str) -> Option<T> {
        let item = self.entries.remove(key)?;
        self.order.retain(|existing| existing != key);
        Some(item)
    }

    fn drain(&mut self) -> Vec<T> {
        let order = std::mem::take(&mut self.order);
        let mut entries = std::mem::take(&mut self.entries);
        order
            .iter()
            .filter_map(|key| entries.remove(key))
            .collect()
    }
}
