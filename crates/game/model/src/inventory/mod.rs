//! Weight-bounded item storage.
//!
//! An [`Inventory`] keeps its items on a [`DynamicWeightedStack`] and indexes
//! them by id and by insertion position. Positions stay contiguous
//! (`0..len`): retrieving an item shifts every later item down by one.
//!
//! Capacity comes from a provider function owned by the caller and is
//! re-read on every capacity-dependent call. When it changes, the backing
//! stack is resized to the new value; a provider that reports less than the
//! occupied weight is refused and the previous capacity stays in effect.

mod error;

use std::collections::{HashMap, HashSet};
use std::fmt;

use game_collections::{BoundedStack, DynamicWeightedStack, Stack};

use crate::config::ModelConfig;
use crate::item::Item;

pub use error::InventoryError;

/// Reports the capacity an inventory should have right now.
pub type CapacityProvider = Box<dyn Fn() -> u32>;

type ItemWeight = fn(&Item) -> u32;

fn item_weight(item: &Item) -> u32 {
    item.weight()
}

#[derive(Clone, Debug)]
struct Slot {
    position: usize,
    item: Item,
}

/// A container of items bounded by total weight.
pub struct Inventory {
    capacity_provider: CapacityProvider,
    last_capacity: u32,
    contents: DynamicWeightedStack<Item, ItemWeight>,
    index: HashMap<String, Slot>,
    /// Item ids by position.
    positions: Vec<String>,
    occupied_capacity: u32,
}

impl Inventory {
    /// Creates an inventory with [`ModelConfig::DEFAULT_INVENTORY_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(ModelConfig::DEFAULT_INVENTORY_CAPACITY)
    }

    pub fn from_config(config: &ModelConfig) -> Self {
        Self::with_capacity(config.inventory_capacity)
    }

    /// Creates an inventory with a fixed capacity.
    pub fn with_capacity(capacity: u32) -> Self {
        Self::with_capacity_provider(move || capacity)
    }

    /// Creates an inventory whose capacity is re-read from `provider`.
    pub fn with_capacity_provider<F>(provider: F) -> Self
    where
        F: Fn() -> u32 + 'static,
    {
        let capacity = provider();
        Self {
            capacity_provider: Box::new(provider),
            last_capacity: capacity,
            contents: DynamicWeightedStack::with_weigher(capacity, item_weight as ItemWeight),
            index: HashMap::new(),
            positions: Vec::new(),
            occupied_capacity: 0,
        }
    }

    /// Current capacity, adopting any change reported by the provider.
    pub fn capacity(&mut self) -> Result<u32, InventoryError> {
        let capacity = (self.capacity_provider)();
        if capacity != self.last_capacity {
            if let Err(err) = self.contents.resize(capacity) {
                tracing::warn!(
                    reported = capacity,
                    kept = self.last_capacity,
                    occupied = self.occupied_capacity,
                    "capacity provider reported less than the occupied weight"
                );
                return Err(err.into());
            }
            tracing::debug!(from = self.last_capacity, to = capacity, "inventory resized");
            self.last_capacity = capacity;
        }
        Ok(capacity)
    }

    /// Capacity left for new items.
    pub fn available_space(&mut self) -> Result<u32, InventoryError> {
        Ok(self.capacity()?.saturating_sub(self.occupied_capacity))
    }

    pub fn is_full(&mut self) -> Result<bool, InventoryError> {
        Ok(self.available_space()? == 0)
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of items held.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Summed weight of every item held.
    pub fn occupied_capacity(&self) -> u32 {
        self.occupied_capacity
    }

    /// Stores `items` in order, each at the next free position.
    ///
    /// The whole batch is rejected, and nothing is stored, if any id is
    /// already present or repeated, or if the batch does not fit.
    pub fn put(&mut self, items: impl IntoIterator<Item = Item>) -> Result<(), InventoryError> {
        let batch: Vec<Item> = items.into_iter().collect();

        let mut seen = HashSet::with_capacity(batch.len());
        for item in &batch {
            if self.index.contains_key(item.id()) || !seen.insert(item.id()) {
                return Err(InventoryError::DuplicateItem {
                    id: item.id().to_owned(),
                });
            }
        }

        let requested: u64 = batch.iter().map(|item| u64::from(item.weight())).sum();
        let available = self.available_space()?;
        if requested > u64::from(available) {
            return Err(InventoryError::CapacityExceeded {
                requested,
                available,
            });
        }

        for item in batch {
            let weight = item.weight();
            if !self.contents.push(item.clone()) {
                return Err(InventoryError::CapacityExceeded {
                    requested: u64::from(weight),
                    available: self.contents.available(),
                });
            }

            let position = self.positions.len();
            tracing::debug!(id = item.id(), weight, position, "item stored");
            self.positions.push(item.id().to_owned());
            self.index.insert(item.id().to_owned(), Slot { position, item });
            self.occupied_capacity += weight;
        }
        Ok(())
    }

    pub fn peek(&self, id: &str) -> Option<&Item> {
        self.index.get(id).map(|slot| &slot.item)
    }

    /// Item stored at `position`, if any.
    pub fn peek_at(&self, position: i64) -> Result<Option<&Item>, InventoryError> {
        let position = checked_position(position)?;
        if self.is_empty() {
            return Ok(None);
        }
        Ok(self.slot_at(position).map(|slot| &slot.item))
    }

    /// Every item, in position order.
    pub fn peek_all(&self) -> Vec<&Item> {
        self.positions
            .iter()
            .filter_map(|id| self.peek(id))
            .collect()
    }

    /// Removes the item with `id`, if present.
    pub fn retrieve(&mut self, id: &str) -> Option<Item> {
        if !self.index.contains_key(id) {
            return None;
        }
        self.extract_from_contents(id)
    }

    /// Removes the item at `position`, if any.
    pub fn retrieve_at(&mut self, position: i64) -> Result<Option<Item>, InventoryError> {
        let position = checked_position(position)?;
        if self.is_empty() {
            return Ok(None);
        }
        let Some(id) = self.slot_at(position).map(|slot| slot.item.id().to_owned()) else {
            return Ok(None);
        };
        Ok(self.extract_from_contents(&id))
    }

    fn slot_at(&self, position: usize) -> Option<&Slot> {
        self.positions
            .get(position)
            .and_then(|id| self.index.get(id))
    }

    /// Pulls `id` out of the backing stack.
    ///
    /// Items above the target are popped onto a temporary stack, the target
    /// is dropped, and the popped items are pushed back in their original
    /// order with their positions shifted down by one.
    fn extract_from_contents(&mut self, id: &str) -> Option<Item> {
        let mut above: Stack<Item> = Stack::new();
        let mut target = None;

        while let Some(item) = self.contents.pop() {
            if item.id() == id {
                target = Some(item);
                break;
            }
            above.push(item);
        }

        let shift = usize::from(target.is_some());
        while let Some(item) = above.pop() {
            if let Some(slot) = self.index.get_mut(item.id()) {
                slot.position -= shift;
            }
            let restored = self.contents.push(item);
            debug_assert!(restored, "re-pushing a popped item cannot exceed capacity");
        }

        let removed = target?;
        if let Some(slot) = self.index.remove(id) {
            self.positions.remove(slot.position);
        }
        self.occupied_capacity -= removed.weight();
        tracing::debug!(id, remaining = self.positions.len(), "item retrieved");
        Some(removed)
    }
}

fn checked_position(position: i64) -> Result<usize, InventoryError> {
    usize::try_from(position).map_err(|_| InventoryError::NegativeIndex { position })
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inventory")
            .field("capacity", &self.last_capacity)
            .field("occupied_capacity", &self.occupied_capacity)
            .field("items", &self.peek_all())
            .finish()
    }
}
