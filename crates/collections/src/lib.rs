//! Bounded, observable collections used by the game model crates.
//!
//! This library provides the small set of data structures every game-model
//! package leans on when it needs invariants enforced at mutation time:
//!
//! - **Keyed storage**: [`IndexedCollection`] maps a key taken from each
//!   element to the element, and notifies a [`CollectionObserver`] around
//!   every mutation so owners can validate before and react after.
//! - **Bounded stacks**: [`Stack`] plus the capacity-aware variants
//!   [`LimitedCapacityStack`], [`WeightedStack`] and [`DynamicWeightedStack`].
//! - **Numeric helpers**: [`ScoreRange`] and [`format_thousands`].
//!
//! Everything here is single-threaded and synchronous. Wrap an instance in
//! a lock if it ever has to be shared.

pub mod collection;
pub mod error;
pub mod numeric;
pub mod range;
pub mod stack;

pub use collection::{CollectionError, CollectionObserver, IndexedCollection, Keyed, NoopObserver};
pub use error::{ErrorSeverity, GameError};
pub use numeric::format_thousands;
pub use range::{RangeError, ScoreRange};
pub use stack::{
    BoundedStack, DynamicWeightedStack, LimitedCapacityStack, Stack, StackError, UnitWeight,
    WeightOf, WeightedStack,
};
