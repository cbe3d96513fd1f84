//! Game-model building blocks with enforced invariants.
//!
//! `game-model` provides the stateful pieces game entities are composed of:
//! range-constrained [`Point`] counters (hit points, experience, ...) and
//! weight-bounded [`Inventory`] containers of [`Item`]s. Both validate every
//! mutation before applying it and build on the collections in
//! [`game_collections`].
pub mod config;
pub mod identity;
pub mod inventory;
pub mod item;
pub mod point;

pub use config::ModelConfig;
pub use game_collections::{ErrorSeverity, GameError, ScoreRange};
pub use identity::{IdSource, generate_id};
pub use inventory::{CapacityProvider, Inventory, InventoryError};
pub use item::Item;
pub use point::{
    Calculation, Modifier, ModifierKind, Permanence, Point, PointError, PointFormat, PointOptions,
};
