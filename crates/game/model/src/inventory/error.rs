//! Inventory errors.

use game_collections::{ErrorSeverity, GameError, StackError};

/// Errors raised by [`Inventory`](super::Inventory) operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("position must be a non-negative index (got {position})")]
    NegativeIndex { position: i64 },

    /// An item with this id is already stored (or appears twice in a batch).
    #[error("item {id} is already in the inventory")]
    DuplicateItem { id: String },

    /// The batch weighs more than the space left.
    #[error("items weigh {requested} but only {available} is available")]
    CapacityExceeded { requested: u64, available: u32 },

    /// The capacity provider reported a capacity below the occupied weight.
    #[error(transparent)]
    Resize(#[from] StackError),
}

impl GameError for InventoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NegativeIndex { .. } | Self::DuplicateItem { .. } => ErrorSeverity::Validation,
            Self::CapacityExceeded { .. } => ErrorSeverity::Recoverable,
            Self::Resize(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NegativeIndex { .. } => "INVENTORY_NEGATIVE_INDEX",
            Self::DuplicateItem { .. } => "INVENTORY_DUPLICATE_ITEM",
            Self::CapacityExceeded { .. } => "INVENTORY_CAPACITY_EXCEEDED",
            Self::Resize(err) => err.error_code(),
        }
    }
}
