//! Items an entity can hold.

use game_collections::Keyed;

use crate::config::ModelConfig;
use crate::identity::generate_id;

/// Something an entity can hold and/or use.
///
/// Items are identified by a unique id and weigh at least
/// [`ModelConfig::DEFAULT_ITEM_WEIGHT`]: a zero weight falls back to the default.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    id: String,
    weight: u32,
}

impl Item {
    /// Creates an item with a fresh id and the default weight.
    pub fn new() -> Self {
        Self::with_weight(ModelConfig::DEFAULT_ITEM_WEIGHT)
    }

    /// Creates an item with a fresh id.
    pub fn with_weight(weight: u32) -> Self {
        Self::with_id(generate_id(), weight)
    }

    /// Creates an item under an id the caller already owns.
    pub fn with_id(id: impl Into<String>, weight: u32) -> Self {
        let weight = if weight == 0 {
            ModelConfig::DEFAULT_ITEM_WEIGHT
        } else {
            weight
        };
        Self {
            id: id.into(),
            weight,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }
}

impl Default for Item {
    fn default() -> Self {
        Self::new()
    }
}

impl Keyed for Item {
    fn key(&self) -> &str {
        &self.id
    }
}
