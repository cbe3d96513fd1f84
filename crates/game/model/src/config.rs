/// Model configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelConfig {
    /// Capacity given to inventories built from this configuration.
    pub inventory_capacity: u32,
}

impl ModelConfig {
    // ===== fixed defaults =====
    /// Weight assigned to items created without an explicit weight.
    pub const DEFAULT_ITEM_WEIGHT: u32 = 1;
    /// Separator used when a point is printed with grouped thousands.
    pub const DEFAULT_THOUSAND_SEPARATOR: &'static str = ".";

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_INVENTORY_CAPACITY: u32 = 100;

    pub fn new() -> Self {
        Self {
            inventory_capacity: Self::DEFAULT_INVENTORY_CAPACITY,
        }
    }

    pub fn with_inventory_capacity(inventory_capacity: u32) -> Self {
        Self { inventory_capacity }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::new()
    }
}
