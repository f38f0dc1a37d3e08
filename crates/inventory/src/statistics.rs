use serde::Serialize;

/// Aggregate figures over the whole store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStatistics {
    /// Number of distinct items across all categories.
    pub total_items: usize,
    /// Sum of every item's quantity.
    pub total_quantity: u64,
    pub categories_count: usize,
    /// Items at or below `low_stock_threshold`.
    pub low_stock_count: usize,
    pub low_stock_threshold: u32,
    pub categories: Vec<String>,
}
