//! Inventory domain module.
//!
//! Items are grouped by category inside a single in-memory [`InventoryStore`].
//! Nothing here performs IO; contents live for the lifetime of the store.

pub mod item;
pub mod statistics;
pub mod store;

pub use item::{DEFAULT_CATEGORY, InventoryItem, ItemDraft, ProductId};
pub use statistics::InventoryStatistics;
pub use store::{
    AddOutcome, DEFAULT_CATEGORY_CAPACITY, DEFAULT_LOW_STOCK_THRESHOLD, InventoryStore,
    RemoveOutcome, StoreLimits,
};
