//! In-memory inventory store.
//!
//! Items live in per-category lists keyed by category name. Mutations take
//! the write half of a single lock, so each add/remove/clear is atomic with
//! respect to the others. Reads take the read half.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, warn};

use warehouse_core::{DomainError, DomainResult, Entity};

use crate::item::{InventoryItem, ItemDraft, ProductId};
use crate::statistics::InventoryStatistics;

/// Maximum distinct items a single category may hold.
pub const DEFAULT_CATEGORY_CAPACITY: usize = 1000;

/// Quantity at or below which an item counts as low stock.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 10;

/// Tunable limits for an [`InventoryStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreLimits {
    pub category_capacity: usize,
    pub low_stock_threshold: u32,
}

impl Default for StoreLimits {
    fn default() -> Self {
        Self {
            category_capacity: DEFAULT_CATEGORY_CAPACITY,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

/// Result of [`InventoryStore::add_item`].
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    /// A new item was appended to its category.
    Added(InventoryItem),
    /// An item with the same product id existed and was merged into; carries
    /// the merged state.
    Merged(InventoryItem),
    /// The category is full and the item is new to it. Nothing changed.
    CapacityExceeded { category: String, capacity: usize },
}

impl AddOutcome {
    pub fn into_result(self) -> DomainResult<InventoryItem> {
        match self {
            AddOutcome::Added(item) | AddOutcome::Merged(item) => Ok(item),
            AddOutcome::CapacityExceeded { category, capacity } => {
                Err(DomainError::capacity_exceeded(category, capacity))
            }
        }
    }
}

/// Result of [`InventoryStore::remove_item`].
#[derive(Debug, Clone, PartialEq)]
pub enum RemoveOutcome {
    /// The item was deleted; carries its last state.
    Removed(InventoryItem),
    /// The item's quantity was decremented; carries the new state.
    Reduced(InventoryItem),
    NotFound,
}

impl RemoveOutcome {
    pub fn into_result(self) -> DomainResult<InventoryItem> {
        match self {
            RemoveOutcome::Removed(item) | RemoveOutcome::Reduced(item) => Ok(item),
            RemoveOutcome::NotFound => Err(DomainError::not_found()),
        }
    }
}

type Categories = BTreeMap<String, Vec<InventoryItem>>;

/// Category-partitioned item store.
///
/// Category iteration order is the lexical order of category names. A
/// product id is expected, not enforced, to be unique across categories;
/// lookups and removals act on the first category that holds it.
#[derive(Debug, Default)]
pub struct InventoryStore {
    limits: StoreLimits,
    categories: RwLock<Categories>,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: StoreLimits) -> Self {
        Self {
            limits,
            categories: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn limits(&self) -> StoreLimits {
        self.limits
    }

    // A panic while holding the lock cannot leave a category half-edited:
    // every mutation is a single push, remove or field update.
    fn read(&self) -> RwLockReadGuard<'_, Categories> {
        self.categories.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Categories> {
        self.categories.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a new item or merge into the existing item with the same product
    /// id in the target category.
    pub fn add_item(&self, draft: ItemDraft) -> DomainResult<AddOutcome> {
        let incoming = draft.into_item()?;
        let capacity = self.limits.category_capacity;

        let mut categories = self.write();
        let items = categories
            .entry(incoming.category().to_string())
            .or_default();

        if let Some(existing) = items.iter_mut().find(|i| i.same_identity_as(&incoming)) {
            existing.absorb(incoming);
            info!(
                product_id = %existing.product_id(),
                category = existing.category(),
                quantity = existing.quantity(),
                "inventory item merged"
            );
            return Ok(AddOutcome::Merged(existing.clone()));
        }

        if items.len() >= capacity {
            warn!(
                product_id = %incoming.product_id(),
                category = incoming.category(),
                capacity,
                "category capacity exceeded"
            );
            return Ok(AddOutcome::CapacityExceeded {
                category: incoming.category().to_string(),
                capacity,
            });
        }

        info!(
            product_id = %incoming.product_id(),
            category = incoming.category(),
            quantity = incoming.quantity(),
            "inventory item added"
        );
        items.push(incoming.clone());
        Ok(AddOutcome::Added(incoming))
    }

    /// Remove an item entirely or decrement its quantity.
    ///
    /// `quantity` of `None`, zero or negative, or at least the stocked amount
    /// deletes the item.
    pub fn remove_item(
        &self,
        product_id: &str,
        quantity: Option<i64>,
    ) -> DomainResult<RemoveOutcome> {
        let product_id = ProductId::parse(product_id)?;

        let mut categories = self.write();
        for items in categories.values_mut() {
            let Some(idx) = items.iter().position(|i| i.id() == &product_id) else {
                continue;
            };

            let stocked = items[idx].quantity();
            return Ok(match quantity {
                Some(q) if q > 0 && q < i64::from(stocked) => {
                    let item = &mut items[idx];
                    // q < stocked <= u32::MAX
                    item.reduce_by(q as u32);
                    info!(
                        product_id = %item.product_id(),
                        removed = q,
                        remaining = item.quantity(),
                        "inventory quantity reduced"
                    );
                    RemoveOutcome::Reduced(item.clone())
                }
                _ => {
                    let item = items.remove(idx);
                    info!(
                        product_id = %item.product_id(),
                        category = item.category(),
                        "inventory item removed"
                    );
                    RemoveOutcome::Removed(item)
                }
            });
        }

        debug!(product_id = %product_id, "remove requested for unknown item");
        Ok(RemoveOutcome::NotFound)
    }

    /// Drop every category and item.
    pub fn clear(&self) {
        let mut categories = self.write();
        let dropped: usize = categories.values().map(Vec::len).sum();
        categories.clear();
        info!(dropped, "inventory cleared");
    }

    /// Every item, category by category, in insertion order within each.
    pub fn all_items(&self) -> Vec<InventoryItem> {
        self.read().values().flatten().cloned().collect()
    }

    /// Every item, ascending by quantity. Ties keep [`Self::all_items`] order.
    pub fn items_sorted_by_quantity(&self) -> Vec<InventoryItem> {
        let mut items = self.all_items();
        items.sort_by_key(InventoryItem::quantity);
        items
    }

    /// Every item, earliest expiration first. Items without an expiration
    /// date come last.
    pub fn items_sorted_by_expiration(&self) -> Vec<InventoryItem> {
        let mut items = self.all_items();
        items.sort_by_key(|i| (i.expiration_date().is_none(), i.expiration_date()));
        items
    }

    /// Items of one category; empty when the category is unknown.
    pub fn items_by_category(&self, category: &str) -> Vec<InventoryItem> {
        self.read().get(category).cloned().unwrap_or_default()
    }

    pub fn item_by_id(&self, product_id: &str) -> Option<InventoryItem> {
        self.read()
            .values()
            .flatten()
            .find(|i| i.product_id().as_str() == product_id)
            .cloned()
    }

    /// Snapshot of each category's item list, including empty categories.
    ///
    /// This is the row view behind the `[1][n]` grid representation: one
    /// row per category, one column per item.
    pub fn category_rows(&self) -> BTreeMap<String, Vec<InventoryItem>> {
        self.read().clone()
    }

    /// Threshold actually applied for a requested one: non-positive or
    /// missing values fall back to the configured default.
    pub fn effective_threshold(&self, requested: Option<i64>) -> u32 {
        match requested {
            Some(t) if t > 0 => u32::try_from(t).unwrap_or(u32::MAX),
            _ => self.limits.low_stock_threshold,
        }
    }

    /// Items with quantity at or below the effective threshold, ascending by
    /// quantity.
    pub fn low_stock_items(&self, threshold: Option<i64>) -> Vec<InventoryItem> {
        let threshold = self.effective_threshold(threshold);
        let mut items: Vec<InventoryItem> = self
            .read()
            .values()
            .flatten()
            .filter(|i| i.quantity() <= threshold)
            .cloned()
            .collect();
        items.sort_by_key(InventoryItem::quantity);
        debug!(threshold, count = items.len(), "low stock query");
        items
    }

    pub fn statistics(&self) -> InventoryStatistics {
        let threshold = self.limits.low_stock_threshold;
        let guard = self.read();
        let categories: &Categories = &guard;

        InventoryStatistics {
            total_items: categories.values().map(Vec::len).sum(),
            total_quantity: categories
                .values()
                .flatten()
                .map(|i| u64::from(i.quantity()))
                .sum(),
            categories_count: categories.len(),
            low_stock_count: categories
                .values()
                .flatten()
                .filter(|i| i.quantity() <= threshold)
                .count(),
            low_stock_threshold: threshold,
            categories: categories.keys().cloned().collect(),
        }
    }
}
