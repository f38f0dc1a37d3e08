use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

use warehouse_inventory::InventoryItem;

// -------------------------
// Query DTOs
// -------------------------

#[derive(Debug, Default, Deserialize)]
pub struct RemoveQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub quantity: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LowStockQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub threshold: Option<i64>,
}

/// `?key=` carries an empty string; treat it like an omitted parameter.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub const GRID_STRUCTURE: &str =
    "Each category contains a 2D array [1][n] where n is the number of items";

/// Wrap each category's items in a single row: `{category: [[item, ...]]}`.
pub fn category_grid(
    rows: BTreeMap<String, Vec<InventoryItem>>,
) -> BTreeMap<String, [Vec<InventoryItem>; 1]> {
    rows.into_iter().map(|(category, items)| (category, [items])).collect()
}

/// Standard list payload: `{success, items, count}` plus endpoint metadata.
pub fn items_json(items: Vec<InventoryItem>, extra: serde_json::Value) -> serde_json::Value {
    let mut body = serde_json::json!({
        "success": true,
        "count": items.len(),
        "items": items,
    });
    if let (Some(body), serde_json::Value::Object(extra)) = (body.as_object_mut(), extra) {
        body.extend(extra);
    }
    body
}
