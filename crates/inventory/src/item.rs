use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use warehouse_core::{DomainError, DomainResult, Entity};

/// Category assigned to items submitted without one.
pub const DEFAULT_CATEGORY: &str = "UNCATEGORIZED";

/// Product identifier. Unique key of an [`InventoryItem`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Parse a raw identifier. Only the empty string is rejected; any other
    /// text, whitespace included, is a valid (possibly unknown) id.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        if raw.is_empty() {
            return Err(DomainError::invalid_argument("ProductId cannot be empty"));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stocked product inside one category.
///
/// Equality and hashing consider only `product_id`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    product_id: ProductId,
    product_name: Option<String>,
    quantity: u32,
    expiration_date: Option<NaiveDate>,
    category: String,
    unit_price: f64,
}

impl InventoryItem {
    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn product_name(&self) -> Option<&str> {
        self.product_name.as_deref()
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn expiration_date(&self) -> Option<NaiveDate> {
        self.expiration_date
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    /// Fold a re-submitted item into this one.
    ///
    /// Quantities add up; name, expiration and price are only replaced when
    /// the incoming value is present (non-empty name, positive price).
    pub(crate) fn absorb(&mut self, incoming: InventoryItem) {
        self.quantity = self.quantity.saturating_add(incoming.quantity);
        if let Some(name) = incoming.product_name.filter(|n| !n.is_empty()) {
            self.product_name = Some(name);
        }
        if incoming.expiration_date.is_some() {
            self.expiration_date = incoming.expiration_date;
        }
        if incoming.unit_price > 0.0 {
            self.unit_price = incoming.unit_price;
        }
    }

    pub(crate) fn reduce_by(&mut self, amount: u32) {
        self.quantity = self.quantity.saturating_sub(amount);
    }
}

impl PartialEq for InventoryItem {
    fn eq(&self, other: &Self) -> bool {
        self.product_id == other.product_id
    }
}

impl Eq for InventoryItem {}

impl core::hash::Hash for InventoryItem {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.product_id.hash(state);
    }
}

impl Entity for InventoryItem {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.product_id
    }
}

/// Item payload as submitted by a client. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: u32,
    pub expiration_date: Option<NaiveDate>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unit_price: f64,
}

/// Explicit `null` for a numeric field reads as zero, same as omitting it.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ItemDraft {
    pub fn new(product_id: impl Into<String>) -> Self {
        Self {
            product_id: Some(product_id.into()),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_expiration(mut self, date: NaiveDate) -> Self {
        self.expiration_date = Some(date);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_unit_price(mut self, price: f64) -> Self {
        self.unit_price = price;
        self
    }

    /// Validate the draft and turn it into a storable item.
    pub fn into_item(self) -> DomainResult<InventoryItem> {
        let product_id = match self.product_id.as_deref() {
            Some(raw) => ProductId::parse(raw)?,
            None => {
                return Err(DomainError::invalid_argument(
                    "Item and productId cannot be null",
                ));
            }
        };
        if !self.unit_price.is_finite() || self.unit_price < 0.0 {
            return Err(DomainError::invalid_argument(
                "unitPrice must be a non-negative number",
            ));
        }

        let category = self
            .category
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        Ok(InventoryItem {
            product_id,
            product_name: self.product_name,
            quantity: self.quantity,
            expiration_date: self.expiration_date,
            category,
            unit_price: self.unit_price,
        })
    }
}
