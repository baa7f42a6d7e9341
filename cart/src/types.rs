//! Domain types for the cart store.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Unique identifier for a product
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a `ProductId` from any string-like id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw id
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single line in the cart
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product identifier; unique within a cart
    pub id: ProductId,
    /// Display name
    pub name: String,
    /// Price per unit; trusted to be non-negative
    pub unit_price: Decimal,
    /// Units of this product in the cart; at least 1 while present
    pub quantity: u32,
    /// Reference to the product image asset
    pub image_ref: String,
}

impl CartItem {
    /// Creates a new cart line
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        unit_price: Decimal,
        quantity: u32,
        image_ref: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            unit_price,
            quantity,
            image_ref: image_ref.into(),
        }
    }

    /// Price of this line: `unit_price × quantity`
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// State of the cart store
///
/// `items` preserves insertion order. `total` is derived: it always equals
/// the sum of the line totals and is recomputed by the reducer after every
/// transition — it is never mutated independently.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CartState {
    /// Cart lines in insertion order
    pub items: Vec<CartItem>,
    /// Derived sum of `unit_price × quantity` over all lines
    pub total: Decimal,
}

impl CartState {
    /// Creates an empty cart
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the line for a product, if present
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Number of distinct lines in the cart
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn recompute_total(&mut self) {
        self.total = self.items.iter().map(CartItem::line_total).sum();
    }
}

/// Actions accepted by the cart store
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CartAction {
    /// Add an item to the cart
    ///
    /// A new id is appended in insertion order. An id already present has
    /// the incoming quantity merged into the stored line; the stored name,
    /// price, and image are left untouched.
    AddItem {
        /// The line to add
        item: CartItem,
    },

    /// Set the quantity of the line matching `id`
    ///
    /// A quantity below 1 is a no-op: decrementing never removes the item,
    /// removal goes through [`CartAction::RemoveItem`]. Unknown ids are a
    /// no-op.
    UpdateQuantity {
        /// Product to update
        id: ProductId,
        /// New quantity; ignored when below 1
        quantity: u32,
    },

    /// Remove the line matching `id`; idempotent, no-op when absent
    RemoveItem {
        /// Product to remove
        id: ProductId,
    },

    /// Empty the cart and reset the total
    ClearCart,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_id_display() {
        assert_eq!(format!("{}", ProductId::new("milk-1")), "milk-1");
    }

    #[test]
    fn line_total_multiplies_price_by_quantity() {
        let item = CartItem::new(
            ProductId::new("milk-1"),
            "Whole Milk",
            Decimal::from(28),
            3,
            "products/milk-1.png",
        );
        assert_eq!(item.line_total(), Decimal::from(84));
    }

    #[test]
    fn empty_cart_has_zero_total() {
        let state = CartState::new();
        assert!(state.is_empty());
        assert_eq!(state.total, Decimal::ZERO);
    }
}
