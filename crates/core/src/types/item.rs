//! Cart line items and stock levels.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// One entry in the cart: a catalog product plus the quantity requested.
///
/// `amount` is at least 1 for as long as the entry remains in the cart;
/// an entry that would reach 0 is removed instead of being retained.
/// Serialized in the catalog's wire casing so the stored cart matches
/// what the catalog serves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Catalog product id.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Product image URL.
    pub image_url: String,
    /// Quantity of this product currently in the cart.
    pub amount: u32,
}

impl Product {
    /// Price times quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.amount)
    }
}

/// Remaining purchasable quantity for a product.
///
/// Externally owned and authoritative; read-only to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    /// Catalog product id.
    pub id: ProductId,
    /// Maximum purchasable quantity.
    pub amount: u32,
}

/// Sum of line totals across the cart.
#[must_use]
pub fn subtotal(items: &[Product]) -> Decimal {
    items.iter().map(Product::line_total).sum()
}
