//! The cart store: in-memory line items mirrored to durable storage.
//!
//! Every mutation validates against the stock service before anything is
//! committed. The commit replaces the in-memory sequence and overwrites
//! the storage slot in one step; a failed operation leaves both exactly
//! as they were.

use thiserror::Error;
use tracing::{instrument, warn};

use sandpiper_core::{Product, ProductId};

use crate::catalog::{CatalogError, ProductCatalog, StockService};
use crate::storage::{StorageError, StorageSlot};

/// Source of an [`CartOutcome::UpstreamFailure`].
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Stock or catalog lookup failed.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Persisting the cart failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The cart could not be serialized for persistence.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result of a cart mutation.
///
/// Operations never return `Err`; this enum is the entire failure
/// surface, and the caller decides which variants become user notices
/// (see [`crate::notice`]).
#[derive(Debug)]
#[must_use]
pub enum CartOutcome {
    /// The mutation was applied and persisted.
    Committed,
    /// The request was a guarded no-op (requested amount below 1);
    /// nothing changed and no notice is due.
    Ignored,
    /// The requested quantity exceeds the available stock.
    StockExceeded,
    /// The targeted line item is not in the cart.
    NotFound,
    /// A collaborator failed; the cart is unchanged.
    UpstreamFailure(UpstreamError),
}

impl CartOutcome {
    /// Whether the mutation was applied and persisted.
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        matches!(self, Self::Committed)
    }
}

/// Client-side cart state, validated against stock and mirrored to a
/// durable slot.
///
/// Constructed once per session with its collaborators injected; the
/// store exclusively owns the in-memory cart and is the sole writer of
/// the slot. Mutations take `&mut self`, so two operations on one store
/// cannot interleave their suspension points.
pub struct CartStore<S, C, K> {
    items: Vec<Product>,
    stock: S,
    catalog: C,
    slot: K,
}

impl<S, C, K> CartStore<S, C, K>
where
    S: StockService,
    C: ProductCatalog,
    K: StorageSlot,
{
    /// Build a store, restoring the cart from the slot.
    ///
    /// A vacant or unreadable slot yields an empty cart; a session is
    /// never blocked on corrupted local state.
    pub fn load(stock: S, catalog: C, slot: K) -> Self {
        let items = match slot.read() {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(items) => items,
                Err(e) => {
                    warn!("Discarding unreadable cart slot: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read cart slot: {e}");
                Vec::new()
            }
        };

        Self {
            items,
            stock,
            catalog,
            slot,
        }
    }

    /// Current line items, in insertion order.
    #[must_use]
    pub fn cart(&self) -> &[Product] {
        &self.items
    }

    /// Add one unit of a product to the cart.
    ///
    /// Increments the existing line item, or fetches the product record
    /// from the catalog and appends a new line with amount 1. The stock
    /// check completes and is evaluated before anything is committed.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_product(&mut self, product_id: ProductId) -> CartOutcome {
        let available = match self.stock.stock(product_id).await {
            Ok(stock) => stock.amount,
            Err(e) => return CartOutcome::UpstreamFailure(e.into()),
        };

        let current = self
            .items
            .iter()
            .find(|item| item.id == product_id)
            .map_or(0, |item| item.amount);
        let desired = current + 1;

        if desired > available {
            return CartOutcome::StockExceeded;
        }

        let mut updated = self.items.clone();
        if let Some(entry) = updated.iter_mut().find(|item| item.id == product_id) {
            entry.amount = desired;
        } else {
            let record = match self.catalog.product(product_id).await {
                Ok(record) => record,
                Err(e) => return CartOutcome::UpstreamFailure(e.into()),
            };
            updated.push(Product {
                id: record.id,
                name: record.name,
                price: record.price,
                image_url: record.image_url,
                amount: 1,
            });
        }

        self.commit(updated)
    }

    /// Remove a line item from the cart entirely.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub fn remove_product(&mut self, product_id: ProductId) -> CartOutcome {
        let Some(index) = self.items.iter().position(|item| item.id == product_id) else {
            return CartOutcome::NotFound;
        };

        let mut updated = self.items.clone();
        updated.remove(index);

        self.commit(updated)
    }

    /// Set a line item to an absolute quantity.
    ///
    /// Amounts below 1 are ignored without a notice; they guard callers
    /// decrementing past the last unit rather than signal an error.
    #[instrument(skip(self), fields(product_id = %product_id, amount))]
    pub async fn update_product_amount(&mut self, product_id: ProductId, amount: i32) -> CartOutcome {
        let Ok(requested) = u32::try_from(amount) else {
            return CartOutcome::Ignored;
        };
        if requested == 0 {
            return CartOutcome::Ignored;
        }

        let available = match self.stock.stock(product_id).await {
            Ok(stock) => stock.amount,
            Err(e) => return CartOutcome::UpstreamFailure(e.into()),
        };
        if requested > available {
            return CartOutcome::StockExceeded;
        }

        let mut updated = self.items.clone();
        let Some(entry) = updated.iter_mut().find(|item| item.id == product_id) else {
            return CartOutcome::NotFound;
        };
        entry.amount = requested;

        self.commit(updated)
    }

    /// Replace the in-memory cart and overwrite the slot.
    ///
    /// Memory is only updated once the slot write has succeeded, so an
    /// invocation either fully commits or changes nothing.
    fn commit(&mut self, updated: Vec<Product>) -> CartOutcome {
        let serialized = match serde_json::to_string(&updated) {
            Ok(serialized) => serialized,
            Err(e) => return CartOutcome::UpstreamFailure(e.into()),
        };
        if let Err(e) = self.slot.write(&serialized) {
            return CartOutcome::UpstreamFailure(e.into());
        }

        self.items = updated;
        CartOutcome::Committed
    }
}
