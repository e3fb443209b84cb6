//! Cart store behavior tests with in-memory collaborators.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;

use rust_decimal::Decimal;

use sandpiper_cart::catalog::{CatalogError, CatalogProduct, ProductCatalog, StockService};
use sandpiper_cart::storage::{FileSlot, MemorySlot, StorageError, StorageSlot};
use sandpiper_cart::store::{CartOutcome, CartStore};
use sandpiper_core::{Product, ProductId, Stock};

// =============================================================================
// Fakes
// =============================================================================

#[derive(Clone, Default)]
struct FakeStock {
    levels: HashMap<ProductId, u32>,
    unavailable: bool,
}

impl FakeStock {
    fn with(levels: &[(i32, u32)]) -> Self {
        Self {
            levels: levels
                .iter()
                .map(|&(id, amount)| (ProductId::new(id), amount))
                .collect(),
            unavailable: false,
        }
    }

    fn unavailable() -> Self {
        Self {
            levels: HashMap::new(),
            unavailable: true,
        }
    }
}

impl StockService for FakeStock {
    async fn stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        if self.unavailable {
            return Err(CatalogError::Api {
                status: 503,
                message: "stock service down".to_string(),
            });
        }
        self.levels
            .get(&id)
            .map(|&amount| Stock { id, amount })
            .ok_or(CatalogError::NotFound(id))
    }
}

#[derive(Clone, Default)]
struct FakeCatalog {
    records: HashMap<ProductId, CatalogProduct>,
}

impl FakeCatalog {
    fn with(ids: &[i32]) -> Self {
        Self {
            records: ids.iter().map(|&id| (ProductId::new(id), record(id))).collect(),
        }
    }
}

impl ProductCatalog for FakeCatalog {
    async fn product(&self, id: ProductId) -> Result<CatalogProduct, CatalogError> {
        self.records.get(&id).cloned().ok_or(CatalogError::NotFound(id))
    }
}

/// Slot whose writes always fail, for persistence-failure paths.
struct BrokenSlot;

impl StorageSlot for BrokenSlot {
    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn write(&mut self, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Io(std::io::Error::other("disk full")))
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        Ok(())
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn record(id: i32) -> CatalogProduct {
    CatalogProduct {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        price: Decimal::from(id * 10),
        image_url: format!("https://cdn.example.com/{id}.jpg"),
    }
}

fn item(id: i32, amount: u32) -> Product {
    let record = record(id);
    Product {
        id: record.id,
        name: record.name,
        price: record.price,
        image_url: record.image_url,
        amount,
    }
}

fn seeded_slot(items: &[Product]) -> MemorySlot {
    MemorySlot::with_value(serde_json::to_string(items).unwrap())
}

// =============================================================================
// add_product
// =============================================================================

#[tokio::test]
async fn add_new_product_appends_with_amount_one() {
    let mut store = CartStore::load(
        FakeStock::with(&[(1, 5)]),
        FakeCatalog::with(&[1]),
        MemorySlot::new(),
    );

    assert!(store.add_product(ProductId::new(1)).await.is_committed());
    assert_eq!(store.cart(), &[item(1, 1)]);
}

#[tokio::test]
async fn add_existing_product_increments_amount() {
    let slot = seeded_slot(&[item(1, 2), item(2, 1)]);
    let mut store = CartStore::load(FakeStock::with(&[(1, 5)]), FakeCatalog::with(&[1, 2]), slot);

    assert!(store.add_product(ProductId::new(1)).await.is_committed());
    assert_eq!(store.cart(), &[item(1, 3), item(2, 1)]);
}

#[tokio::test]
async fn add_beyond_stock_changes_nothing() {
    let slot = seeded_slot(&[item(1, 2)]);
    let mut store = CartStore::load(FakeStock::with(&[(1, 2)]), FakeCatalog::with(&[1]), slot);

    let outcome = store.add_product(ProductId::new(1)).await;

    assert!(matches!(outcome, CartOutcome::StockExceeded));
    assert_eq!(store.cart(), &[item(1, 2)]);
}

#[tokio::test]
async fn add_with_zero_stock_is_rejected() {
    let mut store = CartStore::load(
        FakeStock::with(&[(1, 0)]),
        FakeCatalog::with(&[1]),
        MemorySlot::new(),
    );

    let outcome = store.add_product(ProductId::new(1)).await;

    assert!(matches!(outcome, CartOutcome::StockExceeded));
    assert!(store.cart().is_empty());
}

#[tokio::test]
async fn add_when_stock_service_fails_reports_upstream_failure() {
    let mut store = CartStore::load(
        FakeStock::unavailable(),
        FakeCatalog::with(&[1]),
        MemorySlot::new(),
    );

    let outcome = store.add_product(ProductId::new(1)).await;

    assert!(matches!(outcome, CartOutcome::UpstreamFailure(_)));
    assert!(store.cart().is_empty());
}

#[tokio::test]
async fn add_unknown_product_reports_upstream_failure() {
    // id 9 has stock but no catalog record; the catalog 404 surfaces as
    // an upstream failure, not a cart-level NotFound.
    let mut store = CartStore::load(
        FakeStock::with(&[(9, 5)]),
        FakeCatalog::default(),
        MemorySlot::new(),
    );

    let outcome = store.add_product(ProductId::new(9)).await;

    assert!(matches!(outcome, CartOutcome::UpstreamFailure(_)));
    assert!(store.cart().is_empty());
}

#[tokio::test]
async fn add_when_persistence_fails_leaves_memory_unchanged() {
    let mut store = CartStore::load(FakeStock::with(&[(1, 5)]), FakeCatalog::with(&[1]), BrokenSlot);

    let outcome = store.add_product(ProductId::new(1)).await;

    assert!(matches!(outcome, CartOutcome::UpstreamFailure(_)));
    assert!(store.cart().is_empty());
}

// =============================================================================
// remove_product
// =============================================================================

#[test]
fn remove_existing_product_keeps_other_entries_in_order() {
    let slot = seeded_slot(&[item(1, 1), item(2, 1), item(3, 2)]);
    let mut store = CartStore::load(FakeStock::default(), FakeCatalog::default(), slot);

    assert!(store.remove_product(ProductId::new(2)).is_committed());
    assert_eq!(store.cart(), &[item(1, 1), item(3, 2)]);
}

#[test]
fn remove_one_of_two_entries() {
    let slot = seeded_slot(&[item(1, 1), item(2, 1)]);
    let mut store = CartStore::load(FakeStock::default(), FakeCatalog::default(), slot);

    assert!(store.remove_product(ProductId::new(1)).is_committed());
    assert_eq!(store.cart(), &[item(2, 1)]);
}

#[test]
fn remove_absent_product_changes_nothing() {
    let slot = seeded_slot(&[item(1, 1)]);
    let mut store = CartStore::load(FakeStock::default(), FakeCatalog::default(), slot);

    let outcome = store.remove_product(ProductId::new(7));

    assert!(matches!(outcome, CartOutcome::NotFound));
    assert_eq!(store.cart(), &[item(1, 1)]);
}

// =============================================================================
// update_product_amount
// =============================================================================

#[tokio::test]
async fn update_with_amount_at_or_below_zero_is_ignored() {
    let slot = seeded_slot(&[item(1, 2)]);
    // The guard fires before the stock service is consulted; an
    // unavailable service proves it.
    let mut store = CartStore::load(FakeStock::unavailable(), FakeCatalog::default(), slot);

    let outcome = store.update_product_amount(ProductId::new(1), 0).await;
    assert!(matches!(outcome, CartOutcome::Ignored));

    let outcome = store.update_product_amount(ProductId::new(1), -3).await;
    assert!(matches!(outcome, CartOutcome::Ignored));

    assert_eq!(store.cart(), &[item(1, 2)]);
}

#[tokio::test]
async fn update_beyond_stock_changes_nothing() {
    let slot = seeded_slot(&[item(1, 2)]);
    let mut store = CartStore::load(FakeStock::with(&[(1, 4)]), FakeCatalog::default(), slot);

    let outcome = store.update_product_amount(ProductId::new(1), 5).await;

    assert!(matches!(outcome, CartOutcome::StockExceeded));
    assert_eq!(store.cart(), &[item(1, 2)]);
}

#[tokio::test]
async fn update_sets_exact_amount_and_leaves_others_alone() {
    let slot = seeded_slot(&[item(1, 2), item(2, 1)]);
    let mut store = CartStore::load(FakeStock::with(&[(1, 10)]), FakeCatalog::default(), slot);

    assert!(
        store
            .update_product_amount(ProductId::new(1), 7)
            .await
            .is_committed()
    );
    assert_eq!(store.cart(), &[item(1, 7), item(2, 1)]);
}

#[tokio::test]
async fn update_absent_product_reports_not_found() {
    let slot = seeded_slot(&[item(1, 1)]);
    let mut store = CartStore::load(FakeStock::with(&[(7, 10)]), FakeCatalog::default(), slot);

    let outcome = store.update_product_amount(ProductId::new(7), 2).await;

    assert!(matches!(outcome, CartOutcome::NotFound));
    assert_eq!(store.cart(), &[item(1, 1)]);
}

#[tokio::test]
async fn update_checks_stock_before_cart_membership() {
    // An absent id with an out-of-range amount reports the stock
    // rejection: validation order is stock first, then membership.
    let slot = seeded_slot(&[item(1, 1)]);
    let mut store = CartStore::load(FakeStock::with(&[(7, 1)]), FakeCatalog::default(), slot);

    let outcome = store.update_product_amount(ProductId::new(7), 2).await;

    assert!(matches!(outcome, CartOutcome::StockExceeded));
    assert_eq!(store.cart(), &[item(1, 1)]);
}

#[tokio::test]
async fn update_when_stock_service_fails_reports_upstream_failure() {
    let slot = seeded_slot(&[item(1, 2)]);
    let mut store = CartStore::load(FakeStock::unavailable(), FakeCatalog::default(), slot);

    let outcome = store.update_product_amount(ProductId::new(1), 1).await;

    assert!(matches!(outcome, CartOutcome::UpstreamFailure(_)));
    assert_eq!(store.cart(), &[item(1, 2)]);
}

// =============================================================================
// Persistence
// =============================================================================

#[tokio::test]
async fn cart_round_trips_through_the_file_slot() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = CartStore::load(
        FakeStock::with(&[(1, 5), (2, 5)]),
        FakeCatalog::with(&[1, 2]),
        FileSlot::new(dir.path()),
    );
    assert!(store.add_product(ProductId::new(1)).await.is_committed());
    assert!(store.add_product(ProductId::new(2)).await.is_committed());
    assert!(store.add_product(ProductId::new(1)).await.is_committed());
    let snapshot = store.cart().to_vec();
    drop(store);

    let reloaded = CartStore::load(
        FakeStock::default(),
        FakeCatalog::default(),
        FileSlot::new(dir.path()),
    );
    assert_eq!(reloaded.cart(), snapshot.as_slice());
    assert_eq!(reloaded.cart(), &[item(1, 2), item(2, 1)]);
}

#[test]
fn load_restores_insertion_order_from_seeded_slot() {
    let items = vec![item(3, 1), item(1, 4), item(2, 2)];
    let store = CartStore::load(FakeStock::default(), FakeCatalog::default(), seeded_slot(&items));

    assert_eq!(store.cart(), items.as_slice());
}

#[test]
fn load_falls_back_to_empty_on_corrupt_slot() {
    let store = CartStore::load(
        FakeStock::default(),
        FakeCatalog::default(),
        MemorySlot::with_value("not json".to_string()),
    );

    assert!(store.cart().is_empty());
}

#[test]
fn load_falls_back_to_empty_on_vacant_slot() {
    let store = CartStore::load(FakeStock::default(), FakeCatalog::default(), MemorySlot::new());

    assert!(store.cart().is_empty());
}

#[tokio::test]
async fn failed_operations_do_not_touch_the_slot() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut slot = FileSlot::new(dir.path());
        slot.write(&serde_json::to_string(&[item(1, 2)]).unwrap()).unwrap();
    }

    let mut store = CartStore::load(
        FakeStock::with(&[(1, 2)]),
        FakeCatalog::with(&[1]),
        FileSlot::new(dir.path()),
    );
    let outcome = store.add_product(ProductId::new(1)).await;
    assert!(matches!(outcome, CartOutcome::StockExceeded));
    drop(store);

    let reloaded = CartStore::load(
        FakeStock::default(),
        FakeCatalog::default(),
        FileSlot::new(dir.path()),
    );
    assert_eq!(reloaded.cart(), &[item(1, 2)]);
}
