//! Sandpiper Cart - client-side cart state for an e-commerce storefront.
//!
//! Holds the current list of cart line items in memory, mirrors it to a
//! durable storage slot, and validates every quantity change against the
//! remote stock service before anything is committed.
//!
//! # Architecture
//!
//! - [`store::CartStore`] owns the in-memory cart and is the sole writer
//!   of the durable slot
//! - [`catalog`] defines the stock/catalog collaborator traits and the
//!   HTTP client implementing them
//! - [`storage`] defines the durable slot trait with file-backed and
//!   in-memory implementations
//! - [`notice`] maps operation outcomes to user-facing messages; the
//!   library itself never displays anything
//!
//! # Example
//!
//! ```rust,ignore
//! use sandpiper_cart::{CartConfig, CartStore, CatalogClient, FileSlot};
//! use sandpiper_core::ProductId;
//!
//! let config = CartConfig::from_env()?;
//! let catalog = CatalogClient::new(&config)?;
//! let slot = FileSlot::new(&config.data_dir);
//!
//! let mut store = CartStore::load(catalog.clone(), catalog, slot);
//! let outcome = store.add_product(ProductId::new(1)).await;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod notice;
pub mod storage;
pub mod store;

pub use catalog::{CatalogClient, CatalogError, CatalogProduct, ProductCatalog, StockService};
pub use config::{CartConfig, ConfigError};
pub use notice::{CartOp, NoticeSink};
pub use storage::{FileSlot, MemorySlot, StorageError, StorageSlot};
pub use store::{CartOutcome, CartStore, UpstreamError};
