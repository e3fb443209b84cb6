//! Product catalog and stock service collaborators.
//!
//! The cart validates every quantity change against two remote
//! collaborators: the stock service (remaining purchasable quantity per
//! product) and the product catalog (full product records). Both are
//! traits so tests can substitute in-memory fakes; [`CatalogClient`] is
//! the production implementation speaking the catalog's REST API.

mod http;

pub use http::CatalogClient;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use sandpiper_core::{ProductId, Stock};

/// Errors that can occur when querying the catalog or stock endpoints.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// No product with the requested id.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// Response body did not match the expected shape.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A catalog product record, before it carries a cart quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    /// Catalog product id.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Product image URL.
    pub image_url: String,
}

// The store drives these from a single task; the returned futures carry
// no Send bound.
#[allow(async_fn_in_trait)]
pub trait StockService {
    /// Remaining purchasable quantity for a product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the lookup fails or the product id is
    /// unknown to the stock service.
    async fn stock(&self, id: ProductId) -> Result<Stock, CatalogError>;
}

#[allow(async_fn_in_trait)]
pub trait ProductCatalog {
    /// Full product record for a product id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the lookup fails or the product does
    /// not exist in the catalog.
    async fn product(&self, id: ProductId) -> Result<CatalogProduct, CatalogError>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::NotFound(ProductId::new(9));
        assert_eq!(err.to_string(), "Product not found: 9");

        let err = CatalogError::Api {
            status: 503,
            message: "maintenance".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 503 - maintenance");
    }

    #[test]
    fn test_catalog_product_wire_shape() {
        // The catalog serves camelCase keys and numeric prices.
        let record: CatalogProduct = serde_json::from_str(
            r#"{"id":2,"name":"Trail Sandal","price":139.9,"imageUrl":"https://cdn.example.com/2.jpg"}"#,
        )
        .unwrap();

        assert_eq!(record.id, ProductId::new(2));
        assert_eq!(record.price, "139.9".parse().unwrap());
    }
}
