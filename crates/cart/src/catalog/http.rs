//! HTTP implementation of the catalog and stock collaborators.
//!
//! Speaks the catalog's REST API: `GET {base}/products/{id}` and
//! `GET {base}/stock/{id}`. Product records are cached using `moka`
//! (5-minute TTL); stock is authoritative and never cached.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use sandpiper_core::{ProductId, Stock};

use super::{CatalogError, CatalogProduct, ProductCatalog, StockService};
use crate::config::CartConfig;

const PRODUCT_CACHE_CAPACITY: u64 = 1000;
const PRODUCT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Client for the product/stock service.
///
/// Cheaply cloneable; clones share the HTTP connection pool and the
/// product cache, so one client can serve as both collaborators of a
/// [`crate::store::CartStore`].
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<ProductId, CatalogProduct>,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &CartConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        let cache = Cache::builder()
            .max_capacity(PRODUCT_CACHE_CAPACITY)
            .time_to_live(PRODUCT_CACHE_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: config.catalog_url.as_str().trim_end_matches('/').to_string(),
                cache,
            }),
        })
    }

    /// Fetch one resource by product id and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        id: ProductId,
    ) -> Result<T, CatalogError> {
        let url = format!("{}/{resource}/{id}", self.inner.base_url);

        let response = self.inner.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(id));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message,
            });
        }

        // Read the body as text first for better error diagnostics
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(200).collect::<String>(),
                "Failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Invalidate a cached product record.
    pub async fn invalidate_product(&self, id: ProductId) {
        self.inner.cache.invalidate(&id).await;
    }

    /// Invalidate all cached product records.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}

impl ProductCatalog for CatalogClient {
    #[instrument(skip(self), fields(product_id = %id))]
    async fn product(&self, id: ProductId) -> Result<CatalogProduct, CatalogError> {
        // Check cache
        if let Some(record) = self.inner.cache.get(&id).await {
            debug!("Cache hit for product");
            return Ok(record);
        }

        let record: CatalogProduct = self.get_json("products", id).await?;

        // Cache the result
        self.inner.cache.insert(id, record.clone()).await;

        Ok(record)
    }
}

impl StockService for CatalogClient {
    // Stock is mutable upstream state; always read through.
    #[instrument(skip(self), fields(product_id = %id))]
    async fn stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        self.get_json("stock", id).await
    }
}
