//! Debounced catalog search.

use std::sync::Arc;

use bengkel::products::Product;

use crate::{api::ApiError, domain::products::ProductsService, search::SearchDebouncer};

#[derive(Clone)]
pub struct ProductSearch {
    products: Arc<dyn ProductsService>,
    debouncer: SearchDebouncer,
}

impl std::fmt::Debug for ProductSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductSearch")
            .field("debouncer", &self.debouncer)
            .finish_non_exhaustive()
    }
}

impl ProductSearch {
    #[must_use]
    pub fn new(products: Arc<dyn ProductsService>, debouncer: SearchDebouncer) -> Self {
        Self {
            products,
            debouncer,
        }
    }

    /// Search once typing has settled. `Ok(None)` means a newer query
    /// superseded this one and no request was made. A blank query lists the
    /// whole catalog.
    ///
    /// # Errors
    ///
    /// Returns the error from the products service.
    pub async fn search(&self, query: &str) -> Result<Option<Vec<Product>>, ApiError> {
        let Some(query) = self.debouncer.settle(query).await else {
            return Ok(None);
        };

        let query = query.trim();

        let products = if query.is_empty() {
            self.products.list_products().await?
        } else {
            self.products.search_products(query).await?
        };

        Ok(Some(products))
    }
}
