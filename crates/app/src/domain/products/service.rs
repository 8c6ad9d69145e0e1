//! Products service.

use async_trait::async_trait;
use bengkel::products::{Product, ProductId};
use mockall::automock;

use crate::{
    api::{Access, ApiClient, ApiError, ApiRequest},
    domain::products::models::{ProductDraft, ProductPayload, into_products},
};

const LIST_KEYS: &[&str] = &["products"];
const ITEM_KEYS: &[&str] = &["product"];

#[derive(Debug, Clone)]
pub struct HttpProductsService {
    client: ApiClient,
}

impl HttpProductsService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    async fn fetch_one(&self, request: ApiRequest, access: Access) -> Result<Product, ApiError> {
        let payload: ProductPayload = self.client.item(request, access, ITEM_KEYS).await?;

        Ok(Product::try_from(payload)?)
    }
}

#[async_trait]
impl ProductsService for HttpProductsService {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let payloads = self
            .client
            .list(ApiRequest::get("/products"), Access::Public, LIST_KEYS)
            .await?;

        Ok(into_products(payloads)?)
    }

    async fn search_products(&self, query: &str) -> Result<Vec<Product>, ApiError> {
        let request = ApiRequest::get("/products").query("search", query.trim());

        let payloads = self.client.list(request, Access::Public, LIST_KEYS).await?;

        Ok(into_products(payloads)?)
    }

    async fn get_product(&self, slug: &str) -> Result<Product, ApiError> {
        self.fetch_one(ApiRequest::get(format!("/products/slug/{slug}")), Access::Public)
            .await
    }

    async fn create_product(&self, draft: ProductDraft) -> Result<Product, ApiError> {
        draft.validate()?;

        let request = ApiRequest::post("/products").json(draft.to_json());

        self.fetch_one(request, Access::Authenticated).await
    }

    async fn update_product(
        &self,
        product: ProductId,
        draft: ProductDraft,
    ) -> Result<Product, ApiError> {
        draft.validate()?;

        let request = ApiRequest::put(format!("/products/{product}")).json(draft.to_json());

        self.fetch_one(request, Access::Authenticated).await
    }

    async fn delete_product(&self, product: ProductId) -> Result<(), ApiError> {
        self.client
            .call(
                ApiRequest::delete(format!("/products/{product}")),
                Access::Authenticated,
            )
            .await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// The whole catalog.
    async fn list_products(&self) -> Result<Vec<Product>, ApiError>;

    /// Catalog entries matching `query`.
    async fn search_products(&self, query: &str) -> Result<Vec<Product>, ApiError>;

    /// One product by its slug.
    async fn get_product(&self, slug: &str) -> Result<Product, ApiError>;

    /// Admin: add a product.
    async fn create_product(&self, draft: ProductDraft) -> Result<Product, ApiError>;

    /// Admin: replace a product's details.
    async fn update_product(
        &self,
        product: ProductId,
        draft: ProductDraft,
    ) -> Result<Product, ApiError>;

    /// Admin: remove a product.
    async fn delete_product(&self, product: ProductId) -> Result<(), ApiError>;
}
