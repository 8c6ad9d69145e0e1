//! Reviews service.

use async_trait::async_trait;
use bengkel::products::ProductId;
use mockall::automock;
use tracing::info;

use crate::{
    api::{Access, ApiClient, ApiError, ApiRequest},
    domain::reviews::models::{NewReview, Review},
};

const LIST_KEYS: &[&str] = &["reviews"];
const ITEM_KEYS: &[&str] = &["review"];

#[derive(Debug, Clone)]
pub struct HttpReviewsService {
    client: ApiClient,
}

impl HttpReviewsService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReviewsService for HttpReviewsService {
    async fn submit_review(&self, review: NewReview) -> Result<Review, ApiError> {
        review.validate()?;

        let submitted: Review = self
            .client
            .item(
                ApiRequest::post("/reviews").json(review.to_json()),
                Access::Authenticated,
                ITEM_KEYS,
            )
            .await?;

        info!(review = %submitted.id, product = %submitted.product_id, "review submitted");

        Ok(submitted)
    }

    async fn product_reviews(&self, product: ProductId) -> Result<Vec<Review>, ApiError> {
        self.client
            .list(
                ApiRequest::get("/reviews").query("product_id", product.to_string()),
                Access::Public,
                LIST_KEYS,
            )
            .await
    }
}

#[automock]
#[async_trait]
pub trait ReviewsService: Send + Sync {
    /// Rate a product.
    async fn submit_review(&self, review: NewReview) -> Result<Review, ApiError>;

    /// Reviews of one product.
    async fn product_reviews(&self, product: ProductId) -> Result<Vec<Review>, ApiError>;
}
