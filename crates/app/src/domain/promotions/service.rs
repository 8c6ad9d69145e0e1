//! Promotions service.

use async_trait::async_trait;
use bengkel::promotions::{Promotion, PromotionId};
use mockall::automock;
use tracing::info;

use crate::{
    api::{Access, ApiClient, ApiError, ApiRequest, DecodeError},
    domain::promotions::models::{PromotionDraft, PromotionPayload},
};

const LIST_KEYS: &[&str] = &["promotions"];
const ITEM_KEYS: &[&str] = &["promotion"];

#[derive(Debug, Clone)]
pub struct HttpPromotionsService {
    client: ApiClient,
}

impl HttpPromotionsService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    async fn save(&self, request: ApiRequest, draft: &PromotionDraft) -> Result<Promotion, ApiError> {
        draft.validate()?;

        let payload: PromotionPayload = self
            .client
            .item(request.json(draft.to_json()), Access::Authenticated, ITEM_KEYS)
            .await?;

        Ok(Promotion::try_from(payload)?)
    }
}

#[async_trait]
impl PromotionsService for HttpPromotionsService {
    async fn list_promotions(&self) -> Result<Vec<Promotion>, ApiError> {
        let payloads: Vec<PromotionPayload> = self
            .client
            .list(ApiRequest::get("/promotions"), Access::Public, LIST_KEYS)
            .await?;

        let promotions = payloads
            .into_iter()
            .map(Promotion::try_from)
            .collect::<Result<Vec<_>, DecodeError>>()?;

        Ok(promotions)
    }

    async fn create_promotion(&self, draft: PromotionDraft) -> Result<Promotion, ApiError> {
        let created = self.save(ApiRequest::post("/promotions"), &draft).await?;

        info!(promotion = %created.id, name = %created.name, "promotion created");

        Ok(created)
    }

    async fn update_promotion(
        &self,
        promotion: PromotionId,
        draft: PromotionDraft,
    ) -> Result<Promotion, ApiError> {
        self.save(ApiRequest::put(format!("/promotions/{promotion}")), &draft)
            .await
    }

    async fn delete_promotion(&self, promotion: PromotionId) -> Result<(), ApiError> {
        self.client
            .call(
                ApiRequest::delete(format!("/promotions/{promotion}")),
                Access::Authenticated,
            )
            .await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait PromotionsService: Send + Sync {
    /// Every promotion, running or not.
    async fn list_promotions(&self) -> Result<Vec<Promotion>, ApiError>;

    /// Admin: start a promotion.
    async fn create_promotion(&self, draft: PromotionDraft) -> Result<Promotion, ApiError>;

    /// Admin: change a promotion.
    async fn update_promotion(
        &self,
        promotion: PromotionId,
        draft: PromotionDraft,
    ) -> Result<Promotion, ApiError>;

    /// Admin: remove a promotion.
    async fn delete_promotion(&self, promotion: PromotionId) -> Result<(), ApiError>;
}
