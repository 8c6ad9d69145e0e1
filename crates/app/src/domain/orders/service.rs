//! Orders service.

use async_trait::async_trait;
use bengkel::orders::OrderStatus;
use mockall::automock;
use serde_json::json;
use tracing::info;

use crate::{
    api::{Access, ApiClient, ApiError, ApiRequest, DecodeError, ValidationError},
    domain::orders::models::{NewOrder, Order, OrderId, OrderPayload},
};

const LIST_KEYS: &[&str] = &["orders"];
const ITEM_KEYS: &[&str] = &["order"];

#[derive(Debug, Clone)]
pub struct HttpOrdersService {
    client: ApiClient,
}

impl HttpOrdersService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    async fn fetch_one(&self, request: ApiRequest) -> Result<Order, ApiError> {
        let payload: OrderPayload = self
            .client
            .item(request, Access::Authenticated, ITEM_KEYS)
            .await?;

        Ok(Order::try_from(payload)?)
    }
}

#[async_trait]
impl OrdersService for HttpOrdersService {
    async fn create_order(&self, order: NewOrder) -> Result<Order, ApiError> {
        let body = order.to_json().map_err(ValidationError::from)?;

        let created = self.fetch_one(ApiRequest::post("/orders").json(body)).await?;

        info!(order = %created.id, total = %created.total, "order created");

        Ok(created)
    }

    async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        let payloads: Vec<OrderPayload> = self
            .client
            .list(ApiRequest::get("/orders"), Access::Authenticated, LIST_KEYS)
            .await?;

        let orders = payloads
            .into_iter()
            .map(Order::try_from)
            .collect::<Result<Vec<_>, DecodeError>>()?;

        Ok(orders)
    }

    async fn get_order(&self, order: OrderId) -> Result<Order, ApiError> {
        self.fetch_one(ApiRequest::get(format!("/orders/{order}")))
            .await
    }

    async fn request_status(&self, order: OrderId, status: OrderStatus) -> Result<Order, ApiError> {
        let request = ApiRequest::post(format!("/orders/{order}/status"))
            .json(json!({ "status": status.as_str() }));

        let updated = self.fetch_one(request).await?;

        info!(order = %order, %status, "order status updated");

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Place an order.
    async fn create_order(&self, order: NewOrder) -> Result<Order, ApiError>;

    /// Orders visible to the signed-in user; admins see every order.
    async fn list_orders(&self) -> Result<Vec<Order>, ApiError>;

    /// One order.
    async fn get_order(&self, order: OrderId) -> Result<Order, ApiError>;

    /// Ask the server to move an order to `status`. The server decides
    /// whether the transition is allowed.
    async fn request_status(&self, order: OrderId, status: OrderStatus) -> Result<Order, ApiError>;
}
