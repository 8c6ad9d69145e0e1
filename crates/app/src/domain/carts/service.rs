//! Carts service.

use async_trait::async_trait;
use bengkel::{
    cart::{Cart, CartAction, CartError, CartItemId, CartLine},
    products::ProductId,
};
use mockall::automock;
use serde_json::json;
use tracing::info;

use crate::{
    api::{Access, ApiClient, ApiError, ApiRequest, DecodeError, ValidationError},
    domain::carts::models::CartLinePayload,
    optimistic::apply_optimistically,
};

const LIST_KEYS: &[&str] = &["cart", "items", "cart_items"];

#[derive(Debug, Clone)]
pub struct HttpCartService {
    client: ApiClient,
}

impl HttpCartService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CartService for HttpCartService {
    async fn get_cart(&self) -> Result<Vec<CartLine>, ApiError> {
        let payloads: Vec<CartLinePayload> = self
            .client
            .list(ApiRequest::get("/cart"), Access::Authenticated, LIST_KEYS)
            .await?;

        let lines = payloads
            .into_iter()
            .map(CartLine::try_from)
            .collect::<Result<Vec<_>, DecodeError>>()?;

        Ok(lines)
    }

    async fn add_item(&self, product: ProductId, quantity: u32) -> Result<(), ApiError> {
        if quantity == 0 {
            return Err(ValidationError::Cart(CartError::InvalidQuantity).into());
        }

        let request = ApiRequest::post("/cart").json(json!({
            "product_id": product,
            "quantity": quantity,
        }));

        self.client.call(request, Access::Authenticated).await?;

        info!(%product, quantity, "added to cart");

        Ok(())
    }

    async fn update_quantity(&self, item: CartItemId, quantity: u32) -> Result<(), ApiError> {
        let request =
            ApiRequest::put(format!("/cart/{item}")).json(json!({ "quantity": quantity }));

        self.client.call(request, Access::Authenticated).await?;

        Ok(())
    }

    async fn remove_item(&self, item: CartItemId) -> Result<(), ApiError> {
        self.client
            .call(
                ApiRequest::delete(format!("/cart/{item}")),
                Access::Authenticated,
            )
            .await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartService: Send + Sync {
    /// Lines in the signed-in customer's cart.
    async fn get_cart(&self) -> Result<Vec<CartLine>, ApiError>;

    /// Put `quantity` units of `product` in the cart.
    async fn add_item(&self, product: ProductId, quantity: u32) -> Result<(), ApiError>;

    /// Set the quantity of one line.
    async fn update_quantity(&self, item: CartItemId, quantity: u32) -> Result<(), ApiError>;

    /// Drop one line.
    async fn remove_item(&self, item: CartItemId) -> Result<(), ApiError>;
}

/// Fetch the cart with nothing selected.
///
/// # Errors
///
/// Returns the error from the cart service.
pub async fn load_cart(service: &dyn CartService) -> Result<Cart, ApiError> {
    Ok(Cart::new(service.get_cart().await?))
}

/// Change a line's quantity locally, then on the server; rolled back if the
/// server refuses.
///
/// # Errors
///
/// Returns a validation error for zero or out-of-stock quantities, or the
/// server's error.
pub async fn change_quantity(
    service: &dyn CartService,
    cart: &mut Cart,
    item: CartItemId,
    quantity: u32,
) -> Result<(), ApiError> {
    apply_optimistically(
        cart,
        CartAction::SetQuantity { item, quantity },
        |_| service.update_quantity(item, quantity),
    )
    .await
}

/// Remove a line locally, then on the server; put back if the server
/// refuses.
///
/// # Errors
///
/// Returns a validation error for unknown lines, or the server's error.
pub async fn remove_line(
    service: &dyn CartService,
    cart: &mut Cart,
    item: CartItemId,
) -> Result<(), ApiError> {
    apply_optimistically(cart, CartAction::Remove { item }, |_| {
        service.remove_item(item)
    })
    .await
}

#[cfg(test)]
mod tests {
    use bengkel::money::rupiah;
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        api::{
            ApiResponse,
            test_support::{answering, client},
            transport::MockTransport,
        },
        domain::products::models::test_support::product_json,
        session::test_support::{signed_in, signed_out},
    };

    use super::*;

    fn two_lines() -> serde_json::Value {
        json!({
            "cart": [
                { "id": 1, "quantity": 1, "product": product_json(1, "20000") },
                { "id": 2, "quantity": 2, "product": product_json(2, "15000") },
            ]
        })
    }

    async fn loaded_cart() -> Result<Cart, ApiError> {
        let service = HttpCartService::new(client(answering(200, two_lines()), signed_in()));

        load_cart(&service).await
    }

    fn rejecting_service() -> MockCartService {
        let mut service = MockCartService::new();

        service.expect_update_quantity().returning(|_, _| {
            Err(ApiError::Server {
                status: 422,
                message: "Stok tidak mencukupi".to_string(),
            })
        });
        service.expect_remove_item().returning(|_| {
            Err(ApiError::Server {
                status: 500,
                message: "Server Error".to_string(),
            })
        });

        service
    }

    #[tokio::test]
    async fn add_to_cart_without_a_session_sends_nothing() {
        let mut transport = MockTransport::new();
        transport.expect_send().never();

        let service = HttpCartService::new(client(transport, signed_out()));

        let result = service.add_item(ProductId::new(3), 1).await;

        assert!(matches!(result, Err(ApiError::AuthenticationRequired)));
    }

    #[tokio::test]
    async fn add_to_cart_posts_product_and_quantity() -> TestResult {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .once()
            .withf(|request| {
                request.path == "/cart"
                    && request.body == Some(json!({ "product_id": 3, "quantity": 2 }))
            })
            .return_once(|_| Ok(ApiResponse::new(201, json!({ "message": "ok" }))));

        HttpCartService::new(client(transport, signed_in()))
            .add_item(ProductId::new(3), 2)
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn loaded_carts_start_with_nothing_selected() -> TestResult {
        let cart = loaded_cart().await?;

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.totals()?.total, rupiah(0));

        Ok(())
    }

    #[tokio::test]
    async fn accepted_quantity_changes_stay() -> TestResult {
        let mut cart = loaded_cart().await?;
        let mut service = MockCartService::new();
        service
            .expect_update_quantity()
            .once()
            .withf(|item, quantity| *item == CartItemId::new(1) && *quantity == 3)
            .returning(|_, _| Ok(()));

        change_quantity(&service, &mut cart, CartItemId::new(1), 3).await?;

        assert_eq!(cart.line(CartItemId::new(1)).map(|line| line.quantity), Some(3));

        Ok(())
    }

    #[tokio::test]
    async fn rejected_quantity_changes_roll_back() -> TestResult {
        let mut cart = loaded_cart().await?;
        let before = cart.clone();

        let result = change_quantity(&rejecting_service(), &mut cart, CartItemId::new(2), 5).await;

        assert!(matches!(result, Err(ApiError::Server { status: 422, .. })));
        assert_eq!(cart, before);

        Ok(())
    }

    #[tokio::test]
    async fn rejected_removals_put_the_line_back_in_place() -> TestResult {
        let mut cart = loaded_cart().await?;
        cart.select_all();
        let before = cart.clone();

        let result = remove_line(&rejecting_service(), &mut cart, CartItemId::new(1)).await;

        assert!(result.is_err());
        assert_eq!(cart, before);

        Ok(())
    }

    #[tokio::test]
    async fn lines_without_a_stock_figure_defer_to_the_server() -> TestResult {
        let body = json!({
            "cart": [
                { "id": 1, "quantity": 1, "product": { "id": 3, "name": "Oli", "price": 50000 } },
            ]
        });
        let loader = HttpCartService::new(client(answering(200, body), signed_in()));
        let mut cart = load_cart(&loader).await?;

        let mut service = MockCartService::new();
        service
            .expect_update_quantity()
            .once()
            .withf(|item, quantity| *item == CartItemId::new(1) && *quantity == 2)
            .returning(|_, _| Ok(()));

        change_quantity(&service, &mut cart, CartItemId::new(1), 2).await?;

        assert_eq!(cart.line(CartItemId::new(1)).map(|line| line.quantity), Some(2));

        Ok(())
    }

    #[tokio::test]
    async fn out_of_stock_quantities_never_reach_the_server() -> TestResult {
        let mut cart = loaded_cart().await?;
        let mut service = MockCartService::new();
        service.expect_update_quantity().never();

        let result = change_quantity(&service, &mut cart, CartItemId::new(1), 99).await;

        assert!(matches!(
            result,
            Err(ApiError::Validation(ValidationError::Cart(
                CartError::InsufficientStock { available: 10, .. }
            )))
        ));

        Ok(())
    }
}
