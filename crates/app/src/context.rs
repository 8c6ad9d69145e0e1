//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    api::{ApiClient, ReqwestTransport, Transport, TransportError},
    config::ClientConfig,
    domain::{
        auth::{AuthService, HttpAuthService},
        bookings::{BookingsService, HttpBookingsService},
        carts::{CartService, HttpCartService},
        checkout::{Checkout, CheckoutHandoff},
        orders::{HttpOrdersService, OrdersService},
        products::{HttpProductsService, ProductSearch, ProductsService},
        promotions::{HttpPromotionsService, PromotionsService},
        reviews::{HttpReviewsService, ReviewsService},
        staff::{HttpStaffService, StaffService},
        transactions::{HttpTransactionsService, TransactionsService},
    },
    search::SearchDebouncer,
    session::Session,
    storage::{FileStore, KeyValueStore},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to build HTTP client")]
    Transport(#[from] TransportError),
}

#[derive(Clone)]
pub struct AppContext {
    pub session: Session,
    pub auth: Arc<dyn AuthService>,
    pub products: Arc<dyn ProductsService>,
    pub product_search: ProductSearch,
    pub cart: Arc<dyn CartService>,
    pub orders: Arc<dyn OrdersService>,
    pub checkout: Checkout,
    pub bookings: Arc<dyn BookingsService>,
    pub promotions: Arc<dyn PromotionsService>,
    pub staff: Arc<dyn StaffService>,
    pub reviews: Arc<dyn ReviewsService>,
    pub transactions: Arc<dyn TransactionsService>,
}

impl AppContext {
    /// Build the context from configuration, with file-backed session and
    /// checkout stores.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn from_config(config: &ClientConfig) -> Result<Self, AppInitError> {
        let transport = Arc::new(ReqwestTransport::new(config.api.api_url.as_str())?);
        let session_store = Arc::new(FileStore::new(&config.storage.session_file));
        let checkout_store = Arc::new(FileStore::new(&config.storage.checkout_file));

        Ok(Self::with_parts(transport, session_store, checkout_store))
    }

    /// Wire every service over one transport.
    #[must_use]
    pub fn with_parts(
        transport: Arc<dyn Transport>,
        session_store: Arc<dyn KeyValueStore>,
        checkout_store: Arc<dyn KeyValueStore>,
    ) -> Self {
        let session = Session::new(session_store);
        let client = ApiClient::new(transport, session.clone());

        let products: Arc<dyn ProductsService> =
            Arc::new(HttpProductsService::new(client.clone()));
        let orders: Arc<dyn OrdersService> = Arc::new(HttpOrdersService::new(client.clone()));

        Self {
            auth: Arc::new(HttpAuthService::new(client.clone())),
            product_search: ProductSearch::new(Arc::clone(&products), SearchDebouncer::default()),
            products,
            cart: Arc::new(HttpCartService::new(client.clone())),
            checkout: Checkout::new(Arc::clone(&orders), CheckoutHandoff::new(checkout_store)),
            orders,
            bookings: Arc::new(HttpBookingsService::new(client.clone())),
            promotions: Arc::new(HttpPromotionsService::new(client.clone())),
            staff: Arc::new(HttpStaffService::new(client.clone())),
            reviews: Arc::new(HttpReviewsService::new(client.clone())),
            transactions: Arc::new(HttpTransactionsService::new(client)),
            session,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        api::{
            ApiResponse,
            transport::{Method, MockTransport},
        },
        domain::auth::Credentials,
        storage::MemoryStore,
    };

    use super::*;

    #[tokio::test]
    async fn services_share_one_session() -> TestResult {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .once()
            .withf(|request| request.method == Method::Post && request.path == "/login")
            .return_once(|_| {
                Ok(ApiResponse::new(
                    200,
                    json!({
                        "token": "shared-token",
                        "user": { "id": 1, "name": "Admin", "email": "admin@bengkel.test", "role": "admin" },
                    }),
                ))
            });
        transport
            .expect_send()
            .once()
            .withf(|request| {
                request.path == "/staff"
                    && request
                        .bearer
                        .as_ref()
                        .is_some_and(|token| token.expose() == "shared-token")
            })
            .return_once(|_| Ok(ApiResponse::new(200, json!({ "data": [] }))));

        let context = AppContext::with_parts(
            Arc::new(transport),
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryStore::new()),
        );

        context
            .auth
            .login(Credentials {
                email: "admin@bengkel.test".to_string(),
                password: "rahasia123".to_string(),
            })
            .await?;

        assert!(context.staff.list_staff().await?.is_empty());
        assert!(context.session.user()?.is_some_and(|user| user.is_staff()));

        Ok(())
    }
}
