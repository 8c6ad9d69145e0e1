//! Checkout service.

use std::{fmt, sync::Arc};

use bengkel::{
    cart::Cart,
    checkout::{
        CheckoutForm, CheckoutItem, CheckoutTotals, CheckoutValidationError, ShippingMethod,
        checkout_totals, validate_checkout,
    },
};
use tracing::{debug, info};

use crate::{
    api::{ApiError, ValidationError},
    domain::{
        checkout::handoff::CheckoutHandoff,
        orders::{NewOrder, Order, OrderId, OrdersService},
    },
};

/// What the checkout screen shows before submission.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSummary {
    pub items: Vec<CheckoutItem>,
    pub totals: CheckoutTotals,
}

#[derive(Clone)]
pub struct Checkout {
    orders: Arc<dyn OrdersService>,
    handoff: CheckoutHandoff,
}

impl fmt::Debug for Checkout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checkout")
            .field("handoff", &self.handoff)
            .finish_non_exhaustive()
    }
}

impl Checkout {
    #[must_use]
    pub fn new(orders: Arc<dyn OrdersService>, handoff: CheckoutHandoff) -> Self {
        Self { orders, handoff }
    }

    /// Hand the cart's selected lines over to checkout.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutValidationError::EmptyCart`] when nothing is
    /// selected, or an error when the hand-off cannot be stored.
    pub fn begin(&self, cart: &Cart) -> Result<Vec<CheckoutItem>, ApiError> {
        let items = cart.checkout_items().map_err(ValidationError::from)?;

        if items.is_empty() {
            return Err(ValidationError::from(CheckoutValidationError::EmptyCart).into());
        }

        self.handoff.save(&items)?;

        debug!(lines = items.len(), "checkout items handed off");

        Ok(items)
    }

    /// The handed-off items priced with `shipping`.
    ///
    /// # Errors
    ///
    /// Returns an error when the hand-off cannot be read or totals overflow.
    pub fn summary(&self, shipping: ShippingMethod) -> Result<CheckoutSummary, ApiError> {
        let items = self.handoff.load()?;
        let totals = checkout_totals(&items, shipping).map_err(ValidationError::from)?;

        Ok(CheckoutSummary { items, totals })
    }

    /// Validate and place the order. Nothing is sent unless validation
    /// passes; the hand-off is cleared once the order exists.
    ///
    /// # Errors
    ///
    /// Returns the first [`CheckoutValidationError`], or the error from the
    /// orders service.
    pub async fn submit(&self, form: CheckoutForm) -> Result<Order, ApiError> {
        let items = self.handoff.load()?;

        validate_checkout(&items, &form).map_err(ValidationError::from)?;

        let order = self.orders.create_order(NewOrder { items, form }).await?;

        self.handoff.clear()?;

        info!(order = %order.id, "checkout complete");

        Ok(order)
    }

    /// The order id the customer is redirected to after a successful
    /// checkout.
    #[must_use]
    pub fn confirmation_path(order: OrderId) -> String {
        format!("/orders/{order}")
    }
}
