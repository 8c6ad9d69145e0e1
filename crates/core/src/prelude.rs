//! Bengkel prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartAction, CartError, CartItemId, CartLine, CartTotals, CartUndo, cart_totals},
    cashier::{CashierError, Sale, SaleLine, Settlement},
    checkout::{
        CheckoutForm, CheckoutItem, CheckoutTotals, CheckoutValidationError, PaymentMethod,
        ShippingMethod, checkout_totals, validate_checkout,
    },
    money::{AmountError, Rupiah, format_rupiah, rupiah},
    optimistic::Optimistic,
    orders::OrderStatus,
    products::{Product, ProductId},
    promotions::{
        PricingError, Promotion, PromotionDiscount, PromotionId, ResolvedPrice, resolve_price,
    },
};
