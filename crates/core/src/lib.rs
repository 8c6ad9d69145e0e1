//! Bengkel
//!
//! Pricing, cart and checkout rules for the Bengkel motorcycle workshop
//! storefront: promotion price resolution, cart and checkout totals, checkout
//! validation and point-of-sale change calculation. Everything here is pure
//! and free of I/O.

pub mod cart;
pub mod cashier;
pub mod checkout;
pub mod discounts;
pub mod ids;
pub mod money;
pub mod optimistic;
pub mod orders;
pub mod prelude;
pub mod products;
pub mod promotions;
