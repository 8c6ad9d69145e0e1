//! Checkout

pub mod handoff;
pub mod service;

pub use handoff::{CHECKOUT_ITEMS_KEY, CheckoutHandoff};
pub use service::{Checkout, CheckoutSummary};
