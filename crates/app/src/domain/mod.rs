//! Bengkel Domain Concerns

pub mod auth;
pub mod bookings;
pub mod carts;
pub mod checkout;
pub mod orders;
pub mod products;
pub mod promotions;
pub mod reviews;
pub mod staff;
pub mod transactions;
