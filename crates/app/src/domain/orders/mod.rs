//! Orders

pub mod models;
pub mod service;

pub use models::{NewOrder, Order, OrderId, OrderLine};
pub use service::*;
