//! Counter transactions

pub mod models;
pub mod service;

pub use models::{CASH_PAYMENT, NewTransaction, Transaction, TransactionId};
pub use service::*;
