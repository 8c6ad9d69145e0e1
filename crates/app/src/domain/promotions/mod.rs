//! Promotions

pub mod models;
pub mod service;

pub use models::PromotionDraft;
pub use service::*;
