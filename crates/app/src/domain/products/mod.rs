//! Products

pub mod models;
pub mod search;
pub mod service;

pub use models::ProductDraft;
pub use search::ProductSearch;
pub use service::*;
