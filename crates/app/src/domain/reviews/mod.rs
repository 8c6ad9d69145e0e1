//! Product reviews

pub mod models;
pub mod service;

pub use models::{NewReview, RATING_RANGE, Review, ReviewId, average_rating};
pub use service::*;
