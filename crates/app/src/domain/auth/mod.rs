//! Sign-in, registration and the signed-in profile

pub mod models;
pub mod service;

pub use models::{Credentials, NewAccount};
pub use service::*;
