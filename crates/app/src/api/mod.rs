//! Remote storefront API.

mod client;
pub mod envelope;
pub mod error;
pub(crate) mod lenient;
pub mod transport;

pub use client::{Access, ApiClient};
#[cfg(test)]
pub(crate) use client::test_support;
pub use error::{ApiError, DecodeError, ValidationError, server_message};
pub use transport::{ApiRequest, ApiResponse, Method, ReqwestTransport, Transport, TransportError};
