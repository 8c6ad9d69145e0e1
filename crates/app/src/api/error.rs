//! API errors.

use bengkel::{
    cart::CartError, cashier::CashierError, checkout::CheckoutValidationError,
    money::AmountError, promotions::PricingError,
};
use rusty_money::MoneyError;
use serde_json::Value;
use thiserror::Error;

use crate::{api::transport::TransportError, storage::StorageError};

/// Everything a storefront call can fail with.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never got an answer.
    #[error("unable to reach the server, please check your connection")]
    Network(#[from] TransportError),

    /// A protected call was attempted without a token. Nothing was sent.
    #[error("please log in to continue")]
    AuthenticationRequired,

    /// The server rejected the token; the local session has been cleared.
    #[error("your session has expired, please log in again")]
    SessionExpired {
        /// Where the customer should be sent to sign in again
        login_path: &'static str,
    },

    /// Rejected locally before any request was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Non-2xx answer; `message` is the server's own wording.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// A 2xx answer whose body could not be understood.
    #[error("unexpected response from server: {0}")]
    Decode(#[from] DecodeError),

    #[error("failed to encode request body")]
    Encode(#[source] serde_json::Error),

    #[error("local storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Whether the customer has to sign in before retrying.
    #[must_use]
    pub const fn needs_login(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationRequired | Self::SessionExpired { .. }
        )
    }

    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Input rejected on the client.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error(transparent)]
    Checkout(#[from] CheckoutValidationError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Cashier(#[from] CashierError),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    Money(#[from] MoneyError),

    #[error(transparent)]
    Amount(#[from] AmountError),

    #[error("{0} is required")]
    Required(&'static str),

    #[error("rating must be between 1 and 5, got {0}")]
    Rating(u8),

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("end date must not be before start date")]
    DateRange,
}

/// A successful response whose body did not have the expected shape.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("missing {0}")]
    Missing(&'static str),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Amount(#[from] AmountError),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error("invalid date {0:?}")]
    Date(String),

    #[error("unknown status {0:?}")]
    Status(String),
}

const FALLBACK_MESSAGE: &str = "something went wrong, please try again";

/// The server's own error wording: `message`, then `error`, then the first
/// field error of a validation response, then a bare string body.
#[must_use]
pub fn server_message(body: &Value) -> String {
    let text = |value: &Value| {
        value
            .as_str()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    };

    let first_field_error = |errors: &Value| {
        errors
            .as_object()?
            .values()
            .find_map(|messages| match messages {
                Value::Array(messages) => messages.iter().find_map(text),
                other => text(other),
            })
    };

    match body {
        Value::Object(map) => map
            .get("message")
            .and_then(text)
            .or_else(|| map.get("error").and_then(text))
            .or_else(|| map.get("errors").and_then(first_field_error)),
        other => text(other),
    }
    .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn message_wins_over_error() {
        let body = json!({ "message": "Stok tidak cukup", "error": "ignored" });

        assert_eq!(server_message(&body), "Stok tidak cukup");
    }

    #[test]
    fn field_errors_are_used_when_there_is_no_message() {
        let body = json!({ "errors": { "email": ["The email has already been taken."] } });

        assert_eq!(server_message(&body), "The email has already been taken.");
    }

    #[test]
    fn plain_text_bodies_are_passed_through() {
        assert_eq!(server_message(&json!("Bad Gateway")), "Bad Gateway");
    }

    #[test]
    fn unhelpful_bodies_fall_back() {
        assert_eq!(server_message(&Value::Null), FALLBACK_MESSAGE);
        assert_eq!(server_message(&json!({ "message": "  " })), FALLBACK_MESSAGE);
    }

    #[test]
    fn server_errors_display_the_server_message_verbatim() {
        let error = ApiError::Server {
            status: 422,
            message: "Produk sudah ada di keranjang".to_string(),
        };

        assert_eq!(error.to_string(), "Produk sudah ada di keranjang");
        assert_eq!(error.status(), Some(422));
    }
}
