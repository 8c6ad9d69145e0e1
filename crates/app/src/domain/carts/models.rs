//! Cart Models

use bengkel::cart::{CartItemId, CartLine};
use serde::Deserialize;

use crate::{
    api::{DecodeError, lenient},
    domain::products::models::ProductPayload,
};

/// Cart line as the API sends it.
#[derive(Debug, Deserialize)]
pub(crate) struct CartLinePayload {
    id: CartItemId,

    #[serde(deserialize_with = "lenient::u32_from_any")]
    quantity: u32,

    product: ProductPayload,
}

impl TryFrom<CartLinePayload> for CartLine {
    type Error = DecodeError;

    fn try_from(payload: CartLinePayload) -> Result<Self, Self::Error> {
        Ok(Self::new(
            payload.id,
            payload.product.try_into()?,
            payload.quantity,
        )?)
    }
}
