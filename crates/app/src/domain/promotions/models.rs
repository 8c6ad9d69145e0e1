//! Promotion Models

use bengkel::{
    products::ProductId,
    promotions::{Promotion, PromotionDiscount, PromotionId},
};
use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    api::{DecodeError, ValidationError, lenient},
    domain::products::models::{ProductPayload, into_products},
};

#[derive(Debug, Deserialize)]
pub(crate) struct PromotionPayload {
    id: PromotionId,
    name: String,
    discount_type: String,
    discount_value: Decimal,

    #[serde(deserialize_with = "lenient::date_from_any")]
    start_date: Date,

    #[serde(deserialize_with = "lenient::date_from_any")]
    end_date: Date,

    #[serde(default = "active_by_default", deserialize_with = "lenient::bool_from_any")]
    is_active: bool,

    #[serde(default)]
    products: Option<Vec<ProductPayload>>,
}

const fn active_by_default() -> bool {
    true
}

impl TryFrom<PromotionPayload> for Promotion {
    type Error = DecodeError;

    fn try_from(payload: PromotionPayload) -> Result<Self, Self::Error> {
        Ok(Self {
            id: payload.id,
            name: payload.name,
            discount: PromotionDiscount::from_parts(
                payload.discount_type.trim(),
                payload.discount_value,
            )?,
            start_date: payload.start_date,
            end_date: payload.end_date,
            is_active: payload.is_active,
            products: into_products(payload.products.unwrap_or_default())?,
        })
    }
}

/// Admin promotion form.
#[derive(Debug, Clone, PartialEq)]
pub struct PromotionDraft {
    pub name: String,
    pub discount: PromotionDiscount,
    pub start_date: Date,
    pub end_date: Date,
    pub is_active: bool,
    pub product_ids: Vec<ProductId>,
}

impl PromotionDraft {
    /// # Errors
    ///
    /// Returns an error for a blank name or an end date before the start.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Required("promotion name"));
        }

        if self.end_date < self.start_date {
            return Err(ValidationError::DateRange);
        }

        Ok(())
    }

    pub(crate) fn to_json(&self) -> Value {
        json!({
            "name": self.name.trim(),
            "discount_type": self.discount.kind(),
            "discount_value": self.discount.value(),
            "start_date": self.start_date.to_string(),
            "end_date": self.end_date.to_string(),
            "is_active": self.is_active,
            "product_ids": self.product_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use bengkel::money::rupiah;
    use jiff::civil::date;
    use serde_json::json;
    use testresult::TestResult;

    use crate::domain::products::models::test_support::product_json;

    use super::*;

    fn decode(value: Value) -> Result<Promotion, DecodeError> {
        let payload: PromotionPayload = serde_json::from_value(value)?;

        Promotion::try_from(payload)
    }

    #[test]
    fn promotions_decode_with_their_products() -> TestResult {
        let promotion = decode(json!({
            "id": 3,
            "name": "Promo Lebaran",
            "discount_type": "fixed",
            "discount_value": "15000.00",
            "start_date": "2025-03-01T00:00:00.000000Z",
            "end_date": "2025-03-31",
            "is_active": 1,
            "products": [product_json(1, "50000")],
        }))?;

        assert_eq!(promotion.discount, PromotionDiscount::fixed(rupiah(15_000))?);
        assert_eq!(promotion.start_date, date(2025, 3, 1));
        assert!(promotion.is_active);

        let prices = promotion.resolved_prices(date(2025, 3, 15))?;
        let first = prices.first().map(|(_, resolved)| *resolved);

        assert_eq!(first.map(|resolved| resolved.final_price), Some(rupiah(35_000)));
        assert_eq!(first.map(|resolved| resolved.discount_percent), Some(30));

        Ok(())
    }

    #[test]
    fn unknown_discount_types_are_rejected() {
        let result = decode(json!({
            "id": 3,
            "name": "Aneh",
            "discount_type": "bogo",
            "discount_value": 1,
            "start_date": "2025-03-01",
            "end_date": "2025-03-31",
        }));

        assert!(matches!(result, Err(DecodeError::Pricing(_))));
    }

    #[test]
    fn drafts_reject_inverted_date_ranges() -> TestResult {
        let draft = PromotionDraft {
            name: "Promo Akhir Tahun".to_string(),
            discount: PromotionDiscount::percentage(Decimal::from(10))?,
            start_date: date(2025, 12, 31),
            end_date: date(2025, 12, 1),
            is_active: true,
            product_ids: vec![ProductId::new(1)],
        };

        assert_eq!(draft.validate(), Err(ValidationError::DateRange));

        Ok(())
    }

    #[test]
    fn drafts_serialize_in_the_api_shape() -> TestResult {
        let draft = PromotionDraft {
            name: " Promo Oli ".to_string(),
            discount: PromotionDiscount::percentage(Decimal::from(20))?,
            start_date: date(2025, 3, 1),
            end_date: date(2025, 3, 31),
            is_active: false,
            product_ids: vec![ProductId::new(4), ProductId::new(9)],
        };

        let body = draft.to_json();

        assert_eq!(body["name"], "Promo Oli");
        assert_eq!(body["discount_type"], "percentage");
        assert_eq!(body["start_date"], "2025-03-01");
        assert_eq!(body["product_ids"], json!([4, 9]));

        Ok(())
    }
}
