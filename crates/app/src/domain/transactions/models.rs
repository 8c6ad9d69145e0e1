//! Transaction Models

use bengkel::{
    cashier::{Sale, Settlement},
    ids::TypedId,
    money::{Rupiah, from_non_negative_decimal, to_decimal},
};
use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::api::{DecodeError, ValidationError, lenient};

/// Transaction ID
pub type TransactionId = TypedId<Transaction>;

/// Counter sales are always settled in cash.
pub const CASH_PAYMENT: &str = "cash";

/// A recorded point-of-sale transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: TransactionId,
    pub total: Rupiah,
    pub paid: Rupiah,
    pub change: Rupiah,
    pub payment_method: String,
    pub recorded_on: Option<Date>,
}

/// A settled sale ready to be recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub sale: Sale,
    pub settlement: Settlement,
}

impl NewTransaction {
    /// Settle `sale` against the cash tendered.
    ///
    /// # Errors
    ///
    /// Returns the cashier error for an empty sale or short payment.
    pub fn settle(sale: Sale, tendered: Rupiah) -> Result<Self, ValidationError> {
        let settlement = sale.settle(tendered)?;

        Ok(Self { sale, settlement })
    }

    pub(crate) fn to_json(&self) -> Result<Value, ValidationError> {
        let items = self
            .sale
            .lines()
            .iter()
            .map(|line| -> Result<Value, ValidationError> {
                Ok(json!({
                    "product_id": line.product_id,
                    "quantity": line.quantity,
                    "price": to_decimal(&line.unit_price),
                    "subtotal": to_decimal(&line.line_total()?),
                }))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(json!({
            "items": items,
            "total": to_decimal(&self.settlement.total),
            "paid": to_decimal(&self.settlement.tendered),
            "change": to_decimal(&self.settlement.change),
            "payment_method": CASH_PAYMENT,
        }))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TransactionPayload {
    id: TransactionId,

    #[serde(alias = "total_amount", alias = "total_price")]
    total: Decimal,

    #[serde(default, alias = "paid_amount", alias = "cash")]
    paid: Option<Decimal>,

    #[serde(default, alias = "change_amount")]
    change: Option<Decimal>,

    #[serde(default)]
    payment_method: Option<String>,

    #[serde(default)]
    created_at: Option<String>,
}

impl TryFrom<TransactionPayload> for Transaction {
    type Error = DecodeError;

    fn try_from(payload: TransactionPayload) -> Result<Self, Self::Error> {
        let total = from_non_negative_decimal(payload.total)?;
        let paid = match payload.paid {
            Some(paid) => from_non_negative_decimal(paid)?,
            None => total,
        };
        let change = match payload.change {
            Some(change) => from_non_negative_decimal(change)?,
            None => from_non_negative_decimal(to_decimal(&paid) - to_decimal(&total))?,
        };

        Ok(Self {
            id: payload.id,
            total,
            paid,
            change,
            payment_method: payload
                .payment_method
                .unwrap_or_else(|| CASH_PAYMENT.to_string()),
            recorded_on: payload.created_at.as_deref().and_then(lenient::parse_date),
        })
    }
}
