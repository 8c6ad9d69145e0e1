//! Order Models

use bengkel::{
    checkout::{CheckoutForm, CheckoutItem, checkout_totals},
    ids::TypedId,
    money::{Rupiah, from_minor, from_non_negative_decimal, to_decimal},
    orders::OrderStatus,
    products::ProductId,
};
use jiff::civil::Date;
use rust_decimal::Decimal;
use rusty_money::MoneyError;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::api::{DecodeError, lenient};

/// Order ID
pub type OrderId = TypedId<Order>;

/// Order Model
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub status: OrderStatus,
    pub total: Rupiah,
    pub items: Vec<OrderLine>,
    pub shipping: Option<String>,
    pub payment: Option<String>,
    pub recipient_name: Option<String>,
    pub address: Option<String>,
    pub placed_on: Option<Date>,
}

/// Order Line Model
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub product_id: Option<ProductId>,
    pub product_name: Option<String>,
    pub quantity: u32,
    pub subtotal: Rupiah,
}

/// New Order Model: the checked-out items plus the checkout form.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub items: Vec<CheckoutItem>,
    pub form: CheckoutForm,
}

impl NewOrder {
    pub(crate) fn to_json(&self) -> Result<Value, MoneyError> {
        let totals = checkout_totals(&self.items, self.form.shipping)?;

        let items: Vec<Value> = self
            .items
            .iter()
            .map(|item| {
                json!({
                    "product_id": item.product_id,
                    "quantity": item.quantity,
                    "subtotal": to_decimal(&item.subtotal),
                })
            })
            .collect();

        Ok(json!({
            "items": items,
            "recipient_name": self.form.recipient_name.trim(),
            "phone": self.form.phone.trim(),
            "address": self.form.address.trim(),
            "shipping_method": self.form.shipping,
            "payment_method": self.form.payment,
            "bank": self.form.bank.as_deref().map(str::trim),
            "notes": self.form.notes,
            "subtotal": to_decimal(&totals.subtotal),
            "shipping_cost": to_decimal(&totals.shipping_cost),
            "total": to_decimal(&totals.total),
        }))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrderPayload {
    id: OrderId,

    #[serde(default)]
    status: Option<String>,

    #[serde(alias = "total_price", alias = "total_amount")]
    total: Decimal,

    #[serde(default, alias = "order_items")]
    items: Option<Vec<OrderLinePayload>>,

    #[serde(default, alias = "shipping_method")]
    shipping: Option<String>,

    #[serde(default, alias = "payment_method")]
    payment: Option<String>,

    #[serde(default)]
    recipient_name: Option<String>,

    #[serde(default, alias = "shipping_address")]
    address: Option<String>,

    #[serde(default)]
    created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrderLinePayload {
    #[serde(default)]
    product_id: Option<ProductId>,

    #[serde(default)]
    product: Option<ProductSummary>,

    #[serde(deserialize_with = "lenient::u32_from_any")]
    quantity: u32,

    #[serde(default)]
    price: Option<Decimal>,

    #[serde(default)]
    subtotal: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct ProductSummary {
    id: ProductId,

    #[serde(default)]
    name: Option<String>,
}

impl TryFrom<OrderLinePayload> for OrderLine {
    type Error = DecodeError;

    fn try_from(payload: OrderLinePayload) -> Result<Self, Self::Error> {
        let subtotal = match (payload.subtotal, payload.price) {
            (Some(subtotal), _) => from_non_negative_decimal(subtotal)?,
            (None, Some(price)) => {
                let unit = from_non_negative_decimal(price)?.to_minor_units();

                unit.checked_mul(i64::from(payload.quantity))
                    .map(from_minor)
                    .ok_or(DecodeError::Missing("order line subtotal"))?
            }
            (None, None) => return Err(DecodeError::Missing("order line price")),
        };

        let (summary_id, product_name) = payload
            .product
            .map_or((None, None), |product| (Some(product.id), product.name));

        Ok(Self {
            product_id: payload.product_id.or(summary_id),
            product_name,
            quantity: payload.quantity,
            subtotal,
        })
    }
}

impl TryFrom<OrderPayload> for Order {
    type Error = DecodeError;

    fn try_from(payload: OrderPayload) -> Result<Self, Self::Error> {
        let status = match payload.status.as_deref() {
            None => OrderStatus::Pending,
            Some(raw) => raw
                .parse()
                .map_err(|_| DecodeError::Status(raw.to_string()))?,
        };

        let items = payload
            .items
            .unwrap_or_default()
            .into_iter()
            .map(OrderLine::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: payload.id,
            status,
            total: from_non_negative_decimal(payload.total)?,
            items,
            shipping: payload.shipping,
            payment: payload.payment,
            recipient_name: payload.recipient_name,
            address: payload.address,
            placed_on: payload.created_at.as_deref().and_then(lenient::parse_date),
        })
    }
}

#[cfg(test)]
mod tests {
    use bengkel::{
        checkout::{PaymentMethod, ShippingMethod},
        money::rupiah,
    };
    use jiff::civil::date;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn orders_decode_with_nested_items() -> TestResult {
        let payload: OrderPayload = serde_json::from_value(json!({
            "id": 21,
            "status": "shipped",
            "total_price": "80000.00",
            "order_items": [
                { "product": { "id": 1, "name": "Kampas Rem" }, "quantity": 1, "price": "20000" },
                { "product_id": 2, "quantity": "2", "subtotal": 35000 },
            ],
            "created_at": "2025-03-02T04:05:06.000000Z",
        }))?;

        let order = Order::try_from(payload)?;

        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.total, rupiah(80_000));
        assert_eq!(order.placed_on, Some(date(2025, 3, 2)));

        let subtotals: Vec<Rupiah> = order.items.iter().map(|line| line.subtotal).collect();
        assert_eq!(subtotals, vec![rupiah(20_000), rupiah(35_000)]);
        assert_eq!(
            order.items.first().and_then(|line| line.product_name.as_deref()),
            Some("Kampas Rem")
        );

        Ok(())
    }

    #[test]
    fn unknown_statuses_are_decode_errors() -> TestResult {
        let payload: OrderPayload = serde_json::from_value(json!({
            "id": 1,
            "status": "teleported",
            "total": 1000,
        }))?;

        assert!(matches!(Order::try_from(payload), Err(DecodeError::Status(_))));

        Ok(())
    }

    #[test]
    fn new_orders_carry_totals_with_shipping() -> TestResult {
        let order = NewOrder {
            items: vec![CheckoutItem {
                product_id: ProductId::new(1),
                quantity: 2,
                subtotal: rupiah(55_000),
            }],
            form: CheckoutForm {
                recipient_name: " Budi ".to_string(),
                phone: "0812".to_string(),
                address: "Jl. Braga 10".to_string(),
                shipping: ShippingMethod::Express,
                payment: PaymentMethod::Cod,
                bank: None,
                notes: None,
            },
        };

        let body = order.to_json()?;

        assert_eq!(body["recipient_name"], "Budi");
        assert_eq!(body["shipping_method"], "express");
        assert_eq!(body["payment_method"], "cod");
        assert_eq!(body["items"][0]["product_id"], 1);
        assert_eq!(body["total"], json!(to_decimal(&rupiah(80_000))));

        Ok(())
    }
}
