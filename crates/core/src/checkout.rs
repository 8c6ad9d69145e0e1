//! Checkout
//!
//! Totals and pre-submission checks for the checkout screen. Nothing here
//! talks to the API; an order is only submitted once [`validate_checkout`]
//! passes.

use std::{fmt, str::FromStr};

use rusty_money::MoneyError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    money::{Rupiah, rupiah, zero},
    products::ProductId,
};

/// Flat shipping tariff for regular delivery, in rupiah.
pub const REGULER_SHIPPING_COST: i64 = 10_000;

/// Flat shipping tariff for express delivery, in rupiah.
pub const EXPRESS_SHIPPING_COST: i64 = 25_000;

/// A selected cart line carried from the cart screen to checkout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckoutItem {
    /// Product being bought
    pub product_id: ProductId,

    /// Units
    pub quantity: u32,

    /// `price × quantity` at the time the line was selected
    pub subtotal: Rupiah,
}

/// Delivery option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShippingMethod {
    /// Regular delivery
    #[default]
    Reguler,

    /// Express delivery
    Express,
}

impl ShippingMethod {
    /// Fixed tariff for this method.
    pub fn cost(self) -> Rupiah {
        match self {
            Self::Reguler => rupiah(REGULER_SHIPPING_COST),
            Self::Express => rupiah(EXPRESS_SHIPPING_COST),
        }
    }

    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reguler => "reguler",
            Self::Express => "express",
        }
    }
}

impl fmt::Display for ShippingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShippingMethod {
    type Err = UnknownOption;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "reguler" | "regular" => Ok(Self::Reguler),
            "express" => Ok(Self::Express),
            other => Err(UnknownOption(other.to_string())),
        }
    }
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Bank transfer; requires a bank selection
    #[default]
    BankTransfer,

    /// Cash on delivery
    Cod,

    /// E-wallet
    #[serde(rename = "ewallet")]
    EWallet,
}

impl PaymentMethod {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BankTransfer => "bank_transfer",
            Self::Cod => "cod",
            Self::EWallet => "ewallet",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = UnknownOption;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bank_transfer" | "transfer" | "bank" => Ok(Self::BankTransfer),
            "cod" => Ok(Self::Cod),
            "ewallet" | "e-wallet" => Ok(Self::EWallet),
            other => Err(UnknownOption(other.to_string())),
        }
    }
}

/// An unrecognised shipping or payment option.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown option {0:?}")]
pub struct UnknownOption(pub String);

/// Recipient and payment details entered on the checkout screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    /// Recipient name
    pub recipient_name: String,

    /// Recipient phone number
    pub phone: String,

    /// Delivery address
    pub address: String,

    /// Delivery option
    pub shipping: ShippingMethod,

    /// Payment option
    pub payment: PaymentMethod,

    /// Selected bank, required for bank transfer
    pub bank: Option<String>,

    /// Free-text note to the shop
    pub notes: Option<String>,
}

/// Reasons a checkout is blocked before any request is made.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CheckoutValidationError {
    /// Nothing selected.
    #[error("your cart is empty")]
    EmptyCart,

    /// No recipient name.
    #[error("incomplete recipient data: recipient name is required")]
    MissingRecipientName,

    /// No phone number.
    #[error("incomplete recipient data: phone number is required")]
    MissingPhone,

    /// No address.
    #[error("incomplete recipient data: address is required")]
    MissingAddress,

    /// Bank transfer without a bank.
    #[error("please choose a bank for the transfer")]
    MissingBank,
}

/// Check that a checkout can be submitted.
///
/// Checks run in a fixed order and the first failure is reported.
///
/// # Errors
///
/// Returns the first [`CheckoutValidationError`] that applies.
pub fn validate_checkout(
    items: &[CheckoutItem],
    form: &CheckoutForm,
) -> Result<(), CheckoutValidationError> {
    if items.is_empty() {
        return Err(CheckoutValidationError::EmptyCart);
    }

    if is_blank(&form.recipient_name) {
        return Err(CheckoutValidationError::MissingRecipientName);
    }

    if is_blank(&form.phone) {
        return Err(CheckoutValidationError::MissingPhone);
    }

    if is_blank(&form.address) {
        return Err(CheckoutValidationError::MissingAddress);
    }

    if form.payment == PaymentMethod::BankTransfer && form.bank.as_deref().is_none_or(is_blank) {
        return Err(CheckoutValidationError::MissingBank);
    }

    Ok(())
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Derived checkout totals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckoutTotals {
    /// Sum of item subtotals
    pub subtotal: Rupiah,

    /// Shipping tariff
    pub shipping_cost: Rupiah,

    /// `subtotal + shipping_cost`
    pub total: Rupiah,
}

/// Compute subtotal, shipping cost and total.
///
/// # Errors
///
/// Returns a [`MoneyError`] if money arithmetic fails.
pub fn checkout_totals(
    items: &[CheckoutItem],
    shipping: ShippingMethod,
) -> Result<CheckoutTotals, MoneyError> {
    let subtotal = items
        .iter()
        .try_fold(zero(), |acc, item| acc.add(item.subtotal))?;

    let shipping_cost = shipping.cost();
    let total = subtotal.add(shipping_cost)?;

    Ok(CheckoutTotals {
        subtotal,
        shipping_cost,
        total,
    })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn item(product: u64, quantity: u32, subtotal: i64) -> CheckoutItem {
        CheckoutItem {
            product_id: ProductId::new(product),
            quantity,
            subtotal: rupiah(subtotal),
        }
    }

    fn complete_form() -> CheckoutForm {
        CheckoutForm {
            recipient_name: "Budi Santoso".to_string(),
            phone: "081234567890".to_string(),
            address: "Jl. Merdeka No. 1, Bandung".to_string(),
            shipping: ShippingMethod::Reguler,
            payment: PaymentMethod::BankTransfer,
            bank: Some("BCA".to_string()),
            notes: None,
        }
    }

    #[test]
    fn express_shipping_adds_flat_tariff() -> TestResult {
        let items = [item(1, 1, 20_000), item(2, 2, 35_000)];
        let totals = checkout_totals(&items, ShippingMethod::Express)?;

        assert_eq!(totals.subtotal, rupiah(55_000));
        assert_eq!(totals.shipping_cost, rupiah(25_000));
        assert_eq!(totals.total, rupiah(80_000));

        Ok(())
    }

    #[test]
    fn reguler_shipping_adds_flat_tariff() -> TestResult {
        let totals = checkout_totals(&[item(1, 1, 12_000)], ShippingMethod::Reguler)?;

        assert_eq!(totals.total, rupiah(22_000));

        Ok(())
    }

    #[test]
    fn complete_form_passes() {
        assert_eq!(validate_checkout(&[item(1, 1, 1_000)], &complete_form()), Ok(()));
    }

    #[test]
    fn empty_cart_is_checked_first() {
        let form = CheckoutForm::default();

        assert_eq!(
            validate_checkout(&[], &form),
            Err(CheckoutValidationError::EmptyCart)
        );
    }

    #[test]
    fn each_missing_field_has_its_own_reason() {
        let items = [item(1, 1, 1_000)];

        let mut form = complete_form();
        form.recipient_name = "   ".to_string();
        assert_eq!(
            validate_checkout(&items, &form),
            Err(CheckoutValidationError::MissingRecipientName)
        );

        let mut form = complete_form();
        form.phone.clear();
        assert_eq!(
            validate_checkout(&items, &form),
            Err(CheckoutValidationError::MissingPhone)
        );

        let mut form = complete_form();
        form.address.clear();
        assert_eq!(
            validate_checkout(&items, &form),
            Err(CheckoutValidationError::MissingAddress)
        );

        let mut form = complete_form();
        form.bank = Some(String::new());
        assert_eq!(
            validate_checkout(&items, &form),
            Err(CheckoutValidationError::MissingBank)
        );
    }

    #[test]
    fn bank_is_only_required_for_transfers() {
        let mut form = complete_form();
        form.payment = PaymentMethod::Cod;
        form.bank = None;

        assert_eq!(validate_checkout(&[item(1, 1, 1_000)], &form), Ok(()));
    }

    #[test]
    fn missing_recipient_reads_as_incomplete_recipient_data() {
        let message = CheckoutValidationError::MissingRecipientName.to_string();

        assert!(message.starts_with("incomplete recipient data"));
    }

    #[test]
    fn options_parse_from_user_input() -> TestResult {
        assert_eq!("Express".parse::<ShippingMethod>()?, ShippingMethod::Express);
        assert_eq!("cod".parse::<PaymentMethod>()?, PaymentMethod::Cod);
        assert!("drone".parse::<ShippingMethod>().is_err());

        Ok(())
    }
}
