//! Rupiah amounts
//!
//! Every price in the storefront is Indonesian Rupiah. Amounts are held as
//! [`Money`] in IDR minor units so that percentage maths never touches floats.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use thiserror::Error;

/// A Rupiah amount.
pub type Rupiah = Money<'static, Currency>;

/// IDR minor units per whole rupiah.
pub const MINOR_PER_RUPIAH: i64 = 100;

/// Errors raised converting external amounts into [`Rupiah`].
#[derive(Debug, Error, PartialEq)]
pub enum AmountError {
    /// The amount does not fit in minor units.
    #[error("amount {0} is out of range")]
    OutOfRange(Decimal),

    /// The amount is negative where only non-negative values make sense.
    #[error("amount {0} must not be negative")]
    Negative(Decimal),
}

/// Build an amount from whole rupiah.
pub fn rupiah(amount: i64) -> Rupiah {
    Money::from_minor(amount.saturating_mul(MINOR_PER_RUPIAH), iso::IDR)
}

/// Build an amount from IDR minor units.
pub fn from_minor(minor: i64) -> Rupiah {
    Money::from_minor(minor, iso::IDR)
}

/// Zero rupiah.
pub fn zero() -> Rupiah {
    from_minor(0)
}

/// Convert a decimal rupiah value (as sent by the API) into an amount,
/// rounding to the nearest minor unit.
///
/// # Errors
///
/// Returns [`AmountError::OutOfRange`] if the value overflows minor units.
pub fn from_decimal(amount: Decimal) -> Result<Rupiah, AmountError> {
    amount
        .checked_mul(Decimal::from(MINOR_PER_RUPIAH))
        .map(|minor| minor.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|minor| minor.to_i64())
        .map(from_minor)
        .ok_or(AmountError::OutOfRange(amount))
}

/// Like [`from_decimal`], but rejects negative values.
///
/// # Errors
///
/// Returns [`AmountError::Negative`] for values below zero, or
/// [`AmountError::OutOfRange`] if the value overflows minor units.
pub fn from_non_negative_decimal(amount: Decimal) -> Result<Rupiah, AmountError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(AmountError::Negative(amount));
    }

    from_decimal(amount)
}

/// Express an amount as decimal rupiah, the unit the API expects.
pub fn to_decimal(amount: &Rupiah) -> Decimal {
    Decimal::new(amount.to_minor_units(), 2)
}

/// Format an amount the Indonesian way, e.g. `Rp 12.000`.
///
/// Amounts are rounded to whole rupiah and grouped in thousands with `.`.
pub fn format_rupiah(amount: &Rupiah) -> String {
    let minor = amount.to_minor_units();
    let whole = minor.unsigned_abs().saturating_add(50) / MINOR_PER_RUPIAH.unsigned_abs();

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }

        grouped.push(digit);
    }

    if minor < 0 && whole > 0 {
        format!("-Rp {grouped}")
    } else {
        format!("Rp {grouped}")
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn formats_thousands_with_dots() {
        assert_eq!(format_rupiah(&rupiah(12_000)), "Rp 12.000");
        assert_eq!(format_rupiah(&rupiah(1_250_500)), "Rp 1.250.500");
        assert_eq!(format_rupiah(&rupiah(999)), "Rp 999");
        assert_eq!(format_rupiah(&zero()), "Rp 0");
    }

    #[test]
    fn formats_negative_amounts() {
        assert_eq!(format_rupiah(&rupiah(-5_000)), "-Rp 5.000");
    }

    #[test]
    fn rounds_minor_units_to_whole_rupiah() {
        assert_eq!(format_rupiah(&from_minor(1_234_550)), "Rp 12.346");
        assert_eq!(format_rupiah(&from_minor(1_234_549)), "Rp 12.345");
        assert_eq!(format_rupiah(&from_minor(-20)), "Rp 0");
    }

    #[test]
    fn converts_api_decimals() -> TestResult {
        let amount = from_decimal(Decimal::from_str("12500.50")?)?;

        assert_eq!(amount, from_minor(1_250_050));
        assert_eq!(to_decimal(&amount), Decimal::from_str("12500.50")?);

        Ok(())
    }

    #[test]
    fn rejects_negative_where_required() -> TestResult {
        let result = from_non_negative_decimal(Decimal::from_str("-1")?);

        assert!(matches!(result, Err(AmountError::Negative(_))));
        assert_eq!(from_non_negative_decimal(Decimal::ZERO)?, zero());

        Ok(())
    }

    #[test]
    fn rejects_out_of_range_decimals() {
        assert!(matches!(
            from_decimal(Decimal::MAX),
            Err(AmountError::OutOfRange(_))
        ));
    }
}
