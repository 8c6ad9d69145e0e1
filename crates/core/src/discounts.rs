//! Discount arithmetic
//!
//! Percentage helpers shared by promotion pricing, the cart service fee and
//! product markdown badges.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use thiserror::Error;

/// Errors specific to discount calculations.
#[derive(Debug, Error, PartialEq)]
pub enum DiscountError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,
}

/// Calculate `percent` of an amount in minor units, rounded to the nearest
/// minor unit (midpoint away from zero).
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the result cannot be
/// represented in minor units.
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, DiscountError> {
    let minor = Decimal::from_i64(minor).ok_or(DiscountError::PercentConversion)?;

    // `Percentage` only exposes its value through multiplication.
    ((*percent) * Decimal::ONE)
        .checked_mul(minor)
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)
}

/// Express `part` as whole percent points of `whole`, rounded half up and
/// capped to `0..=100`.
///
/// A zero or negative `whole` yields `0` rather than dividing by zero.
pub fn ratio_percent_points(part: i64, whole: i64) -> u32 {
    if whole <= 0 || part <= 0 {
        return 0;
    }

    Decimal::from(part)
        .checked_div(Decimal::from(whole))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|points| points.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|points| points.to_u32())
        .map_or(100, |points| points.min(100))
}

/// Round a percent-points value (e.g. `12.5`) to whole points within `0..=100`.
pub fn whole_percent_points(points: Decimal) -> u32 {
    points
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
        .to_u32()
        .unwrap_or_default()
}

/// Convert percent points (`20` meaning 20%) into a [`Percentage`] fraction.
pub fn percentage_from_points(points: Decimal) -> Percentage {
    Percentage::from(points / Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn service_fee_on_an_odd_subtotal() -> TestResult {
        let fee = percentage_from_points(Decimal::from(10));

        // Rp 12.345,05
        assert_eq!(percent_of_minor(&fee, 1_234_505)?, 123_451);
        assert_eq!(percent_of_minor(&fee, 1_234_500)?, 123_450);

        Ok(())
    }

    #[test]
    fn fractional_points_round_half_away_from_zero() -> TestResult {
        let markdown = percentage_from_points(Decimal::new(125, 1));

        assert_eq!(percent_of_minor(&markdown, 100_020)?, 12_503);
        assert_eq!(percent_of_minor(&markdown, 4)?, 1);

        Ok(())
    }

    #[test]
    fn results_beyond_minor_units_are_rejected() {
        let markup = percentage_from_points(Decimal::from(250));

        assert_eq!(
            percent_of_minor(&markup, i64::MAX),
            Err(DiscountError::PercentConversion)
        );
    }

    #[test]
    fn ratio_percent_points_rounds_and_caps() {
        assert_eq!(ratio_percent_points(15_000, 50_000), 30);
        assert_eq!(ratio_percent_points(1, 3), 33);
        assert_eq!(ratio_percent_points(1, 200), 1);
        assert_eq!(ratio_percent_points(90_000, 50_000), 100);
    }

    #[test]
    fn ratio_percent_points_of_zero_whole_is_zero() {
        assert_eq!(ratio_percent_points(15_000, 0), 0);
        assert_eq!(ratio_percent_points(0, 10_000), 0);
    }

    #[test]
    fn whole_percent_points_clamps() {
        assert_eq!(whole_percent_points(Decimal::new(125, 1)), 13);
        assert_eq!(whole_percent_points(Decimal::from(150)), 100);
        assert_eq!(whole_percent_points(Decimal::from(-5)), 0);
    }
}
