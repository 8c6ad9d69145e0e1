//! Promotions
//!
//! A promotion discounts a set of products either by a percentage or by a
//! fixed rupiah amount. [`resolve_price`] turns a product price and a
//! promotion discount into the price shown to the customer.
//!
//! Edge-case policy:
//!
//! - the final price never drops below zero;
//! - the reported discount percentage is capped at 100;
//! - a fixed discount on a zero price reports 0%.

use jiff::civil::Date;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    discounts::{
        DiscountError, percent_of_minor, percentage_from_points, ratio_percent_points,
        whole_percent_points,
    },
    ids::TypedId,
    money::{AmountError, Rupiah, from_decimal, from_minor, to_decimal},
    products::{Product, ProductId},
};

/// Promotion identifier.
pub type PromotionId = TypedId<Promotion>;

/// Errors raised while building or applying a promotion discount.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// Percentage discounts must lie within `0..=100`.
    #[error("percentage discount {0} is outside 0-100")]
    PercentageOutOfRange(Decimal),

    /// Fixed discounts must not be negative.
    #[error("fixed discount {0} must not be negative")]
    NegativeFixedDiscount(Decimal),

    /// Prices must not be negative.
    #[error("price {0} must not be negative")]
    NegativePrice(Decimal),

    /// The discount type is neither `percentage` nor `fixed`.
    #[error("unknown discount type {0:?}")]
    UnknownDiscountType(String),

    /// The discount amount cannot be represented in rupiah.
    #[error(transparent)]
    Amount(#[from] AmountError),

    /// Wrapped percentage arithmetic error.
    #[error(transparent)]
    Discount(#[from] DiscountError),
}

/// How a promotion reduces the price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PromotionDiscount {
    /// Percent off, stored as the points value (`20` means 20%).
    Percentage(Decimal),

    /// Fixed rupiah amount off.
    Fixed(Rupiah),
}

impl PromotionDiscount {
    /// A percentage discount of `points` percent.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::PercentageOutOfRange`] outside `0..=100`.
    pub fn percentage(points: Decimal) -> Result<Self, PricingError> {
        if points < Decimal::ZERO || points > Decimal::ONE_HUNDRED {
            return Err(PricingError::PercentageOutOfRange(points));
        }

        Ok(Self::Percentage(points))
    }

    /// A fixed discount of `amount`.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::NegativeFixedDiscount`] for negative amounts.
    pub fn fixed(amount: Rupiah) -> Result<Self, PricingError> {
        if amount.to_minor_units() < 0 {
            return Err(PricingError::NegativeFixedDiscount(to_decimal(&amount)));
        }

        Ok(Self::Fixed(amount))
    }

    /// Build a discount from the API's `discount_type`/`discount_value` pair.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::UnknownDiscountType`] for anything other than
    /// `percentage` or `fixed`, [`PricingError::Amount`] when a fixed value
    /// overflows, or the range errors of [`Self::percentage`] and
    /// [`Self::fixed`].
    pub fn from_parts(kind: &str, value: Decimal) -> Result<Self, PricingError> {
        match kind {
            "percentage" => Self::percentage(value),
            "fixed" => {
                if value.is_sign_negative() && !value.is_zero() {
                    return Err(PricingError::NegativeFixedDiscount(value));
                }

                Self::fixed(from_decimal(value)?)
            }
            other => Err(PricingError::UnknownDiscountType(other.to_string())),
        }
    }

    /// The API's name for this discount type.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Percentage(_) => "percentage",
            Self::Fixed(_) => "fixed",
        }
    }

    /// The API's `discount_value` for this discount.
    #[must_use]
    pub fn value(&self) -> Decimal {
        match self {
            Self::Percentage(points) => *points,
            Self::Fixed(amount) => to_decimal(amount),
        }
    }
}

/// Outcome of applying a promotion discount to a price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPrice {
    /// Price after the discount, never negative.
    pub final_price: Rupiah,

    /// Discount expressed in whole percent, `0..=100`.
    pub discount_percent: u32,
}

impl ResolvedPrice {
    /// An undiscounted price.
    pub fn undiscounted(price: Rupiah) -> Self {
        Self {
            final_price: price,
            discount_percent: 0,
        }
    }
}

/// Apply `discount` to `original_price`.
///
/// # Errors
///
/// Returns [`PricingError::NegativePrice`] for a negative price, or
/// [`PricingError::Discount`] if percentage arithmetic overflows.
pub fn resolve_price(
    original_price: Rupiah,
    discount: &PromotionDiscount,
) -> Result<ResolvedPrice, PricingError> {
    let original = original_price.to_minor_units();

    if original < 0 {
        return Err(PricingError::NegativePrice(to_decimal(&original_price)));
    }

    let resolved = match discount {
        PromotionDiscount::Percentage(points) => {
            let off = percent_of_minor(&percentage_from_points(*points), original)?;

            ResolvedPrice {
                final_price: from_minor(original.saturating_sub(off).max(0)),
                discount_percent: whole_percent_points(*points),
            }
        }
        PromotionDiscount::Fixed(amount) => {
            let off = amount.to_minor_units();

            ResolvedPrice {
                final_price: from_minor(original.saturating_sub(off).max(0)),
                discount_percent: ratio_percent_points(off, original),
            }
        }
    };

    Ok(resolved)
}

/// A time-bounded discount campaign over a set of products.
#[derive(Debug, Clone, PartialEq)]
pub struct Promotion {
    /// Promotion identifier
    pub id: PromotionId,

    /// Campaign name
    pub name: String,

    /// Discount rule
    pub discount: PromotionDiscount,

    /// First day the promotion runs
    pub start_date: Date,

    /// Last day the promotion runs (inclusive)
    pub end_date: Date,

    /// Admin on/off switch
    pub is_active: bool,

    /// Products covered by the promotion
    pub products: Vec<Product>,
}

impl Promotion {
    /// Whether the promotion is switched on and `today` falls within its
    /// date window.
    pub fn is_running_on(&self, today: Date) -> bool {
        self.is_active && self.start_date <= today && today <= self.end_date
    }

    /// Whether the promotion lists `product`.
    pub fn covers(&self, product: ProductId) -> bool {
        self.products.iter().any(|candidate| candidate.id == product)
    }

    /// Price `product` under this promotion on `today`.
    ///
    /// Products outside the promotion, or a promotion that is not running,
    /// resolve to the undiscounted price.
    ///
    /// # Errors
    ///
    /// See [`resolve_price`].
    pub fn price_for(&self, product: &Product, today: Date) -> Result<ResolvedPrice, PricingError> {
        if !self.is_running_on(today) || !self.covers(product.id) {
            return Ok(ResolvedPrice::undiscounted(product.price));
        }

        resolve_price(product.price, &self.discount)
    }

    /// Resolve the price of every covered product on `today`.
    ///
    /// # Errors
    ///
    /// See [`resolve_price`].
    pub fn resolved_prices(
        &self,
        today: Date,
    ) -> Result<Vec<(&Product, ResolvedPrice)>, PricingError> {
        self.products
            .iter()
            .map(|product| Ok((product, self.price_for(product, today)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use crate::{money::rupiah, products::test_support::product};

    use super::*;

    fn promotion(discount: PromotionDiscount, products: Vec<Product>) -> Promotion {
        Promotion {
            id: PromotionId::new(1),
            name: "Ramadan Sale".to_string(),
            discount,
            start_date: date(2025, 3, 1),
            end_date: date(2025, 3, 31),
            is_active: true,
            products,
        }
    }

    #[test]
    fn percentage_discount_scales_price() -> TestResult {
        let discount = PromotionDiscount::percentage(Decimal::from(20))?;
        let resolved = resolve_price(rupiah(100_000), &discount)?;

        assert_eq!(resolved.final_price, rupiah(80_000));
        assert_eq!(resolved.discount_percent, 20);

        Ok(())
    }

    #[test]
    fn fixed_discount_subtracts_amount() -> TestResult {
        let discount = PromotionDiscount::fixed(rupiah(15_000))?;
        let resolved = resolve_price(rupiah(50_000), &discount)?;

        assert_eq!(resolved.final_price, rupiah(35_000));
        assert_eq!(resolved.discount_percent, 30);

        Ok(())
    }

    #[test]
    fn fixed_discount_larger_than_price_clamps_to_zero() -> TestResult {
        let discount = PromotionDiscount::fixed(rupiah(60_000))?;
        let resolved = resolve_price(rupiah(50_000), &discount)?;

        assert_eq!(resolved.final_price, rupiah(0));
        assert_eq!(resolved.discount_percent, 100);

        Ok(())
    }

    #[test]
    fn fixed_discount_on_free_product_reports_zero_percent() -> TestResult {
        let discount = PromotionDiscount::fixed(rupiah(15_000))?;
        let resolved = resolve_price(rupiah(0), &discount)?;

        assert_eq!(resolved.final_price, rupiah(0));
        assert_eq!(resolved.discount_percent, 0);

        Ok(())
    }

    #[test]
    fn fractional_percentage_rounds_percent_and_price() -> TestResult {
        let discount = PromotionDiscount::percentage(Decimal::new(125, 1))?;
        let resolved = resolve_price(rupiah(10_001), &discount)?;

        // 12.5% of 1_000_100 minor units is 125_012.5, rounded to 125_013
        assert_eq!(resolved.final_price.to_minor_units(), 875_087);
        assert_eq!(resolved.discount_percent, 13);

        Ok(())
    }

    #[test]
    fn negative_price_is_rejected() -> TestResult {
        let discount = PromotionDiscount::percentage(Decimal::from(10))?;

        assert!(matches!(
            resolve_price(rupiah(-1), &discount),
            Err(PricingError::NegativePrice(_))
        ));

        Ok(())
    }

    #[test]
    fn out_of_range_discounts_are_rejected() {
        assert!(matches!(
            PromotionDiscount::percentage(Decimal::from(101)),
            Err(PricingError::PercentageOutOfRange(_))
        ));
        assert!(matches!(
            PromotionDiscount::percentage(Decimal::from(-1)),
            Err(PricingError::PercentageOutOfRange(_))
        ));
        assert!(matches!(
            PromotionDiscount::fixed(rupiah(-500)),
            Err(PricingError::NegativeFixedDiscount(_))
        ));
    }

    #[test]
    fn from_parts_accepts_only_known_types() -> TestResult {
        let percentage = PromotionDiscount::from_parts("percentage", Decimal::from(15))?;
        let fixed = PromotionDiscount::from_parts("fixed", Decimal::from(5_000))?;

        assert_eq!(percentage.kind(), "percentage");
        assert_eq!(percentage.value(), Decimal::from(15));
        assert_eq!(fixed, PromotionDiscount::Fixed(rupiah(5_000)));
        assert_eq!(fixed.value(), Decimal::from(5_000));

        assert_eq!(
            PromotionDiscount::from_parts("bogo", Decimal::ONE),
            Err(PricingError::UnknownDiscountType("bogo".to_string()))
        );

        Ok(())
    }

    #[test]
    fn promotion_applies_only_while_running() -> TestResult {
        let helmet = product(7, 200_000);
        let promo = promotion(
            PromotionDiscount::percentage(Decimal::from(10))?,
            vec![helmet.clone()],
        );

        let during = promo.price_for(&helmet, date(2025, 3, 31))?;
        let before = promo.price_for(&helmet, date(2025, 2, 28))?;

        assert_eq!(during.final_price, rupiah(180_000));
        assert_eq!(before, ResolvedPrice::undiscounted(rupiah(200_000)));

        let mut paused = promo.clone();
        paused.is_active = false;

        assert_eq!(
            paused.price_for(&helmet, date(2025, 3, 15))?,
            ResolvedPrice::undiscounted(rupiah(200_000))
        );

        Ok(())
    }

    #[test]
    fn promotion_ignores_uncovered_products() -> TestResult {
        let covered = product(1, 100_000);
        let other = product(2, 100_000);
        let promo = promotion(PromotionDiscount::fixed(rupiah(10_000))?, vec![covered]);

        assert!(!promo.covers(other.id));
        assert_eq!(
            promo.price_for(&other, date(2025, 3, 10))?,
            ResolvedPrice::undiscounted(rupiah(100_000))
        );

        Ok(())
    }

    #[test]
    fn resolved_prices_lists_every_covered_product() -> TestResult {
        let promo = promotion(
            PromotionDiscount::percentage(Decimal::from(50))?,
            vec![product(1, 10_000), product(2, 30_000)],
        );

        let prices = promo.resolved_prices(date(2025, 3, 10))?;
        let finals: Vec<_> = prices
            .iter()
            .map(|(_, resolved)| resolved.final_price)
            .collect();

        assert_eq!(finals, vec![rupiah(5_000), rupiah(15_000)]);

        Ok(())
    }
}
