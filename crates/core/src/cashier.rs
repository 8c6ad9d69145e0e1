//! Cashier
//!
//! Point-of-sale sales rung up at the workshop counter: product lines, a
//! total, and the change due from cash tendered.

use rusty_money::MoneyError;
use thiserror::Error;

use crate::{
    money::{Rupiah, from_minor, zero},
    products::{Product, ProductId},
};

/// Errors raised while ringing up a sale.
#[derive(Debug, Error, PartialEq)]
pub enum CashierError {
    /// Quantities start at one.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// Nothing has been rung up.
    #[error("no items in this sale")]
    EmptySale,

    /// Not enough stock for the requested quantity.
    #[error("only {available} of {product} left in stock")]
    InsufficientStock {
        /// Product name
        product: String,

        /// Units in stock
        available: u32,
    },

    /// Cash tendered is below the total.
    #[error("payment of {tendered} is less than the total of {total}")]
    InsufficientPayment {
        /// Sale total
        total: Rupiah,

        /// Cash tendered
        tendered: Rupiah,
    },

    /// A line total does not fit in minor units.
    #[error("line total overflowed")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// One product line on the counter.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleLine {
    /// Product sold
    pub product_id: ProductId,

    /// Product name at the time of sale
    pub name: String,

    /// Price per unit
    pub unit_price: Rupiah,

    /// Units
    pub quantity: u32,
}

impl SaleLine {
    /// `unit_price × quantity`.
    ///
    /// # Errors
    ///
    /// Returns [`CashierError::Overflow`] if the total does not fit.
    pub fn line_total(&self) -> Result<Rupiah, CashierError> {
        self.unit_price
            .to_minor_units()
            .checked_mul(i64::from(self.quantity))
            .map(from_minor)
            .ok_or(CashierError::Overflow)
    }
}

/// Result of taking payment for a sale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settlement {
    /// Sale total
    pub total: Rupiah,

    /// Cash tendered
    pub tendered: Rupiah,

    /// `tendered - total`
    pub change: Rupiah,
}

/// A sale being rung up.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sale {
    lines: Vec<SaleLine>,
}

impl Sale {
    /// An empty sale.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines in the order they were rung up.
    pub fn lines(&self) -> &[SaleLine] {
        &self.lines
    }

    /// Add `quantity` units of `product`, merging with an existing line.
    ///
    /// # Errors
    ///
    /// Returns [`CashierError::InvalidQuantity`] for zero, or
    /// [`CashierError::InsufficientStock`] if the combined quantity exceeds
    /// the product's stock.
    pub fn add(&mut self, product: &Product, quantity: u32) -> Result<(), CashierError> {
        if quantity == 0 {
            return Err(CashierError::InvalidQuantity);
        }

        let existing = self
            .lines
            .iter()
            .position(|line| line.product_id == product.id);

        let already = existing
            .and_then(|index| self.lines.get(index))
            .map_or(0, |line| line.quantity);

        let wanted = already.saturating_add(quantity);

        if !product.has_stock_for(wanted) {
            return Err(CashierError::InsufficientStock {
                product: product.name.clone(),
                available: product.stock.unwrap_or_default(),
            });
        }

        match existing.and_then(|index| self.lines.get_mut(index)) {
            Some(line) => line.quantity = wanted,
            None => self.lines.push(SaleLine {
                product_id: product.id,
                name: product.name.clone(),
                unit_price: product.price,
                quantity,
            }),
        }

        Ok(())
    }

    /// Drop the line for `product`. Returns whether a line was removed.
    pub fn remove(&mut self, product: ProductId) -> bool {
        let before = self.lines.len();

        self.lines.retain(|line| line.product_id != product);

        self.lines.len() != before
    }

    /// Sum of all line totals.
    ///
    /// # Errors
    ///
    /// Returns an error if a line total overflows or money arithmetic fails.
    pub fn total(&self) -> Result<Rupiah, CashierError> {
        self.lines
            .iter()
            .try_fold(zero(), |acc, line| Ok(acc.add(line.line_total()?)?))
    }

    /// Take `tendered` cash for the sale.
    ///
    /// # Errors
    ///
    /// Returns [`CashierError::EmptySale`] with no lines, or
    /// [`CashierError::InsufficientPayment`] when `tendered` is short.
    pub fn settle(&self, tendered: Rupiah) -> Result<Settlement, CashierError> {
        if self.lines.is_empty() {
            return Err(CashierError::EmptySale);
        }

        let total = self.total()?;

        if tendered.to_minor_units() < total.to_minor_units() {
            return Err(CashierError::InsufficientPayment { total, tendered });
        }

        Ok(Settlement {
            total,
            tendered,
            change: tendered.sub(total)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{money::rupiah, products::test_support::product};

    use super::*;

    #[test]
    fn adding_the_same_product_merges_lines() -> TestResult {
        let oil = product(1, 45_000);
        let mut sale = Sale::new();

        sale.add(&oil, 1)?;
        sale.add(&oil, 2)?;

        assert_eq!(sale.lines().len(), 1);
        assert_eq!(sale.lines().first().map(|line| line.quantity), Some(3));
        assert_eq!(sale.total()?, rupiah(135_000));

        Ok(())
    }

    #[test]
    fn merged_quantity_is_checked_against_stock() -> TestResult {
        let spark_plug = product(2, 25_000);
        let mut sale = Sale::new();

        sale.add(&spark_plug, 8)?;

        assert!(matches!(
            sale.add(&spark_plug, 3),
            Err(CashierError::InsufficientStock { available: 10, .. })
        ));
        assert_eq!(sale.total()?, rupiah(200_000));

        Ok(())
    }

    #[test]
    fn settle_returns_change() -> TestResult {
        let mut sale = Sale::new();
        sale.add(&product(1, 45_000), 1)?;
        sale.add(&product(2, 12_500), 2)?;

        let settlement = sale.settle(rupiah(100_000))?;

        assert_eq!(settlement.total, rupiah(70_000));
        assert_eq!(settlement.change, rupiah(30_000));

        Ok(())
    }

    #[test]
    fn settle_rejects_short_payment_and_empty_sales() -> TestResult {
        let mut sale = Sale::new();

        assert_eq!(sale.settle(rupiah(10_000)), Err(CashierError::EmptySale));

        sale.add(&product(1, 45_000), 1)?;

        assert!(matches!(
            sale.settle(rupiah(40_000)),
            Err(CashierError::InsufficientPayment { .. })
        ));

        Ok(())
    }

    #[test]
    fn remove_drops_a_line() -> TestResult {
        let mut sale = Sale::new();
        sale.add(&product(1, 45_000), 1)?;

        assert!(sale.remove(ProductId::new(1)));
        assert!(!sale.remove(ProductId::new(1)));
        assert!(sale.lines().is_empty());

        Ok(())
    }
}
