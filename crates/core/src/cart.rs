//! Cart
//!
//! The client-side copy of the user's cart. Which lines are selected for
//! checkout is purely local; only the selected lines count toward totals.

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use rusty_money::MoneyError;
use thiserror::Error;

use crate::{
    checkout::CheckoutItem,
    discounts::{DiscountError, percent_of_minor, percentage_from_points},
    ids::TypedId,
    money::{Rupiah, from_minor, zero},
    optimistic::Optimistic,
    products::Product,
};

/// Service charge applied on top of the cart subtotal, in percent.
pub const SERVICE_FEE_PERCENT: u32 = 10;

/// Cart item identifier.
pub type CartItemId = TypedId<CartLine>;

/// Errors raised by cart operations.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// Quantities start at one.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// The cart has no line with this id.
    #[error("cart item {0} not found")]
    UnknownItem(CartItemId),

    /// Not enough stock for the requested quantity.
    #[error("only {available} of {product} left in stock")]
    InsufficientStock {
        /// Product name
        product: String,

        /// Units in stock
        available: u32,
    },

    /// A line total does not fit in minor units.
    #[error("line total overflowed")]
    Overflow,

    /// Wrapped service fee arithmetic error.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// One product line in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    /// Cart item identifier
    pub id: CartItemId,

    /// The product in this line
    pub product: Product,

    /// Units, at least one
    pub quantity: u32,
}

impl CartLine {
    /// Create a line, rejecting a zero quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] when `quantity` is zero.
    pub fn new(id: CartItemId, product: Product, quantity: u32) -> Result<Self, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        Ok(Self {
            id,
            product,
            quantity,
        })
    }

    /// `price × quantity`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Overflow`] if the total does not fit.
    pub fn line_total(&self) -> Result<Rupiah, CartError> {
        self.product
            .price
            .to_minor_units()
            .checked_mul(i64::from(self.quantity))
            .map(from_minor)
            .ok_or(CartError::Overflow)
    }

    /// Project the line into a checkout item.
    ///
    /// # Errors
    ///
    /// See [`Self::line_total`].
    pub fn to_checkout_item(&self) -> Result<CheckoutItem, CartError> {
        Ok(CheckoutItem {
            product_id: self.product.id,
            quantity: self.quantity,
            subtotal: self.line_total()?,
        })
    }
}

/// Derived cart totals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartTotals {
    /// Sum of the selected line totals
    pub subtotal: Rupiah,

    /// Service charge on the subtotal
    pub service_fee: Rupiah,

    /// `subtotal + service_fee`
    pub total: Rupiah,
}

/// Compute subtotal, service fee and total over `lines`.
///
/// An empty iterator yields zero for all three.
///
/// # Errors
///
/// Returns an error if a line total overflows or money arithmetic fails.
pub fn cart_totals<'a, I>(lines: I) -> Result<CartTotals, CartError>
where
    I: IntoIterator<Item = &'a CartLine>,
{
    let subtotal = lines
        .into_iter()
        .try_fold(zero(), |acc, line| -> Result<Rupiah, CartError> {
            Ok(acc.add(line.line_total()?)?)
        })?;

    let rate = percentage_from_points(Decimal::from(SERVICE_FEE_PERCENT));
    let service_fee = from_minor(percent_of_minor(&rate, subtotal.to_minor_units())?);
    let total = subtotal.add(service_fee)?;

    Ok(CartTotals {
        subtotal,
        service_fee,
        total,
    })
}

/// Local cart state: the lines fetched from the API plus the selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
    selected: FxHashSet<CartItemId>,
}

impl Cart {
    /// A cart holding `lines` with nothing selected.
    pub fn new(lines: Vec<CartLine>) -> Self {
        Self {
            lines,
            selected: FxHashSet::default(),
        }
    }

    /// All lines in display order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Look up a line.
    pub fn line(&self, item: CartItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == item)
    }

    /// Whether `item` is selected for checkout.
    pub fn is_selected(&self, item: CartItemId) -> bool {
        self.selected.contains(&item)
    }

    /// Selected lines in display order.
    pub fn selected_lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines
            .iter()
            .filter(|line| self.selected.contains(&line.id))
    }

    /// Flip the selection of one line, returning the new state.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnknownItem`] for an id not in the cart.
    pub fn toggle(&mut self, item: CartItemId) -> Result<bool, CartError> {
        if self.line(item).is_none() {
            return Err(CartError::UnknownItem(item));
        }

        if self.selected.remove(&item) {
            Ok(false)
        } else {
            self.selected.insert(item);
            Ok(true)
        }
    }

    /// Select one line. Selecting an already selected line is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnknownItem`] for an id not in the cart.
    pub fn select(&mut self, item: CartItemId) -> Result<(), CartError> {
        if self.line(item).is_none() {
            return Err(CartError::UnknownItem(item));
        }

        self.selected.insert(item);

        Ok(())
    }

    /// Select every line.
    pub fn select_all(&mut self) {
        self.selected = self.lines.iter().map(|line| line.id).collect();
    }

    /// Deselect every line.
    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Replace the lines with a fresh copy from the API, keeping the
    /// selection for lines that still exist.
    pub fn replace_lines(&mut self, lines: Vec<CartLine>) {
        self.selected
            .retain(|item| lines.iter().any(|line| line.id == *item));
        self.lines = lines;
    }

    /// Totals over the selected lines.
    ///
    /// # Errors
    ///
    /// See [`cart_totals`].
    pub fn totals(&self) -> Result<CartTotals, CartError> {
        cart_totals(self.selected_lines())
    }

    /// The selected lines as checkout items.
    ///
    /// # Errors
    ///
    /// See [`CartLine::line_total`].
    pub fn checkout_items(&self) -> Result<Vec<CheckoutItem>, CartError> {
        self.selected_lines()
            .map(CartLine::to_checkout_item)
            .collect()
    }

    fn line_mut(&mut self, item: CartItemId) -> Result<&mut CartLine, CartError> {
        self.lines
            .iter_mut()
            .find(|line| line.id == item)
            .ok_or(CartError::UnknownItem(item))
    }
}

/// A local cart change awaiting server confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    /// Change the quantity of one line.
    SetQuantity {
        /// Line to change
        item: CartItemId,

        /// New quantity
        quantity: u32,
    },

    /// Remove one line.
    Remove {
        /// Line to remove
        item: CartItemId,
    },
}

/// How to reverse a [`CartAction`].
#[derive(Debug, Clone, PartialEq)]
pub enum CartUndo {
    /// Restore the previous quantity of a line.
    Quantity {
        /// Changed line
        item: CartItemId,

        /// Quantity before the change
        previous: u32,
    },

    /// Put a removed line back where it was.
    Reinsert {
        /// Original position
        index: usize,

        /// The removed line
        line: CartLine,

        /// Whether it was selected
        selected: bool,
    },
}

impl Optimistic for Cart {
    type Action = CartAction;
    type Undo = CartUndo;
    type Error = CartError;

    fn apply(&mut self, action: &CartAction) -> Result<CartUndo, CartError> {
        match *action {
            CartAction::SetQuantity { item, quantity } => {
                if quantity == 0 {
                    return Err(CartError::InvalidQuantity);
                }

                let line = self.line_mut(item)?;

                if !line.product.has_stock_for(quantity) {
                    return Err(CartError::InsufficientStock {
                        product: line.product.name.clone(),
                        available: line.product.stock.unwrap_or_default(),
                    });
                }

                let previous = line.quantity;
                line.quantity = quantity;

                Ok(CartUndo::Quantity { item, previous })
            }
            CartAction::Remove { item } => {
                let index = self
                    .lines
                    .iter()
                    .position(|line| line.id == item)
                    .ok_or(CartError::UnknownItem(item))?;

                let line = self.lines.remove(index);
                let selected = self.selected.remove(&item);

                Ok(CartUndo::Reinsert {
                    index,
                    line,
                    selected,
                })
            }
        }
    }

    fn undo(&mut self, undo: CartUndo) {
        match undo {
            CartUndo::Quantity { item, previous } => {
                if let Ok(line) = self.line_mut(item) {
                    line.quantity = previous;
                }
            }
            CartUndo::Reinsert {
                index,
                line,
                selected,
            } => {
                if selected {
                    self.selected.insert(line.id);
                }

                self.lines.insert(index.min(self.lines.len()), line);
            }
        }
    }
}
