//! Checkout hand-off
//!
//! The selected cart lines travel from the cart screen to the checkout screen
//! through client storage under [`CHECKOUT_ITEMS_KEY`].

use std::{fmt, sync::Arc};

use bengkel::{
    checkout::CheckoutItem,
    money::{from_non_negative_decimal, to_decimal},
    products::ProductId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::storage::{KeyValueStore, StorageError};

/// Storage key holding the JSON list of checkout items.
pub const CHECKOUT_ITEMS_KEY: &str = "checkout_items";

#[derive(Debug, Serialize, Deserialize)]
struct StoredItem {
    product_id: ProductId,
    quantity: u32,
    subtotal: Decimal,
}

#[derive(Clone)]
pub struct CheckoutHandoff {
    store: Arc<dyn KeyValueStore>,
}

impl fmt::Debug for CheckoutHandoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutHandoff").finish_non_exhaustive()
    }
}

impl CheckoutHandoff {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Replace the stored items.
    ///
    /// # Errors
    ///
    /// Returns an error when the store fails.
    pub fn save(&self, items: &[CheckoutItem]) -> Result<(), StorageError> {
        let stored: Vec<StoredItem> = items
            .iter()
            .map(|item| StoredItem {
                product_id: item.product_id,
                quantity: item.quantity,
                subtotal: to_decimal(&item.subtotal),
            })
            .collect();

        let encoded = serde_json::to_string(&stored).map_err(|source| StorageError::Encode {
            key: CHECKOUT_ITEMS_KEY.to_string(),
            source,
        })?;

        self.store.set(CHECKOUT_ITEMS_KEY, &encoded)
    }

    /// The stored items; empty when nothing was handed off.
    ///
    /// # Errors
    ///
    /// Returns an error when the store fails or holds something that is not
    /// a list of checkout items.
    pub fn load(&self) -> Result<Vec<CheckoutItem>, StorageError> {
        let Some(raw) = self.store.get(CHECKOUT_ITEMS_KEY)? else {
            return Ok(Vec::new());
        };

        let invalid = |reason: String| StorageError::InvalidValue {
            key: CHECKOUT_ITEMS_KEY.to_string(),
            reason,
        };

        let stored: Vec<StoredItem> =
            serde_json::from_str(&raw).map_err(|error| invalid(error.to_string()))?;

        stored
            .into_iter()
            .map(|item| -> Result<CheckoutItem, StorageError> {
                Ok(CheckoutItem {
                    product_id: item.product_id,
                    quantity: item.quantity,
                    subtotal: from_non_negative_decimal(item.subtotal)
                        .map_err(|error| invalid(error.to_string()))?,
                })
            })
            .collect()
    }

    /// # Errors
    ///
    /// Returns an error when the store fails.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(CHECKOUT_ITEMS_KEY)
    }
}

#[cfg(test)]
mod tests {
    use bengkel::money::rupiah;
    use testresult::TestResult;

    use crate::storage::MemoryStore;

    use super::*;

    #[test]
    fn items_survive_the_trip_to_checkout() -> TestResult {
        let handoff = CheckoutHandoff::new(Arc::new(MemoryStore::new()));
        let items = vec![CheckoutItem {
            product_id: ProductId::new(4),
            quantity: 3,
            subtotal: rupiah(45_000),
        }];

        handoff.save(&items)?;

        assert_eq!(handoff.load()?, items);

        handoff.clear()?;

        assert!(handoff.load()?.is_empty());

        Ok(())
    }

    #[test]
    fn garbage_is_reported_not_ignored() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        store.set(CHECKOUT_ITEMS_KEY, r#"{"not":"a list"}"#)?;

        let result = CheckoutHandoff::new(store).load();

        assert!(matches!(result, Err(StorageError::InvalidValue { .. })));

        Ok(())
    }
}
