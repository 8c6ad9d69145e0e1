//! Products

use crate::{discounts::ratio_percent_points, ids::TypedId, money::Rupiah};

/// Product identifier.
pub type ProductId = TypedId<Product>;

/// A catalog product as shown on the storefront.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product identifier
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// URL slug
    pub slug: String,

    /// Current selling price
    pub price: Rupiah,

    /// Pre-promotion price, when the API reports one
    pub original_price: Option<Rupiah>,

    /// Units in stock, when the API reports them
    pub stock: Option<u32>,

    /// Category name
    pub category: String,

    /// Image URLs, primary image first
    pub images: Vec<String>,
}

impl Product {
    /// Whether the product is currently marked down from its original price.
    pub fn has_promotion(&self) -> bool {
        self.original_price
            .is_some_and(|original| original.to_minor_units() > self.price.to_minor_units())
    }

    /// Markdown badge value: how far `price` sits below `original_price`, in
    /// whole percent. Zero when there is no active promotion.
    pub fn markdown_percent(&self) -> u32 {
        match self.original_price {
            Some(original) if self.has_promotion() => {
                let original = original.to_minor_units();

                ratio_percent_points(original - self.price.to_minor_units(), original)
            }
            _ => 0,
        }
    }

    /// Whether at least `quantity` units are available. An unknown stock
    /// figure never blocks; the server has the last word.
    pub fn has_stock_for(&self, quantity: u32) -> bool {
        self.stock.is_none_or(|stock| quantity <= stock)
    }

    /// The first image, if any.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::money::rupiah;

    use super::*;

    pub(crate) fn product(id: u64, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            slug: format!("product-{id}"),
            price: rupiah(price),
            original_price: None,
            stock: Some(10),
            category: "Sparepart".to_string(),
            images: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::money::rupiah;

    use super::{test_support::product, *};

    #[test]
    fn original_price_above_price_marks_a_promotion() {
        let mut oil = product(1, 40_000);
        oil.original_price = Some(rupiah(50_000));

        assert!(oil.has_promotion());
        assert_eq!(oil.markdown_percent(), 20);
    }

    #[test]
    fn original_price_at_or_below_price_is_not_a_promotion() {
        let mut chain = product(2, 50_000);
        chain.original_price = Some(rupiah(50_000));

        assert!(!chain.has_promotion());
        assert_eq!(chain.markdown_percent(), 0);

        chain.original_price = None;

        assert!(!chain.has_promotion());
    }

    #[test]
    fn stock_checks_are_inclusive() {
        let pads = product(3, 75_000);

        assert!(pads.has_stock_for(10));
        assert!(!pads.has_stock_for(11));
    }

    #[test]
    fn unknown_stock_allows_any_quantity() {
        let mut pads = product(3, 75_000);
        pads.stock = None;

        assert!(pads.has_stock_for(99));
    }

    #[test]
    fn primary_image_is_first() {
        let mut tyre = product(4, 300_000);

        assert_eq!(tyre.primary_image(), None);

        tyre.images = vec!["a.jpg".to_string(), "b.jpg".to_string()];

        assert_eq!(tyre.primary_image(), Some("a.jpg"));
    }
}
