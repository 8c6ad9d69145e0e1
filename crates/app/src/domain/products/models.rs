//! Product Models

use bengkel::{
    money::{AmountError, Rupiah, from_non_negative_decimal, to_decimal},
    products::{Product, ProductId},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::api::{DecodeError, ValidationError, lenient};

/// Product as the API sends it.
#[derive(Debug, Deserialize)]
pub(crate) struct ProductPayload {
    id: ProductId,
    name: String,

    #[serde(default)]
    slug: Option<String>,

    price: Decimal,

    #[serde(default)]
    original_price: Option<Decimal>,

    #[serde(default, deserialize_with = "lenient::optional_u32_from_any")]
    stock: Option<u32>,

    #[serde(default)]
    category: Option<CategoryField>,

    #[serde(default)]
    images: Option<Vec<ImageField>>,

    #[serde(default)]
    image: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CategoryField {
    Name(String),
    Object { name: String },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImageField {
    Url(String),
    Object {
        #[serde(alias = "image_url", alias = "path", alias = "image_path")]
        url: String,
    },
}

impl TryFrom<ProductPayload> for Product {
    type Error = DecodeError;

    fn try_from(payload: ProductPayload) -> Result<Self, Self::Error> {
        let price = from_non_negative_decimal(payload.price)?;
        let original_price = payload
            .original_price
            .map(from_non_negative_decimal)
            .transpose()?;

        let mut images: Vec<String> = payload
            .images
            .unwrap_or_default()
            .into_iter()
            .map(|image| match image {
                ImageField::Url(url) | ImageField::Object { url } => url,
            })
            .collect();

        if images.is_empty()
            && let Some(image) = payload.image
        {
            images.push(image);
        }

        let slug = payload
            .slug
            .filter(|slug| !slug.trim().is_empty())
            .unwrap_or_else(|| slugify(&payload.name));

        Ok(Self {
            id: payload.id,
            name: payload.name,
            slug,
            price,
            original_price,
            stock: payload.stock,
            category: payload
                .category
                .map(|category| match category {
                    CategoryField::Name(name) | CategoryField::Object { name } => name,
                })
                .unwrap_or_default(),
            images,
        })
    }
}

pub(crate) fn into_products(payloads: Vec<ProductPayload>) -> Result<Vec<Product>, DecodeError> {
    payloads.into_iter().map(Product::try_from).collect()
}

fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Admin product form.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub price: Rupiah,
    pub original_price: Option<Rupiah>,
    pub stock: u32,
    pub category: String,
    pub description: Option<String>,
}

impl ProductDraft {
    /// # Errors
    ///
    /// Returns an error naming the first required field that is blank, or
    /// an error for a negative price.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Required("product name"));
        }

        for price in std::iter::once(&self.price).chain(&self.original_price) {
            if price.to_minor_units() < 0 {
                return Err(AmountError::Negative(to_decimal(price)).into());
            }
        }

        if self.category.trim().is_empty() {
            return Err(ValidationError::Required("category"));
        }

        Ok(())
    }

    pub(crate) fn to_json(&self) -> Value {
        json!({
            "name": self.name.trim(),
            "price": to_decimal(&self.price),
            "original_price": self.original_price.as_ref().map(to_decimal),
            "stock": self.stock,
            "category": self.category.trim(),
            "description": self.description,
        })
    }
}
