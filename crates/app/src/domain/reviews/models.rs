//! Review Models

use bengkel::{ids::TypedId, products::ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::{Value, json};

use crate::api::ValidationError;

/// Review ID
pub type ReviewId = TypedId<Review>;

/// Lowest and highest star rating.
pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// Review Model
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub rating: u8,

    #[serde(default)]
    pub comment: Option<String>,

    #[serde(default, rename = "user", deserialize_with = "author_name")]
    pub author: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Author {
    Name(String),
    User { name: String },
}

fn author_name<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let author = Option::<Author>::deserialize(deserializer)?;

    Ok(author.map(|author| match author {
        Author::Name(name) | Author::User { name } => name,
    }))
}

/// A star rating and optional comment on a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub product_id: ProductId,
    pub rating: u8,
    pub comment: Option<String>,
}

impl NewReview {
    /// # Errors
    ///
    /// Returns [`ValidationError::Rating`] outside one to five stars.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !RATING_RANGE.contains(&self.rating) {
            return Err(ValidationError::Rating(self.rating));
        }

        Ok(())
    }

    pub(crate) fn to_json(&self) -> Value {
        let comment = self
            .comment
            .as_deref()
            .map(str::trim)
            .filter(|comment| !comment.is_empty());

        json!({
            "product_id": self.product_id,
            "rating": self.rating,
            "comment": comment,
        })
    }
}

/// Mean star rating to one decimal place; `None` without reviews.
#[must_use]
pub fn average_rating(reviews: &[Review]) -> Option<Decimal> {
    if reviews.is_empty() {
        return None;
    }

    let total: u32 = reviews.iter().map(|review| u32::from(review.rating)).sum();
    let count = u32::try_from(reviews.len()).ok()?;

    Some((Decimal::from(total) / Decimal::from(count)).round_dp(1))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn review(id: u64, rating: u8) -> Review {
        Review {
            id: ReviewId::new(id),
            product_id: ProductId::new(1),
            rating,
            comment: None,
            author: None,
        }
    }

    #[test]
    fn ratings_outside_one_to_five_are_rejected() {
        for rating in [0, 6] {
            let review = NewReview {
                product_id: ProductId::new(1),
                rating,
                comment: None,
            };

            assert_eq!(review.validate(), Err(ValidationError::Rating(rating)));
        }
    }

    #[test]
    fn blank_comments_are_sent_as_null() {
        let review = NewReview {
            product_id: ProductId::new(3),
            rating: 4,
            comment: Some("   ".to_string()),
        };

        assert_eq!(review.to_json()["comment"], Value::Null);
    }

    #[test]
    fn average_is_rounded_to_one_place() {
        let reviews = [review(1, 5), review(2, 4), review(3, 4)];

        assert_eq!(average_rating(&reviews), Some(Decimal::new(43, 1)));
        assert_eq!(average_rating(&[]), None);
    }

    #[test]
    fn authors_decode_from_a_user_object() -> TestResult {
        let review: Review = serde_json::from_value(json!({
            "id": 1,
            "product_id": "2",
            "rating": 5,
            "comment": "Mantap",
            "user": { "id": 9, "name": "Rina" },
        }))?;

        assert_eq!(review.author.as_deref(), Some("Rina"));

        Ok(())
    }
}
