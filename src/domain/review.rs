use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::user::UserSummary;

/// A buyer review on a product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub user: Option<UserSummary>,
    pub rating: u8,
    #[serde(default)]
    pub review: String,
    pub created_at: DateTime<Utc>,
}

/// Mean rating rounded to one decimal, 0.0 for no reviews.
pub fn average_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let sum: u32 = reviews.iter().map(|review| u32::from(review.rating)).sum();
    let mean = f64::from(sum) / reviews.len() as f64;
    (mean * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn review(rating: u8) -> Review {
        serde_json::from_value(json!({
            "_id": format!("r{rating}"),
            "rating": rating,
            "review": "solid",
            "createdAt": "2025-08-15T12:00:00.000Z"
        }))
        .unwrap()
    }

    #[test]
    fn average_rounds_to_one_decimal() {
        let reviews = [review(5), review(4), review(4)];
        assert_eq!(average_rating(&reviews), 4.3);
    }

    #[test]
    fn no_reviews_average_zero() {
        assert_eq!(average_rating(&[]), 0.0);
    }
}
