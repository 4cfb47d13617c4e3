//! Review records.

use serde::{Deserialize, Serialize};

use super::rating::Rating;

/// Channel topic on which accepted reviews are published.
pub const REVIEW_SUBMITTED: &str = "review-submitted";

/// A customer review that passed form validation.
///
/// Reviews are immutable once created and are only ever appended to a
/// product's review list, so insertion order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub reviewer_name: String,
    pub review_text: String,
    pub rating: Rating,
    pub recommended: bool,
}

impl Review {
    /// Create a review record.
    #[must_use]
    pub const fn new(
        reviewer_name: String,
        review_text: String,
        rating: Rating,
        recommended: bool,
    ) -> Self {
        Self {
            reviewer_name,
            review_text,
            rating,
            recommended,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_field_names() {
        let review = Review::new(
            "Ana".to_string(),
            "Warm".to_string(),
            Rating::new(5).unwrap(),
            false,
        );
        let value = serde_json::to_value(&review).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "reviewerName": "Ana",
                "reviewText": "Warm",
                "rating": 5,
                "recommended": false
            })
        );
    }
}
