//! Review submission form.
//!
//! Every field starts out absent (`None`), which is distinct from an empty
//! string the customer typed and from an explicit "No" recommendation.

use std::fmt;

use mittens_core::{Rating, Review};
use serde::Deserialize;
use thiserror::Error;

use super::channel::EventChannel;

/// A failed validation rule. The display text is what the customer sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Name required.")]
    NameRequired,
    #[error("Rating required.")]
    RatingRequired,
    #[error("Review required.")]
    ReviewRequired,
    #[error("Recommendation required.")]
    RecommendationRequired,
}

/// Returned by [`ReviewForm::submit`] when any rule failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRejected(pub Vec<FieldError>);

impl std::error::Error for ReviewRejected {}

impl fmt::Display for ReviewRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("review rejected:")?;
        for error in &self.0 {
            write!(f, " {error}")?;
        }
        Ok(())
    }
}

/// Raw form fields as posted by the browser.
///
/// A text field that was left empty arrives as `Some("")`; a radio group with
/// nothing checked does not arrive at all.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewDraft {
    pub name: Option<String>,
    pub review: Option<String>,
    pub rating: Option<String>,
    pub recommended: Option<String>,
}

/// State of the review form.
#[derive(Debug, Clone, Default)]
pub struct ReviewForm {
    name: Option<String>,
    review_text: Option<String>,
    rating: Option<Rating>,
    recommended: Option<bool>,
    errors: Vec<FieldError>,
}

impl ReviewForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn review_text(&self) -> Option<&str> {
        self.review_text.as_deref()
    }

    #[must_use]
    pub const fn rating(&self) -> Option<Rating> {
        self.rating
    }

    #[must_use]
    pub const fn recommended(&self) -> Option<bool> {
        self.recommended
    }

    /// Errors from the last submit attempt, in rule order.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn set_review_text(&mut self, text: impl Into<String>) {
        self.review_text = Some(text.into());
    }

    /// Set the rating from a picker value, coercing it to a number.
    ///
    /// Anything that is not a whole number in `1..=5` leaves the rating absent.
    pub fn select_rating(&mut self, value: &str) {
        self.rating = Rating::parse(value).ok();
    }

    pub const fn set_recommended(&mut self, recommended: bool) {
        self.recommended = Some(recommended);
    }

    /// Replace the form fields with what the browser posted.
    pub fn apply(&mut self, draft: ReviewDraft) {
        self.name = draft.name;
        self.review_text = draft.review;
        self.rating = draft.rating.as_deref().and_then(|r| Rating::parse(r).ok());
        self.recommended = draft.recommended.as_deref().and_then(parse_recommendation);
    }

    /// Validate the form and publish the review if every rule passes.
    ///
    /// All four rules are evaluated on every attempt. On success the review is
    /// delivered on `channel` before this returns and the fields are reset to
    /// absent. On failure nothing is published and the entered values stay.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewRejected`] listing each failed rule.
    pub fn submit(&mut self, channel: &mut EventChannel<Review>) -> Result<Review, ReviewRejected> {
        self.errors.clear();

        match self.validate() {
            Ok(review) => {
                let delivered = channel.publish(&review);
                tracing::debug!(
                    rating = review.rating.get(),
                    delivered,
                    "review submitted"
                );
                self.reset_fields();
                Ok(review)
            }
            Err(errors) => {
                tracing::info!(errors = errors.len(), "review rejected");
                self.errors.clone_from(&errors);
                Err(ReviewRejected(errors))
            }
        }
    }

    fn validate(&self) -> Result<Review, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = self.name.as_deref().filter(|n| !n.is_empty());
        if name.is_none() {
            errors.push(FieldError::NameRequired);
        }
        if self.rating.is_none() {
            errors.push(FieldError::RatingRequired);
        }
        let text = self.review_text.as_deref().filter(|t| !t.is_empty());
        if text.is_none() {
            errors.push(FieldError::ReviewRequired);
        }
        if self.recommended.is_none() {
            errors.push(FieldError::RecommendationRequired);
        }

        match (name, self.rating, text, self.recommended) {
            (Some(name), Some(rating), Some(text), Some(recommended)) if errors.is_empty() => Ok(
                Review::new(name.to_owned(), text.to_owned(), rating, recommended),
            ),
            _ => Err(errors),
        }
    }

    fn reset_fields(&mut self) {
        self.name = None;
        self.review_text = None;
        self.rating = None;
        self.recommended = None;
    }
}

/// Interpret a recommendation radio value. Unknown values count as unanswered.
fn parse_recommendation(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" => Some(true),
        "false" | "no" => Some(false),
        _ => None,
    }
}
