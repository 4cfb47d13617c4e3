//! Tabbed reviews panel: the review list and the review form.

use std::str::FromStr;

use mittens_core::Review;

use super::review_form::ReviewForm;

/// The panel's tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Reviews,
    MakeAReview,
}

impl Tab {
    pub const ALL: [Self; 2] = [Self::Reviews, Self::MakeAReview];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Reviews => "Reviews",
            Self::MakeAReview => "Make a Review",
        }
    }

    /// URL path segment for this tab.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Reviews => "reviews",
            Self::MakeAReview => "make-a-review",
        }
    }
}

/// Error for a tab slug that names no tab.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tab '{0}'")]
pub struct UnknownTab(pub String);

impl FromStr for Tab {
    type Err = UnknownTab;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.slug() == s)
            .ok_or_else(|| UnknownTab(s.to_string()))
    }
}

/// Panel state. Reviews are not owned here; they are passed in by the
/// product view whenever the panel is read.
#[derive(Debug, Clone, Default)]
pub struct ReviewPanel {
    selected_tab: Tab,
    form: ReviewForm,
}

impl ReviewPanel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn selected_tab(&self) -> Tab {
        self.selected_tab
    }

    pub fn select_tab(&mut self, tab: Tab) {
        tracing::debug!(tab = tab.label(), "tab selected");
        self.selected_tab = tab;
    }

    /// Whether the review list is visible. Exactly one of the list and the
    /// form is visible; both stay mounted.
    #[must_use]
    pub fn shows_reviews(&self) -> bool {
        self.selected_tab == Tab::Reviews
    }

    #[must_use]
    pub fn shows_form(&self) -> bool {
        self.selected_tab == Tab::MakeAReview
    }

    #[must_use]
    pub const fn form(&self) -> &ReviewForm {
        &self.form
    }

    pub const fn form_mut(&mut self) -> &mut ReviewForm {
        &mut self.form
    }
}

/// Summary line above the review list.
#[must_use]
pub fn count_message(reviews: &[Review]) -> String {
    if reviews.is_empty() {
        "There are no reviews yet.".to_string()
    } else {
        format!("There are {} reviews", reviews.len())
    }
}
