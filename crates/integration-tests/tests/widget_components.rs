//! Integration tests for the widget component tree.
//!
//! These drive `StoreRoot` directly, the way the HTTP handlers do.

use mittens_core::{ProductCatalog, VariantId};
use mittens_storefront::widget::{
    FieldError, ReviewDraft, StoreRoot, Tab, WidgetError, count_message,
};

fn store(premium: bool) -> StoreRoot {
    StoreRoot::new(ProductCatalog::mittens(), premium).expect("mittens catalog mounts")
}

fn draft(name: &str, review: &str, rating: &str, recommended: Option<&str>) -> ReviewDraft {
    ReviewDraft {
        name: Some(name.to_string()),
        review: Some(review.to_string()),
        rating: Some(rating.to_string()),
        recommended: recommended.map(String::from),
    }
}

// =============================================================================
// Product & Cart
// =============================================================================

#[test]
fn test_stock_and_cart_scenario() {
    let mut store = store(false);

    store.select_variant(1).expect("variant 1 exists");
    assert!(!store.product().in_stock());
    assert!(matches!(
        store.add_selected_to_cart(),
        Err(WidgetError::OutOfStock(_))
    ));

    store.select_variant(0).expect("variant 0 exists");
    assert!(store.product().in_stock());
    store.add_selected_to_cart().expect("brown mittens are in stock");

    assert_eq!(store.cart(), [VariantId::new(2234)]);
}

#[test]
fn test_each_add_appends_once() {
    let mut store = store(false);
    for _ in 0..3 {
        store.add_selected_to_cart().expect("in stock");
    }
    assert_eq!(store.cart(), [VariantId::new(2234); 3]);
}

#[test]
fn test_shipping_follows_premium() {
    assert_eq!(store(true).product().shipping().to_string(), "Free");
    assert_eq!(store(false).product().shipping().to_string(), "2.99");
}

// =============================================================================
// Reviews
// =============================================================================

#[test]
fn test_missing_review_text_scenario() {
    let mut store = store(false);

    let err = store
        .submit_review_draft(draft("A", "", "5", Some("yes")))
        .expect_err("empty review text is rejected");

    assert_eq!(err.0, vec![FieldError::ReviewRequired]);
    assert_eq!(store.product().review_count(), 0);

    let form = store.product().panel().form();
    assert_eq!(form.name(), Some("A"));
    assert_eq!(form.review_text(), Some(""));
    assert_eq!(form.recommended(), Some(true));
}

#[test]
fn test_explicit_no_recommendation_is_accepted() {
    let mut store = store(false);

    let review = store
        .submit_review_draft(draft("Ana", "Cozy", "4", Some("no")))
        .expect("all fields present");

    assert!(!review.recommended);
    assert_eq!(store.product().reviews(), vec![review]);
    assert_eq!(store.product().panel().form().name(), None);
}

#[test]
fn test_unanswered_recommendation_is_rejected() {
    let mut store = store(false);

    let err = store
        .submit_review_draft(draft("Ana", "Cozy", "4", None))
        .expect_err("recommendation unanswered");

    assert_eq!(err.0, vec![FieldError::RecommendationRequired]);
}

#[test]
fn test_n_submissions_in_order() {
    let mut store = store(false);
    assert_eq!(count_message(&store.product().reviews()), "There are no reviews yet.");

    for n in 1..=4 {
        store
            .submit_review_draft(draft(&format!("r{n}"), "ok", "3", Some("yes")))
            .expect("valid review");
    }

    let reviews = store.product().reviews();
    let names: Vec<&str> = reviews.iter().map(|r| r.reviewer_name.as_str()).collect();
    assert_eq!(names, ["r1", "r2", "r3", "r4"]);
    assert_eq!(count_message(&reviews), "There are 4 reviews");
}

#[test]
fn test_form_survives_tab_switches() {
    let mut store = store(false);
    store.select_tab(Tab::MakeAReview);
    let _ = store.submit_review_draft(draft("Bo", "", "2", None));

    store.select_tab(Tab::Reviews);
    store.select_tab(Tab::MakeAReview);

    let form = store.product().panel().form();
    assert_eq!(form.name(), Some("Bo"));
    assert_eq!(form.errors().len(), 2);
}
