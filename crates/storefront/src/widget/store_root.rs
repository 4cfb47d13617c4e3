//! Root of the widget: premium flag, cart, and the review channel.

use mittens_core::{ProductCatalog, REVIEW_SUBMITTED, Review, VariantId};

use super::WidgetError;
use super::channel::EventChannel;
use super::product_view::ProductView;
use super::review_form::{ReviewDraft, ReviewRejected};
use super::review_panel::Tab;

/// Top-level widget state.
///
/// Owns the review channel and hands it to the components that publish or
/// subscribe. The cart only ever grows; the same variant may appear many times.
#[derive(Debug)]
pub struct StoreRoot {
    premium: bool,
    cart: Vec<VariantId>,
    reviews: EventChannel<Review>,
    product: ProductView,
}

impl StoreRoot {
    /// Mount the widget for `catalog`.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::Catalog`] if the catalog cannot back a product view.
    pub fn new(catalog: ProductCatalog, premium: bool) -> Result<Self, WidgetError> {
        let mut reviews = EventChannel::new(REVIEW_SUBMITTED);
        let product = ProductView::new(catalog, premium, &mut reviews)?;
        tracing::info!(premium, title = %product.title(), "widget mounted");

        Ok(Self {
            premium,
            cart: Vec::new(),
            reviews,
            product,
        })
    }

    #[must_use]
    pub const fn premium(&self) -> bool {
        self.premium
    }

    #[must_use]
    pub fn cart(&self) -> &[VariantId] {
        &self.cart
    }

    #[must_use]
    pub const fn product(&self) -> &ProductView {
        &self.product
    }

    pub const fn product_mut(&mut self) -> &mut ProductView {
        &mut self.product
    }

    /// Append a variant to the cart.
    pub fn add_to_cart(&mut self, variant_id: VariantId) {
        self.cart.push(variant_id);
        tracing::debug!(variant = %variant_id, items = self.cart.len(), "cart updated");
    }

    /// Take the product view's add-to-cart emission and apply it.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::OutOfStock`] when the selected variant cannot be
    /// added; the cart is left unchanged.
    pub fn add_selected_to_cart(&mut self) -> Result<VariantId, WidgetError> {
        let variant_id = self.product.add_to_cart()?;
        self.add_to_cart(variant_id);
        Ok(variant_id)
    }

    /// Select a variant of the product.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::VariantOutOfRange`] for an unknown index.
    pub fn select_variant(&mut self, index: usize) -> Result<(), WidgetError> {
        self.product.update_product(index)
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.product.panel_mut().select_tab(tab);
    }

    /// Submit the review form as it currently stands.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewRejected`] when validation fails.
    pub fn submit_review(&mut self) -> Result<Review, ReviewRejected> {
        self.product
            .panel_mut()
            .form_mut()
            .submit(&mut self.reviews)
    }

    /// Load the posted form fields into the form, then submit it.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewRejected`] when validation fails.
    pub fn submit_review_draft(&mut self, draft: ReviewDraft) -> Result<Review, ReviewRejected> {
        self.product.panel_mut().form_mut().apply(draft);
        self.submit_review()
    }
}
