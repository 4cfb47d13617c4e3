//! Product display: variant selection, stock, shipping, and the review list.

use std::sync::{Arc, PoisonError, RwLock};

use mittens_core::{ProductCatalog, Review, Shipping, Variant, VariantId};

use super::WidgetError;
use super::channel::{EventChannel, SubscriptionId};
use super::review_panel::ReviewPanel;

/// State of the product display.
///
/// `selected` always indexes into `variants`, which is never empty. Title,
/// image, stock and shipping are recomputed from that state on every read.
#[derive(Debug)]
pub struct ProductView {
    premium: bool,
    brand: String,
    name: String,
    details: Vec<String>,
    variants: Vec<Variant>,
    selected: usize,
    reviews: Arc<RwLock<Vec<Review>>>,
    subscription: SubscriptionId,
    panel: ReviewPanel,
}

impl ProductView {
    /// Build the view for `catalog` and subscribe it to `channel`, so every
    /// accepted review lands in this product's list.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::Catalog`] if the catalog has no variants or
    /// repeats a variant id.
    pub fn new(
        catalog: ProductCatalog,
        premium: bool,
        channel: &mut EventChannel<Review>,
    ) -> Result<Self, WidgetError> {
        catalog.validate()?;

        let reviews = Arc::new(RwLock::new(Vec::new()));
        let sink = Arc::clone(&reviews);
        let subscription = channel.subscribe(move |review: &Review| {
            sink.write()
                .unwrap_or_else(PoisonError::into_inner)
                .push(review.clone());
        });

        Ok(Self {
            premium,
            brand: catalog.brand,
            name: catalog.name,
            details: catalog.details,
            variants: catalog.variants,
            selected: 0,
            reviews,
            subscription,
            panel: ReviewPanel::new(),
        })
    }

    /// Select the variant at `index` (the hover action on a color swatch).
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::VariantOutOfRange`] for an index that names no
    /// variant; the selection is left unchanged.
    pub fn update_product(&mut self, index: usize) -> Result<(), WidgetError> {
        if index >= self.variants.len() {
            return Err(WidgetError::VariantOutOfRange {
                index,
                len: self.variants.len(),
            });
        }
        self.selected = index;
        tracing::debug!(index, variant = %self.selected_variant().id, "variant selected");
        Ok(())
    }

    /// Emit the selected variant's id for the cart.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::OutOfStock`] when nothing of the selected
    /// variant is left; the add-to-cart button is disabled in that state.
    pub fn add_to_cart(&self) -> Result<VariantId, WidgetError> {
        let variant = self.selected_variant();
        if !variant.in_stock() {
            return Err(WidgetError::OutOfStock(variant.id));
        }
        Ok(variant.id)
    }

    #[must_use]
    pub fn title(&self) -> String {
        format!("{} {}", self.brand, self.name)
    }

    #[must_use]
    pub fn image(&self) -> &str {
        &self.selected_variant().image
    }

    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.selected_variant().in_stock()
    }

    #[must_use]
    pub fn shipping(&self) -> Shipping {
        Shipping::for_premium(self.premium)
    }

    #[must_use]
    #[allow(clippy::indexing_slicing)] // bounds-checked in update_product; starts at 0 of a non-empty list
    pub fn selected_variant(&self) -> &Variant {
        &self.variants[self.selected]
    }

    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    #[must_use]
    pub fn details(&self) -> &[String] {
        &self.details
    }

    /// Snapshot of the reviews received so far, in arrival order.
    #[must_use]
    pub fn reviews(&self) -> Vec<Review> {
        self.reviews
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn review_count(&self) -> usize {
        self.reviews
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub const fn panel(&self) -> &ReviewPanel {
        &self.panel
    }

    pub const fn panel_mut(&mut self) -> &mut ReviewPanel {
        &mut self.panel
    }

    /// Tear the view down, removing its review subscription from `channel`.
    ///
    /// Hosts that rebuild the product view must call this first, otherwise
    /// the old view keeps receiving reviews.
    pub fn detach(self, channel: &mut EventChannel<Review>) -> bool {
        channel.unsubscribe(self.subscription)
    }
}
