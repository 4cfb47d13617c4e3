//! The product widget's component tree.
//!
//! ```text
//! StoreRoot            premium flag, cart, review channel
//! └── ProductView      variants, derived display values, review list
//!     └── ReviewPanel  tab selection
//!         └── ReviewForm  field state and validation
//! ```
//!
//! State flows down as arguments (`premium` into the product, the review
//! list into the panel). Events flow up as return values (`add-to-cart`) or
//! over the explicit [`EventChannel`] (`review-submitted`).

pub mod channel;
pub mod product_view;
pub mod review_form;
pub mod review_panel;
pub mod store_root;

use mittens_core::{CatalogError, VariantId};
use thiserror::Error;

pub use channel::{EventChannel, SubscriptionId};
pub use product_view::ProductView;
pub use review_form::{FieldError, ReviewDraft, ReviewForm, ReviewRejected};
pub use review_panel::{ReviewPanel, Tab, UnknownTab, count_message};
pub use store_root::StoreRoot;

/// Component contract violations.
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("variant index {index} out of range ({len} variants)")]
    VariantOutOfRange { index: usize, len: usize },

    #[error("variant {0} is out of stock")]
    OutOfStock(VariantId),

    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}
