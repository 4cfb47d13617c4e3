//! Shipping cost policy.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::price::{CurrencyCode, Price};

/// Flat shipping cost charged to non-premium customers, in cents.
pub const STANDARD_SHIPPING_CENTS: i64 = 299;

/// Shipping charged for an order.
///
/// Never stored: always derived from the premium flag via [`Shipping::for_premium`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shipping {
    Free,
    Flat(Price),
}

impl Shipping {
    /// Premium customers ship free; everyone else pays the flat rate.
    #[must_use]
    pub fn for_premium(premium: bool) -> Self {
        if premium {
            Self::Free
        } else {
            Self::Flat(Price::from_cents(STANDARD_SHIPPING_CENTS, CurrencyCode::USD))
        }
    }

    #[must_use]
    pub const fn is_free(&self) -> bool {
        matches!(self, Self::Free)
    }
}

impl fmt::Display for Shipping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Free => f.write_str("Free"),
            Self::Flat(price) => write!(f, "{price}"),
        }
    }
}
