//! Core types for the mittens storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod catalog;
pub mod id;
pub mod price;
pub mod rating;
pub mod review;
pub mod shipping;

pub use catalog::{CatalogError, ProductCatalog, Variant};
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use rating::{Rating, RatingError};
pub use review::{REVIEW_SUBMITTED, Review};
pub use shipping::Shipping;
