//! Mittens Core - Shared domain types.
//!
//! This crate provides the types the storefront widget is built from:
//! variants and their catalog, review records and ratings, prices, and the
//! shipping policy derived from a customer's premium flag.
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP,
//! no shared state. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, ratings, and catalog data

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
