//! Mittens Storefront library.
//!
//! The product widget's component state lives in [`widget`]; the rest of the
//! crate hosts it: configuration, askama rendering, and the axum routes that
//! turn hover, click and submit interactions into widget operations.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod widget;
