//! Integration tests for the mittens storefront widget.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p mittens-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `widget_components` - The component tree driven directly
//! - `storefront_http` - The full router driven through `tower::ServiceExt`

use axum::Router;
use mittens_core::ProductCatalog;
use mittens_storefront::config::{ConfigError, StorefrontConfig};
use mittens_storefront::routes;
use mittens_storefront::state::AppState;

/// Build a storefront config for tests without touching the process environment.
///
/// # Errors
///
/// Returns `ConfigError` if the supplied variables are invalid.
pub fn test_config(premium: bool) -> Result<StorefrontConfig, ConfigError> {
    StorefrontConfig::from_lookup(|key| match key {
        "MITTENS_PREMIUM" => Some(premium.to_string()),
        _ => None,
    })
}

/// Build the full application router around a fresh widget.
///
/// # Panics
///
/// Panics if the built-in catalog fails to mount, which would be a bug.
#[must_use]
pub fn test_app(premium: bool) -> Router {
    let config = test_config(premium).expect("valid test config");
    let state = AppState::new(config, ProductCatalog::mittens()).expect("mittens catalog mounts");
    routes::app(state)
}

/// URL prefix (`/w/{id}`) of the widget mounted in a rendered page.
#[must_use]
pub fn widget_base(html: &str) -> Option<String> {
    let start = html.find("/w/")?;
    let id: String = html
        .get(start + 3..)?
        .chars()
        .take_while(|c| c.is_ascii_hexdigit() || *c == '-')
        .collect();
    (id.len() == 36).then(|| format!("/w/{id}"))
}
