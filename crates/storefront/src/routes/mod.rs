//! HTTP route handlers for the storefront widget.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                                  - Page with a freshly mounted widget
//! GET  /health                            - Health check
//!
//! # Widget instance
//! GET  /w/{id}                            - Page for a mounted widget
//! GET  /w/{id}/widget                     - Widget fragment (HTMX)
//! GET  /w/{id}/cart                       - Cart contents (JSON variant ids)
//!
//! # Product
//! POST /w/{id}/product/variants/{index}   - Select variant (swatch hover)
//! POST /w/{id}/product/cart               - Add selected variant to cart
//!
//! # Reviews
//! POST /w/{id}/reviews                    - Submit review form
//! POST /w/{id}/reviews/tabs/{tab}         - Select panel tab (reviews | make-a-review)
//! ```
//!
//! Each page load gets its own widget; an unknown or expired `{id}` is a 404.
//! Mutating routes answer HTMX requests with the widget fragment and plain
//! form posts with a redirect back to that widget's page.

pub mod reviews;
pub mod widget;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request},
    middleware,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

use self::widget::{WidgetTemplate, WidgetView};

/// Header HTMX sets on every request it issues.
const HX_REQUEST: &str = "hx-request";

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/w/{id}/product/variants/{index}", post(widget::select_variant))
        .route("/w/{id}/product/cart", post(widget::add_to_cart))
}

/// Create the review routes router.
pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/w/{id}/reviews", post(reviews::submit))
        .route("/w/{id}/reviews/tabs/{tab}", post(reviews::select_tab))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Page and fragment
        .route("/", get(widget::page))
        .route("/w/{id}", get(widget::reopen))
        .route("/w/{id}/widget", get(widget::fragment))
        .route("/w/{id}/cart", get(widget::cart))
        // Product routes
        .merge(product_routes())
        // Review routes
        .merge(review_routes())
}

/// Build the application router with health check and middleware.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Whether the request was issued by HTMX.
fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get(HX_REQUEST)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

/// Re-render the widget for HTMX, redirect plain form posts to its page.
fn respond(headers: &HeaderMap, view: WidgetView) -> Response {
    if is_htmx(headers) {
        WidgetTemplate { view }.into_response()
    } else {
        Redirect::to(&view.base).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::to_bytes;
    use axum::http::{StatusCode, header};
    use mittens_core::ProductCatalog;
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::config::StorefrontConfig;

    fn test_app() -> Router {
        let config = StorefrontConfig::from_lookup(|key| {
            (key == "MITTENS_PREMIUM").then(|| "false".to_string())
        })
        .unwrap();
        app(AppState::new(config, ProductCatalog::mittens()).unwrap())
    }

    fn htmx_post(uri: &str) -> Request<Body> {
        Request::post(uri)
            .header(HX_REQUEST, "true")
            .body(Body::empty())
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    /// Load the page and return the mounted widget's URL prefix.
    async fn mount(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let html = body_text(response).await;
        let start = html.find("/w/").unwrap();
        html.get(start..start + 3 + 36).unwrap().to_string()
    }

    #[test]
    fn test_is_htmx() {
        let mut headers = HeaderMap::new();
        assert!(!is_htmx(&headers));
        headers.insert(HX_REQUEST, "true".parse().unwrap());
        assert!(is_htmx(&headers));
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_page_renders_widget() {
        let response = test_app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Sac Clothes Mittens"));
        assert!(html.contains("id=\"app\""));
    }

    #[tokio::test]
    async fn test_each_page_load_mounts_new_widget() {
        let app = test_app();
        let first = mount(&app).await;
        let second = mount(&app).await;
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_unknown_widget_is_not_found() {
        let uri = format!("/w/{}/product/cart", Uuid::new_v4());
        let response = test_app().oneshot(htmx_post(&uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_variant_is_not_found() {
        let app = test_app();
        let base = mount(&app).await;
        let response = app
            .oneshot(htmx_post(&format!("{base}/product/variants/7")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_tab_is_not_found() {
        let app = test_app();
        let base = mount(&app).await;
        let response = app
            .oneshot(htmx_post(&format!("{base}/reviews/tabs/ratings")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_plain_post_redirects_to_widget_page() {
        let app = test_app();
        let base = mount(&app).await;
        let response = app
            .oneshot(
                Request::post(format!("{base}/product/variants/1"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            base.as_str()
        );
    }
}
