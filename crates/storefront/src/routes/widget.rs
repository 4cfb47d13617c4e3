//! Product widget route handlers.
//!
//! The widget is rendered server-side. Loading the page mounts a fresh widget
//! whose id is baked into every URL the markup posts to. Hovering a color
//! swatch and clicking add-to-cart post back here; HTMX requests get the
//! re-rendered widget fragment, plain form posts are redirected to the page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Response},
};
use mittens_core::{Rating, Review, VariantId};
use tracing::instrument;
use uuid::Uuid;

use crate::error::Result;
use crate::state::AppState;
use crate::widget::{ReviewForm, ReviewPanel, StoreRoot, Tab, WidgetError, count_message};

use super::respond;

// =============================================================================
// View Models
// =============================================================================

/// Everything the widget templates render, snapshotted from [`StoreRoot`].
#[derive(Clone)]
pub struct WidgetView {
    pub mount_id: String,
    /// URL prefix of this widget instance, `/w/{id}`.
    pub base: String,
    pub cart_count: usize,
    pub product: ProductDisplay,
    pub panel: PanelView,
}

/// Product section display data.
#[derive(Clone)]
pub struct ProductDisplay {
    pub title: String,
    pub image: String,
    pub in_stock: bool,
    pub shipping: String,
    pub details: Vec<String>,
    pub swatches: Vec<SwatchView>,
}

/// A color swatch for one variant.
#[derive(Clone)]
pub struct SwatchView {
    pub index: usize,
    pub color: String,
    pub selected: bool,
}

/// Reviews panel display data.
#[derive(Clone)]
pub struct PanelView {
    pub tabs: Vec<TabView>,
    pub show_reviews: bool,
    pub show_form: bool,
    pub count_message: String,
    pub reviews: Vec<ReviewView>,
    pub form: FormView,
}

/// A tab header.
#[derive(Clone)]
pub struct TabView {
    pub slug: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// One submitted review.
#[derive(Clone)]
pub struct ReviewView {
    pub name: String,
    pub rating: u8,
    pub text: String,
    pub recommended: &'static str,
}

/// Review form display data, including values the customer already entered.
#[derive(Clone)]
pub struct FormView {
    pub name: String,
    pub review: String,
    pub rating_unset: bool,
    pub rating_options: Vec<RatingOption>,
    pub recommend_yes: bool,
    pub recommend_no: bool,
    pub errors: Vec<String>,
}

/// An entry in the rating picker.
#[derive(Clone)]
pub struct RatingOption {
    pub value: u8,
    pub selected: bool,
}

impl WidgetView {
    /// Snapshot widget `id` for rendering into the element `mount_id`.
    #[must_use]
    pub fn new(store: &StoreRoot, id: Uuid, mount_id: &str) -> Self {
        let product = store.product();
        let reviews = product.reviews();

        Self {
            mount_id: mount_id.to_string(),
            base: format!("/w/{id}"),
            cart_count: store.cart().len(),
            product: ProductDisplay {
                title: product.title(),
                image: product.image().to_string(),
                in_stock: product.in_stock(),
                shipping: product.shipping().to_string(),
                details: product.details().to_vec(),
                swatches: product
                    .variants()
                    .iter()
                    .enumerate()
                    .map(|(index, variant)| SwatchView {
                        index,
                        color: variant.color.clone(),
                        selected: index == product.selected_index(),
                    })
                    .collect(),
            },
            panel: PanelView::new(product.panel(), &reviews),
        }
    }
}

impl PanelView {
    fn new(panel: &ReviewPanel, reviews: &[Review]) -> Self {
        Self {
            tabs: Tab::ALL
                .into_iter()
                .map(|tab| TabView {
                    slug: tab.slug(),
                    label: tab.label(),
                    active: tab == panel.selected_tab(),
                })
                .collect(),
            show_reviews: panel.shows_reviews(),
            show_form: panel.shows_form(),
            count_message: count_message(reviews),
            reviews: reviews.iter().map(ReviewView::from).collect(),
            form: FormView::from(panel.form()),
        }
    }
}

impl From<&Review> for ReviewView {
    fn from(review: &Review) -> Self {
        Self {
            name: review.reviewer_name.clone(),
            rating: review.rating.get(),
            text: review.review_text.clone(),
            recommended: if review.recommended { "Yes" } else { "No" },
        }
    }
}

impl From<&ReviewForm> for FormView {
    fn from(form: &ReviewForm) -> Self {
        Self {
            name: form.name().unwrap_or_default().to_string(),
            review: form.review_text().unwrap_or_default().to_string(),
            rating_unset: form.rating().is_none(),
            rating_options: Rating::descending()
                .map(|rating| RatingOption {
                    value: rating.get(),
                    selected: form.rating() == Some(rating),
                })
                .collect(),
            recommend_yes: form.recommended() == Some(true),
            recommend_no: form.recommended() == Some(false),
            errors: form.errors().iter().map(ToString::to_string).collect(),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Full page with the widget mounted.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct PageTemplate {
    pub view: WidgetView,
}

/// Widget fragment (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/widget.html")]
pub struct WidgetTemplate {
    pub view: WidgetView,
}

/// Snapshot the current state of widget `id`.
async fn snapshot(state: &AppState, id: Uuid) -> Result<WidgetView> {
    let mount_id = &state.config().mount_id;
    state
        .with_widget(id, |store| WidgetView::new(store, id, mount_id))
        .await
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the page with a freshly mounted widget.
#[instrument(skip(state))]
pub async fn page(State(state): State<AppState>) -> Result<PageTemplate> {
    let mount_id = &state.config().mount_id;
    let view = state
        .mount(|id, store| WidgetView::new(store, id, mount_id))
        .await?;

    Ok(PageTemplate { view })
}

/// Display the page for an already mounted widget.
#[instrument(skip(state))]
pub async fn reopen(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<PageTemplate> {
    Ok(PageTemplate {
        view: snapshot(&state, id).await?,
    })
}

/// Display the widget fragment.
#[instrument(skip(state))]
pub async fn fragment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<WidgetTemplate> {
    Ok(WidgetTemplate {
        view: snapshot(&state, id).await?,
    })
}

/// Select a variant (hover on its swatch).
#[instrument(skip(state, headers))]
pub async fn select_variant(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
    headers: HeaderMap,
) -> Result<Response> {
    let mount_id = &state.config().mount_id;
    let view = state
        .try_with_widget(id, |store| {
            store.select_variant(index)?;
            Ok::<_, WidgetError>(WidgetView::new(store, id, mount_id))
        })
        .await?;

    Ok(respond(&headers, view))
}

/// Add the selected variant to the cart.
#[instrument(skip(state, headers))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Response> {
    let mount_id = &state.config().mount_id;
    let (variant_id, view) = state
        .try_with_widget(id, |store| {
            let variant_id = store.add_selected_to_cart()?;
            Ok::<_, WidgetError>((variant_id, WidgetView::new(store, id, mount_id)))
        })
        .await?;

    crate::error::add_breadcrumb("cart", &format!("Added variant {variant_id}"));

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        respond(&headers, view),
    )
        .into_response())
}

/// Cart contents as a JSON array of variant ids.
#[instrument(skip(state))]
pub async fn cart(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<VariantId>>> {
    state
        .with_widget(id, |store| store.cart().to_vec())
        .await
        .map(Json)
}
