//! Reviews panel route handlers: tab selection and review submission.

use axum::{
    Form,
    extract::{Path, State},
    http::HeaderMap,
    response::Response,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::Result;
use crate::state::AppState;
use crate::widget::{ReviewDraft, Tab};

use super::respond;
use super::widget::WidgetView;

/// Switch the reviews panel to another tab.
#[instrument(skip(state, headers))]
pub async fn select_tab(
    State(state): State<AppState>,
    Path((id, slug)): Path<(Uuid, String)>,
    headers: HeaderMap,
) -> Result<Response> {
    let tab = slug.parse::<Tab>()?;
    let mount_id = &state.config().mount_id;
    let view = state
        .with_widget(id, |store| {
            store.select_tab(tab);
            WidgetView::new(store, id, mount_id)
        })
        .await?;

    Ok(respond(&headers, view))
}

/// Submit the review form.
///
/// A rejected submission is not an HTTP error: the widget is re-rendered with
/// the entered values and the list of problems.
#[instrument(skip(state, headers, draft))]
pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Form(draft): Form<ReviewDraft>,
) -> Result<Response> {
    let mount_id = &state.config().mount_id;
    let (accepted, view) = state
        .with_widget(id, |store| {
            let accepted = store.submit_review_draft(draft).is_ok();
            (accepted, WidgetView::new(store, id, mount_id))
        })
        .await?;

    if accepted {
        crate::error::add_breadcrumb("reviews", "Review submitted");
    }

    Ok(respond(&headers, view))
}
