use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Json,
};

use super::{list_page, ApiResult, AppState};
use crate::api::models::{EventItem, PaginatedResponse};

pub async fn get_events(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BTreeMap<String, String>>,
) -> ApiResult<PaginatedResponse<EventItem>> {
    let snapshot = state.snapshot();
    // one instant for both the status filter and the rendered status
    let ctx = state.list_context();

    let response = list_page(&state, query, &snapshot.events, &ctx, |event| {
        EventItem::from_record(event, ctx.now)
    })?;

    Ok(Json(response))
}
