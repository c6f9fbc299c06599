use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Json,
};

use super::{list_page, ApiResult, AppState};
use crate::api::models::{PaginatedResponse, PlayerItem};

pub async fn get_players(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BTreeMap<String, String>>,
) -> ApiResult<PaginatedResponse<PlayerItem>> {
    let snapshot = state.snapshot();
    let rating = &state.config.rating;

    let response = list_page(&state, query, &snapshot.players, &state.list_context(), |player| {
        PlayerItem::from_record(player, &state.tables, rating)
    })?;

    Ok(Json(response))
}
