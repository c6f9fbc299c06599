use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Json,
};

use super::{list_page, ApiResult, AppState};
use crate::api::models::{PaginatedResponse, TeamItem};

pub async fn get_teams(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BTreeMap<String, String>>,
) -> ApiResult<PaginatedResponse<TeamItem>> {
    let snapshot = state.snapshot();

    let response = list_page(&state, query, &snapshot.teams, &state.list_context(), |team| {
        TeamItem::from_record(team, &state.tables)
    })?;

    Ok(Json(response))
}
