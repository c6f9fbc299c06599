use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json},
};
use serde::Deserialize;

use super::{ApiError, ApiResult, AppState};
use crate::api::models::{
    AwardItem, AwardsResponse, DecayResponse, InactivityResponse, LeaderboardResponse, PlayerItem, TeamItem,
};
use crate::errors::RankingError;
use crate::pipeline::{top_players, top_teams};
use crate::rating::{award_races, decayed_value};

pub async fn get_reference(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.tables.clone())
}

pub async fn get_leaderboard(State(state): State<Arc<AppState>>) -> Json<LeaderboardResponse> {
    let snapshot = state.snapshot();
    let limit = state.config.pipeline.leaderboard_size;

    let teams = top_teams(&snapshot.teams, limit)
        .into_iter()
        .map(|team| TeamItem::from_record(team, &state.tables))
        .collect();
    let players = top_players(&snapshot.players, limit)
        .into_iter()
        .map(|player| PlayerItem::from_record(player, &state.tables, &state.config.rating))
        .collect();

    Json(LeaderboardResponse { teams, players })
}

pub async fn get_awards(State(state): State<Arc<AppState>>) -> Json<AwardsResponse> {
    let snapshot = state.snapshot();
    let races = award_races(&snapshot.players, state.config.pipeline.award_candidates);

    Json(AwardsResponse {
        omvp: races.omvp.iter().map(AwardItem::from).collect(),
        dmvp: races.dmvp.iter().map(AwardItem::from).collect(),
        rookie: races.rookie.iter().map(AwardItem::from).collect(),
    })
}

#[derive(Deserialize)]
pub struct DecayParams {
    source: Option<String>,
    base_rp: Option<String>,
    days: Option<String>,
}

pub async fn get_decay(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DecayParams>,
) -> ApiResult<DecayResponse> {
    let source = params
        .source
        .ok_or_else(|| RankingError::invalid_argument("missing query parameter 'source'"))?;
    let base_rp = parse_number("base_rp", params.base_rp)?;
    let days = parse_number("days", params.days)?;

    let decayed_rp = decayed_value(base_rp, &source, days, &state.tables.decay)?;

    Ok(Json(DecayResponse { source, base_rp, days, decayed_rp }))
}

#[derive(Deserialize)]
pub struct InactivityParams {
    rating: Option<String>,
    days: Option<String>,
}

pub async fn get_inactivity(
    State(state): State<Arc<AppState>>,
    Query(params): Query<InactivityParams>,
) -> ApiResult<InactivityResponse> {
    let rating = parse_number("rating", params.rating)?;
    let days = parse_number("days", params.days)?;
    if days < 0.0 {
        return Err(RankingError::invalid_argument("days must not be negative").into());
    }

    let days_inactive = days.floor() as i64;
    let adjusted_rating = state.config.rating.inactivity_adjusted(rating, days_inactive);

    Ok(Json(InactivityResponse { rating, days_inactive, adjusted_rating }))
}

fn parse_number(name: &str, value: Option<String>) -> Result<f64, ApiError> {
    let value = value.ok_or_else(|| RankingError::invalid_argument(format!("missing query parameter '{}'", name)))?;
    let number = value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| RankingError::invalid_argument(format!("{} must be a finite number, got '{}'", name, value)))?;
    Ok(number)
}
