use axum::{routing::get, Router};
use std::sync::Arc;

use crate::api::handlers::{
    events::get_events,
    players::get_players,
    reference::{get_awards, get_decay, get_inactivity, get_leaderboard, get_reference},
    teams::get_teams,
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/players", get(get_players))
        .route("/api/teams", get(get_teams))
        .route("/api/events", get(get_events))
        .route("/api/leaderboard", get(get_leaderboard))
        .route("/api/awards", get(get_awards))
        .route("/api/reference", get(get_reference))
        .route("/api/decay", get(get_decay))
        .route("/api/decay/inactivity", get(get_inactivity))
        .with_state(state)
}
