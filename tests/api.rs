use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use proam_rankings::api::{create_router, AppState};
use proam_rankings::cache::{Snapshot, SnapshotStore};
use proam_rankings::config::{AppConfig, ReferenceTables};
use proam_rankings::domain::FixedClock;

fn seed_data_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("proam_api_{}_{}", name, std::process::id()));
    let store = SnapshotStore::new(&dir);

    store
        .save_raw(
            "players",
            &json!([
                { "id": "p1", "gamertag": "DimeDropper", "position": "PG", "performance_score": 96.0,
                  "player_rp": 1800, "teams": { "id": "t1", "name": "Splash Bros" } },
                { "id": "p2", "gamertag": "GlassEater", "position": "C", "performance_score": 81.0,
                  "player_rp": 1200, "is_rookie": true },
                { "id": "p3", "gamertag": "CornerThree", "position": "SG", "performance_score": "n/a",
                  "player_rp": 900, "team_rosters": [{ "team_id": "t2", "teams": { "id": "t2", "name": "Lockdown" } }] },
                "not a player",
            ]),
        )
        .unwrap();
    store
        .save_raw(
            "teams",
            &json!([
                { "id": "t1", "name": "Splash Bros", "global_rank": 3, "current_rp": 5400, "wins": 12, "losses": 4 },
                { "id": "t2", "name": "Lockdown", "global_rank": 7, "current_rp": 3100 },
                { "id": "t3", "name": "Unranked Five" },
            ]),
        )
        .unwrap();

    dir
}

fn app(name: &str) -> Router {
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
    let dir = seed_data_dir(name);
    let snapshot: Snapshot = SnapshotStore::new(&dir).load(now).unwrap();
    let _ = std::fs::remove_dir_all(&dir);

    let state = AppState::new(
        snapshot,
        AppConfig::default(),
        ReferenceTables::standard().unwrap(),
        Arc::new(FixedClock(now)),
    );
    create_router(Arc::new(state))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_players_page_shape() {
    let (status, body) = get(app("players_page"), "/api/players?sort_by=player_rp&page_size=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["page"], 0);
    assert_eq!(body["pageSize"], 2);

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["gamertag"], "DimeDropper");
    assert_eq!(items[0]["tier"], "S");
    assert_eq!(items[1]["teamName"], "Free Agent");
    assert_eq!(items[1]["isFreeAgent"], true);
}

#[tokio::test]
async fn test_roster_team_and_missing_score() {
    let (status, body) = get(app("roster_team"), "/api/players?search=corner").await;

    assert_eq!(status, StatusCode::OK);
    let player = &body["items"][0];
    assert_eq!(player["teamName"], "Lockdown");
    assert_eq!(player["performanceScore"], Value::Null);
}

#[tokio::test]
async fn test_team_filters_and_rank_tiers() {
    let (status, body) = get(app("teams"), "/api/teams?sort_by=current_rp").await;

    assert_eq!(status, StatusCode::OK);
    let tiers: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|team| team["rankTier"].as_str().unwrap())
        .collect();
    assert_eq!(tiers, vec!["S-Tier", "A-Tier", "Unranked"]);
    assert_eq!(body["items"][0]["winPercentage"], 75.0);
}

#[tokio::test]
async fn test_bad_listing_queries_are_client_errors() {
    let (status, body) = get(app("bad_sort"), "/api/players?sort_by=shoe_size").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("shoe_size"));

    let (status, _) = get(app("bad_filter"), "/api/teams?hometown=all").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(app("bad_page_size"), "/api/events?page_size=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_leaderboard_ranks() {
    let (status, body) = get(app("leaderboard"), "/api/leaderboard").await;

    assert_eq!(status, StatusCode::OK);
    let teams: Vec<&str> = body["teams"]
        .as_array()
        .unwrap()
        .iter()
        .map(|team| team["name"].as_str().unwrap())
        .collect();
    assert_eq!(teams, vec!["Splash Bros", "Lockdown"]);
    assert_eq!(body["players"][0]["gamertag"], "DimeDropper");
}

#[tokio::test]
async fn test_decay_endpoint() {
    let (status, body) = get(app("decay"), "/api/decay?source=event&base_rp=100&days=60").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["decayedRp"], 50.0);

    let (status, _) = get(app("decay_unknown"), "/api/decay?source=pickup&base_rp=100&days=60").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = get(app("decay_missing"), "/api/decay?source=event&days=60").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get(app("decay_infinite"), "/api/decay?source=event&base_rp=inf&days=60").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("base_rp"));
}

#[tokio::test]
async fn test_inactivity_endpoint() {
    let (status, body) = get(app("inactivity"), "/api/decay/inactivity?rating=100&days=65").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["daysInactive"], 65);
    assert!((body["adjustedRating"].as_f64().unwrap() - 96.04).abs() < 1e-9);

    let (status, _) = get(app("inactivity_negative"), "/api/decay/inactivity?rating=100&days=-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(app("inactivity_nan"), "/api/decay/inactivity?rating=NaN&days=30").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // far beyond any i32 period count
    let (status, body) = get(app("inactivity_huge"), "/api/decay/inactivity?rating=90&days=128849018850").await;
    assert_eq!(status, StatusCode::OK);
    let adjusted = body["adjustedRating"].as_f64().unwrap();
    assert!(adjusted.is_finite() && adjusted <= 90.0);
}

#[tokio::test]
async fn test_reference_tables_are_served() {
    let (status, body) = get(app("reference"), "/api/reference").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_object());
}
