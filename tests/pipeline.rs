use chrono::{Duration, TimeZone, Utc};
use serde_json::json;

use proam_rankings::config::tables::{leaderboard_tiers, ReferenceTables};
use proam_rankings::domain::raw::{RawEvent, RawPlayer, RawTeam};
use proam_rankings::domain::{normalize_events, normalize_players, normalize_teams, EventStatus, PlayerRecord};
use proam_rankings::errors::RankingError;
use proam_rankings::pipeline::{run_pipeline, FilterCriteria, ListContext, SortDirection, SortSpec, ViewState};
use proam_rankings::rating::decayed_value;

fn ctx() -> ListContext {
    ListContext::at(Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap())
}

fn players() -> Vec<PlayerRecord> {
    let scores = [72.0, 88.0, 95.5, 61.0, 88.0, 79.0, 90.0, 55.0, 83.0, 99.0, 67.0, 74.0];
    let raw: Vec<RawPlayer> = scores
        .iter()
        .enumerate()
        .map(|(i, score)| {
            let position = ["PG", "SG", "SF", "PF", "C"][i % 5];
            let team = if i % 3 == 0 { json!(null) } else { json!({ "id": "t1", "name": "Splash Bros" }) };
            serde_json::from_value(json!({
                "id": format!("p{}", i),
                "gamertag": format!("Hooper{:02}", i),
                "position": position,
                "performance_score": score,
                "player_rp": 1000 - (i as i64) * 50,
                "teams": team,
            }))
            .unwrap()
        })
        .collect();

    normalize_players(raw)
}

fn gamertags(page: &[&PlayerRecord]) -> Vec<String> {
    page.iter().map(|p| p.gamertag.clone()).collect()
}

#[test]
fn test_first_page_of_performance_leaders() {
    let players = players();
    let sort = SortSpec::new("performance_score", SortDirection::Desc);

    let page = run_pipeline(&players, &FilterCriteria::default(), Some(&sort), 0, 5, &ctx()).unwrap();

    assert_eq!(page.total_count, 12);
    assert_eq!(page.total_pages, 3);
    assert_eq!(
        gamertags(&page.records),
        vec!["Hooper09", "Hooper02", "Hooper06", "Hooper01", "Hooper04"]
    );
}

#[test]
fn test_pages_partition_sorted_records() {
    let players = players();
    let sort = SortSpec::new("performance_score", SortDirection::Asc);
    let criteria = FilterCriteria::default();

    let mut seen = Vec::new();
    for index in 0..3 {
        let page = run_pipeline(&players, &criteria, Some(&sort), index, 5, &ctx()).unwrap();
        seen.extend(page.records.iter().map(|p| p.performance_score.unwrap()));
    }

    assert_eq!(seen.len(), 12);
    assert!(seen.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_search_and_category_filters_compose() {
    let players = players();
    let criteria = FilterCriteria::search("splash").with_category("position", "PG");

    let page = run_pipeline(&players, &criteria, None, 0, 10, &ctx()).unwrap();

    // p0 is a free agent; p5 and p10 play for the Splash Bros
    assert_eq!(gamertags(&page.records), vec!["Hooper05", "Hooper10"]);

    let all = FilterCriteria::default().with_category("position", "all");
    let page = run_pipeline(&players, &all, None, 0, 20, &ctx()).unwrap();
    assert_eq!(page.total_count, 12);
}

#[test]
fn test_unknown_fields_are_rejected() {
    let players = players();

    let bad_sort = SortSpec::new("shoe_size", SortDirection::Asc);
    let err = run_pipeline(&players, &FilterCriteria::default(), Some(&bad_sort), 0, 5, &ctx()).unwrap_err();
    assert!(matches!(err, RankingError::InvalidArgument(_)));

    let bad_filter = FilterCriteria::default().with_category("hometown", "all");
    assert!(run_pipeline(&players, &bad_filter, None, 0, 5, &ctx()).is_err());
}

#[test]
fn test_view_state_resets_page_on_new_criteria() {
    let players = players();
    let mut view = ViewState::new(5).unwrap();
    view.toggle_sort::<PlayerRecord>("player_rp").unwrap();
    view.set_page(2);

    let page = view.apply(&players, &ctx()).unwrap();
    assert_eq!(page.page_index, 2);
    assert_eq!(gamertags(&page.records), vec!["Hooper10", "Hooper11"]);

    view.set_search("hooper1");
    assert_eq!(view.page_index(), 0);

    let page = view.apply(&players, &ctx()).unwrap();
    assert_eq!(gamertags(&page.records), vec!["Hooper10", "Hooper11"]);

    // toggling the active field flips to ascending
    view.toggle_sort::<PlayerRecord>("player_rp").unwrap();
    let page = view.apply(&players, &ctx()).unwrap();
    assert_eq!(gamertags(&page.records), vec!["Hooper11", "Hooper10"]);
}

#[test]
fn test_event_status_filter_uses_listing_time() {
    let now = ctx().now;
    let day = |offset: i64| (now + Duration::days(offset)).to_rfc3339();
    let raw: Vec<RawEvent> = serde_json::from_value(json!([
        { "id": "e1", "name": "Summer Major", "start_date": day(-10), "end_date": day(-3), "tier": "T1" },
        { "id": "e2", "name": "Weekly Open", "start_date": day(-1), "end_date": day(2), "tier": "T4" },
        { "id": "e3", "name": "Fall Invitational", "start_date": day(14), "max_teams": 32 },
        { "id": "e4", "name": "Undated Qualifier", "end_date": day(-30) },
    ]))
    .unwrap();
    let events = normalize_events(raw);

    assert_eq!(events[0].status(now), EventStatus::Completed);
    assert_eq!(events[1].status(now), EventStatus::Ongoing);
    assert_eq!(events[2].status(now), EventStatus::Upcoming);
    assert_eq!(events[3].status(now), EventStatus::Completed);
    assert_eq!(events[2].registration_display(), "0/32");

    let criteria = FilterCriteria::default().with_category("status", "completed");
    let sort = SortSpec::new("name", SortDirection::Asc);
    let page = run_pipeline(&events, &criteria, Some(&sort), 0, 10, &ctx()).unwrap();
    let ids: Vec<&str> = page.records.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["e1", "e4"]);
}

#[test]
fn test_event_search_matches_location() {
    let raw: Vec<RawEvent> = serde_json::from_value(json!([
        { "id": "e1", "name": "Summer Major", "location": "Atlanta, GA" },
        { "id": "e2", "name": "Weekly Open", "location": "Online" },
        { "id": "e3", "name": "Peach State Classic" },
    ]))
    .unwrap();
    let events = normalize_events(raw);

    let page = run_pipeline(&events, &FilterCriteria::search("atlanta"), None, 0, 10, &ctx()).unwrap();
    assert_eq!(page.total_count, 1);
    assert_eq!(page.records[0].id, "e1");
}

#[test]
fn test_teams_normalize_and_classify() {
    let raw: Vec<RawTeam> = serde_json::from_value(json!([
        { "id": "t1", "name": "Splash Bros", "global_rank": 4, "wins": 30, "losses": 10,
          "regions": { "id": "na", "name": "North America" }, "_count": { "team_rosters": 6 } },
        { "id": "t2", "name": "Glass Cleaners", "global_rank": "5", "region_id": "eu" },
        { "id": "t3", "name": "Pickup Squad" },
    ]))
    .unwrap();
    let teams = normalize_teams(raw);
    let tiers = leaderboard_tiers().unwrap();

    assert_eq!(teams[0].member_count, 6);
    assert_eq!(teams[0].region_name(), Some("North America"));
    assert_eq!(teams[0].win_percentage(), Some(75.0));
    assert_eq!(teams[1].region.as_ref().map(|r| r.id.as_str()), Some("eu"));

    assert_eq!(tiers.classify_rank(teams[0].global_rank).label, "S-Tier");
    assert_eq!(tiers.classify_rank(teams[1].global_rank).label, "A-Tier");
    assert_eq!(tiers.classify_rank(teams[2].global_rank).label, "Unranked");
}

#[test]
fn test_decay_from_reference_tables() {
    let tables = ReferenceTables::standard().unwrap();

    assert_eq!(decayed_value(100.0, "event", 10.0, &tables.decay).unwrap(), 100.0);
    assert_eq!(decayed_value(100.0, "event", 60.0, &tables.decay).unwrap(), 50.0);
    assert_eq!(decayed_value(100.0, "event", 120.0, &tables.decay).unwrap(), 0.0);

    let err = decayed_value(100.0, "pickup_games", 10.0, &tables.decay).unwrap_err();
    assert!(matches!(err, RankingError::Configuration(_)));
}
