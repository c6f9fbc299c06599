use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use log::warn;

use super::models::{
    Captain, EventRecord, EventTier, PlayerRecord, PlayerStats, Position, Region, TeamRecord, TeamRef,
};
use super::raw::{first_of, RawCaptain, RawEvent, RawPlayer, RawRegion, RawStats, RawTeam, RawTeamRef};

pub fn normalize_players(raw: Vec<RawPlayer>) -> Vec<PlayerRecord> {
    raw.into_iter().map(normalize_player).collect()
}

pub fn normalize_teams(raw: Vec<RawTeam>) -> Vec<TeamRecord> {
    raw.into_iter().map(normalize_team).collect()
}

pub fn normalize_events(raw: Vec<RawEvent>) -> Vec<EventRecord> {
    raw.into_iter().map(normalize_event).collect()
}

pub fn normalize_player(raw: RawPlayer) -> PlayerRecord {
    let id = raw.id.unwrap_or_default();
    let position = raw.position.as_deref().and_then(|p| parse_position(&id, p));
    let team = resolve_player_team(raw.teams, raw.team_rosters);

    PlayerRecord {
        gamertag: raw.gamertag.unwrap_or_default(),
        position,
        performance_score: raw.performance_score,
        player_rp: raw.player_rp,
        player_rank_score: raw.player_rank_score,
        monthly_value: raw.monthly_value,
        team,
        stats: first_of(raw.stats).map(normalize_stats),
        is_rookie: raw.is_rookie.unwrap_or(false),
        id,
    }
}

pub fn normalize_team(raw: RawTeam) -> TeamRecord {
    let region = first_of(raw.regions)
        .or_else(|| first_of(raw.region))
        .and_then(normalize_region)
        .or_else(|| region_from_id(raw.region_id));

    let member_count = raw
        .member_count
        .or_else(|| first_of(raw.count).and_then(|c| c.value()))
        .and_then(to_count)
        .unwrap_or(0);

    TeamRecord {
        id: raw.id.unwrap_or_default(),
        name: raw.name.unwrap_or_default(),
        logo_url: raw.logo_url,
        current_rp: raw.current_rp,
        elo_rating: raw.elo_rating,
        global_rank: raw.global_rank.and_then(to_count),
        leaderboard_tier: raw.leaderboard_tier.filter(|t| !t.trim().is_empty()),
        region,
        captain: first_of(raw.captain).and_then(normalize_captain),
        member_count,
        wins: raw.wins.and_then(to_count),
        losses: raw.losses.and_then(to_count),
        points_differential: raw.points_differential,
    }
}

pub fn normalize_event(raw: RawEvent) -> EventRecord {
    let id = raw.id.unwrap_or_default();
    let region = first_of(raw.region)
        .or_else(|| first_of(raw.regions))
        .and_then(normalize_region)
        .or_else(|| region_from_id(raw.region_id));

    let registered_teams = raw
        .registered_teams
        .or_else(|| first_of(raw.count).and_then(|c| c.value()))
        .and_then(to_count)
        .unwrap_or(0);

    let tier = raw.tier.as_deref().and_then(|t| match t.parse::<EventTier>() {
        Ok(tier) => Some(tier),
        Err(e) => {
            warn!("Event {}: {}", id, e);
            None
        }
    });

    EventRecord {
        name: raw.name.unwrap_or_default(),
        description: raw.description.filter(|d| !d.trim().is_empty()),
        location: raw.location.filter(|l| !l.trim().is_empty()),
        start_date: raw.start_date.as_deref().and_then(|d| parse_date_logged(&id, d)),
        end_date: raw.end_date.as_deref().and_then(|d| parse_date_logged(&id, d)),
        region,
        registered_teams,
        max_teams: raw.max_teams.and_then(to_count).filter(|m| *m > 0),
        tier,
        id,
    }
}

/// A direct team relation wins over the roster join
fn resolve_player_team(
    teams: Option<super::raw::Relation<RawTeamRef>>,
    rosters: Option<super::raw::Relation<super::raw::RawRoster>>,
) -> Option<TeamRef> {
    first_of(teams)
        .and_then(normalize_team_ref)
        .or_else(|| first_of(rosters).and_then(|roster| first_of(roster.teams)).and_then(normalize_team_ref))
}

fn normalize_team_ref(raw: RawTeamRef) -> Option<TeamRef> {
    let id = raw.id?;
    Some(TeamRef {
        name: raw.name.unwrap_or_default(),
        logo_url: raw.logo_url,
        id,
    })
}

fn normalize_region(raw: RawRegion) -> Option<Region> {
    Some(Region { id: raw.id?, name: raw.name })
}

fn region_from_id(region_id: Option<String>) -> Option<Region> {
    region_id
        .filter(|id| !id.is_empty())
        .map(|id| Region { id, name: None })
}

fn normalize_captain(raw: RawCaptain) -> Option<Captain> {
    if let Some(player) = first_of(raw.players) {
        return Some(Captain {
            player_id: player.id?,
            gamertag: player.gamertag.unwrap_or_default(),
        });
    }

    Some(Captain {
        gamertag: raw.gamertag?,
        player_id: raw.id.unwrap_or_default(),
    })
}

fn normalize_stats(raw: RawStats) -> PlayerStats {
    PlayerStats {
        games_played: raw.games_played.and_then(to_count),
        points_per_game: raw.points_per_game,
        assists_per_game: raw.assists_per_game,
        rebounds_per_game: raw.rebounds_per_game,
        steals_per_game: raw.steals_per_game,
        blocks_per_game: raw.blocks_per_game,
        turnovers_per_game: raw.turnovers_per_game,
        minutes_per_game: raw.minutes_per_game,
        field_goal_percentage: raw.field_goal_percentage,
        three_point_percentage: raw.three_point_percentage,
        free_throw_percentage: raw.free_throw_percentage,
    }
}

fn parse_position(player_id: &str, value: &str) -> Option<Position> {
    if value.trim().is_empty() {
        return None;
    }
    match value.parse() {
        Ok(position) => Some(position),
        Err(e) => {
            warn!("Player {}: {}", player_id, e);
            None
        }
    }
}

fn to_count(value: f64) -> Option<u32> {
    (value.is_finite() && value >= 0.0).then(|| value.round() as u32)
}

fn parse_date_logged(record_id: &str, value: &str) -> Option<DateTime<Utc>> {
    let parsed = parse_date(value);
    if parsed.is_none() && !value.trim().is_empty() {
        warn!("Event {}: unparseable date '{}'", record_id, value);
    }
    parsed
}

/// Parse the date formats seen in snapshots, assuming UTC when no offset is given
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
