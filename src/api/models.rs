use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::settings::RatingSettings;
use crate::config::tables::{event_tier_info, ReferenceTables};
use crate::domain::{EventRecord, EventStatus, PlayerRecord, TeamRecord};
use crate::pipeline::Page;
use crate::rating::salary::{self, AwardModifiers};
use crate::rating::AwardCandidate;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl<T> PaginatedResponse<T> {
    pub fn from_page(page: Page<T>) -> Self {
        Self {
            items: page.records,
            total: page.total_count,
            page: page.page_index,
            page_size: page.page_size,
            total_pages: page.total_pages,
        }
    }
}

/// Player row; null scores render as N/A on the client
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerItem {
    pub id: String,
    pub gamertag: String,
    pub position: Option<&'static str>,
    pub team_id: Option<String>,
    pub team_name: String,
    pub team_logo_url: Option<String>,
    pub is_free_agent: bool,
    pub performance_score: Option<f64>,
    pub player_rp: Option<f64>,
    pub player_rank_score: Option<f64>,
    pub monthly_value: Option<f64>,
    pub games_played: Option<u32>,
    pub tier: &'static str,
    pub tier_name: &'static str,
    pub salary: Option<f64>,
    pub is_rookie: bool,
}

impl PlayerItem {
    pub fn from_record(player: &PlayerRecord, tables: &ReferenceTables, rating: &RatingSettings) -> Self {
        let tier = tables.player_tiers.classify(player.performance_score);
        let salary = player.stats.as_ref().map(|stats| {
            salary::salary(
                rating.salary_model,
                stats,
                player.performance_score,
                &tables.salary_multipliers,
                &AwardModifiers::default(),
            )
        });

        Self {
            id: player.id.clone(),
            gamertag: player.gamertag.clone(),
            position: player.position.map(|p| p.code()),
            team_id: player.team.as_ref().map(|t| t.id.clone()),
            team_name: player.team_display().to_string(),
            team_logo_url: player.team.as_ref().and_then(|t| t.logo_url.clone()),
            is_free_agent: player.is_free_agent(),
            performance_score: player.performance_score,
            player_rp: player.player_rp,
            player_rank_score: player.player_rank_score,
            monthly_value: player.monthly_value,
            games_played: player.games_played(),
            tier: tier.label,
            tier_name: tier.name,
            salary,
            is_rookie: player.is_rookie,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamItem {
    pub id: String,
    pub name: String,
    pub logo_url: Option<String>,
    pub current_rp: Option<f64>,
    pub elo_rating: Option<f64>,
    pub global_rank: Option<u32>,
    /// Label stored upstream, if any
    pub leaderboard_tier: Option<String>,
    /// Tier derived from the global rank
    pub rank_tier: &'static str,
    pub region_id: Option<String>,
    pub region_name: Option<String>,
    pub captain_gamertag: Option<String>,
    pub member_count: u32,
    pub wins: Option<u32>,
    pub losses: Option<u32>,
    pub win_percentage: Option<f64>,
    pub points_differential: Option<f64>,
}

impl TeamItem {
    pub fn from_record(team: &TeamRecord, tables: &ReferenceTables) -> Self {
        Self {
            id: team.id.clone(),
            name: team.name.clone(),
            logo_url: team.logo_url.clone(),
            current_rp: team.current_rp,
            elo_rating: team.elo_rating,
            global_rank: team.global_rank,
            leaderboard_tier: team.leaderboard_tier.clone(),
            rank_tier: tables.leaderboard_tiers.classify_rank(team.global_rank).label,
            region_id: team.region.as_ref().map(|r| r.id.clone()),
            region_name: team.region_name().map(str::to_string),
            captain_gamertag: team.captain.as_ref().map(|c| c.gamertag.clone()),
            member_count: team.member_count,
            wins: team.wins,
            losses: team.losses,
            win_percentage: team.win_percentage(),
            points_differential: team.points_differential,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventItem {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: EventStatus,
    pub region_id: Option<String>,
    pub region_name: Option<String>,
    pub registered_teams: u32,
    pub max_teams: Option<u32>,
    pub registration: String,
    pub tier: Option<&'static str>,
    pub tier_max_rp: Option<u32>,
}

impl EventItem {
    pub fn from_record(event: &EventRecord, now: DateTime<Utc>) -> Self {
        Self {
            id: event.id.clone(),
            name: event.name.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            start_date: event.start_date,
            end_date: event.end_date,
            status: event.status(now),
            region_id: event.region.as_ref().map(|r| r.id.clone()),
            region_name: event.region_name().map(str::to_string),
            registered_teams: event.registered_teams,
            max_teams: event.max_teams,
            registration: event.registration_display(),
            tier: event.tier.map(|t| t.code()),
            tier_max_rp: event.tier.and_then(|t| event_tier_info(t).ok()).map(|info| info.max_rp),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    pub teams: Vec<TeamItem>,
    pub players: Vec<PlayerItem>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardItem {
    pub player_id: String,
    pub gamertag: String,
    pub position: Option<&'static str>,
    pub team_name: String,
    pub score: f64,
}

impl From<&AwardCandidate<'_>> for AwardItem {
    fn from(candidate: &AwardCandidate<'_>) -> Self {
        Self {
            player_id: candidate.player.id.clone(),
            gamertag: candidate.player.gamertag.clone(),
            position: candidate.player.position.map(|p| p.code()),
            team_name: candidate.player.team_display().to_string(),
            score: candidate.score,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardsResponse {
    pub omvp: Vec<AwardItem>,
    pub dmvp: Vec<AwardItem>,
    pub rookie: Vec<AwardItem>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecayResponse {
    pub source: String,
    pub base_rp: f64,
    pub days: f64,
    pub decayed_rp: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InactivityResponse {
    pub rating: f64,
    pub days_inactive: i64,
    pub adjusted_rating: f64,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
