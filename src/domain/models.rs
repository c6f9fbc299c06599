use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::derived;
use crate::errors::RankingError;

/// Court position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    PG,
    SG,
    SF,
    PF,
    C,
}

impl Position {
    pub const ALL: [Position; 5] = [Position::PG, Position::SG, Position::SF, Position::PF, Position::C];

    pub fn code(&self) -> &'static str {
        match self {
            Position::PG => "PG",
            Position::SG => "SG",
            Position::SF => "SF",
            Position::PF => "PF",
            Position::C => "C",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Position::PG => "Point Guard",
            Position::SG => "Shooting Guard",
            Position::SF => "Small Forward",
            Position::PF => "Power Forward",
            Position::C => "Center",
        }
    }
}

impl FromStr for Position {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Position::ALL
            .into_iter()
            .find(|p| p.code().eq_ignore_ascii_case(trimmed) || p.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| RankingError::invalid_argument(format!("unknown position: '{}'", s)))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Event tier code, T1 (major LANs) down to T5 (community events)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventTier {
    T1,
    T2,
    T3,
    T4,
    T5,
}

impl EventTier {
    pub const ALL: [EventTier; 5] = [EventTier::T1, EventTier::T2, EventTier::T3, EventTier::T4, EventTier::T5];

    pub fn code(&self) -> &'static str {
        match self {
            EventTier::T1 => "T1",
            EventTier::T2 => "T2",
            EventTier::T3 => "T3",
            EventTier::T4 => "T4",
            EventTier::T5 => "T5",
        }
    }
}

impl FromStr for EventTier {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        EventTier::ALL
            .into_iter()
            .find(|t| t.code().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| RankingError::invalid_argument(format!("unknown event tier: '{}'", s)))
    }
}

/// Event lifecycle status, always derived from dates and never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Upcoming,
    Ongoing,
    Completed,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "upcoming",
            EventStatus::Ongoing => "ongoing",
            EventStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: String,
    pub name: String,
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Captain {
    pub player_id: String,
    pub gamertag: String,
}

/// Per-game box score averages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub games_played: Option<u32>,
    pub points_per_game: Option<f64>,
    pub assists_per_game: Option<f64>,
    pub rebounds_per_game: Option<f64>,
    pub steals_per_game: Option<f64>,
    pub blocks_per_game: Option<f64>,
    pub turnovers_per_game: Option<f64>,
    pub minutes_per_game: Option<f64>,
    pub field_goal_percentage: Option<f64>,
    pub three_point_percentage: Option<f64>,
    pub free_throw_percentage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: String,
    pub gamertag: String,
    pub position: Option<Position>,
    pub performance_score: Option<f64>,
    pub player_rp: Option<f64>,
    pub player_rank_score: Option<f64>,
    pub monthly_value: Option<f64>,
    pub team: Option<TeamRef>,
    pub stats: Option<PlayerStats>,
    pub is_rookie: bool,
}

impl PlayerRecord {
    pub fn is_free_agent(&self) -> bool {
        self.team.is_none()
    }

    pub fn team_name(&self) -> Option<&str> {
        self.team.as_ref().map(|t| t.name.as_str())
    }

    pub fn team_display(&self) -> &str {
        self.team_name().unwrap_or("Free Agent")
    }

    pub fn games_played(&self) -> Option<u32> {
        self.stats.as_ref().and_then(|s| s.games_played)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub id: String,
    pub name: String,
    pub logo_url: Option<String>,
    pub current_rp: Option<f64>,
    pub elo_rating: Option<f64>,
    pub global_rank: Option<u32>,
    pub leaderboard_tier: Option<String>,
    pub region: Option<Region>,
    pub captain: Option<Captain>,
    pub member_count: u32,
    pub wins: Option<u32>,
    pub losses: Option<u32>,
    pub points_differential: Option<f64>,
}

impl TeamRecord {
    pub fn win_percentage(&self) -> Option<f64> {
        derived::win_percentage(self.wins, self.losses)
    }

    pub fn region_name(&self) -> Option<&str> {
        self.region.as_ref().and_then(|r| r.name.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Venue or city, free text
    pub location: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub region: Option<Region>,
    pub registered_teams: u32,
    pub max_teams: Option<u32>,
    pub tier: Option<EventTier>,
}

impl EventRecord {
    pub fn status(&self, now: DateTime<Utc>) -> EventStatus {
        derived::event_status(self.start_date, self.end_date, now)
    }

    pub fn region_name(&self) -> Option<&str> {
        self.region.as_ref().and_then(|r| r.name.as_deref())
    }

    pub fn registration_display(&self) -> String {
        derived::registration_display(self.registered_teams, self.max_teams)
    }
}
