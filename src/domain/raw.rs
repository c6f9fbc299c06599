//! Raw record shapes as they arrive from the data source.
//!
//! Joined relations show up as `null`, a single object, or a collection
//! depending on how the upstream query was written, and numbers sometimes
//! arrive as strings. Everything here is lenient: a malformed field becomes
//! `None` instead of failing the whole record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A joined relation of unknown multiplicity
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Relation<T> {
    Many(Vec<T>),
    One(T),
    Other(Value),
}

impl<T> Relation<T> {
    /// Collapse to at most one element, keeping the first of a collection
    pub fn into_one(self) -> Option<T> {
        match self {
            Relation::Many(items) => items.into_iter().next(),
            Relation::One(item) => Some(item),
            Relation::Other(_) => None,
        }
    }

    pub fn into_many(self) -> Vec<T> {
        match self {
            Relation::Many(items) => items,
            Relation::One(item) => vec![item],
            Relation::Other(_) => Vec::new(),
        }
    }
}

/// Resolve an optional relation to at most one element
pub fn first_of<T>(relation: Option<Relation<T>>) -> Option<T> {
    relation.and_then(Relation::into_one)
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTeamRef {
    #[serde(deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRoster {
    #[serde(deserialize_with = "lenient_string")]
    pub team_id: Option<String>,
    pub teams: Option<Relation<RawTeamRef>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawStats {
    #[serde(deserialize_with = "lenient_f64")]
    pub games_played: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub points_per_game: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub assists_per_game: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub rebounds_per_game: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub steals_per_game: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub blocks_per_game: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub turnovers_per_game: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub minutes_per_game: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub field_goal_percentage: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub three_point_percentage: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub free_throw_percentage: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawPlayer {
    #[serde(deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub gamertag: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub position: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub performance_score: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub player_rp: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub player_rank_score: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub monthly_value: Option<f64>,
    #[serde(deserialize_with = "lenient_bool")]
    pub is_rookie: Option<bool>,
    pub teams: Option<Relation<RawTeamRef>>,
    pub team_rosters: Option<Relation<RawRoster>>,
    pub stats: Option<Relation<RawStats>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRegion {
    #[serde(deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawPlayerRef {
    #[serde(deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub gamertag: Option<String>,
}

/// Captain as either a bare player or a roster row wrapping one
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCaptain {
    #[serde(deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub gamertag: Option<String>,
    pub players: Option<Relation<RawPlayerRef>>,
}

/// Aggregate count, `{ "count": n }` or `{ "team_rosters": n }`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCount {
    #[serde(deserialize_with = "lenient_f64")]
    pub count: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub team_rosters: Option<f64>,
}

impl RawCount {
    pub fn value(&self) -> Option<f64> {
        self.team_rosters.or(self.count)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTeam {
    #[serde(deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub logo_url: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub region_id: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub current_rp: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub elo_rating: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub global_rank: Option<f64>,
    #[serde(deserialize_with = "lenient_string")]
    pub leaderboard_tier: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub member_count: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub wins: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub losses: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub points_differential: Option<f64>,
    pub regions: Option<Relation<RawRegion>>,
    pub region: Option<Relation<RawRegion>>,
    pub captain: Option<Relation<RawCaptain>>,
    #[serde(rename = "_count")]
    pub count: Option<Relation<RawCount>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawEvent {
    #[serde(deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub start_date: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub end_date: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub region_id: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub registered_teams: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub max_teams: Option<f64>,
    #[serde(deserialize_with = "lenient_string")]
    pub tier: Option<String>,
    pub region: Option<Relation<RawRegion>>,
    pub regions: Option<Relation<RawRegion>>,
    #[serde(rename = "_count")]
    pub count: Option<Relation<RawCount>>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn number_from_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}
