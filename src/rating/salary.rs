use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::tiers::TierTable;
use crate::domain::PlayerStats;
use crate::errors::RankingError;

pub const POINTS_WEIGHT: f64 = 2.5;
pub const ASSISTS_WEIGHT: f64 = 1.8;
pub const STEALS_WEIGHT: f64 = 3.0;
pub const TURNOVERS_PENALTY: f64 = 2.0;

pub const ALL_STAR_BONUS: f64 = 0.10;
pub const MVP_BONUS: f64 = 0.15;
pub const ALL_DEFENSIVE_BONUS: f64 = 0.05;
pub const TEAM_SUCCESS_LIMIT: f64 = 0.05;
pub const MIN_SALARY: f64 = 0.5;
pub const MAX_SALARY: f64 = 40.0;

/// How the box-score salary is scaled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryModel {
    /// Multiplier looked up from the player's rating bracket
    #[default]
    BracketMultiplier,
    /// Bonuses for awards and team success, clamped to the league salary range
    AwardBonuses,
}

impl SalaryModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SalaryModel::BracketMultiplier => "bracket_multiplier",
            SalaryModel::AwardBonuses => "award_bonuses",
        }
    }
}

impl FromStr for SalaryModel {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "bracket_multiplier" | "bracket" => Ok(SalaryModel::BracketMultiplier),
            "award_bonuses" | "awards" => Ok(SalaryModel::AwardBonuses),
            other => Err(RankingError::invalid_argument(format!("unknown salary model: '{}'", other))),
        }
    }
}

impl fmt::Display for SalaryModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Season honours feeding the award bonus model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwardModifiers {
    pub all_star: u32,
    pub mvp: u32,
    pub dpoy: u32,
    pub all_defensive: u32,
    /// Fractional bonus or penalty for team results
    pub team_success: f64,
}

impl AwardModifiers {
    pub fn multiplier(&self) -> f64 {
        let team_success = if self.team_success.is_finite() {
            self.team_success.clamp(-TEAM_SUCCESS_LIMIT, TEAM_SUCCESS_LIMIT)
        } else {
            0.0
        };

        1.0 + ALL_STAR_BONUS * self.all_star as f64
            + MVP_BONUS * (self.mvp + self.dpoy) as f64
            + ALL_DEFENSIVE_BONUS * self.all_defensive as f64
            + team_success
    }
}

/// Box-score value before any modifier, never negative
pub fn raw_salary(stats: &PlayerStats) -> f64 {
    let value = stats.points_per_game.unwrap_or(0.0) * POINTS_WEIGHT
        + stats.assists_per_game.unwrap_or(0.0) * ASSISTS_WEIGHT
        + stats.steals_per_game.unwrap_or(0.0) * STEALS_WEIGHT
        - stats.turnovers_per_game.unwrap_or(0.0) * TURNOVERS_PENALTY;

    value.max(0.0)
}

pub fn bracket_salary(stats: &PlayerStats, rating: Option<f64>, multipliers: &TierTable<f64>) -> f64 {
    raw_salary(stats) * multipliers.classify(rating)
}

pub fn award_salary(stats: &PlayerStats, awards: &AwardModifiers) -> f64 {
    (raw_salary(stats) * awards.multiplier()).clamp(MIN_SALARY, MAX_SALARY)
}

pub fn salary(
    model: SalaryModel,
    stats: &PlayerStats,
    rating: Option<f64>,
    multipliers: &TierTable<f64>,
    awards: &AwardModifiers,
) -> f64 {
    match model {
        SalaryModel::BracketMultiplier => bracket_salary(stats, rating, multipliers),
        SalaryModel::AwardBonuses => award_salary(stats, awards),
    }
}
