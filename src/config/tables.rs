//! Static reference tables published with the ranking formula.
//!
//! Every table is checked when built, so a bad edit here surfaces as a
//! `Configuration` error on startup instead of a silent misclassification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::EventTier;
use crate::errors::{RankingError, RankingResult};
use crate::rating::decay::{DecayRule, DecayTable, RpSource};
use crate::rating::salary;
use crate::rating::tiers::{RankTierTable, TierInfo, TierTable};

#[derive(Debug, Clone, Serialize)]
pub struct RpCategory {
    pub title: &'static str,
    pub description: &'static str,
    pub details: &'static str,
}

impl RpCategory {
    pub fn new(title: &'static str, description: &'static str, details: &'static str) -> Self {
        Self { title, description, details }
    }
}

pub fn rp_categories() -> Vec<RpCategory> {
    vec![
        RpCategory::new(
            "Event RP",
            "Earned through placements in LANs, tournaments, and qualifiers.",
            "Max: 1000 RP per event",
        ),
        RpCategory::new(
            "Franchise RP",
            "Accumulated through weekly matches and season achievements.",
            "Includes wins, top 10 victories, and clean sweeps",
        ),
        RpCategory::new(
            "Bonus RP",
            "Awarded for special achievements and performances.",
            "Includes MVPs, undefeated runs, and clutch plays",
        ),
        RpCategory::new(
            "Verified League RP",
            "Points from UPA College and other verified leagues.",
            "Subject to seasonal caps",
        ),
    ]
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTierInfo {
    pub tier: EventTier,
    pub description: &'static str,
    pub max_rp: u32,
    pub max_rp_display: &'static str,
}

impl EventTierInfo {
    pub fn new(tier: EventTier, description: &'static str, max_rp: u32, max_rp_display: &'static str) -> Self {
        Self { tier, description, max_rp, max_rp_display }
    }
}

pub fn event_tiers() -> Vec<EventTierInfo> {
    vec![
        EventTierInfo::new(EventTier::T1, "Major LANs (Worlds, UPA Live Events)", 1000, "1000 RP"),
        EventTierInfo::new(EventTier::T2, "Monthly Franchise Events, UPA College Finals", 600, "600 RP"),
        EventTierInfo::new(EventTier::T3, "Franchise Qualifiers, Redraft, UPA College Regular", 300, "300 RP"),
        EventTierInfo::new(EventTier::T4, "Invitationals, Showmatches, Non-UPA Verified Leagues", 150, "100-150 RP"),
        EventTierInfo::new(EventTier::T5, "Local/Community Events, Unverified", 50, "50 RP"),
    ]
}

/// Lookup by tier code
pub fn event_tier_info(tier: EventTier) -> RankingResult<EventTierInfo> {
    event_tiers()
        .into_iter()
        .find(|info| info.tier == tier)
        .ok_or_else(|| RankingError::configuration(format!("no reference entry for event tier {}", tier.code())))
}

pub fn leaderboard_tiers() -> RankingResult<RankTierTable> {
    RankTierTable::new(
        vec![
            (4, TierInfo::new("S-Tier", "Elite Competitors", "Top 4 Teams", "Elite Competitors")),
            (12, TierInfo::new("A-Tier", "Championship Contenders", "Rank 5-12", "Championship Contenders")),
            (30, TierInfo::new("B-Tier", "Playoff Hopefuls", "Rank 13-30", "Playoff Hopefuls")),
            (100, TierInfo::new("C-Tier", "Developing Teams", "Rank 31-100", "Developing Teams")),
        ],
        TierInfo::new("Unranked", "New/Inactive", "100+", "New/Inactive"),
    )
}

/// Which player tier thresholds to publish
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerTierScale {
    /// S 95+, A 85-94, B 75-84, C 65-74, D below 65
    #[default]
    Standard,
    /// S 100+, A 90-99, B 80-89, C 70-79, D below 70
    HallOfFame,
}

impl PlayerTierScale {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerTierScale::Standard => "standard",
            PlayerTierScale::HallOfFame => "hall_of_fame",
        }
    }
}

impl FromStr for PlayerTierScale {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "standard" => Ok(PlayerTierScale::Standard),
            "hall_of_fame" | "hof" => Ok(PlayerTierScale::HallOfFame),
            other => Err(RankingError::invalid_argument(format!("unknown player tier scale: '{}'", other))),
        }
    }
}

impl fmt::Display for PlayerTierScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn player_tiers(scale: PlayerTierScale) -> RankingResult<TierTable<TierInfo>> {
    match scale {
        PlayerTierScale::Standard => TierTable::new(
            vec![
                (95.0, TierInfo::new("S", "Elite", "95+", "League-defining talent")),
                (85.0, TierInfo::new("A", "All-Star", "85-94", "Consistent impact player")),
                (75.0, TierInfo::new("B", "Starter", "75-84", "Reliable starter")),
                (65.0, TierInfo::new("C", "Role Player", "65-74", "Rotation contributor")),
            ],
            TierInfo::new("D", "Development", "<65", "Still developing"),
        ),
        PlayerTierScale::HallOfFame => TierTable::new(
            vec![
                (100.0, TierInfo::new("S", "Hall of Fame", "100+", "All-time great")),
                (90.0, TierInfo::new("A", "Elite", "90-99", "Top of the league")),
                (80.0, TierInfo::new("B", "Pro", "80-89", "Proven competitor")),
                (70.0, TierInfo::new("C", "Rising Star", "70-79", "On the way up")),
            ],
            TierInfo::new("D", "Unranked", "<70", "Not yet rated"),
        ),
    }
}

pub fn salary_multipliers() -> RankingResult<TierTable<f64>> {
    TierTable::new(vec![(90.0, 1.3), (80.0, 1.2), (70.0, 1.1)], 1.0)
}

#[derive(Debug, Clone, Serialize)]
pub struct SalaryBonus {
    pub award: &'static str,
    pub bonus: f64,
}

pub fn salary_award_bonuses() -> Vec<SalaryBonus> {
    vec![
        SalaryBonus { award: "All-Star", bonus: salary::ALL_STAR_BONUS },
        SalaryBonus { award: "MVP", bonus: salary::MVP_BONUS },
        SalaryBonus { award: "DPOY", bonus: salary::MVP_BONUS },
        SalaryBonus { award: "All-Defensive", bonus: salary::ALL_DEFENSIVE_BONUS },
        SalaryBonus { award: "Team success (max)", bonus: salary::TEAM_SUCCESS_LIMIT },
    ]
}

pub fn decay_table() -> RankingResult<DecayTable> {
    DecayTable::new(vec![
        DecayRule { source: RpSource::Event, decay_start_days: 30, full_decay_days: 90 },
        DecayRule { source: RpSource::FranchiseWeekly, decay_start_days: 60, full_decay_days: 120 },
        DecayRule { source: RpSource::FranchisePlacement, decay_start_days: 90, full_decay_days: 150 },
        DecayRule { source: RpSource::UpaCollege, decay_start_days: 60, full_decay_days: 120 },
        DecayRule { source: RpSource::VerifiedLeague, decay_start_days: 30, full_decay_days: 60 },
    ])
}

/// All reference tables, built and validated together
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceTables {
    pub rp_categories: Vec<RpCategory>,
    pub event_tiers: Vec<EventTierInfo>,
    pub leaderboard_tiers: RankTierTable,
    pub player_tier_scale: PlayerTierScale,
    pub player_tiers: TierTable<TierInfo>,
    pub salary_multipliers: TierTable<f64>,
    pub salary_award_bonuses: Vec<SalaryBonus>,
    pub decay: DecayTable,
}

impl ReferenceTables {
    pub fn build(scale: PlayerTierScale) -> RankingResult<Self> {
        Ok(Self {
            rp_categories: rp_categories(),
            event_tiers: event_tiers(),
            leaderboard_tiers: leaderboard_tiers()?,
            player_tier_scale: scale,
            player_tiers: player_tiers(scale)?,
            salary_multipliers: salary_multipliers()?,
            salary_award_bonuses: salary_award_bonuses(),
            decay: decay_table()?,
        })
    }

    pub fn standard() -> RankingResult<Self> {
        Self::build(PlayerTierScale::Standard)
    }
}
