use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{RankingError, RankingResult};

/// Where a block of RP was earned; each source decays on its own schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RpSource {
    Event,
    FranchiseWeekly,
    FranchisePlacement,
    UpaCollege,
    VerifiedLeague,
}

impl RpSource {
    pub const ALL: [RpSource; 5] = [
        RpSource::Event,
        RpSource::FranchiseWeekly,
        RpSource::FranchisePlacement,
        RpSource::UpaCollege,
        RpSource::VerifiedLeague,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            RpSource::Event => "event",
            RpSource::FranchiseWeekly => "franchise_weekly",
            RpSource::FranchisePlacement => "franchise_placement",
            RpSource::UpaCollege => "upa_college",
            RpSource::VerifiedLeague => "verified_league",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RpSource::Event => "Event RP (LAN, Opens)",
            RpSource::FranchiseWeekly => "Franchise Weekly RP",
            RpSource::FranchisePlacement => "Franchise Placement RP",
            RpSource::UpaCollege => "UPA College RP",
            RpSource::VerifiedLeague => "Verified League RP",
        }
    }
}

impl FromStr for RpSource {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        RpSource::ALL
            .into_iter()
            .find(|source| source.key() == key || source.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RankingError::configuration(format!("unrecognized RP source: '{}'", s)))
    }
}

impl fmt::Display for RpSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecayRule {
    pub source: RpSource,
    pub decay_start_days: u32,
    pub full_decay_days: u32,
}

impl DecayRule {
    /// Untouched until decay starts, zero from full decay on, linear in between
    pub fn apply(&self, base_rp: f64, days_elapsed: f64) -> f64 {
        let start = self.decay_start_days as f64;
        let full = self.full_decay_days as f64;

        if days_elapsed <= start {
            base_rp
        } else if days_elapsed >= full {
            0.0
        } else {
            base_rp * (full - days_elapsed) / (full - start)
        }
    }
}

/// Decay schedule per RP source, validated once at construction
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct DecayTable {
    rules: Vec<DecayRule>,
}

impl DecayTable {
    pub fn new(rules: Vec<DecayRule>) -> RankingResult<Self> {
        let mut seen = HashSet::new();

        for rule in &rules {
            if rule.full_decay_days <= rule.decay_start_days {
                return Err(RankingError::configuration(format!(
                    "decay rule for {} must reach full decay after it starts ({} <= {})",
                    rule.source, rule.full_decay_days, rule.decay_start_days
                )));
            }
            if !seen.insert(rule.source) {
                return Err(RankingError::configuration(format!(
                    "duplicate decay rule for {}",
                    rule.source
                )));
            }
        }

        Ok(Self { rules })
    }

    pub fn rule_for(&self, source: RpSource) -> RankingResult<&DecayRule> {
        self.rules
            .iter()
            .find(|r| r.source == source)
            .ok_or_else(|| RankingError::configuration(format!("no decay rule for RP source {}", source)))
    }

    pub fn rules(&self) -> &[DecayRule] {
        &self.rules
    }
}

/// RP after decay for a source given by name, as stored alongside the points.
///
/// An unknown source means the table and the data model drifted apart, so it
/// is an error rather than "no decay".
pub fn decayed_value(base_rp: f64, source: &str, days_elapsed: f64, table: &DecayTable) -> RankingResult<f64> {
    if !days_elapsed.is_finite() {
        return Err(RankingError::invalid_argument(format!(
            "days elapsed must be finite, got {}",
            days_elapsed
        )));
    }

    let source: RpSource = source.parse()?;
    let rule = table.rule_for(source)?;
    Ok(rule.apply(base_rp, days_elapsed))
}

/// Whole days between earning and now, never negative
pub fn days_elapsed(earned_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let duration = now.signed_duration_since(earned_at);
    duration.num_days().max(0)
}

/// A block of RP as recorded upstream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpEntry {
    pub source: String,
    pub amount: f64,
    pub earned_at: DateTime<Utc>,
}

/// Sum of all entries after decay
pub fn current_rp(entries: &[RpEntry], now: DateTime<Utc>, table: &DecayTable) -> RankingResult<f64> {
    entries.iter().try_fold(0.0, |total, entry| {
        let days = days_elapsed(entry.earned_at, now) as f64;
        Ok(total + decayed_value(entry.amount, &entry.source, days, table)?)
    })
}

/// Player rating after inactivity decay: `rate` lost per full `period_days` inactive
pub fn inactivity_adjusted_rating(rating: f64, days_inactive: i64, rate: f64, period_days: u32) -> f64 {
    if period_days == 0 || days_inactive <= 0 {
        return rating;
    }

    let periods = (days_inactive / i64::from(period_days)).min(i64::from(i32::MAX)) as i32;
    rating * (1.0 - rate).powi(periods)
}
