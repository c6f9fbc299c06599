use serde::Serialize;

use crate::errors::{RankingError, RankingResult};

/// Display metadata for a tier bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierInfo {
    pub label: &'static str,
    pub name: &'static str,
    pub range: &'static str,
    pub description: &'static str,
}

impl TierInfo {
    pub const fn new(
        label: &'static str,
        name: &'static str,
        range: &'static str,
        description: &'static str,
    ) -> Self {
        Self { label, name, range, description }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Threshold<V> {
    pub lower_bound: f64,
    pub value: V,
}

/// Threshold table mapping a score to a value.
///
/// Thresholds are strictly descending by lower bound; a score takes the value
/// of the first threshold it reaches. Anything below the last threshold, a
/// missing score, or NaN lands in the catch-all, so every input classifies.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierTable<V> {
    thresholds: Vec<Threshold<V>>,
    catch_all: V,
}

impl<V> TierTable<V> {
    pub fn new(thresholds: Vec<(f64, V)>, catch_all: V) -> RankingResult<Self> {
        validate_bounds(thresholds.iter().map(|(bound, _)| *bound))?;

        let thresholds = thresholds
            .into_iter()
            .map(|(lower_bound, value)| Threshold { lower_bound, value })
            .collect();

        Ok(Self { thresholds, catch_all })
    }

    pub fn classify(&self, score: Option<f64>) -> &V {
        let Some(score) = score.filter(|s| !s.is_nan()) else {
            return &self.catch_all;
        };

        self.thresholds
            .iter()
            .find(|t| t.lower_bound <= score)
            .map(|t| &t.value)
            .unwrap_or(&self.catch_all)
    }

    pub fn thresholds(&self) -> &[Threshold<V>] {
        &self.thresholds
    }

    pub fn catch_all(&self) -> &V {
        &self.catch_all
    }

    /// Every value, best tier first, catch-all last
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.thresholds
            .iter()
            .map(|t| &t.value)
            .chain(std::iter::once(&self.catch_all))
    }
}

fn validate_bounds(bounds: impl Iterator<Item = f64>) -> RankingResult<()> {
    let mut previous: Option<f64> = None;

    for bound in bounds {
        if !bound.is_finite() {
            return Err(RankingError::configuration(format!(
                "tier lower bound must be finite, got {}",
                bound
            )));
        }
        if previous.is_some_and(|p| bound >= p) {
            return Err(RankingError::configuration(format!(
                "tier lower bounds must be strictly descending ({} follows {})",
                bound,
                previous.unwrap_or_default()
            )));
        }
        previous = Some(bound);
    }

    Ok(())
}

/// Tier table keyed by 1-based leaderboard position instead of a score.
///
/// Each entry names the worst rank it still covers. Internally a rank `r`
/// becomes the score `-r`, so the same first-match rule applies.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct RankTierTable {
    table: TierTable<TierInfo>,
}

impl RankTierTable {
    pub fn new(entries: Vec<(u32, TierInfo)>, catch_all: TierInfo) -> RankingResult<Self> {
        if entries.iter().any(|(max_rank, _)| *max_rank == 0) {
            return Err(RankingError::configuration("rank tiers must cover ranks starting at 1"));
        }

        let thresholds = entries
            .into_iter()
            .map(|(max_rank, info)| (-(max_rank as f64), info))
            .collect();

        Ok(Self { table: TierTable::new(thresholds, catch_all)? })
    }

    /// Rank 0 and missing ranks are unranked
    pub fn classify_rank(&self, rank: Option<u32>) -> &TierInfo {
        let score = rank.filter(|r| *r > 0).map(|r| -(r as f64));
        self.table.classify(score)
    }

    pub fn tiers(&self) -> impl Iterator<Item = &TierInfo> {
        self.table.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const S: TierInfo = TierInfo::new("S", "Top", "", "");
    const A: TierInfo = TierInfo::new("A", "Good", "", "");
    const D: TierInfo = TierInfo::new("D", "Rest", "", "");

    fn score_table() -> TierTable<TierInfo> {
        TierTable::new(vec![(95.0, S), (85.0, A)], D).unwrap()
    }

    #[test]
    fn test_classify_at_boundaries() {
        let table = score_table();
        assert_eq!(table.classify(Some(95.0)).label, "S");
        assert_eq!(table.classify(Some(94.999)).label, "A");
        assert_eq!(table.classify(Some(85.0)).label, "A");
        assert_eq!(table.classify(Some(84.9)).label, "D");
    }

    #[test]
    fn test_classify_is_total() {
        let table = score_table();
        for score in [f64::NEG_INFINITY, -1e9, -1.0, 0.0, 50.0, 1e12, f64::INFINITY, f64::NAN] {
            let label = table.classify(Some(score)).label;
            assert!(["S", "A", "D"].contains(&label), "no tier for {}", score);
        }
        assert_eq!(table.classify(None).label, "D");
        assert_eq!(table.classify(Some(f64::NAN)).label, "D");
    }

    #[test]
    fn test_rejects_unordered_or_infinite_bounds() {
        assert!(TierTable::new(vec![(85.0, A), (95.0, S)], D).is_err());
        assert!(TierTable::new(vec![(85.0, A), (85.0, S)], D).is_err());
        assert!(TierTable::new(vec![(f64::INFINITY, S)], D).is_err());
        assert!(TierTable::<f64>::new(vec![], 1.0).is_ok());
    }

    #[test]
    fn test_rank_table() {
        let table = RankTierTable::new(vec![(4, S), (12, A)], D).unwrap();
        assert_eq!(table.classify_rank(Some(1)).label, "S");
        assert_eq!(table.classify_rank(Some(4)).label, "S");
        assert_eq!(table.classify_rank(Some(5)).label, "A");
        assert_eq!(table.classify_rank(Some(12)).label, "A");
        assert_eq!(table.classify_rank(Some(13)).label, "D");
        assert_eq!(table.classify_rank(Some(0)).label, "D");
        assert_eq!(table.classify_rank(None).label, "D");

        assert!(RankTierTable::new(vec![(12, A), (4, S)], D).is_err());
        assert!(RankTierTable::new(vec![(0, S)], D).is_err());
    }

    #[test]
    fn test_values_order() {
        let labels: Vec<_> = score_table().values().map(|t| t.label).collect();
        assert_eq!(labels, vec!["S", "A", "D"]);
    }
}
