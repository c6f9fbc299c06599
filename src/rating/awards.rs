use serde::Serialize;

use crate::domain::{PlayerRecord, PlayerStats};

pub const AWARD_CANDIDATES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AwardCategory {
    /// Offensive MVP
    Omvp,
    /// Defensive MVP
    Dmvp,
    Rookie,
}

impl AwardCategory {
    pub const ALL: [AwardCategory; 3] = [AwardCategory::Omvp, AwardCategory::Dmvp, AwardCategory::Rookie];

    pub fn title(&self) -> &'static str {
        match self {
            AwardCategory::Omvp => "Offensive MVP",
            AwardCategory::Dmvp => "Defensive MVP",
            AwardCategory::Rookie => "Rookie of the Year",
        }
    }

    pub fn is_eligible(&self, player: &PlayerRecord) -> bool {
        match self {
            AwardCategory::Rookie => player.is_rookie,
            _ => true,
        }
    }

    /// Weighted award score; missing stats count as zero
    pub fn score(&self, player: &PlayerRecord) -> f64 {
        let empty = PlayerStats::default();
        let stats = player.stats.as_ref().unwrap_or(&empty);
        let stat = |v: Option<f64>| v.unwrap_or(0.0);

        match self {
            AwardCategory::Omvp => {
                stat(stats.points_per_game) * 0.4
                    + stat(stats.assists_per_game) * 0.3
                    + stat(stats.field_goal_percentage) * 0.2
                    + stat(stats.three_point_percentage) * 0.1
            }
            AwardCategory::Dmvp => {
                stat(stats.steals_per_game) * 0.4
                    + stat(stats.blocks_per_game) * 0.3
                    + stat(stats.rebounds_per_game) * 0.3
            }
            AwardCategory::Rookie => {
                stat(stats.points_per_game) * 0.3
                    + stat(stats.assists_per_game) * 0.2
                    + stat(stats.steals_per_game) * 0.2
                    + stat(stats.field_goal_percentage) * 0.15
                    + stat(player.performance_score) * 0.15
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AwardCandidate<'a> {
    pub player: &'a PlayerRecord,
    pub score: f64,
}

/// Best `limit` eligible players for a category, highest score first.
/// Equal scores keep their input order.
pub fn award_candidates<'a>(
    players: &'a [PlayerRecord],
    category: AwardCategory,
    limit: usize,
) -> Vec<AwardCandidate<'a>> {
    let mut candidates: Vec<AwardCandidate<'a>> = players
        .iter()
        .filter(|p| category.is_eligible(p))
        .map(|player| AwardCandidate { player, score: category.score(player) })
        .collect();

    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    candidates.truncate(limit);
    candidates
}

#[derive(Debug, Clone, Serialize)]
pub struct AwardRaces<'a> {
    pub omvp: Vec<AwardCandidate<'a>>,
    pub dmvp: Vec<AwardCandidate<'a>>,
    pub rookie: Vec<AwardCandidate<'a>>,
}

pub fn award_races(players: &[PlayerRecord], limit: usize) -> AwardRaces<'_> {
    AwardRaces {
        omvp: award_candidates(players, AwardCategory::Omvp, limit),
        dmvp: award_candidates(players, AwardCategory::Dmvp, limit),
        rookie: award_candidates(players, AwardCategory::Rookie, limit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: &str, ppg: f64, spg: f64, rookie: bool) -> PlayerRecord {
        PlayerRecord {
            id: id.to_string(),
            gamertag: id.to_uppercase(),
            position: None,
            performance_score: Some(80.0),
            player_rp: None,
            player_rank_score: None,
            monthly_value: None,
            team: None,
            stats: Some(PlayerStats {
                points_per_game: Some(ppg),
                steals_per_game: Some(spg),
                ..PlayerStats::default()
            }),
            is_rookie: rookie,
        }
    }

    #[test]
    fn test_offense_and_defense_rank_differently() {
        let players = vec![player("a", 30.0, 0.5, false), player("b", 12.0, 4.0, true)];
        let races = award_races(&players, AWARD_CANDIDATES);

        assert_eq!(races.omvp[0].player.id, "a");
        assert!((races.omvp[0].score - 12.0).abs() < 1e-9);
        assert_eq!(races.dmvp[0].player.id, "b");
        assert_eq!(races.rookie.len(), 1);
        assert!((races.rookie[0].score - (3.6 + 0.8 + 12.0)).abs() < 1e-9);
    }

    #[test]
    fn test_limit_and_stable_ties() {
        let players: Vec<_> = (0..8).map(|i| player(&format!("p{}", i), 10.0, 1.0, false)).collect();
        let top = award_candidates(&players, AwardCategory::Omvp, AWARD_CANDIDATES);
        let ids: Vec<_> = top.iter().map(|c| c.player.id.as_str()).collect();
        assert_eq!(ids, vec!["p0", "p1", "p2", "p3", "p4"]);
    }

    #[test]
    fn test_missing_stats_score_zero() {
        let mut p = player("x", 0.0, 0.0, false);
        p.stats = None;
        assert_eq!(AwardCategory::Dmvp.score(&p), 0.0);
    }
}
