use crate::domain::{PlayerRecord, TeamRecord};

/// Ranked teams by ascending global rank, at most `limit`
pub fn top_teams(teams: &[TeamRecord], limit: usize) -> Vec<&TeamRecord> {
    let mut ranked: Vec<&TeamRecord> = teams
        .iter()
        .filter(|t| t.global_rank.is_some_and(|rank| rank > 0))
        .collect();

    ranked.sort_by_key(|t| t.global_rank);
    ranked.truncate(limit);
    ranked
}

/// Players with RP by descending RP, at most `limit`; ties keep input order
pub fn top_players(players: &[PlayerRecord], limit: usize) -> Vec<&PlayerRecord> {
    let mut ranked: Vec<(f64, &PlayerRecord)> = players
        .iter()
        .filter_map(|p| p.player_rp.map(|rp| (rp, p)))
        .collect();

    ranked.sort_by(|(a, _), (b, _)| b.total_cmp(a));
    ranked.into_iter().take(limit).map(|(_, p)| p).collect()
}
