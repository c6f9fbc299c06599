use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::listable::{FieldName, ListContext, Listable, SortField, SortKey};
use crate::errors::{RankingError, RankingResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn reversed(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            other => Err(RankingError::invalid_argument(format!("unknown sort order: '{}'", other))),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field name plus direction, kept as plain data so view state can be serialized
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self { field: field.into(), direction }
    }

    /// Sort on `field` in its natural direction
    pub fn default_for<T: Listable>(field: &str) -> RankingResult<Self> {
        let parsed = T::parse_sort_field(field)?;
        Ok(Self::new(parsed.name(), parsed.default_direction()))
    }

    /// Clicking the current field flips direction; a new field starts at its default
    pub fn toggle<T: Listable>(current: Option<&SortSpec>, field: &str) -> RankingResult<Self> {
        let parsed = T::parse_sort_field(field)?;

        match current {
            Some(spec) if spec.field.eq_ignore_ascii_case(parsed.name()) => {
                Ok(Self::new(parsed.name(), spec.direction.reversed()))
            }
            _ => Ok(Self::new(parsed.name(), parsed.default_direction())),
        }
    }
}

/// Normalised key: text lowercased once up front
enum Key {
    Number(f64),
    Text(Option<String>),
    Date(Option<chrono::DateTime<chrono::Utc>>),
}

impl From<SortKey<'_>> for Key {
    fn from(key: SortKey<'_>) -> Self {
        match key {
            SortKey::Number(n) => Key::Number(n),
            SortKey::Text(t) => Key::Text(t.map(str::to_lowercase)),
            SortKey::Date(d) => Key::Date(d),
        }
    }
}

fn compare_present<T: Ord>(a: &Option<T>, b: &Option<T>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => apply_direction(a.cmp(b), direction),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn apply_direction(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

fn compare_keys(a: &Key, b: &Key, direction: SortDirection) -> Ordering {
    match (a, b) {
        (Key::Number(a), Key::Number(b)) => apply_direction(a.total_cmp(b), direction),
        (Key::Text(a), Key::Text(b)) => compare_present(a, b, direction),
        (Key::Date(a), Key::Date(b)) => compare_present(a, b, direction),
        // one field always yields one key kind
        _ => Ordering::Equal,
    }
}

/// Stable sort of borrowed records by a named field.
///
/// Records comparing equal keep their input order in both directions.
pub fn sort<'a, T: Listable>(
    records: Vec<&'a T>,
    field: &str,
    direction: SortDirection,
    ctx: &ListContext,
) -> RankingResult<Vec<&'a T>> {
    let field = T::parse_sort_field(field)?;

    let mut keyed: Vec<(Key, &'a T)> = records
        .into_iter()
        .map(|record| (Key::from(record.sort_key(field, ctx)), record))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| compare_keys(a, b, direction));

    Ok(keyed.into_iter().map(|(_, record)| record).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PlayerRecord, TeamRef};
    use chrono::Utc;

    fn player(id: &str, gamertag: &str, score: Option<f64>, team: Option<&str>) -> PlayerRecord {
        PlayerRecord {
            id: id.to_string(),
            gamertag: gamertag.to_string(),
            position: None,
            performance_score: score,
            player_rp: None,
            player_rank_score: None,
            monthly_value: None,
            team: team.map(|name| TeamRef { id: name.to_lowercase(), name: name.to_string(), logo_url: None }),
            stats: None,
            is_rookie: false,
        }
    }

    fn ids(records: &[&PlayerRecord]) -> Vec<String> {
        records.iter().map(|p| p.id.clone()).collect()
    }

    fn ctx() -> ListContext {
        ListContext::at(Utc::now())
    }

    #[test]
    fn test_numeric_sort_treats_null_as_zero() {
        let players = vec![
            player("a", "A", Some(10.0), None),
            player("b", "B", None, None),
            player("c", "C", Some(-5.0), None),
        ];
        let refs: Vec<_> = players.iter().collect();

        let asc = sort(refs.clone(), "performance_score", SortDirection::Asc, &ctx()).unwrap();
        assert_eq!(ids(&asc), vec!["c", "b", "a"]);

        let desc = sort(refs, "performance_score", SortDirection::Desc, &ctx()).unwrap();
        assert_eq!(ids(&desc), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_text_sort_is_case_insensitive() {
        let players = vec![
            player("1", "zeta", None, None),
            player("2", "Alpha", None, None),
            player("3", "beta", None, None),
        ];
        let refs: Vec<_> = players.iter().collect();
        let sorted = sort(refs, "gamertag", SortDirection::Asc, &ctx()).unwrap();
        assert_eq!(ids(&sorted), vec!["2", "3", "1"]);
    }

    #[test]
    fn test_missing_relation_sorts_last_both_ways() {
        let players = vec![
            player("fa", "Free", None, None),
            player("x", "X", None, Some("Wolves")),
            player("y", "Y", None, Some("bears")),
        ];
        let refs: Vec<_> = players.iter().collect();

        let asc = sort(refs.clone(), "team", SortDirection::Asc, &ctx()).unwrap();
        assert_eq!(ids(&asc), vec!["y", "x", "fa"]);

        let desc = sort(refs, "team", SortDirection::Desc, &ctx()).unwrap();
        assert_eq!(ids(&desc), vec!["x", "y", "fa"]);
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let players = vec![
            player("1", "A", Some(88.0), None),
            player("2", "B", Some(90.0), None),
            player("3", "C", Some(88.0), None),
        ];
        let refs: Vec<_> = players.iter().collect();

        let desc = sort(refs.clone(), "performance_score", SortDirection::Desc, &ctx()).unwrap();
        assert_eq!(ids(&desc), vec!["2", "1", "3"]);

        let asc = sort(refs, "performance_score", SortDirection::Asc, &ctx()).unwrap();
        assert_eq!(ids(&asc), vec!["1", "3", "2"]);
    }

    #[test]
    fn test_ascending_reversed_equals_descending_without_ties() {
        let players = vec![
            player("1", "Mamba", Some(91.5), Some("Lakers")),
            player("2", "Chef", Some(77.0), Some("Warriors")),
            player("3", "Greek", Some(-3.0), None),
            player("4", "Joker", None, Some("Nuggets")),
            player("5", "Dame", Some(84.25), Some("Blazers")),
        ];
        let refs: Vec<_> = players.iter().collect();

        for field in ["performance_score", "gamertag"] {
            let mut asc = sort(refs.clone(), field, SortDirection::Asc, &ctx()).unwrap();
            asc.reverse();
            let desc = sort(refs.clone(), field, SortDirection::Desc, &ctx()).unwrap();
            assert_eq!(ids(&asc), ids(&desc), "field {}", field);
        }
    }

    #[test]
    fn test_unknown_field() {
        let players = vec![player("1", "A", None, None)];
        let err = sort(players.iter().collect(), "height", SortDirection::Asc, &ctx()).unwrap_err();
        assert!(matches!(err, RankingError::InvalidArgument(_)));
    }

    #[test]
    fn test_toggle() {
        let first = SortSpec::toggle::<PlayerRecord>(None, "player_rp").unwrap();
        assert_eq!(first, SortSpec::new("player_rp", SortDirection::Desc));

        let flipped = SortSpec::toggle::<PlayerRecord>(Some(&first), "player_rp").unwrap();
        assert_eq!(flipped.direction, SortDirection::Asc);

        let other = SortSpec::toggle::<PlayerRecord>(Some(&flipped), "gamertag").unwrap();
        assert_eq!(other, SortSpec::new("gamertag", SortDirection::Asc));

        assert!(SortSpec::toggle::<PlayerRecord>(None, "nope").is_err());
    }
}
