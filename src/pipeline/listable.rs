use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::sort::SortDirection;
use crate::domain::{Clock, EventRecord, PlayerRecord, TeamRecord};
use crate::errors::{RankingError, RankingResult};

/// Inputs to derived values that are not part of a record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListContext {
    pub now: DateTime<Utc>,
}

impl ListContext {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    pub fn from_clock(clock: &dyn Clock) -> Self {
        Self { now: clock.now() }
    }
}

/// A record field's value as seen by the sort stage
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey<'a> {
    /// Null scores arrive here as 0
    Number(f64),
    /// Missing text sorts last in either direction
    Text(Option<&'a str>),
    /// Missing dates sort last in either direction
    Date(Option<DateTime<Utc>>),
}

/// Closed set of field names for one entity
pub trait FieldName: Copy + fmt::Debug + 'static {
    const ALL: &'static [Self];

    fn name(&self) -> &'static str;
}

pub trait SortField: FieldName {
    fn default_direction(&self) -> SortDirection;
}

/// Resolve a field name, rejecting anything outside the entity's field set
pub fn parse_field<F: FieldName>(entity: &str, name: &str) -> RankingResult<F> {
    let name = name.trim();
    F::ALL
        .iter()
        .copied()
        .find(|f| f.name().eq_ignore_ascii_case(name))
        .ok_or_else(|| RankingError::unknown_field(entity, name))
}

/// A record kind the pipeline can search, filter and sort
pub trait Listable {
    const ENTITY: &'static str;

    type SortField: SortField;
    type FilterField: FieldName;

    /// Text fields matched by free-text search
    fn search_fields(&self) -> Vec<&str>;

    fn category_value(&self, field: Self::FilterField, ctx: &ListContext) -> Option<String>;

    fn sort_key(&self, field: Self::SortField, ctx: &ListContext) -> SortKey<'_>;

    fn parse_sort_field(name: &str) -> RankingResult<Self::SortField> {
        parse_field(Self::ENTITY, name)
    }

    fn parse_filter_field(name: &str) -> RankingResult<Self::FilterField> {
        parse_field(Self::ENTITY, name)
    }
}

macro_rules! field_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl FieldName for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn name(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

field_enum!(PlayerSortField {
    Gamertag => "gamertag",
    Team => "team",
    Position => "position",
    PerformanceScore => "performance_score",
    PlayerRp => "player_rp",
    PlayerRankScore => "player_rank_score",
    MonthlyValue => "monthly_value",
    GamesPlayed => "games_played",
});

field_enum!(PlayerFilterField {
    Position => "position",
    Team => "team",
});

field_enum!(TeamSortField {
    Name => "name",
    GlobalRank => "global_rank",
    EloRating => "elo_rating",
    CurrentRp => "current_rp",
    WinPercentage => "win_percentage",
    PointsDifferential => "points_differential",
    MemberCount => "member_count",
    Region => "region",
});

field_enum!(TeamFilterField {
    Region => "region",
    Tier => "tier",
});

field_enum!(EventSortField {
    Name => "name",
    StartDate => "start_date",
    EndDate => "end_date",
    Status => "status",
    Region => "region",
    RegisteredTeams => "registered_teams",
});

field_enum!(EventFilterField {
    Status => "status",
    Region => "region",
    Tier => "tier",
});

impl SortField for PlayerSortField {
    fn default_direction(&self) -> SortDirection {
        match self {
            PlayerSortField::Gamertag | PlayerSortField::Team | PlayerSortField::Position => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }
}

impl SortField for TeamSortField {
    fn default_direction(&self) -> SortDirection {
        match self {
            TeamSortField::Name | TeamSortField::GlobalRank | TeamSortField::Region => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }
}

impl SortField for EventSortField {
    fn default_direction(&self) -> SortDirection {
        match self {
            EventSortField::RegisteredTeams => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }
}

fn number(value: Option<f64>) -> SortKey<'static> {
    SortKey::Number(value.unwrap_or(0.0))
}

impl Listable for PlayerRecord {
    const ENTITY: &'static str = "player";

    type SortField = PlayerSortField;
    type FilterField = PlayerFilterField;

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.gamertag.as_str()];
        fields.extend(self.team_name());
        fields.extend(self.position.map(|p| p.code()));
        fields
    }

    fn category_value(&self, field: PlayerFilterField, _ctx: &ListContext) -> Option<String> {
        match field {
            PlayerFilterField::Position => self.position.map(|p| p.code().to_string()),
            PlayerFilterField::Team => self.team.as_ref().map(|t| t.id.clone()),
        }
    }

    fn sort_key(&self, field: PlayerSortField, _ctx: &ListContext) -> SortKey<'_> {
        match field {
            PlayerSortField::Gamertag => SortKey::Text(Some(&self.gamertag)),
            PlayerSortField::Team => SortKey::Text(self.team_name()),
            PlayerSortField::Position => SortKey::Text(self.position.map(|p| p.code())),
            PlayerSortField::PerformanceScore => number(self.performance_score),
            PlayerSortField::PlayerRp => number(self.player_rp),
            PlayerSortField::PlayerRankScore => number(self.player_rank_score),
            PlayerSortField::MonthlyValue => number(self.monthly_value),
            PlayerSortField::GamesPlayed => number(self.games_played().map(f64::from)),
        }
    }
}

impl Listable for TeamRecord {
    const ENTITY: &'static str = "team";

    type SortField = TeamSortField;
    type FilterField = TeamFilterField;

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.captain.as_ref().map(|c| c.gamertag.as_str()));
        fields
    }

    fn category_value(&self, field: TeamFilterField, _ctx: &ListContext) -> Option<String> {
        match field {
            TeamFilterField::Region => self.region.as_ref().map(|r| r.id.clone()),
            TeamFilterField::Tier => self.leaderboard_tier.clone(),
        }
    }

    fn sort_key(&self, field: TeamSortField, _ctx: &ListContext) -> SortKey<'_> {
        match field {
            TeamSortField::Name => SortKey::Text(Some(&self.name)),
            TeamSortField::GlobalRank => number(self.global_rank.map(f64::from)),
            TeamSortField::EloRating => number(self.elo_rating),
            TeamSortField::CurrentRp => number(self.current_rp),
            TeamSortField::WinPercentage => number(self.win_percentage()),
            TeamSortField::PointsDifferential => number(self.points_differential),
            TeamSortField::MemberCount => SortKey::Number(f64::from(self.member_count)),
            TeamSortField::Region => SortKey::Text(region_sort_text(self.region.as_ref())),
        }
    }
}

impl Listable for EventRecord {
    const ENTITY: &'static str = "event";

    type SortField = EventSortField;
    type FilterField = EventFilterField;

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.location.as_deref());
        fields.extend(self.description.as_deref());
        fields.extend(self.region_name());
        fields
    }

    fn category_value(&self, field: EventFilterField, ctx: &ListContext) -> Option<String> {
        match field {
            EventFilterField::Status => Some(self.status(ctx.now).as_str().to_string()),
            EventFilterField::Region => self.region.as_ref().map(|r| r.id.clone()),
            EventFilterField::Tier => self.tier.map(|t| t.code().to_string()),
        }
    }

    fn sort_key(&self, field: EventSortField, ctx: &ListContext) -> SortKey<'_> {
        match field {
            EventSortField::Name => SortKey::Text(Some(&self.name)),
            EventSortField::StartDate => SortKey::Date(self.start_date),
            EventSortField::EndDate => SortKey::Date(self.end_date),
            EventSortField::Status => SortKey::Text(Some(self.status(ctx.now).as_str())),
            EventSortField::Region => SortKey::Text(region_sort_text(self.region.as_ref())),
            EventSortField::RegisteredTeams => SortKey::Number(f64::from(self.registered_teams)),
        }
    }
}

/// Regions sort by name, falling back to the id when the name was not joined
fn region_sort_text(region: Option<&crate::domain::Region>) -> Option<&str> {
    region.map(|r| r.name.as_deref().unwrap_or(r.id.as_str()))
}

impl FromStr for PlayerSortField {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlayerRecord::parse_sort_field(s)
    }
}

impl FromStr for TeamSortField {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TeamRecord::parse_sort_field(s)
    }
}

impl FromStr for EventSortField {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventRecord::parse_sort_field(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_parsing() {
        assert_eq!("Player_RP".parse::<PlayerSortField>().unwrap(), PlayerSortField::PlayerRp);
        assert_eq!(TeamRecord::parse_filter_field("tier").unwrap(), TeamFilterField::Tier);

        let err = PlayerRecord::parse_sort_field("shoe_size").unwrap_err();
        assert!(matches!(err, RankingError::InvalidArgument(_)));

        // sortable but not categorical
        assert!(PlayerRecord::parse_filter_field("gamertag").is_err());
    }

    #[test]
    fn test_default_directions() {
        assert_eq!(PlayerSortField::Gamertag.default_direction(), SortDirection::Asc);
        assert_eq!(PlayerSortField::PerformanceScore.default_direction(), SortDirection::Desc);
        assert_eq!(TeamSortField::GlobalRank.default_direction(), SortDirection::Asc);
        assert_eq!(TeamSortField::EloRating.default_direction(), SortDirection::Desc);
        assert_eq!(EventSortField::StartDate.default_direction(), SortDirection::Asc);
        assert_eq!(EventSortField::RegisteredTeams.default_direction(), SortDirection::Desc);
    }
}
