use anyhow::{bail, Context, Result};
use colored::*;
use log::info;
use std::sync::Arc;

use crate::cache::{Snapshot, SnapshotStore};
use crate::cli::ListArgs;
use crate::config::settings::AppConfig;
use crate::config::tables::ReferenceTables;
use crate::domain::derived::or_na;
use crate::domain::{Clock, EventRecord, EventStatus, PlayerRecord, SystemClock, TeamRecord};
use crate::errors::RankingError;
use crate::pipeline::{ListContext, Listable, Page, SortDirection, SortSpec, ViewState};
use crate::rating::decayed_value;

/// Terminal listings over the snapshot directory
pub struct ListingService {
    config: AppConfig,
    tables: ReferenceTables,
    store: SnapshotStore,
    clock: Arc<dyn Clock>,
}

impl ListingService {
    pub fn new(config: AppConfig) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: AppConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let tables = ReferenceTables::build(config.rating.player_tier_scale)
            .context("Reference tables are inconsistent")?;
        let store = SnapshotStore::new(&config.server.data_dir);
        Ok(Self { config, tables, store, clock })
    }

    /// Translate command-line listing options into a view
    pub fn view_from_args<T: Listable>(&self, args: &ListArgs) -> Result<ViewState> {
        let settings = &self.config.pipeline;
        let page_size = args.page_size.unwrap_or(settings.default_page_size);
        if page_size > settings.max_page_size {
            bail!(RankingError::invalid_argument(format!(
                "page size must be at most {}",
                settings.max_page_size
            )));
        }

        let mut view = ViewState::new(page_size)?;
        view.set_search(args.search.clone().unwrap_or_default());

        for filter in &args.filters {
            let Some((field, value)) = filter.split_once('=') else {
                bail!(RankingError::invalid_argument(format!(
                    "filter must look like key=value, got '{}'",
                    filter
                )));
            };
            view.set_filter(field.trim(), value.trim());
        }

        if let Some(field) = &args.sort_by {
            let mut spec = SortSpec::default_for::<T>(field)?;
            if let Some(order) = &args.order {
                spec.direction = order.parse::<SortDirection>()?;
            }
            view.set_sort(Some(spec));
        }

        view.set_page(args.page);
        Ok(view)
    }

    pub fn players(&self, args: &ListArgs) -> Result<()> {
        let snapshot = self.load()?;
        let view = self.view_from_args::<PlayerRecord>(args)?;
        let page = view.apply(&snapshot.players, &self.context())?;
        print!("{}", self.format_players(&page));
        Ok(())
    }

    pub fn teams(&self, args: &ListArgs) -> Result<()> {
        let snapshot = self.load()?;
        let view = self.view_from_args::<TeamRecord>(args)?;
        let page = view.apply(&snapshot.teams, &self.context())?;
        print!("{}", self.format_teams(&page));
        Ok(())
    }

    pub fn events(&self, args: &ListArgs) -> Result<()> {
        let snapshot = self.load()?;
        let ctx = self.context();
        let view = self.view_from_args::<EventRecord>(args)?;
        let page = view.apply(&snapshot.events, &ctx)?;
        print!("{}", format_events(&page, &ctx));
        Ok(())
    }

    pub fn tiers(&self) {
        print!("{}", format_reference(&self.tables));
    }

    pub fn decay(&self, source: &str, base_rp: f64, days: f64) -> Result<()> {
        let value = decayed_value(base_rp, source, days, &self.tables.decay)?;
        println!(
            "{} RP from {} after {} days: {}",
            base_rp,
            source.cyan(),
            days,
            format!("{:.2}", value).green().bold()
        );
        Ok(())
    }

    fn load(&self) -> Result<Snapshot> {
        info!("Reading snapshot from {}", self.store.data_dir().display());
        self.store.load(self.clock.now())
    }

    fn context(&self) -> ListContext {
        ListContext::from_clock(self.clock.as_ref())
    }

    pub fn format_players(&self, page: &Page<&PlayerRecord>) -> String {
        let mut out = header(&format!(
            "{:<4} {:<20} {:<22} {:<4} {:>7} {:>8} {:>5}",
            "#", "Gamertag", "Team", "Pos", "Perf", "RP", "Tier"
        ));

        for (i, player) in page.records.iter().enumerate() {
            let tier = self.tables.player_tiers.classify(player.performance_score);
            let team = format!("{:<22}", player.team_display());
            out.push_str(&format!(
                "{:<4} {} {} {:<4} {:>7} {:>8} {:>5}\n",
                page.rank_of(i),
                format!("{:<20}", player.gamertag).bold(),
                if player.is_free_agent() { team.dimmed() } else { team.normal() },
                player.position.map(|p| p.code()).unwrap_or("-"),
                or_na(player.performance_score, 1),
                or_na(player.player_rp, 0),
                tier.label,
            ));
        }

        out.push_str(&footer(page));
        out
    }

    pub fn format_teams(&self, page: &Page<&TeamRecord>) -> String {
        let mut out = header(&format!(
            "{:<4} {:<24} {:>5} {:>8} {:>8} {:>6} {:<9} {:<16}",
            "#", "Team", "Rank", "RP", "ELO", "Win%", "Tier", "Region"
        ));

        for (i, team) in page.records.iter().enumerate() {
            let tier = self.tables.leaderboard_tiers.classify_rank(team.global_rank);
            out.push_str(&format!(
                "{:<4} {} {:>5} {:>8} {:>8} {:>6} {:<9} {:<16}\n",
                page.rank_of(i),
                format!("{:<24}", team.name).bold(),
                team.global_rank.map(|r| r.to_string()).unwrap_or_else(|| "-".to_string()),
                or_na(team.current_rp, 0),
                or_na(team.elo_rating, 0),
                or_na(team.win_percentage(), 1),
                tier.label,
                team.region_name().unwrap_or("-"),
            ));
        }

        out.push_str(&footer(page));
        out
    }
}

fn format_events(page: &Page<&EventRecord>, ctx: &ListContext) -> String {
    let mut out = header(&format!(
        "{:<4} {:<28} {:<18} {:<10} {:<12} {:<12} {:<8} {:<4}",
        "#", "Event", "Location", "Status", "Start", "End", "Teams", "Tier"
    ));

    for (i, event) in page.records.iter().enumerate() {
        let status = format!("{:<10}", event.status(ctx.now).as_str());
        let status = match event.status(ctx.now) {
            EventStatus::Upcoming => status.cyan(),
            EventStatus::Ongoing => status.green().bold(),
            EventStatus::Completed => status.dimmed(),
        };
        let date = |d: Option<chrono::DateTime<chrono::Utc>>| {
            d.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_else(|| "-".to_string())
        };

        out.push_str(&format!(
            "{:<4} {} {:<18} {} {:<12} {:<12} {:<8} {:<4}\n",
            page.rank_of(i),
            format!("{:<28}", event.name).bold(),
            event.location.as_deref().unwrap_or("-"),
            status,
            date(event.start_date),
            date(event.end_date),
            event.registration_display(),
            event.tier.map(|t| t.code()).unwrap_or("-"),
        ));
    }

    out.push_str(&footer(page));
    out
}

pub fn format_reference(tables: &ReferenceTables) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", "RP Categories".cyan().bold()));
    for category in &tables.rp_categories {
        out.push_str(&format!("  {:<20} {}\n", category.title.bold(), category.description));
        out.push_str(&format!("  {:<20} {}\n", "", category.details.dimmed()));
    }

    out.push_str(&format!("\n{}\n", "Event Tiers".cyan().bold()));
    for tier in &tables.event_tiers {
        out.push_str(&format!("  {:<4} {:<56} {}\n", tier.tier.code(), tier.description, tier.max_rp_display));
    }

    out.push_str(&format!("\n{}\n", "Leaderboard Tiers".cyan().bold()));
    for tier in tables.leaderboard_tiers.tiers() {
        out.push_str(&format!("  {:<10} {:<14} {}\n", tier.label, tier.range, tier.description));
    }

    out.push_str(&format!(
        "\n{}\n",
        format!("Player Tiers ({})", tables.player_tier_scale).cyan().bold()
    ));
    for tier in tables.player_tiers.values() {
        out.push_str(&format!("  {:<3} {:<14} {}\n", tier.label, tier.name, tier.range));
    }

    out.push_str(&format!("\n{}\n", "RP Decay".cyan().bold()));
    for rule in tables.decay.rules() {
        out.push_str(&format!(
            "  {:<26} starts {:>3} days, full {:>3} days\n",
            rule.source.label(),
            rule.decay_start_days,
            rule.full_decay_days
        ));
    }

    out.push_str(&format!("\n{}\n", "Salary Multipliers".cyan().bold()));
    for threshold in tables.salary_multipliers.thresholds() {
        out.push_str(&format!("  rating {:>3}+  x{:.1}\n", threshold.lower_bound, threshold.value));
    }
    out.push_str(&format!("  otherwise    x{:.1}\n", tables.salary_multipliers.catch_all()));

    out
}

fn header(columns: &str) -> String {
    format!("{}\n", columns.bold().underline())
}

fn footer<T>(page: &Page<T>) -> String {
    if page.total_count == 0 {
        return format!("{}\n", "No records match".yellow());
    }
    format!(
        "{}\n",
        format!(
            "Page {} of {} ({} records)",
            page.page_index + 1,
            page.total_pages,
            page.total_count
        )
        .dimmed()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ListArgs;
    use crate::pipeline::paginate;

    fn service() -> ListingService {
        let config = AppConfig::new().with_data_dir(std::env::temp_dir().join("proam_listing_unused"));
        ListingService::new(config).unwrap()
    }

    fn player(id: &str, score: Option<f64>) -> PlayerRecord {
        PlayerRecord {
            id: id.into(),
            gamertag: format!("Player{}", id),
            position: None,
            performance_score: score,
            player_rp: None,
            player_rank_score: None,
            monthly_value: None,
            team: None,
            stats: None,
            is_rookie: false,
        }
    }

    #[test]
    fn test_view_from_args() {
        let args = ListArgs {
            search: Some("dimes".into()),
            filters: vec!["position=PG".into()],
            sort_by: Some("performance_score".into()),
            order: Some("asc".into()),
            page: 3,
            page_size: Some(5),
        };
        let view = service().view_from_args::<PlayerRecord>(&args).unwrap();
        assert_eq!(view.search_text(), "dimes");
        assert_eq!(view.sort(), Some(&SortSpec::new("performance_score", SortDirection::Asc)));
        assert_eq!(view.page_index(), 3);
        assert_eq!(view.page_size(), 5);
        assert_eq!(view.criteria().category_filters.get("position").map(String::as_str), Some("PG"));
    }

    #[test]
    fn test_view_from_args_rejects_bad_input() {
        let svc = service();
        let bad_filter = ListArgs { filters: vec!["positionPG".into()], ..ListArgs::default() };
        assert!(svc.view_from_args::<PlayerRecord>(&bad_filter).is_err());

        let too_big = ListArgs { page_size: Some(1000), ..ListArgs::default() };
        assert!(svc.view_from_args::<PlayerRecord>(&too_big).is_err());

        let bad_sort = ListArgs { sort_by: Some("height".into()), ..ListArgs::default() };
        assert!(svc.view_from_args::<PlayerRecord>(&bad_sort).is_err());
    }

    #[test]
    fn test_format_players_shows_na_and_free_agents() {
        let svc = service();
        let players = vec![player("1", Some(96.0)), player("2", None)];
        let page = paginate(players.iter().collect(), 0, 10).unwrap();
        let out = svc.format_players(&page);

        assert!(out.contains("Player1"));
        assert!(out.contains("N/A"));
        assert!(out.contains("Free Agent"));
        assert!(out.contains("Page 1 of 1 (2 records)"));
    }

    #[test]
    fn test_format_reference_lists_every_table() {
        let out = format_reference(&ReferenceTables::standard().unwrap());
        for needle in ["Event RP", "T1", "S-Tier", "Unranked", "Verified League RP", "x1.3"] {
            assert!(out.contains(needle), "missing {}", needle);
        }
    }
}
