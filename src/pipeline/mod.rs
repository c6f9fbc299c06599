//! Filter, sort and paginate over borrowed records.
//!
//! Every stage is a pure function of its inputs; view state lives in
//! [`ViewState`] and is passed in on each run.

pub mod filter;
pub mod leaderboard;
pub mod listable;
pub mod paginate;
pub mod sort;
pub mod view_state;

use log::debug;

pub use filter::{filter, FilterCriteria};
pub use leaderboard::{top_players, top_teams};
pub use listable::{ListContext, Listable, SortKey};
pub use paginate::{paginate, Page};
pub use sort::{sort, SortDirection, SortSpec};
pub use view_state::ViewState;

use crate::errors::RankingResult;

pub type PipelineResult<'a, T> = Page<&'a T>;

/// Filter, then sort (when a sort is given), then paginate
pub fn run_pipeline<'a, T, I>(
    records: I,
    criteria: &FilterCriteria,
    sort_spec: Option<&SortSpec>,
    page_index: usize,
    page_size: usize,
    ctx: &ListContext,
) -> RankingResult<PipelineResult<'a, T>>
where
    T: Listable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let filtered = filter(records, criteria, ctx)?;

    let ordered = match sort_spec {
        Some(spec) => sort(filtered, &spec.field, spec.direction, ctx)?,
        None => filtered,
    };

    let page = paginate(ordered, page_index, page_size)?;
    debug!(
        "{} listing: page {}/{} ({} records)",
        T::ENTITY,
        page.page_index,
        page.total_pages,
        page.total_count
    );
    Ok(page)
}
