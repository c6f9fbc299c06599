use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use log::{info, warn};

use crate::api::models::{ErrorResponse, PaginatedResponse};
use crate::cache::Snapshot;
use crate::config::settings::{AppConfig, PipelineSettings};
use crate::config::tables::ReferenceTables;
use crate::domain::Clock;
use crate::errors::RankingError;
use crate::pipeline::{run_pipeline, FilterCriteria, ListContext, Listable, SortDirection, SortSpec};

pub mod events;
pub mod players;
pub mod reference;
pub mod teams;

pub struct AppState {
    snapshot: RwLock<Arc<Snapshot>>,
    pub config: AppConfig,
    pub tables: ReferenceTables,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(snapshot: Snapshot, config: AppConfig, tables: ReferenceTables, clock: Arc<dyn Clock>) -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(snapshot)),
            config,
            tables,
            clock,
        }
    }

    /// The current snapshot; a request keeps it even if a reload lands mid-flight
    pub fn snapshot(&self) -> Arc<Snapshot> {
        let guard = self.snapshot.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&guard)
    }

    pub fn replace_snapshot(&self, snapshot: Snapshot) {
        let mut guard = self.snapshot.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Arc::new(snapshot);
        info!("Snapshot replaced");
    }

    pub fn list_context(&self) -> ListContext {
        ListContext::from_clock(self.clock.as_ref())
    }
}

/// Listing query: known keys drive search, sort and paging, every other key
/// is a category filter
#[derive(Debug, Clone, PartialEq)]
pub struct ViewParams {
    pub criteria: FilterCriteria,
    pub sort: Option<SortSpec>,
    pub page: usize,
    pub page_size: usize,
}

impl ViewParams {
    pub fn from_query<T: Listable>(
        mut query: BTreeMap<String, String>,
        settings: &PipelineSettings,
    ) -> Result<Self, RankingError> {
        let search_text = query.remove("search").unwrap_or_default();
        let sort_by = query.remove("sort_by").filter(|s| !s.trim().is_empty());
        let order = query.remove("order").filter(|s| !s.trim().is_empty());
        let page = parse_index("page", query.remove("page"))?.unwrap_or(0);
        let page_size = parse_index("page_size", query.remove("page_size"))?.unwrap_or(settings.default_page_size);

        if page_size == 0 || page_size > settings.max_page_size {
            return Err(RankingError::invalid_argument(format!(
                "page_size must be between 1 and {}",
                settings.max_page_size
            )));
        }

        let sort = match sort_by {
            Some(field) => {
                let mut spec = SortSpec::default_for::<T>(&field)?;
                if let Some(order) = order {
                    spec.direction = order.parse::<SortDirection>()?;
                }
                Some(spec)
            }
            None => None,
        };

        Ok(Self {
            criteria: FilterCriteria { search_text, category_filters: query },
            sort,
            page,
            page_size,
        })
    }
}

fn parse_index(name: &str, value: Option<String>) -> Result<Option<usize>, RankingError> {
    value
        .map(|v| {
            v.trim()
                .parse::<usize>()
                .map_err(|_| RankingError::invalid_argument(format!("{} must be a non-negative integer, got '{}'", name, v)))
        })
        .transpose()
}

/// Run a listing query over `records` and map the page to response items
pub fn list_page<T, D>(
    state: &AppState,
    query: BTreeMap<String, String>,
    records: &[T],
    ctx: &ListContext,
    to_item: impl Fn(&T) -> D,
) -> Result<PaginatedResponse<D>, ApiError>
where
    T: Listable,
{
    let params = ViewParams::from_query::<T>(query, &state.config.pipeline)?;
    let page = run_pipeline(
        records,
        &params.criteria,
        params.sort.as_ref(),
        params.page,
        params.page_size,
        ctx,
    )?;

    Ok(PaginatedResponse::from_page(page.map(to_item)))
}

/// Core errors as JSON responses
#[derive(Debug)]
pub struct ApiError(pub RankingError);

impl From<RankingError> for ApiError {
    fn from(err: RankingError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            RankingError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            RankingError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            warn!("Request failed: {}", self.0);
        }

        (status, Json(ErrorResponse { error: self.0.to_string() })).into_response()
    }
}

pub type ApiResult<T> = Result<Json<T>, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PlayerRecord;

    fn query(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_view_params_split_known_keys_from_filters() {
        let settings = PipelineSettings::default();
        let params = ViewParams::from_query::<PlayerRecord>(
            query(&[("search", "dimes"), ("position", "PG"), ("sort_by", "player_rp"), ("page", "2")]),
            &settings,
        )
        .unwrap();

        assert_eq!(params.criteria.search_text, "dimes");
        assert_eq!(params.criteria.category_filters.get("position").map(String::as_str), Some("PG"));
        assert_eq!(params.sort, Some(SortSpec::new("player_rp", SortDirection::Desc)));
        assert_eq!(params.page, 2);
        assert_eq!(params.page_size, 10);
    }

    #[test]
    fn test_view_params_explicit_order() {
        let settings = PipelineSettings::default();
        let params = ViewParams::from_query::<PlayerRecord>(
            query(&[("sort_by", "player_rp"), ("order", "asc")]),
            &settings,
        )
        .unwrap();
        assert_eq!(params.sort.map(|s| s.direction), Some(SortDirection::Asc));
    }

    #[test]
    fn test_view_params_reject_bad_paging() {
        let settings = PipelineSettings::default();
        for pairs in [
            vec![("page", "-1")],
            vec![("page_size", "0")],
            vec![("page_size", "101")],
            vec![("sort_by", "height")],
            vec![("sort_by", "gamertag"), ("order", "sideways")],
        ] {
            let err = ViewParams::from_query::<PlayerRecord>(query(&pairs), &settings).unwrap_err();
            assert!(matches!(err, RankingError::InvalidArgument(_)), "{:?}", pairs);
        }
    }
}
