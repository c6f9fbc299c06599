use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use super::listable::{ListContext, Listable};
use crate::errors::RankingResult;

/// Filter value meaning "no filter on this field"
pub const ALL_SENTINEL: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub search_text: String,
    pub category_filters: BTreeMap<String, String>,
}

impl FilterCriteria {
    pub fn search(text: impl Into<String>) -> Self {
        Self { search_text: text.into(), ..Self::default() }
    }

    pub fn with_category(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.category_filters.insert(field.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.search_text.trim().is_empty() && self.category_filters.values().all(|v| is_sentinel(v))
    }
}

pub fn is_sentinel(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.eq_ignore_ascii_case(ALL_SENTINEL)
}

/// Records matching the search text and every category filter, in input order.
///
/// Field names are checked even when their value is the sentinel, so a typo
/// never silently turns into "match everything".
pub fn filter<'a, T, I>(records: I, criteria: &FilterCriteria, ctx: &ListContext) -> RankingResult<Vec<&'a T>>
where
    T: Listable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut categories = Vec::new();
    for (name, value) in &criteria.category_filters {
        let field = T::parse_filter_field(name)?;
        if !is_sentinel(value) {
            categories.push((field, value.as_str()));
        }
    }

    let needle = criteria.search_text.trim().to_lowercase();

    let matched: Vec<&'a T> = records
        .into_iter()
        .filter(|record| needle.is_empty() || matches_search(*record, &needle))
        .filter(|record| {
            categories
                .iter()
                .all(|(field, wanted)| record.category_value(*field, ctx).is_some_and(|v| v == *wanted))
        })
        .collect();

    debug!("Filtered {} records to {}", T::ENTITY, matched.len());
    Ok(matched)
}

fn matches_search<T: Listable>(record: &T, needle: &str) -> bool {
    record
        .search_fields()
        .into_iter()
        .any(|field| field.to_lowercase().contains(needle))
}
