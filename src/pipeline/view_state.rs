use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::filter::FilterCriteria;
use super::listable::{ListContext, Listable};
use super::paginate::Page;
use super::sort::SortSpec;
use super::run_pipeline;
use crate::errors::{RankingError, RankingResult};

/// Everything a listing view remembers between renders.
///
/// Changing any criterion sends the view back to the first page; only
/// `set_page` moves within the current result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    search_text: String,
    category_filters: BTreeMap<String, String>,
    sort: Option<SortSpec>,
    page_index: usize,
    page_size: usize,
}

impl ViewState {
    pub fn new(page_size: usize) -> RankingResult<Self> {
        check_page_size(page_size)?;
        Ok(Self {
            search_text: String::new(),
            category_filters: BTreeMap::new(),
            sort: None,
            page_index: 0,
            page_size,
        })
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            search_text: self.search_text.clone(),
            category_filters: self.category_filters.clone(),
        }
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.search_text {
            self.search_text = text;
            self.page_index = 0;
        }
    }

    /// Set a category filter; the field name is validated when the view is applied
    pub fn set_filter(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        if self.category_filters.get(&field) != Some(&value) {
            self.category_filters.insert(field, value);
            self.page_index = 0;
        }
    }

    pub fn clear_filter(&mut self, field: &str) {
        if self.category_filters.remove(field).is_some() {
            self.page_index = 0;
        }
    }

    /// Sort on `field`, flipping direction when it is already the sort field
    pub fn toggle_sort<T: Listable>(&mut self, field: &str) -> RankingResult<()> {
        self.sort = Some(SortSpec::toggle::<T>(self.sort.as_ref(), field)?);
        self.page_index = 0;
        Ok(())
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        if sort != self.sort {
            self.sort = sort;
            self.page_index = 0;
        }
    }

    pub fn set_page_size(&mut self, page_size: usize) -> RankingResult<()> {
        check_page_size(page_size)?;
        if page_size != self.page_size {
            self.page_size = page_size;
            self.page_index = 0;
        }
        Ok(())
    }

    pub fn set_page(&mut self, page_index: usize) {
        self.page_index = page_index;
    }

    /// Run the pipeline for this view over `records`
    pub fn apply<'a, T: Listable>(&self, records: &'a [T], ctx: &ListContext) -> RankingResult<Page<&'a T>> {
        run_pipeline(
            records,
            &self.criteria(),
            self.sort.as_ref(),
            self.page_index,
            self.page_size,
            ctx,
        )
    }
}

fn check_page_size(page_size: usize) -> RankingResult<()> {
    if page_size == 0 {
        return Err(RankingError::invalid_argument("page size must be at least 1"));
    }
    Ok(())
}
