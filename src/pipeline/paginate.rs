use serde::Serialize;

use crate::errors::{RankingError, RankingResult};

/// One page of an ordered sequence. `page_index` is zero-based and reports the
/// page actually returned, which differs from the request when it was clamped.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub records: Vec<T>,
    pub total_count: usize,
    pub total_pages: usize,
    pub page_index: usize,
    pub page_size: usize,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            records: self.records.into_iter().map(f).collect(),
            total_count: self.total_count,
            total_pages: self.total_pages,
            page_index: self.page_index,
            page_size: self.page_size,
        }
    }

    pub fn is_last(&self) -> bool {
        self.page_index + 1 >= self.total_pages
    }

    /// One-based position of the `offset`-th record on this page within the whole sequence
    pub fn rank_of(&self, offset: usize) -> usize {
        self.page_index * self.page_size + offset + 1
    }
}

pub fn total_pages(total_count: usize, page_size: usize) -> usize {
    total_count.div_ceil(page_size)
}

/// Slice `records` into the page at `page_index`, clamping past-the-end
/// requests to the last page
pub fn paginate<T>(records: Vec<T>, page_index: usize, page_size: usize) -> RankingResult<Page<T>> {
    if page_size == 0 {
        return Err(RankingError::invalid_argument("page size must be at least 1"));
    }

    let total_count = records.len();
    let total_pages = total_pages(total_count, page_size);
    let page_index = page_index.min(total_pages.saturating_sub(1));

    let records = records
        .into_iter()
        .skip(page_index * page_size)
        .take(page_size)
        .collect();

    Ok(Page { records, total_count, total_pages, page_index, page_size })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_cover_input_exactly_once() {
        let items: Vec<u32> = (0..23).collect();
        let first = paginate(items.clone(), 0, 5).unwrap();
        assert_eq!(first.total_pages, 5);

        let mut seen = Vec::new();
        for index in 0..first.total_pages {
            let page = paginate(items.clone(), index, 5).unwrap();
            assert_eq!(page.page_index, index);
            seen.extend(page.records);
        }
        assert_eq!(seen, items);
    }

    #[test]
    fn test_out_of_range_clamps_to_last_page() {
        let page = paginate((0..12).collect::<Vec<u32>>(), 99, 5).unwrap();
        assert_eq!(page.page_index, 2);
        assert_eq!(page.records, vec![10, 11]);
        assert!(page.is_last());
        assert_eq!(page.rank_of(0), 11);
    }

    #[test]
    fn test_empty_input() {
        let page = paginate(Vec::<u32>::new(), 3, 10).unwrap();
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total_count, 0);
        assert_eq!(page.page_index, 0);
        assert!(page.records.is_empty());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        assert!(matches!(paginate(vec![1, 2, 3], 0, 0), Err(RankingError::InvalidArgument(_))));
    }
}
