//! Search results and pagination.

use serde::{Deserialize, Serialize};

use crate::search::SearchOptions;

/// Offset/limit pagination.
///
/// Only `limit`: the first `limit` results. Only `offset`: everything after
/// it. Both: the slice `[offset, offset + limit)`. An offset past the end
/// yields an empty page, never an error.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

impl Pagination {
    /// Both offset and limit.
    pub fn new(offset: usize, limit: usize) -> Self {
        Self {
            offset: Some(offset),
            limit: Some(limit),
        }
    }

    /// The first `limit` results.
    pub fn limit(limit: usize) -> Self {
        Self {
            offset: None,
            limit: Some(limit),
        }
    }

    /// Everything after `offset`.
    pub fn offset(offset: usize) -> Self {
        Self {
            offset: Some(offset),
            limit: None,
        }
    }

    /// Whether neither bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.offset.is_none() && self.limit.is_none()
    }

    /// Cut a page out of `items`.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        let offset = self.offset.unwrap_or(0);
        if offset >= items.len() {
            return Vec::new();
        }
        let take = self.limit.unwrap_or(usize::MAX);
        items.into_iter().skip(offset).take(take).collect()
    }
}

/// Search results container.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults<T> {
    /// The page of result items.
    pub items: Vec<T>,
    /// Number of matches before pagination.
    pub total_matches: usize,
    /// Pagination that produced this page.
    pub pagination: Pagination,
}

impl<T> SearchResults<T> {
    /// Create new search results.
    pub fn new(items: Vec<T>, total_matches: usize, pagination: Pagination) -> Self {
        Self {
            items,
            total_matches,
            pagination,
        }
    }

    /// Create empty results for a search.
    pub fn empty(options: &SearchOptions) -> Self {
        Self::new(Vec::new(), 0, options.pagination)
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether more matches exist after this page.
    pub fn has_more(&self) -> bool {
        self.pagination.offset.unwrap_or(0) + self.items.len() < self.total_matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<u32> {
        (0..10).collect()
    }

    #[test]
    fn test_limit_only() {
        assert_eq!(Pagination::limit(3).apply(items()), vec![0, 1, 2]);
    }

    #[test]
    fn test_offset_and_limit() {
        assert_eq!(Pagination::new(4, 3).apply(items()), vec![4, 5, 6]);
        assert_eq!(Pagination::new(8, 5).apply(items()), vec![8, 9]);
    }

    #[test]
    fn test_offset_only() {
        assert_eq!(Pagination::offset(7).apply(items()), vec![7, 8, 9]);
    }

    #[test]
    fn test_offset_past_end_is_empty() {
        assert!(Pagination::new(10, 5).apply(items()).is_empty());
        assert!(Pagination::offset(99).apply(items()).is_empty());
        assert!(Pagination::limit(5).apply(Vec::<u32>::new()).is_empty());
    }

    #[test]
    fn test_unbounded_returns_everything() {
        assert!(Pagination::default().is_unbounded());
        assert_eq!(Pagination::default().apply(items()).len(), 10);
    }

    #[test]
    fn test_has_more() {
        let results = SearchResults::new(vec![1, 2], 5, Pagination::new(0, 2));
        assert!(results.has_more());
        let results = SearchResults::new(vec![5], 5, Pagination::new(4, 2));
        assert!(!results.has_more());
    }
}
