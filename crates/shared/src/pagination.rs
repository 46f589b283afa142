//! Page-based pagination helpers.
//!
//! Feed listings use classic page/per-page pagination. These helpers
//! normalize the raw query parameters and compute SQL offsets and page
//! counts in one place.

use serde::Deserialize;

/// Default number of items per page.
pub const DEFAULT_PER_PAGE: i64 = 20;

/// Hard cap on items per page.
pub const MAX_PER_PAGE: i64 = 100;

/// Raw pagination query parameters.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Normalized pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: i64,
    pub per_page: i64,
}

impl PageParams {
    /// Normalizes raw query parameters: page is at least 1, per_page is
    /// clamped to `1..=MAX_PER_PAGE`.
    pub fn from_query(query: &PageQuery) -> Self {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query
            .per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE);
        Self { page, per_page }
    }

    /// SQL OFFSET for this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.per_page
    }

    /// Number of pages needed for `total` items (0 items -> 0 pages).
    pub fn page_count(&self, total: i64) -> i64 {
        if total <= 0 {
            0
        } else {
            (total + self.per_page - 1) / self.per_page
        }
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_query_defaults() {
        let params = PageParams::from_query(&PageQuery {
            page: None,
            per_page: None,
        });
        assert_eq!(params, PageParams::default());
    }

    #[test]
    fn test_from_query_clamps_page() {
        let params = PageParams::from_query(&PageQuery {
            page: Some(0),
            per_page: Some(20),
        });
        assert_eq!(params.page, 1);

        let params = PageParams::from_query(&PageQuery {
            page: Some(-5),
            per_page: Some(20),
        });
        assert_eq!(params.page, 1);
    }

    #[test]
    fn test_from_query_clamps_per_page() {
        let params = PageParams::from_query(&PageQuery {
            page: Some(1),
            per_page: Some(10_000),
        });
        assert_eq!(params.per_page, MAX_PER_PAGE);

        let params = PageParams::from_query(&PageQuery {
            page: Some(1),
            per_page: Some(0),
        });
        assert_eq!(params.per_page, 1);
    }

    #[test]
    fn test_offset() {
        let params = PageParams {
            page: 3,
            per_page: 20,
        };
        assert_eq!(params.offset(), 40);
    }

    #[test]
    fn test_page_count() {
        let params = PageParams {
            page: 1,
            per_page: 20,
        };
        assert_eq!(params.page_count(0), 0);
        assert_eq!(params.page_count(1), 1);
        assert_eq!(params.page_count(20), 1);
        assert_eq!(params.page_count(21), 2);
        assert_eq!(params.page_count(59), 3);
    }
}
