//! Shared query parameter types for page handlers.

use serde::{Deserialize, Serialize};

/// Rows per page on paginated tables.
pub const PAGE_SIZE: i64 = 25;

/// `?page=` (1-based) for paginated tables.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
}

/// Position of one page within a paginated listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub num_pages: i64,
}

impl Pagination {
    /// Clamp the requested page to at least 1. A page past the end stays as
    /// requested and simply yields no rows.
    pub fn new(requested: Option<i64>, total: i64) -> Self {
        let num_pages = ((total + PAGE_SIZE - 1) / PAGE_SIZE).max(1);
        Self {
            page: requested.unwrap_or(1).max(1),
            per_page: PAGE_SIZE,
            total,
            num_pages,
        }
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_by_default() {
        let p = Pagination::new(None, 60);
        assert_eq!(p.page, 1);
        assert_eq!(p.offset(), 0);
        assert_eq!(p.num_pages, 3);
    }

    #[test]
    fn clamps_non_positive_pages() {
        assert_eq!(Pagination::new(Some(0), 10).page, 1);
        assert_eq!(Pagination::new(Some(-4), 10).page, 1);
    }

    #[test]
    fn offset_follows_page() {
        assert_eq!(Pagination::new(Some(3), 100).offset(), 50);
    }

    #[test]
    fn empty_listing_has_one_page() {
        assert_eq!(Pagination::new(None, 0).num_pages, 1);
    }
}
