//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-indexed).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Number of items per page.
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    50
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl PageRequest {
    /// Calculates the offset for repository queries.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

/// Response wrapper for paginated data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items in the current page.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub meta: PageMeta,
}

/// Pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    /// Current page number.
    pub page: u32,
    /// Items per page.
    pub limit: u32,
    /// Total number of items across all pages.
    pub total: u64,
    /// Total number of pages.
    pub total_pages: u32,
}

impl<T> PageResponse<T> {
    /// Creates a new paginated response.
    ///
    /// `total` is the unfiltered match count reported by the repository;
    /// `data` may hold fewer items when a post-fetch filter was applied.
    #[must_use]
    pub fn new(data: Vec<T>, page: u32, limit: u32, total: u64) -> Self {
        let total_pages = if total == 0 {
            1
        } else {
            u32::try_from(total.div_ceil(u64::from(limit.max(1)))).unwrap_or(u32::MAX)
        };

        Self {
            data,
            meta: PageMeta {
                page,
                limit,
                total,
                total_pages,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_page_request() {
        let req = PageRequest::default();
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, 50);
    }

    #[rstest]
    #[case(1, 50, 0)]
    #[case(2, 50, 50)]
    #[case(3, 20, 40)]
    #[case(0, 50, 0)]
    fn test_offset(#[case] page: u32, #[case] limit: u32, #[case] expected: u64) {
        let req = PageRequest { page, limit };
        assert_eq!(req.offset(), expected);
    }

    #[rstest]
    #[case(0, 50, 1)]
    #[case(1, 50, 1)]
    #[case(50, 50, 1)]
    #[case(51, 50, 2)]
    #[case(101, 50, 3)]
    fn test_total_pages(#[case] total: u64, #[case] limit: u32, #[case] expected: u32) {
        let resp: PageResponse<u8> = PageResponse::new(Vec::new(), 1, limit, total);
        assert_eq!(resp.meta.total_pages, expected);
    }

    #[test]
    fn test_total_reflects_repository_count_not_data_len() {
        let resp = PageResponse::new(vec![1, 2], 1, 50, 10);
        assert_eq!(resp.data.len(), 2);
        assert_eq!(resp.meta.total, 10);
    }
}
