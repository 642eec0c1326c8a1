//! Paginated list envelope.

use serde::{Deserialize, Serialize};

/// One page of a paginated listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// The rows of this page.
    pub data: Vec<T>,
    /// Total row count across all pages.
    pub total: u64,
    /// 1-based page number.
    #[serde(default = "default_page")]
    pub page: u32,
    /// Page size the server applied.
    #[serde(default)]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

impl<T> Page<T> {
    /// Whether there are more pages after this one.
    ///
    /// A zero `limit` means the server did not paginate; the page holds
    /// everything there is.
    pub fn has_more(&self) -> bool {
        self.limit != 0 && u64::from(self.page) * u64::from(self.limit) < self.total
    }

    /// Whether this page carries no rows.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_more() {
        let page = Page {
            data: vec![1, 2, 3],
            total: 10,
            page: 1,
            limit: 3,
        };
        assert!(page.has_more());

        let last = Page {
            data: vec![10],
            total: 10,
            page: 4,
            limit: 3,
        };
        assert!(!last.has_more());
    }

    #[test]
    fn test_unpaginated_response_has_no_more_pages() {
        // Server omitted `limit`; the serde default is 0.
        let page: Page<i32> = serde_json::from_value(serde_json::json!({
            "data": [1, 2, 3],
            "total": 3,
        }))
        .unwrap();
        assert_eq!(page.limit, 0);
        assert!(!page.has_more());
    }
}
