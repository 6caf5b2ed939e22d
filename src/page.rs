use serde::{Deserialize, Serialize};

const DEFAULT_PAGE_SIZE: u64 = 10;
const MAX_PAGE_SIZE: u64 = 100;

/// Page request taken from `current` / `size` query parameters (1-based).
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_current")]
    pub current: u64,
    #[serde(default = "default_size")]
    pub size: u64,
}

const fn default_current() -> u64 {
    1
}

const fn default_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            current: default_current(),
            size: default_size(),
        }
    }
}

impl PageQuery {
    pub const fn new(current: u64, size: u64) -> Self {
        Self { current, size }
    }

    /// Rows per page, clamped to `1..=100`.
    #[must_use]
    pub fn limit(&self) -> u64 {
        self.size.clamp(1, MAX_PAGE_SIZE)
    }

    /// Rows to skip before this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.current.max(1).saturating_sub(1).saturating_mul(self.limit())
    }
}

/// One page of rows together with the number of rows matching the query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultPage<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> ResultPage<T> {
    pub const fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ResultPage<U> {
        ResultPage {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_of_first_pages() {
        assert_eq!(PageQuery::new(1, 10).offset(), 0);
        assert_eq!(PageQuery::new(3, 10).offset(), 20);
    }

    #[test]
    fn test_page_zero_is_first_page() {
        assert_eq!(PageQuery::new(0, 10).offset(), 0);
    }

    #[test]
    fn test_size_is_clamped() {
        assert_eq!(PageQuery::new(1, 0).limit(), 1);
        assert_eq!(PageQuery::new(2, 1000).limit(), 100);
        assert_eq!(PageQuery::new(2, 1000).offset(), 100);
    }

    #[test]
    fn test_defaults_from_empty_query() {
        let page: PageQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(page.current, 1);
        assert_eq!(page.size, 10);
    }
}
