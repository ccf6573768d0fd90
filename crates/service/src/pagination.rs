//! Pagination inputs for the listing endpoints.

const MAX_PER_PAGE: u64 = 100;
const DEFAULT_PER_PAGE: u64 = 20;

/// 1-based page selector as it arrives from query parameters.
#[derive(Clone, Copy, Debug)]
pub struct ListPage {
    pub page: u64,
    pub per_page: u64,
}

impl ListPage {
    pub fn new(page: Option<u64>, per_page: Option<u64>) -> Self {
        Self {
            page: page.unwrap_or(1),
            per_page: per_page.unwrap_or(DEFAULT_PER_PAGE),
        }
    }

    /// 0-based page index for `PaginatorTrait::fetch_page`.
    pub fn page_index(&self) -> u64 {
        self.page.saturating_sub(1)
    }

    /// Page size clamped to 1..=100.
    pub fn page_size(&self) -> u64 {
        self.per_page.clamp(1, MAX_PER_PAGE)
    }
}

impl Default for ListPage {
    fn default() -> Self {
        Self { page: 1, per_page: DEFAULT_PER_PAGE }
    }
}

#[cfg(test)]
mod tests {
    use super::ListPage;

    #[test]
    fn page_zero_is_treated_as_first() {
        let p = ListPage::new(Some(0), Some(0));
        assert_eq!(p.page_index(), 0);
        assert_eq!(p.page_size(), 1);
    }

    #[test]
    fn per_page_is_capped() {
        let p = ListPage::new(Some(3), Some(5000));
        assert_eq!(p.page_index(), 2);
        assert_eq!(p.page_size(), 100);
    }

    #[test]
    fn defaults_apply_when_absent() {
        let p = ListPage::new(None, None);
        assert_eq!(p.page, 1);
        assert_eq!(p.page_size(), 20);
    }
}
