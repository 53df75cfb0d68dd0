/// Normalized page window for list queries.
///
/// Out-of-range input is clamped rather than rejected: a page below 1 becomes
/// the first page, a page size below 1 becomes the default and a page size
/// above the maximum is capped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: i64,
    per_page: i64,
}

impl Pagination {
    pub const DEFAULT_PER_PAGE: i64 = 10;
    pub const MAX_PER_PAGE: i64 = 100;

    /// Build a page window from raw query values.
    ///
    /// # Arguments
    /// * `page` - 1-based page number
    /// * `per_page` - Requested page size
    pub fn new(page: i64, per_page: i64) -> Self {
        let page = if page <= 0 { 1 } else { page };
        let per_page = if per_page > Self::MAX_PER_PAGE {
            Self::MAX_PER_PAGE
        } else if per_page <= 0 {
            Self::DEFAULT_PER_PAGE
        } else {
            per_page
        };

        Self { page, per_page }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn per_page(&self) -> i64 {
        self.per_page
    }

    /// Maximum number of rows to return.
    pub fn limit(&self) -> i64 {
        self.per_page
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, Self::DEFAULT_PER_PAGE)
    }
}
