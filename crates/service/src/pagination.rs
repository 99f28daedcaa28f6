//! Page/per-page handling for the portal listings (jobs, transactions).

/// Upper bound on page size; a dashboard never needs more rows at once.
pub const PER_PAGE_MAX: u32 = 100;

/// 1-based pagination parameters as they arrive from the query string.
#[derive(Clone, Copy, Debug)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Pagination {
    /// Clamp to usable values and convert to the 0-based
    /// `(page_index, per_page)` pair the paginator wants.
    pub fn normalize(self) -> (u64, u64) {
        let page = self.page.max(1);
        let per_page = self.per_page.clamp(1, PER_PAGE_MAX);
        (u64::from(page - 1), u64::from(per_page))
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, per_page: 20 }
    }
}
