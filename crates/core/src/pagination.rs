//! Page arithmetic for catalog listings.
//!
//! Pages are 1-based. The page number is clamped to at least 1 and the page
//! size to `1..=MAX_PAGE_SIZE`; an offset past the end of the result set is
//! not an error and simply yields an empty page.

use serde::Serialize;

/// Default number of games per listing page.
pub const DEFAULT_PAGE_SIZE: i64 = 5;

/// Maximum number of games per listing page.
pub const MAX_PAGE_SIZE: i64 = 100;

/// A clamped page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_number: i64,
    page_size: i64,
}

impl PageRequest {
    /// Build a request from optional user input, applying defaults and clamps.
    pub fn new(page_number: Option<i64>, page_size: Option<i64>) -> Self {
        Self {
            page_number: page_number.unwrap_or(1).max(1),
            page_size: page_size
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn page_number(&self) -> i64 {
        self.page_number
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// Number of records to skip. Saturates instead of overflowing for
    /// absurd page numbers.
    pub fn offset(&self) -> i64 {
        (self.page_number - 1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    /// Borrow the records of this page from an already filtered, ordered
    /// collection.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = usize::try_from(self.offset())
            .unwrap_or(usize::MAX)
            .min(items.len());
        let end = start
            .saturating_add(usize::try_from(self.page_size).unwrap_or(usize::MAX))
            .min(items.len());
        &items[start..end]
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// `ceil(total / page_size)`, or 0 when there is nothing to show.
pub fn total_pages(total: i64, page_size: i64) -> i64 {
    if total <= 0 || page_size <= 0 {
        return 0;
    }
    (total + page_size - 1) / page_size
}

/// Page metadata attached to a listing response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationInfo {
    pub page_number: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

impl PaginationInfo {
    pub fn new(request: &PageRequest, total_filtered: i64) -> Self {
        Self {
            page_number: request.page_number(),
            page_size: request.page_size(),
            total_pages: total_pages(total_filtered, request.page_size()),
        }
    }
}
