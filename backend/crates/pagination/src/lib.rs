//! Offset pagination primitives shared by listing endpoints.
//!
//! A [`PageRequest`] names a zero-based page index and a bounded page size.
//! It resolves to a [`PageWindow`] (`offset`/`limit`) for the storage layer,
//! and once the total number of matches is known, to [`PageMeta`] describing
//! the page for clients. [`Page`] couples the windowed items with that
//! metadata.
//!
//! # Examples
//! ```
//! use pagination::{Page, PageRequest};
//!
//! let request = PageRequest::new(1, 1).expect("valid request");
//! let window = request.window();
//! assert_eq!(window.offset(), 1);
//! assert_eq!(window.limit(), 1);
//!
//! let page = Page::new(vec!["second"], request, 2);
//! assert_eq!(page.meta().total_pages, 2);
//! assert!(!page.meta().has_next);
//! assert!(page.meta().has_previous);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page size applied when callers do not request one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Smallest accepted page size.
pub const MIN_PAGE_SIZE: u32 = 1;
/// Largest accepted page size.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Errors raised when constructing a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// The page size falls outside `[MIN_PAGE_SIZE, MAX_PAGE_SIZE]`.
    #[error("page size must be between {min} and {max}, got {size}")]
    SizeOutOfRange {
        /// Rejected size.
        size: u32,
        /// Inclusive lower bound.
        min: u32,
        /// Inclusive upper bound.
        max: u32,
    },
}

/// Validated zero-based page index and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Build a request, rejecting sizes outside the accepted range.
    ///
    /// # Errors
    /// Returns [`PageRequestError::SizeOutOfRange`] when `size` is zero or
    /// larger than [`MAX_PAGE_SIZE`].
    pub const fn new(page: u32, size: u32) -> Result<Self, PageRequestError> {
        if size < MIN_PAGE_SIZE || size > MAX_PAGE_SIZE {
            return Err(PageRequestError::SizeOutOfRange {
                size,
                min: MIN_PAGE_SIZE,
                max: MAX_PAGE_SIZE,
            });
        }
        Ok(Self { page, size })
    }

    /// Zero-based page index.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Number of items per page.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Window covering `[page * size, page * size + size)`.
    #[must_use]
    pub const fn window(&self) -> PageWindow {
        PageWindow {
            offset: self.page as u64 * self.size as u64,
            limit: self.size,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Offset and limit handed to a storage adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageWindow {
    offset: u64,
    limit: u32,
}

impl PageWindow {
    /// Number of matching rows skipped before the window starts.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Maximum number of rows in the window.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Apply the window to an already ordered slice.
    ///
    /// Windows starting past the end yield an empty slice.
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = usize::try_from(self.offset).unwrap_or(usize::MAX);
        let rest = items.get(start..).unwrap_or_default();
        let take = rest.len().min(self.limit as usize);
        rest.get(..take).unwrap_or_default()
    }
}

/// Metadata describing one page of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Zero-based index of this page.
    pub current_page: u32,
    /// Number of pages needed to cover every match; zero when nothing matches.
    pub total_pages: u64,
    /// Number of matches before windowing.
    pub total_items: u64,
    /// Requested page size.
    pub page_size: u32,
    /// Whether a later page exists.
    pub has_next: bool,
    /// Whether an earlier page exists.
    pub has_previous: bool,
}

impl PageMeta {
    /// Derive page metadata from a request and the total match count.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PageMeta, PageRequest};
    ///
    /// let meta = PageMeta::new(PageRequest::new(0, 20).expect("valid"), 0);
    /// assert_eq!(meta.total_pages, 0);
    /// assert!(!meta.has_next);
    /// ```
    #[must_use]
    pub const fn new(request: PageRequest, total_items: u64) -> Self {
        let total_pages = total_items.div_ceil(request.size as u64);
        Self {
            current_page: request.page,
            total_pages,
            total_items,
            page_size: request.size,
            has_next: (request.page as u64) + 1 < total_pages,
            has_previous: request.page > 0,
        }
    }
}

/// Items for one page together with their [`PageMeta`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    items: Vec<T>,
    meta: PageMeta,
}

impl<T> Page<T> {
    /// Wrap windowed items with metadata computed from `total_items`.
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            items,
            meta: PageMeta::new(request, total_items),
        }
    }

    /// Items in this page, in listing order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Page metadata.
    #[must_use]
    pub const fn meta(&self) -> &PageMeta {
        &self.meta
    }

    /// Transform every item while keeping the metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }

    /// Split into items and metadata.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, PageMeta) {
        (self.items, self.meta)
    }
}

#[cfg(test)]
mod tests {
    //! Page math coverage.

    use super::*;
    use rstest::rstest;

    fn request(page: u32, size: u32) -> PageRequest {
        PageRequest::new(page, size).expect("valid page request")
    }

    #[rstest]
    #[case(0)]
    #[case(101)]
    fn rejects_sizes_outside_range(#[case] size: u32) {
        let err = PageRequest::new(0, size).expect_err("size rejected");
        assert_eq!(
            err,
            PageRequestError::SizeOutOfRange {
                size,
                min: MIN_PAGE_SIZE,
                max: MAX_PAGE_SIZE
            }
        );
    }

    #[rstest]
    #[case(1)]
    #[case(100)]
    fn accepts_boundary_sizes(#[case] size: u32) {
        assert_eq!(request(0, size).size(), size);
    }

    #[rstest]
    fn default_request_is_first_page_of_twenty() {
        let default = PageRequest::default();
        assert_eq!(default.page(), 0);
        assert_eq!(default.size(), DEFAULT_PAGE_SIZE);
    }

    #[rstest]
    #[case(0, 20, 0)]
    #[case(3, 20, 60)]
    #[case(2, 1, 2)]
    fn window_starts_at_page_times_size(#[case] page: u32, #[case] size: u32, #[case] offset: u64) {
        let window = request(page, size).window();
        assert_eq!(window.offset(), offset);
        assert_eq!(window.limit(), size);
    }

    #[rstest]
    #[case(0, 20, 0, 0, false, false)]
    #[case(0, 1, 2, 2, true, false)]
    #[case(1, 1, 2, 2, false, true)]
    #[case(0, 20, 20, 1, false, false)]
    #[case(0, 20, 21, 2, true, false)]
    #[case(5, 10, 12, 2, false, true)]
    fn meta_follows_page_math(
        #[case] page: u32,
        #[case] size: u32,
        #[case] total: u64,
        #[case] pages: u64,
        #[case] has_next: bool,
        #[case] has_previous: bool,
    ) {
        let meta = PageMeta::new(request(page, size), total);
        assert_eq!(meta.total_pages, pages);
        assert_eq!(meta.total_items, total);
        assert_eq!(meta.current_page, page);
        assert_eq!(meta.page_size, size);
        assert_eq!(meta.has_next, has_next);
        assert_eq!(meta.has_previous, has_previous);
    }

    #[rstest]
    fn slice_applies_offset_and_limit() {
        let items = [1, 2, 3, 4, 5];
        assert_eq!(request(1, 2).window().slice(&items), &[3, 4]);
        assert_eq!(request(2, 2).window().slice(&items), &[5]);
        assert!(request(3, 2).window().slice(&items).is_empty());
    }

    #[rstest]
    fn meta_serialises_in_camel_case() {
        let value = serde_json::to_value(PageMeta::new(request(0, 1), 2)).expect("serialise");
        assert_eq!(value["totalPages"], 2);
        assert_eq!(value["hasNext"], true);
        assert_eq!(value["hasPrevious"], false);
    }

    #[rstest]
    fn map_keeps_metadata() {
        let page = Page::new(vec![1, 2], request(0, 2), 5).map(|n| n * 10);
        assert_eq!(page.items(), &[10, 20]);
        assert_eq!(page.meta().total_pages, 3);
    }
}
