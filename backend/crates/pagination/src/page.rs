//! Page numbers, page sizes and the offsets derived from them.

use serde::{Deserialize, Serialize};

use crate::error::PageSizeError;

/// Number of items returned per timeline page.
pub const DEFAULT_PAGE_SIZE: usize = 32;

/// Upper bound accepted by [`PageSize::new`].
pub const MAX_PAGE_SIZE: usize = 100;

/// One-based page number.
///
/// ## Invariants
/// - The wrapped value is always at least 1.
/// - Deserialising `0` yields the first page, as [`PageNumber::clamped`] does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct PageNumber(u32);

impl PageNumber {
    /// The first page.
    pub const FIRST: Self = Self(1);

    /// Clamp an arbitrary caller-supplied page number into range.
    ///
    /// Values below 1 (including negatives) map to the first page; values
    /// beyond `u32::MAX` saturate.
    ///
    /// ```
    /// use pagination::PageNumber;
    ///
    /// assert_eq!(PageNumber::clamped(0), PageNumber::clamped(1));
    /// assert_eq!(PageNumber::clamped(-5).get(), 1);
    /// assert_eq!(PageNumber::clamped(3).get(), 3);
    /// ```
    #[must_use]
    pub fn clamped(raw: i64) -> Self {
        if raw < 1 {
            return Self::FIRST;
        }
        Self(u32::try_from(raw).unwrap_or(u32::MAX))
    }

    /// Return the one-based page number.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Number of items skipped before this page for the given page size.
    #[must_use]
    pub fn offset(self, size: PageSize) -> u64 {
        u64::from(self.0.saturating_sub(1)).saturating_mul(size.get() as u64)
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl From<u32> for PageNumber {
    fn from(value: u32) -> Self {
        Self(value.max(1))
    }
}

impl From<PageNumber> for u32 {
    fn from(value: PageNumber) -> Self {
        value.0
    }
}

/// Number of items per page.
///
/// ## Invariants
/// - `1 <= size <= MAX_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(usize);

impl PageSize {
    /// Validate and construct a page size.
    ///
    /// # Errors
    ///
    /// Returns [`PageSizeError::Zero`] for an empty page and
    /// [`PageSizeError::TooLarge`] above [`MAX_PAGE_SIZE`].
    pub const fn new(size: usize) -> Result<Self, PageSizeError> {
        if size == 0 {
            return Err(PageSizeError::Zero);
        }
        if size > MAX_PAGE_SIZE {
            return Err(PageSizeError::TooLarge {
                max: MAX_PAGE_SIZE,
                actual: size,
            });
        }
        Ok(Self(size))
    }

    /// Return the number of items per page.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(DEFAULT_PAGE_SIZE)
    }
}

impl TryFrom<usize> for PageSize {
    type Error = PageSizeError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageSize> for usize {
    fn from(value: PageSize) -> Self {
        value.0
    }
}

/// A page number paired with the page size it is read with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PageRequest {
    page: PageNumber,
    size: PageSize,
}

impl PageRequest {
    /// Build a request for `page` using [`DEFAULT_PAGE_SIZE`].
    #[must_use]
    pub fn new(page: PageNumber) -> Self {
        Self {
            page,
            size: PageSize::default(),
        }
    }

    /// Build a request from a raw, possibly out-of-range page number.
    #[must_use]
    pub fn clamped(raw: i64) -> Self {
        Self::new(PageNumber::clamped(raw))
    }

    /// Replace the page size.
    #[must_use]
    pub const fn with_size(mut self, size: PageSize) -> Self {
        self.size = size;
        self
    }

    /// Requested page.
    #[must_use]
    pub const fn page(&self) -> PageNumber {
        self.page
    }

    /// Requested page size.
    #[must_use]
    pub const fn size(&self) -> PageSize {
        self.size
    }

    /// Rows to skip for this request.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.page.offset(self.size)
    }

    /// Rows to read for this request.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.size.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(-5, 1)]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(2, 2)]
    #[case(i64::MAX, u32::MAX)]
    fn clamps_page_numbers(#[case] raw: i64, #[case] expected: u32) {
        assert_eq!(PageNumber::clamped(raw).get(), expected);
    }

    #[rstest]
    #[case(1, 0)]
    #[case(2, 32)]
    #[case(4, 96)]
    fn offsets_follow_default_page_size(#[case] page: i64, #[case] expected: u64) {
        assert_eq!(PageRequest::clamped(page).offset(), expected);
    }

    #[rstest]
    fn clamped_requests_are_equal_below_first_page() {
        assert_eq!(PageRequest::clamped(0), PageRequest::clamped(1));
        assert_eq!(PageRequest::clamped(-5), PageRequest::clamped(1));
    }

    #[rstest]
    #[case("0", 1)]
    #[case("1", 1)]
    #[case("7", 7)]
    fn deserialised_page_numbers_stay_in_range(#[case] json: &str, #[case] expected: u32) {
        let page: PageNumber = serde_json::from_str(json).expect("page number parses");
        assert_eq!(page.get(), expected);
        assert_eq!(
            PageRequest::new(page).offset(),
            u64::from(expected - 1) * 32
        );
    }

    #[rstest]
    fn page_numbers_serialise_as_plain_integers() {
        let json = serde_json::to_string(&PageNumber::clamped(3)).expect("serialise");
        assert_eq!(json, "3");
    }

    #[rstest]
    #[case(0, Err(PageSizeError::Zero))]
    #[case(1, Ok(1))]
    #[case(MAX_PAGE_SIZE, Ok(MAX_PAGE_SIZE))]
    #[case(MAX_PAGE_SIZE + 1, Err(PageSizeError::TooLarge { max: MAX_PAGE_SIZE, actual: MAX_PAGE_SIZE + 1 }))]
    fn validates_page_sizes(#[case] raw: usize, #[case] expected: Result<usize, PageSizeError>) {
        assert_eq!(PageSize::new(raw).map(PageSize::get), expected);
    }

    #[rstest]
    fn custom_size_changes_limit_and_offset() {
        let size = PageSize::new(10).expect("valid size");
        let request = PageRequest::clamped(3).with_size(size);
        assert_eq!(request.limit(), 10);
        assert_eq!(request.offset(), 20);
    }
}
