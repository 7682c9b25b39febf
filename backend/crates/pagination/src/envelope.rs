//! Query parameters and response envelope for paged endpoints.

use serde::{Deserialize, Serialize};

use crate::page::{PageNumber, PageRequest};

/// Query string parameters accepted by paged endpoints (`?page=n`).
///
/// The page is kept as a signed integer so that `page=0` and negative values
/// deserialize successfully and are clamped rather than rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageParams {
    /// Requested one-based page; missing means the first page.
    #[serde(default)]
    pub page: Option<i64>,
}

impl PageParams {
    /// Convert into a [`PageRequest`] with the default page size.
    #[must_use]
    pub fn to_request(self) -> PageRequest {
        self.page.map_or_else(PageRequest::default, PageRequest::clamped)
    }
}

/// A single page of results together with the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    data: Vec<T>,
    page: PageNumber,
    page_size: usize,
}

impl<T> Paginated<T> {
    /// Wrap `data` as the page described by `request`.
    #[must_use]
    pub fn new(data: Vec<T>, request: PageRequest) -> Self {
        Self {
            data,
            page: request.page(),
            page_size: request.limit(),
        }
    }

    /// Items on this page.
    #[must_use]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// The page number served.
    #[must_use]
    pub const fn page(&self) -> PageNumber {
        self.page
    }

    /// The page size the items were read with.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Map every item, keeping the page metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
        }
    }

    /// Consume the envelope and return its items.
    #[must_use]
    pub fn into_data(self) -> Vec<T> {
        self.data
    }
}
