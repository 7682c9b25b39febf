//! Page-number pagination primitives shared by Chirp backend endpoints.
//!
//! Timelines are paged with a one-based page number and a fixed page size.
//! Out-of-range page numbers are never an error: anything below the first
//! page is clamped to it and pages beyond the data simply come back empty.
//!
//! # Example
//!
//! ```
//! use pagination::{PageRequest, Paginated};
//!
//! let request = PageRequest::clamped(-5);
//! assert_eq!(request.page().get(), 1);
//! assert_eq!(request.offset(), 0);
//!
//! let page = Paginated::new(vec!["first", "second"], request);
//! assert_eq!(page.data().len(), 2);
//! ```

mod envelope;
mod error;
mod page;

pub use envelope::{PageParams, Paginated};
pub use error::PageSizeError;
pub use page::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageNumber, PageRequest, PageSize};
