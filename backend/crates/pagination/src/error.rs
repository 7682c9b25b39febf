//! Error types for pagination inputs.

use thiserror::Error;

/// Errors raised when constructing a [`crate::PageSize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageSizeError {
    /// A page must hold at least one item.
    #[error("page size must be at least 1")]
    Zero,
    /// The requested size exceeds the supported maximum.
    #[error("page size must be at most {max}, got {actual}")]
    TooLarge {
        /// Largest accepted page size.
        max: usize,
        /// The rejected value.
        actual: usize,
    },
}
