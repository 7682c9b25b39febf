//! Port for the cheep store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::PageRequest;

use crate::domain::{Cheep, CheepId, LikeOutcome, UnlikeOutcome, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by cheep repository adapters.
    pub enum CheepRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "cheep repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "cheep repository query failed: {message}",
        /// Text exceeds the cheep length limit; nothing was stored.
        TextTooLong { max: usize, actual: usize } =>
            "cheep text is {actual} characters, limit is {max}",
        /// Text is blank; nothing was stored.
        EmptyText =>
            "cheep text must not be empty",
        /// The author does not exist.
        UnknownAuthor { author: String } =>
            "cheep author {author} does not exist",
    }
}

/// Persistence contract for cheeps and their like-sets.
///
/// Pages are ordered newest first by timestamp with the highest id winning
/// ties. Page numbers are already clamped by [`PageRequest`]; a page beyond
/// the data is empty, never an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheepRepository: Send + Sync {
    /// Validate and store a cheep, returning it with its assigned id.
    async fn insert(
        &self,
        author: &UserId,
        text: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<Cheep, CheepRepositoryError>;

    /// Fetch a single cheep.
    async fn find_by_id(&self, id: CheepId) -> Result<Option<Cheep>, CheepRepositoryError>;

    /// A page of all cheeps.
    async fn page(&self, request: PageRequest) -> Result<Vec<Cheep>, CheepRepositoryError>;

    /// A page of cheeps written by `author`.
    async fn page_by_author(
        &self,
        author: &UserId,
        request: PageRequest,
    ) -> Result<Vec<Cheep>, CheepRepositoryError>;

    /// Add `user` to the like-set. Idempotent.
    async fn like(&self, user: &UserId, cheep: CheepId)
    -> Result<LikeOutcome, CheepRepositoryError>;

    /// Remove `user` from the like-set.
    async fn unlike(
        &self,
        user: &UserId,
        cheep: CheepId,
    ) -> Result<UnlikeOutcome, CheepRepositoryError>;
}

impl From<crate::domain::CheepValidationError> for CheepRepositoryError {
    fn from(value: crate::domain::CheepValidationError) -> Self {
        use crate::domain::CheepValidationError;

        match value {
            CheepValidationError::TextTooLong { max, actual } => Self::text_too_long(max, actual),
            CheepValidationError::EmptyText => Self::empty_text(),
            CheepValidationError::NonPositiveId(id) => {
                Self::query(format!("invalid cheep id {id}"))
            }
        }
    }
}
