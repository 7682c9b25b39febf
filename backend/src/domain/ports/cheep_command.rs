//! Driving port for posting and liking cheeps.

use async_trait::async_trait;

use crate::domain::{Cheep, CheepId, Error, LikeOutcome, UnlikeOutcome, UserId};

/// Mutating operations on cheeps.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheepCommand: Send + Sync {
    /// Publish `text` as `author`, stamped with the current time.
    ///
    /// # Errors
    ///
    /// - `NotFound` when the author does not exist.
    /// - `InvalidRequest` when the text is blank or longer than 160 characters.
    async fn post_cheep(&self, author: &UserId, text: &str) -> Result<Cheep, Error>;

    /// Like a cheep. Repeating a like reports success again.
    async fn like(&self, user: &UserId, cheep: CheepId) -> Result<LikeOutcome, Error>;

    /// Remove a like.
    async fn unlike(&self, user: &UserId, cheep: CheepId) -> Result<UnlikeOutcome, Error>;
}
