//! Driving port for timeline reads.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Cheep, Error, UserId};

/// Timeline queries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedQuery: Send + Sync {
    /// Every user's cheeps, newest first.
    async fn public_timeline(&self, request: PageRequest) -> Result<Vec<Cheep>, Error>;

    /// Cheeps written by `user`.
    async fn own_timeline(&self, user: &UserId, request: PageRequest) -> Result<Vec<Cheep>, Error>;

    /// `user`'s own page followed by the same page of each followee.
    ///
    /// Pages are appended per author and never re-sorted, so the result is
    /// not globally ordered by time.
    async fn home_feed(&self, user: &UserId, request: PageRequest) -> Result<Vec<Cheep>, Error>;

    /// The timeline shown when `viewer` opens `author`'s page: the home feed
    /// when viewing oneself, otherwise the author's own timeline.
    async fn user_timeline(
        &self,
        viewer: Option<UserId>,
        author: &UserId,
        request: PageRequest,
    ) -> Result<Vec<Cheep>, Error>;
}
