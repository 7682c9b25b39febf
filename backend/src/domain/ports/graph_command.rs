//! Driving ports for follow and unfollow requests.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::domain::{Error, FollowOutcome, UnfollowOutcome, User, UserId};

/// How a follow or unfollow request names its target.
///
/// The raw value is kept unvalidated so that a blank target can be reported
/// as [`FollowOutcome::InvalidFollowee`] rather than rejected up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowTarget {
    /// Target given by user identifier.
    Id(String),
    /// Target given by username.
    Username(String),
}

impl FollowTarget {
    /// The raw value supplied by the caller.
    pub fn raw(&self) -> &str {
        match self {
            Self::Id(raw) | Self::Username(raw) => raw.as_str(),
        }
    }

    /// Whether the raw value is empty or whitespace.
    pub fn is_blank(&self) -> bool {
        self.raw().trim().is_empty()
    }
}

/// Mutating operations on the social graph.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GraphCommand: Send + Sync {
    /// Make `follower` follow `target`, applying the follow rules in order:
    /// blank target, self-follow, unknown followee, already following.
    async fn follow(&self, follower: &UserId, target: FollowTarget)
    -> Result<FollowOutcome, Error>;

    /// Remove the edge from `follower` to `target`.
    async fn unfollow(
        &self,
        follower: &UserId,
        target: FollowTarget,
    ) -> Result<UnfollowOutcome, Error>;
}

/// Read operations on the social graph.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GraphQuery: Send + Sync {
    /// Users following `user`.
    async fn followers(&self, user: &UserId) -> Result<Vec<User>, Error>;

    /// Identifiers `user` follows.
    async fn followee_ids(&self, user: &UserId) -> Result<BTreeSet<UserId>, Error>;

    /// Resolved users `user` follows, ordered by username, at most `limit`.
    async fn followees(&self, user: &UserId, limit: usize) -> Result<Vec<User>, Error>;
}
