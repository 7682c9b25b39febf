//! Directed follow edges between users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;

/// Raised when an edge would point a user at themselves.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("user {0} cannot follow themselves")]
pub struct SelfFollowError(pub UserId);

/// A follow relationship keyed by `(follower, followee)`.
///
/// ## Invariants
/// - `follower != followee`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowEdge {
    follower: UserId,
    followee: UserId,
    followed_at: DateTime<Utc>,
}

impl FollowEdge {
    /// Validate and construct an edge.
    pub fn new(
        follower: UserId,
        followee: UserId,
        followed_at: DateTime<Utc>,
    ) -> Result<Self, SelfFollowError> {
        if follower == followee {
            return Err(SelfFollowError(follower));
        }
        Ok(Self {
            follower,
            followee,
            followed_at,
        })
    }

    /// The user receiving cheeps.
    pub fn follower(&self) -> &UserId {
        &self.follower
    }

    /// The user being followed.
    pub fn followee(&self) -> &UserId {
        &self.followee
    }

    /// When the edge was created.
    pub fn followed_at(&self) -> DateTime<Utc> {
        self.followed_at
    }

    /// Composite key of the edge.
    pub fn key(&self) -> (&UserId, &UserId) {
        (&self.follower, &self.followee)
    }
}
