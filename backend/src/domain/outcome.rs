//! Typed results for follow and like operations.
//!
//! Each operation returns a closed set of variants. Callers branch on the
//! variant; the wire strings exist only for API clients that expect the
//! historic plain-text responses.

use serde::Serialize;

/// Coarse failure category shared by every outcome type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Success,
    /// The referenced cheep or user does not exist.
    NotFound,
    /// The relation already exists.
    Conflict,
    /// The request is malformed (blank target, self reference).
    Invalid,
    /// The relation to remove does not exist.
    NotFollowingOrNotLiked,
}

/// Behaviour shared by all operation outcomes.
pub trait Outcome {
    /// Category used to pick a transport status.
    fn kind(&self) -> OutcomeKind;

    /// Plain-text response expected by API clients.
    fn wire_message(&self) -> &'static str;

    /// Stable snake_case code naming the exact variant.
    fn code(&self) -> &'static str;

    /// Whether the operation took effect (or was already in effect).
    fn is_success(&self) -> bool {
        self.kind() == OutcomeKind::Success
    }
}

/// Result of asking the social graph store to insert an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddEdgeOutcome {
    Added,
    DuplicateEdge,
}

/// Result of asking the social graph store to delete an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveEdgeOutcome {
    Removed,
    EdgeNotFound,
}

/// Result of a follow request after business rules are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowOutcome {
    Followed,
    InvalidFollowee,
    SelfFollowRejected,
    FolloweeNotFound,
    AlreadyFollowing,
    /// The store rejected the insert; a concurrent follow won the race.
    DuplicateEdge,
}

impl Outcome for FollowOutcome {
    fn kind(&self) -> OutcomeKind {
        match self {
            Self::Followed => OutcomeKind::Success,
            Self::InvalidFollowee | Self::SelfFollowRejected => OutcomeKind::Invalid,
            Self::FolloweeNotFound => OutcomeKind::NotFound,
            Self::AlreadyFollowing | Self::DuplicateEdge => OutcomeKind::Conflict,
        }
    }

    fn wire_message(&self) -> &'static str {
        match self {
            Self::Followed => "successfully followed",
            _ => "failure to follow user",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Followed => "followed",
            Self::InvalidFollowee => "invalid_followee",
            Self::SelfFollowRejected => "self_follow_rejected",
            Self::FolloweeNotFound => "followee_not_found",
            Self::AlreadyFollowing => "already_following",
            Self::DuplicateEdge => "duplicate_edge",
        }
    }
}

impl From<AddEdgeOutcome> for FollowOutcome {
    fn from(value: AddEdgeOutcome) -> Self {
        match value {
            AddEdgeOutcome::Added => Self::Followed,
            AddEdgeOutcome::DuplicateEdge => Self::DuplicateEdge,
        }
    }
}

/// Result of an unfollow request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnfollowOutcome {
    Unfollowed,
    EdgeNotFound,
}

impl Outcome for UnfollowOutcome {
    fn kind(&self) -> OutcomeKind {
        match self {
            Self::Unfollowed => OutcomeKind::Success,
            Self::EdgeNotFound => OutcomeKind::NotFollowingOrNotLiked,
        }
    }

    fn wire_message(&self) -> &'static str {
        match self {
            Self::Unfollowed => "successfully unfollowed",
            Self::EdgeNotFound => "failure to unfollow user",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Unfollowed => "unfollowed",
            Self::EdgeNotFound => "edge_not_found",
        }
    }
}

impl From<RemoveEdgeOutcome> for UnfollowOutcome {
    fn from(value: RemoveEdgeOutcome) -> Self {
        match value {
            RemoveEdgeOutcome::Removed => Self::Unfollowed,
            RemoveEdgeOutcome::EdgeNotFound => Self::EdgeNotFound,
        }
    }
}

/// Result of liking a cheep. Liking twice is still [`LikeOutcome::Liked`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeOutcome {
    Liked,
    CheepNotFound,
}

impl Outcome for LikeOutcome {
    fn kind(&self) -> OutcomeKind {
        match self {
            Self::Liked => OutcomeKind::Success,
            Self::CheepNotFound => OutcomeKind::NotFound,
        }
    }

    fn wire_message(&self) -> &'static str {
        match self {
            Self::Liked => "Success",
            Self::CheepNotFound => "Cheep not found",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Liked => "liked",
            Self::CheepNotFound => "cheep_not_found",
        }
    }
}

/// Result of removing a like.
///
/// Unlike is deliberately not idempotent: removing a like that was never
/// given reports [`UnlikeOutcome::NotLiked`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlikeOutcome {
    Unliked,
    CheepNotFound,
    NotLiked,
}

impl Outcome for UnlikeOutcome {
    fn kind(&self) -> OutcomeKind {
        match self {
            Self::Unliked => OutcomeKind::Success,
            Self::CheepNotFound => OutcomeKind::NotFound,
            Self::NotLiked => OutcomeKind::NotFollowingOrNotLiked,
        }
    }

    fn wire_message(&self) -> &'static str {
        match self {
            Self::Unliked => "Success",
            Self::CheepNotFound => "Cheep not found",
            Self::NotLiked => "User has not liked this cheep",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Unliked => "unliked",
            Self::CheepNotFound => "cheep_not_found",
            Self::NotLiked => "not_liked",
        }
    }
}
