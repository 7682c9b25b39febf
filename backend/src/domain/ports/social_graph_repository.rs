//! Port for the social graph store.
//!
//! The store owns follow edges exclusively and enforces uniqueness of the
//! `(follower, followee)` pair. Duplicate inserts and missing deletes are
//! ordinary outcomes the caller branches on, not errors.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::domain::{AddEdgeOutcome, FollowEdge, RemoveEdgeOutcome, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by social graph adapters.
    pub enum SocialGraphRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "social graph connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "social graph query failed: {message}",
    }
}

/// Persistence contract for follow edges.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SocialGraphRepository: Send + Sync {
    /// Insert an edge, reporting [`AddEdgeOutcome::DuplicateEdge`] when the
    /// pair already exists. State is unchanged in that case.
    async fn add_edge(&self, edge: &FollowEdge) -> Result<AddEdgeOutcome, SocialGraphRepositoryError>;

    /// Delete an edge, reporting [`RemoveEdgeOutcome::EdgeNotFound`] when the
    /// pair is absent. Deletion is immediate; there is no soft-delete.
    async fn remove_edge(
        &self,
        follower: &UserId,
        followee: &UserId,
    ) -> Result<RemoveEdgeOutcome, SocialGraphRepositoryError>;

    /// Users following `user`. Order is unspecified.
    async fn followers_of(&self, user: &UserId) -> Result<Vec<User>, SocialGraphRepositoryError>;

    /// Identifiers of the users `user` follows.
    async fn followee_ids_of(
        &self,
        user: &UserId,
    ) -> Result<BTreeSet<UserId>, SocialGraphRepositoryError>;
}
