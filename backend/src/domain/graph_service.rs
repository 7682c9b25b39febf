//! Social graph service.
//!
//! Applies the follow rules on top of the social graph store. Rule order is
//! observable: a blank target is rejected before the self-follow check, which
//! runs before the followee lookup, which runs before the existing-edge
//! check. Only a request passing every rule reaches the store, and only on
//! behalf of a follower the user store knows.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    FollowTarget, GraphCommand, GraphQuery, SocialGraphRepository, SocialGraphRepositoryError,
    UserRepository, UserRepositoryError,
};
use crate::domain::{
    Error, FollowEdge, FollowOutcome, Outcome, UnfollowOutcome, User, UserId, Username,
};

/// How a follow target resolved against the user store.
#[derive(Debug, PartialEq, Eq)]
enum Resolved {
    Itself,
    Missing,
    Found(UserId),
}

/// Follow/unfollow service over a user store and a social graph store.
#[derive(Clone)]
pub struct GraphService<U, G> {
    users: Arc<U>,
    graph: Arc<G>,
    clock: Arc<dyn Clock>,
}

impl<U, G> GraphService<U, G> {
    /// Build the service over the user and graph stores. `clock` stamps new
    /// follow edges.
    pub fn new(users: Arc<U>, graph: Arc<G>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            graph,
            clock,
        }
    }
}

pub(crate) fn map_user_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::DuplicateUser { username } => {
            Error::conflict(format!("user {username} already exists"))
        }
    }
}

pub(crate) fn map_graph_error(error: SocialGraphRepositoryError) -> Error {
    match error {
        SocialGraphRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("social graph unavailable: {message}"))
        }
        SocialGraphRepositoryError::Query { message } => {
            Error::internal(format!("social graph error: {message}"))
        }
    }
}

impl<U, G> GraphService<U, G>
where
    U: UserRepository,
    G: SocialGraphRepository,
{
    async fn resolve(&self, follower: &UserId, target: &FollowTarget) -> Result<Resolved, Error> {
        match target {
            FollowTarget::Id(raw) => {
                if raw == follower.as_ref() {
                    return Ok(Resolved::Itself);
                }
                let Ok(id) = UserId::new(raw.as_str()) else {
                    return Ok(Resolved::Missing);
                };
                let found = self
                    .users
                    .find_by_id(&id)
                    .await
                    .map_err(map_user_error)?;
                Ok(found.map_or(Resolved::Missing, |_| Resolved::Found(id)))
            }
            FollowTarget::Username(raw) => {
                let me = self
                    .users
                    .find_by_id(follower)
                    .await
                    .map_err(map_user_error)?;
                if me.is_some_and(|user| user.username().as_ref() == raw) {
                    return Ok(Resolved::Itself);
                }
                let Ok(username) = Username::new(raw.as_str()) else {
                    return Ok(Resolved::Missing);
                };
                let found = self
                    .users
                    .find_by_name(&username)
                    .await
                    .map_err(map_user_error)?;
                Ok(match found {
                    Some(user) if user.id() == follower => Resolved::Itself,
                    Some(user) => Resolved::Found(user.id().clone()),
                    None => Resolved::Missing,
                })
            }
        }
    }
}

#[async_trait]
impl<U, G> GraphCommand for GraphService<U, G>
where
    U: UserRepository,
    G: SocialGraphRepository,
{
    async fn follow(
        &self,
        follower: &UserId,
        target: FollowTarget,
    ) -> Result<FollowOutcome, Error> {
        if target.is_blank() {
            return Ok(FollowOutcome::InvalidFollowee);
        }
        let followee = match self.resolve(follower, &target).await? {
            Resolved::Itself => return Ok(FollowOutcome::SelfFollowRejected),
            Resolved::Missing => return Ok(FollowOutcome::FolloweeNotFound),
            Resolved::Found(id) => id,
        };

        let known = self
            .users
            .find_by_id(follower)
            .await
            .map_err(map_user_error)?;
        if known.is_none() {
            return Err(Error::not_found(format!("user {follower} not found")));
        }

        let following = self
            .graph
            .followee_ids_of(follower)
            .await
            .map_err(map_graph_error)?;
        if following.contains(&followee) {
            return Ok(FollowOutcome::AlreadyFollowing);
        }

        let Ok(edge) = FollowEdge::new(follower.clone(), followee, self.clock.utc()) else {
            return Ok(FollowOutcome::SelfFollowRejected);
        };
        let outcome: FollowOutcome = self
            .graph
            .add_edge(&edge)
            .await
            .map_err(map_graph_error)?
            .into();
        info!(
            follower = %edge.follower(),
            followee = %edge.followee(),
            outcome = outcome.code(),
            "follow processed"
        );
        Ok(outcome)
    }

    async fn unfollow(
        &self,
        follower: &UserId,
        target: FollowTarget,
    ) -> Result<UnfollowOutcome, Error> {
        if target.is_blank() {
            return Ok(UnfollowOutcome::EdgeNotFound);
        }
        let followee = match self.resolve(follower, &target).await? {
            Resolved::Found(id) => id,
            Resolved::Itself | Resolved::Missing => return Ok(UnfollowOutcome::EdgeNotFound),
        };
        let outcome: UnfollowOutcome = self
            .graph
            .remove_edge(follower, &followee)
            .await
            .map_err(map_graph_error)?
            .into();
        info!(
            follower = %follower,
            followee = %followee,
            outcome = outcome.code(),
            "unfollow processed"
        );
        Ok(outcome)
    }
}

#[async_trait]
impl<U, G> GraphQuery for GraphService<U, G>
where
    U: UserRepository,
    G: SocialGraphRepository,
{
    async fn followers(&self, user: &UserId) -> Result<Vec<User>, Error> {
        self.graph
            .followers_of(user)
            .await
            .map_err(map_graph_error)
    }

    async fn followee_ids(&self, user: &UserId) -> Result<BTreeSet<UserId>, Error> {
        self.graph
            .followee_ids_of(user)
            .await
            .map_err(map_graph_error)
    }

    async fn followees(&self, user: &UserId, limit: usize) -> Result<Vec<User>, Error> {
        let ids = self
            .graph
            .followee_ids_of(user)
            .await
            .map_err(map_graph_error)?;
        let mut users = Vec::with_capacity(ids.len());
        for id in &ids {
            if let Some(found) = self.users.find_by_id(id).await.map_err(map_user_error)? {
                users.push(found);
            }
        }
        users.sort_by(|a, b| a.username().as_ref().cmp(b.username().as_ref()));
        users.truncate(limit);
        Ok(users)
    }
}

#[cfg(test)]
#[path = "graph_service_tests.rs"]
mod tests;
