//! Timeline composition.
//!
//! The home feed is assembled by concatenation: the viewer's own page comes
//! first, then the same page of each followee in followee-id order. The
//! result is never merged by timestamp, so two cheeps from different authors
//! may appear out of chronological order. Clients relying on order must sort.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::cheep_service::map_cheep_error;
use crate::domain::graph_service::{map_graph_error, map_user_error};
use crate::domain::ports::{
    CheepRepository, FeedQuery, SocialGraphRepository, UserRepository,
};
use crate::domain::{Cheep, Error, UserId};

/// Read-side service implementing [`FeedQuery`].
#[derive(Clone)]
pub struct FeedComposer<U, G, C> {
    users: Arc<U>,
    graph: Arc<G>,
    cheeps: Arc<C>,
}

impl<U, G, C> FeedComposer<U, G, C> {
    /// Compose feeds from the three read-side stores.
    pub fn new(users: Arc<U>, graph: Arc<G>, cheeps: Arc<C>) -> Self {
        Self {
            users,
            graph,
            cheeps,
        }
    }
}

#[async_trait]
impl<U, G, C> FeedQuery for FeedComposer<U, G, C>
where
    U: UserRepository,
    G: SocialGraphRepository,
    C: CheepRepository,
{
    async fn public_timeline(&self, request: PageRequest) -> Result<Vec<Cheep>, Error> {
        self.cheeps.page(request).await.map_err(map_cheep_error)
    }

    async fn own_timeline(&self, user: &UserId, request: PageRequest) -> Result<Vec<Cheep>, Error> {
        self.cheeps
            .page_by_author(user, request)
            .await
            .map_err(map_cheep_error)
    }

    async fn home_feed(&self, user: &UserId, request: PageRequest) -> Result<Vec<Cheep>, Error> {
        let mut feed = self.own_timeline(user, request).await?;
        let followees = self
            .graph
            .followee_ids_of(user)
            .await
            .map_err(map_graph_error)?;
        for followee in &followees {
            let page = self.own_timeline(followee, request).await?;
            feed.extend(page);
        }
        Ok(feed)
    }

    async fn user_timeline(
        &self,
        viewer: Option<UserId>,
        author: &UserId,
        request: PageRequest,
    ) -> Result<Vec<Cheep>, Error> {
        let known = self
            .users
            .find_by_id(author)
            .await
            .map_err(map_user_error)?;
        if known.is_none() {
            return Err(Error::not_found(format!("user {author} not found")));
        }
        if viewer.as_ref() == Some(author) {
            self.home_feed(author, request).await
        } else {
            self.own_timeline(author, request).await
        }
    }
}

#[cfg(test)]
#[path = "feed_service_tests.rs"]
mod tests;
