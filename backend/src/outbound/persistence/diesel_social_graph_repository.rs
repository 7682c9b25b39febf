//! PostgreSQL-backed `SocialGraphRepository`.
//!
//! Edge uniqueness is enforced by the `(follower_id, followee_id)` primary
//! key; a conflicting insert affects no rows and is reported as
//! [`AddEdgeOutcome::DuplicateEdge`].

use std::collections::BTreeSet;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{SocialGraphRepository, SocialGraphRepositoryError};
use crate::domain::{AddEdgeOutcome, FollowEdge, RemoveEdgeOutcome, User, UserId};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::diesel_user_repository::row_to_user;
use super::models::{NewFollowRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{follows, users};

#[derive(Clone)]
pub struct DieselSocialGraphRepository {
    pool: DbPool,
}

impl DieselSocialGraphRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SocialGraphRepositoryError {
    map_basic_pool_error(error, SocialGraphRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> SocialGraphRepositoryError {
    map_basic_diesel_error(
        error,
        SocialGraphRepositoryError::query,
        SocialGraphRepositoryError::connection,
    )
}

#[async_trait]
impl SocialGraphRepository for DieselSocialGraphRepository {
    async fn add_edge(&self, edge: &FollowEdge) -> Result<AddEdgeOutcome, SocialGraphRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewFollowRow {
            follower_id: edge.follower().as_ref(),
            followee_id: edge.followee().as_ref(),
            created_at: edge.followed_at(),
        };
        let inserted = diesel::insert_into(follows::table)
            .values(&row)
            .on_conflict_do_nothing()
            .execute(&mut conn)
            .await;
        match inserted {
            Ok(0) => Ok(AddEdgeOutcome::DuplicateEdge),
            Ok(_) => Ok(AddEdgeOutcome::Added),
            Err(err) if is_unique_violation(&err) => Ok(AddEdgeOutcome::DuplicateEdge),
            Err(err) => Err(map_diesel_error(err)),
        }
    }

    async fn remove_edge(
        &self,
        follower: &UserId,
        followee: &UserId,
    ) -> Result<RemoveEdgeOutcome, SocialGraphRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(
            follows::table
                .filter(follows::follower_id.eq(follower.as_ref()))
                .filter(follows::followee_id.eq(followee.as_ref())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(if deleted == 0 {
            RemoveEdgeOutcome::EdgeNotFound
        } else {
            RemoveEdgeOutcome::Removed
        })
    }

    async fn followers_of(&self, user: &UserId) -> Result<Vec<User>, SocialGraphRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = follows::table
            .inner_join(users::table.on(users::id.eq(follows::follower_id)))
            .filter(follows::followee_id.eq(user.as_ref()))
            .order(users::username.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(row_to_user)
            .collect::<Result<_, _>>()
            .map_err(SocialGraphRepositoryError::query)
    }

    async fn followee_ids_of(
        &self,
        user: &UserId,
    ) -> Result<BTreeSet<UserId>, SocialGraphRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let ids: Vec<String> = follows::table
            .filter(follows::follower_id.eq(user.as_ref()))
            .select(follows::followee_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        ids.into_iter()
            .map(|raw| {
                UserId::new(raw.as_str())
                    .map_err(|err| SocialGraphRepositoryError::query(format!("invalid followee id {raw}: {err}")))
            })
            .collect()
    }
}
