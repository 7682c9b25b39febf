//! PostgreSQL-backed `UserRepository`.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::Bool;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{Email, User, UserId, Username};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel implementation of [`UserRepository`].
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    map_basic_pool_error(error, UserRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    map_basic_diesel_error(
        error,
        UserRepositoryError::query,
        UserRepositoryError::connection,
    )
}

/// Rows failing domain validation are reported as query errors so a corrupt
/// row never reaches callers as a valid `User`.
pub(super) fn row_to_user(row: UserRow) -> Result<User, String> {
    User::try_from_strings(row.id.as_str(), row.username, row.email).map_err(|err| {
        warn!(user_id = %row.id, error = %err, "invalid user row");
        format!("invalid user row {}: {err}", row.id)
    })
}

type UserFilter = Box<dyn BoxableExpression<users::table, Pg, SqlType = Bool>>;

impl DieselUserRepository {
    async fn find_one(&self, filter: UserFilter) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(filter)
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_user)
            .transpose()
            .map_err(UserRepositoryError::query)
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        self.find_one(Box::new(users::id.eq(id.as_ref().to_owned())))
            .await
    }

    async fn find_by_name(&self, username: &Username) -> Result<Option<User>, UserRepositoryError> {
        self.find_one(Box::new(users::username.eq(username.as_ref().to_owned())))
            .await
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserRepositoryError> {
        self.find_one(Box::new(users::email.eq(email.as_ref().to_owned())))
            .await
    }

    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            id: user.id().as_ref(),
            username: user.username().as_ref(),
            email: user.email().as_ref(),
        };
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                if is_unique_violation(&err) {
                    UserRepositoryError::duplicate_user(user.username().to_string())
                } else {
                    map_diesel_error(err)
                }
            })
    }
}
