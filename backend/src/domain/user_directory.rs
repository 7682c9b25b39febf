//! User lookups for adapters that address users by name.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::graph_service::map_user_error;
use crate::domain::ports::{UserQuery, UserRepository};
use crate::domain::{Error, User, UserId, Username};

/// Service implementing [`UserQuery`] over a [`UserRepository`].
#[derive(Clone)]
pub struct UserDirectory<U> {
    users: Arc<U>,
}

impl<U> UserDirectory<U> {
    /// Wrap a user store.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<U> UserQuery for UserDirectory<U>
where
    U: UserRepository,
{
    async fn by_id(&self, id: &UserId) -> Result<Option<User>, Error> {
        self.users.find_by_id(id).await.map_err(map_user_error)
    }

    async fn by_name(&self, username: &str) -> Result<Option<User>, Error> {
        let Ok(username) = Username::new(username) else {
            return Ok(None);
        };
        self.users
            .find_by_name(&username)
            .await
            .map_err(map_user_error)
    }
}
