//! Driving port resolving users for adapters that address them by name.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Read-only user lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserQuery: Send + Sync {
    /// Look a user up by identifier.
    async fn by_id(&self, id: &UserId) -> Result<Option<User>, Error>;

    /// Look a user up by username. Blank or over-long names yield `None`.
    async fn by_name(&self, username: &str) -> Result<Option<User>, Error>;
}
