//! Port for user lookup and registration.

use async_trait::async_trait;

use crate::domain::{Email, User, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "user repository query failed: {message}",
        /// A user with the same id or username already exists.
        DuplicateUser { username: String } =>
            "user {username} already exists",
    }
}

/// Port for reading and creating users.
///
/// Lookups return `Ok(None)` for unknown users; only infrastructure failures
/// are errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch a user by exact username.
    async fn find_by_name(&self, username: &Username)
    -> Result<Option<User>, UserRepositoryError>;

    /// Fetch a user by exact email address.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserRepositoryError>;

    /// Persist a new user.
    ///
    /// Returns [`UserRepositoryError::DuplicateUser`] when the id or username
    /// is taken.
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn duplicate_user_names_the_username() {
        let err = UserRepositoryError::duplicate_user("Helge");
        assert_eq!(err.to_string(), "user Helge already exists");
    }

    #[tokio::test]
    async fn mock_lookup_returns_configured_user() {
        let user = User::try_from_strings("u1", "Helge", "ropf@itu.dk").expect("valid user");
        let expected = user.clone();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(user)));

        let found = repo
            .find_by_id(expected.id())
            .await
            .expect("lookup succeeds");
        assert_eq!(found, Some(expected));
    }
}
