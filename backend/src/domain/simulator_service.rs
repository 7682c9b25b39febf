//! Simulator bookkeeping: the latest-command counter and user registration.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::graph_service::map_user_error;
use crate::domain::ports::{
    LatestRepository, LatestRepositoryError, Registration, RegistrationOutcome,
    RegistrationRejection, SimulatorCommand, UserRepository, UserRepositoryError,
};
use crate::domain::{Email, Error, User, UserId, UserValidationError, Username};

/// Service implementing [`SimulatorCommand`].
#[derive(Clone)]
pub struct SimulatorService<U, L> {
    users: Arc<U>,
    latest: Arc<L>,
}

impl<U, L> SimulatorService<U, L> {
    /// Build the service over the user store and the `latest` counter.
    pub fn new(users: Arc<U>, latest: Arc<L>) -> Self {
        Self { users, latest }
    }
}

fn map_latest_error(error: LatestRepositoryError) -> Error {
    match error {
        LatestRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("latest repository unavailable: {message}"))
        }
        LatestRepositoryError::Query { message } => {
            Error::internal(format!("latest repository error: {message}"))
        }
    }
}

/// Validate the payload fields in the order the simulator expects.
fn validate(registration: &Registration) -> Result<Result<User, RegistrationRejection>, Error> {
    let username = match Username::new(registration.username.as_str()) {
        Ok(username) => username,
        Err(UserValidationError::EmptyUsername) => {
            return Ok(Err(RegistrationRejection::MissingUsername));
        }
        Err(err) => return Err(Error::invalid_request(err.to_string())),
    };
    let Ok(email) = Email::new(registration.email.as_str()) else {
        return Ok(Err(RegistrationRejection::InvalidEmail));
    };
    if registration.pwd.is_empty() {
        return Ok(Err(RegistrationRejection::MissingPassword));
    }
    Ok(Ok(User::new(UserId::random(), username, email)))
}

#[async_trait]
impl<U, L> SimulatorCommand for SimulatorService<U, L>
where
    U: UserRepository,
    L: LatestRepository,
{
    async fn latest(&self) -> Result<i64, Error> {
        self.latest.get_latest().await.map_err(map_latest_error)
    }

    async fn record_latest(&self, latest: i64) -> Result<(), Error> {
        self.latest
            .update_latest(latest)
            .await
            .map_err(map_latest_error)
    }

    async fn register(&self, registration: Registration) -> Result<RegistrationOutcome, Error> {
        let user = match validate(&registration)? {
            Ok(user) => user,
            Err(rejection) => return Ok(RegistrationOutcome::Rejected(rejection)),
        };

        let existing = self
            .users
            .find_by_name(user.username())
            .await
            .map_err(map_user_error)?;
        if existing.is_some() {
            return Ok(RegistrationOutcome::Rejected(
                RegistrationRejection::UsernameTaken,
            ));
        }

        match self.users.insert(&user).await {
            Ok(()) => {
                info!(user_id = %user.id(), username = %user.username(), "user registered");
                Ok(RegistrationOutcome::Registered(user))
            }
            Err(UserRepositoryError::DuplicateUser { username }) => {
                warn!(%username, "registration lost a race for the username");
                Ok(RegistrationOutcome::Rejected(
                    RegistrationRejection::UsernameTaken,
                ))
            }
            Err(err) => Err(map_user_error(err)),
        }
    }
}
