//! Driving port for the load simulator's bookkeeping and registration.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{Error, User};

/// Registration payload sent by the simulator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Registration {
    /// Requested username.
    #[serde(default)]
    pub username: String,
    /// Contact email; must contain `@`.
    #[serde(default)]
    pub email: String,
    /// Password; checked for presence only.
    #[serde(default)]
    pub pwd: String,
}

/// Why a registration was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationRejection {
    MissingUsername,
    InvalidEmail,
    MissingPassword,
    UsernameTaken,
}

impl RegistrationRejection {
    /// Message reported to the simulator.
    pub fn message(self) -> &'static str {
        match self {
            Self::MissingUsername => "You have to enter a username",
            Self::InvalidEmail => "You have to enter a valid email address",
            Self::MissingPassword => "You have to enter a password",
            Self::UsernameTaken => "The username is already taken",
        }
    }
}

/// Result of a registration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Registered(User),
    Rejected(RegistrationRejection),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SimulatorCommand: Send + Sync {
    /// Most recently recorded command id, `-1` when none.
    async fn latest(&self) -> Result<i64, Error>;

    /// Store `latest` as the most recent command id.
    async fn record_latest(&self, latest: i64) -> Result<(), Error>;

    /// Validate and persist a new user.
    ///
    /// Checks run in order: username present, email containing `@`, password
    /// present, username unused. The first failing check is reported.
    async fn register(&self, registration: Registration) -> Result<RegistrationOutcome, Error>;
}
