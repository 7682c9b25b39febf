//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters and
//! report failures through typed errors built with `define_port_error!`.
//! Driving ports (`*Command`, `*Query`) are implemented by domain services
//! and consumed by inbound adapters; they speak in [`crate::domain::Error`].

mod macros;
pub(crate) use macros::define_port_error;

mod cheep_command;
mod cheep_repository;
mod feed_query;
mod graph_command;
mod latest_repository;
mod simulator_command;
mod social_graph_repository;
mod user_query;
mod user_repository;

#[cfg(test)]
pub use cheep_command::MockCheepCommand;
pub use cheep_command::CheepCommand;
#[cfg(test)]
pub use cheep_repository::MockCheepRepository;
pub use cheep_repository::{CheepRepository, CheepRepositoryError};
#[cfg(test)]
pub use feed_query::MockFeedQuery;
pub use feed_query::FeedQuery;
#[cfg(test)]
pub use graph_command::{MockGraphCommand, MockGraphQuery};
pub use graph_command::{FollowTarget, GraphCommand, GraphQuery};
#[cfg(test)]
pub use latest_repository::MockLatestRepository;
pub use latest_repository::{LATEST_UNSET, LatestRepository, LatestRepositoryError};
#[cfg(test)]
pub use simulator_command::MockSimulatorCommand;
pub use simulator_command::{
    Registration, RegistrationOutcome, RegistrationRejection, SimulatorCommand,
};
#[cfg(test)]
pub use social_graph_repository::MockSocialGraphRepository;
pub use social_graph_repository::{SocialGraphRepository, SocialGraphRepositoryError};
#[cfg(test)]
pub use user_query::MockUserQuery;
pub use user_query::UserQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
