//! Startup seeding orchestration.
//!
//! Seeding writes through the driven ports, so it works the same against the
//! in-memory store and PostgreSQL. A run is skipped when the first generated
//! username already exists, which makes restarts with the same seed a no-op.

use chrono::{DateTime, Utc};
use example_data::{ExampleNetwork, ExampleUser, GenerationError, generate_example_network};
use mockable::Clock;
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{
    CheepRepository, CheepRepositoryError, SocialGraphRepository, SocialGraphRepositoryError,
    UserRepository, UserRepositoryError,
};
use crate::domain::{FollowEdge, User, UserId, Username};
use crate::example_data::config::ExampleDataSettings;

/// Errors returned while executing startup seeding.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// The generator could not produce a network.
    #[error("example data generation failed: {0}")]
    Generation(#[from] GenerationError),
    /// A generated record was rejected by domain validation.
    #[error("generated record rejected: {message}")]
    InvalidRecord {
        /// Validation failure description.
        message: String,
    },
    #[error("user store error: {0}")]
    Users(#[from] UserRepositoryError),
    #[error("social graph error: {0}")]
    Graph(#[from] SocialGraphRepositoryError),
    #[error("cheep store error: {0}")]
    Cheeps(#[from] CheepRepositoryError),
}

impl StartupSeedingError {
    fn invalid(err: impl std::fmt::Display) -> Self {
        Self::InvalidRecord {
            message: err.to_string(),
        }
    }
}

/// Whether a seeding run wrote anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedingResult {
    Applied,
    AlreadySeeded,
}

/// Counts reported after a seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub seed: u64,
    pub users: usize,
    pub follows: usize,
    pub cheeps: usize,
    pub result: SeedingResult,
}

/// Apply example data on startup when enabled.
///
/// Returns `None` when seeding is disabled.
///
/// # Examples
///
/// ```rust,no_run
/// use chirp::example_data::{ExampleDataSettings, seed_example_data_on_startup};
/// use chirp::outbound::memory::InMemoryStore;
/// use mockable::DefaultClock;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let store = InMemoryStore::new();
/// let settings = ExampleDataSettings::disabled();
/// let summary =
///     seed_example_data_on_startup(&settings, &store, &store, &store, &DefaultClock).await?;
/// assert!(summary.is_none());
/// # Ok(())
/// # }
/// ```
pub async fn seed_example_data_on_startup(
    settings: &ExampleDataSettings,
    users: &dyn UserRepository,
    graph: &dyn SocialGraphRepository,
    cheeps: &dyn CheepRepository,
    clock: &dyn Clock,
) -> Result<Option<SeedSummary>, StartupSeedingError> {
    if !settings.is_enabled() {
        info!(reason = "disabled", "example data seeding skipped");
        return Ok(None);
    }

    let seed = settings.seed();
    let network = generate_example_network(seed, settings.user_count(), settings.cheeps_per_user())?;
    let mut summary = SeedSummary {
        seed,
        users: network.users.len(),
        follows: network.follows.len(),
        cheeps: network.cheeps.len(),
        result: SeedingResult::AlreadySeeded,
    };

    if already_seeded(&network, users).await? {
        info!(seed, users = summary.users, "example data seed already applied; skipping");
        return Ok(Some(summary));
    }

    apply(&network, users, graph, cheeps, clock.utc()).await?;
    summary.result = SeedingResult::Applied;
    info!(
        seed,
        users = summary.users,
        follows = summary.follows,
        cheeps = summary.cheeps,
        "example data seeding applied"
    );
    Ok(Some(summary))
}

async fn already_seeded(
    network: &ExampleNetwork,
    users: &dyn UserRepository,
) -> Result<bool, StartupSeedingError> {
    let Some(first) = network.users.first() else {
        return Ok(false);
    };
    let username = Username::new(first.username.as_str()).map_err(StartupSeedingError::invalid)?;
    Ok(users.find_by_name(&username).await?.is_some())
}

async fn apply(
    network: &ExampleNetwork,
    users: &dyn UserRepository,
    graph: &dyn SocialGraphRepository,
    cheeps: &dyn CheepRepository,
    followed_at: DateTime<Utc>,
) -> Result<(), StartupSeedingError> {
    for user in &network.users {
        users.insert(&to_domain_user(user)?).await?;
    }

    for follow in &network.follows {
        let follower = parse_id(&follow.follower_id)?;
        let followee = parse_id(&follow.followee_id)?;
        let edge =
            FollowEdge::new(follower, followee, followed_at).map_err(StartupSeedingError::invalid)?;
        graph.add_edge(&edge).await?;
    }

    for cheep in &network.cheeps {
        let author = parse_id(&cheep.author_id)?;
        let posted_at = DateTime::from_timestamp(cheep.posted_at, 0).ok_or_else(|| {
            StartupSeedingError::invalid(format!("timestamp {} out of range", cheep.posted_at))
        })?;
        cheeps.insert(&author, &cheep.text, posted_at).await?;
    }
    Ok(())
}

fn to_domain_user(user: &ExampleUser) -> Result<User, StartupSeedingError> {
    User::try_from_strings(user.id.as_str(), user.username.as_str(), user.email.as_str())
        .map_err(StartupSeedingError::invalid)
}

fn parse_id(id: &str) -> Result<UserId, StartupSeedingError> {
    UserId::new(id).map_err(StartupSeedingError::invalid)
}
