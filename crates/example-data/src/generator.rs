//! Deterministic network generation.
//!
//! The same seed always produces identical users, follows and cheeps, so a
//! demo database can be rebuilt byte for byte.

use std::collections::BTreeSet;

use fake::Fake;
use fake::faker::lorem::raw::Sentence;
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::EN;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use crate::error::GenerationError;
use crate::seed::{ExampleCheep, ExampleFollow, ExampleNetwork, ExampleUser};
use crate::validation::{fit_cheep_text, is_valid_username, sanitize_username};

/// Maximum number of attempts to find an unused, valid username.
const MAX_NAME_ATTEMPTS: usize = 100;

/// Maximum number of attempts to produce non-blank cheep text.
const MAX_TEXT_ATTEMPTS: usize = 10;

/// Upper bound on how many users each generated user follows.
const MAX_FOLLOWS_PER_USER: usize = 3;

/// Posting time of the first cheep: 2024-01-01T00:00:00Z.
const BASE_POSTED_AT: i64 = 1_704_067_200;

/// Bounds for the gap between consecutive cheeps, in seconds.
const MIN_POST_GAP: i64 = 60;
const MAX_POST_GAP: i64 = 3_600;

/// Word count range passed to the lorem sentence generator.
const SENTENCE_WORDS: std::ops::Range<usize> = 4..18;

/// Generates a network of `user_count` users who each post
/// `cheeps_per_user` cheeps.
///
/// Every user follows up to three others; nobody follows themselves and no
/// relation appears twice. Cheeps from different authors are interleaved and
/// carry strictly increasing timestamps.
///
/// # Errors
///
/// Returns [`GenerationError`] when a unique username or non-blank cheep
/// text cannot be produced within the retry budget.
///
/// # Example
///
/// ```
/// use example_data::generate_example_network;
///
/// let network = generate_example_network(42, 5, 3).expect("generated");
/// assert_eq!(network.users.len(), 5);
/// assert_eq!(network.cheeps.len(), 15);
/// assert_eq!(network, generate_example_network(42, 5, 3).expect("generated"));
/// ```
pub fn generate_example_network(
    seed: u64,
    user_count: usize,
    cheeps_per_user: usize,
) -> Result<ExampleNetwork, GenerationError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let users = generate_users(&mut rng, user_count)?;
    let follows = generate_follows(&mut rng, &users);
    let cheeps = generate_cheeps(&mut rng, &users, cheeps_per_user)?;
    Ok(ExampleNetwork {
        users,
        follows,
        cheeps,
    })
}

fn generate_users(
    rng: &mut ChaCha8Rng,
    user_count: usize,
) -> Result<Vec<ExampleUser>, GenerationError> {
    let mut taken = BTreeSet::new();
    let mut users = Vec::with_capacity(user_count);
    for _ in 0..user_count {
        let id = Uuid::from_u128(rng.random()).to_string();
        let username = generate_username(rng, &mut taken)?;
        let email = format!("{}@example.com", username.to_lowercase());
        users.push(ExampleUser {
            id,
            username,
            email,
        });
    }
    Ok(users)
}

/// Draws `First_Last` names until one is valid and not yet taken.
///
/// Uniqueness is checked case-insensitively.
fn generate_username(
    rng: &mut ChaCha8Rng,
    taken: &mut BTreeSet<String>,
) -> Result<String, GenerationError> {
    for _ in 0..MAX_NAME_ATTEMPTS {
        let first: String = FirstName(EN).fake_with_rng(rng);
        let last: String = LastName(EN).fake_with_rng(rng);
        let candidate = sanitize_username(&format!("{first}_{last}"));
        if is_valid_username(&candidate) && taken.insert(candidate.to_lowercase()) {
            return Ok(candidate);
        }
    }
    Err(GenerationError::UsernameGenerationFailed {
        max_attempts: MAX_NAME_ATTEMPTS,
    })
}

fn generate_follows(rng: &mut ChaCha8Rng, users: &[ExampleUser]) -> Vec<ExampleFollow> {
    let mut follows = Vec::new();
    for follower in users {
        let mut candidates: Vec<&ExampleUser> =
            users.iter().filter(|u| u.id != follower.id).collect();
        let count = rng.random_range(0..=MAX_FOLLOWS_PER_USER.min(candidates.len()));
        candidates.shuffle(rng);
        follows.extend(candidates.into_iter().take(count).map(|followee| {
            ExampleFollow {
                follower_id: follower.id.clone(),
                followee_id: followee.id.clone(),
            }
        }));
    }
    follows
}

fn generate_cheeps(
    rng: &mut ChaCha8Rng,
    users: &[ExampleUser],
    cheeps_per_user: usize,
) -> Result<Vec<ExampleCheep>, GenerationError> {
    let mut authors: Vec<&ExampleUser> = users
        .iter()
        .flat_map(|user| std::iter::repeat_n(user, cheeps_per_user))
        .collect();
    authors.shuffle(rng);

    let mut posted_at = BASE_POSTED_AT;
    let mut cheeps = Vec::with_capacity(authors.len());
    for author in authors {
        posted_at = posted_at.saturating_add(rng.random_range(MIN_POST_GAP..=MAX_POST_GAP));
        cheeps.push(ExampleCheep {
            author_id: author.id.clone(),
            text: generate_text(rng)?,
            posted_at,
        });
    }
    Ok(cheeps)
}

fn generate_text(rng: &mut ChaCha8Rng) -> Result<String, GenerationError> {
    for _ in 0..MAX_TEXT_ATTEMPTS {
        let sentence: String = Sentence(EN, SENTENCE_WORDS).fake_with_rng(rng);
        if let Some(text) = fit_cheep_text(&sentence) {
            return Ok(text);
        }
    }
    Err(GenerationError::CheepTextGenerationFailed {
        max_attempts: MAX_TEXT_ATTEMPTS,
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn empty_network_is_empty() {
        let network = generate_example_network(7, 0, 4).expect("generated");
        assert_eq!(network, ExampleNetwork::default());
    }

    #[rstest]
    fn lone_user_follows_nobody() {
        let network = generate_example_network(7, 1, 2).expect("generated");
        assert!(network.follows.is_empty());
        assert_eq!(network.cheeps.len(), 2);
    }

    #[rstest]
    #[case(1)]
    #[case(99)]
    fn follow_counts_are_bounded(#[case] seed: u64) {
        let network = generate_example_network(seed, 10, 0).expect("generated");
        for user in &network.users {
            let count = network
                .follows
                .iter()
                .filter(|f| f.follower_id == user.id)
                .count();
            assert!(count <= MAX_FOLLOWS_PER_USER, "{} follows {count}", user.username);
        }
    }

    #[rstest]
    fn emails_derive_from_usernames() {
        let network = generate_example_network(3, 4, 0).expect("generated");
        for user in &network.users {
            assert_eq!(user.email, format!("{}@example.com", user.username.to_lowercase()));
        }
    }
}
