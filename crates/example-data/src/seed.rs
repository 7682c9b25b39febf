//! Generated record types.
//!
//! These types are independent of backend domain types to avoid a dependency
//! cycle; identifiers are plain strings and timestamps are Unix seconds.

use serde::{Deserialize, Serialize};

/// A generated user.
///
/// # Example
///
/// ```
/// use example_data::ExampleUser;
///
/// let user = ExampleUser {
///     id: "3fa85f64-5717-4562-b3fc-2c963f66afa6".to_owned(),
///     username: "Ada_Lovelace".to_owned(),
///     email: "ada_lovelace@example.com".to_owned(),
/// };
/// assert!(user.email.contains('@'));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleUser {
    /// Stable identifier (a UUID drawn from the seeded RNG).
    pub id: String,
    /// Unique username made of ASCII letters, digits and underscores.
    pub username: String,
    /// Contact address derived from the username.
    pub email: String,
}

/// A directed follow relation between two generated users.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleFollow {
    /// Id of the following user.
    pub follower_id: String,
    /// Id of the followed user.
    pub followee_id: String,
}

/// A generated cheep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleCheep {
    /// Id of the authoring user.
    pub author_id: String,
    /// Cheep text, at most [`crate::CHEEP_TEXT_MAX`] characters.
    pub text: String,
    /// Posting time in Unix seconds; strictly increasing across the network.
    pub posted_at: i64,
}

/// A complete generated network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleNetwork {
    /// Users in generation order.
    pub users: Vec<ExampleUser>,
    /// Follow relations; never reflexive, never duplicated.
    pub follows: Vec<ExampleFollow>,
    /// Cheeps in posting order.
    pub cheeps: Vec<ExampleCheep>,
}
