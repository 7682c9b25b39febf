//! Deterministic example data for Chirp demonstrations.
//!
//! The crate generates a small social network (users, follow relations and
//! cheeps) from a numeric seed. It deliberately knows nothing about backend
//! domain types; the backend converts the plain records at the point of use.
//!
//! # Example
//!
//! ```
//! use example_data::generate_example_network;
//!
//! let network = generate_example_network(42, 5, 3).expect("generation succeeds");
//!
//! assert_eq!(network.users.len(), 5);
//! assert_eq!(network.cheeps.len(), 15);
//! // The same seed always yields the same network.
//! assert_eq!(network, generate_example_network(42, 5, 3).expect("generation succeeds"));
//! ```

mod error;
mod generator;
mod seed;
mod validation;

pub use error::GenerationError;
pub use generator::generate_example_network;
pub use seed::{ExampleCheep, ExampleFollow, ExampleNetwork, ExampleUser};
pub use validation::{CHEEP_TEXT_MAX, USERNAME_MAX, fit_cheep_text, is_valid_username};
