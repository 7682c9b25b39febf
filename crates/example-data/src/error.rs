//! Error types for the example-data crate.

use thiserror::Error;

/// Errors that can occur while generating an example network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// No unused, valid username was produced within the retry budget.
    #[error("failed to generate a unique username after {max_attempts} attempts")]
    UsernameGenerationFailed {
        /// Number of attempts made before giving up.
        max_attempts: usize,
    },

    /// No non-empty cheep text was produced within the retry budget.
    #[error("failed to generate cheep text after {max_attempts} attempts")]
    CheepTextGenerationFailed {
        /// Number of attempts made before giving up.
        max_attempts: usize,
    },
}
