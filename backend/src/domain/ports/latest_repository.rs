//! Port for the simulator's "latest processed command" counter.

use async_trait::async_trait;

use super::define_port_error;

/// Value reported before any command id has been recorded.
pub const LATEST_UNSET: i64 = -1;

define_port_error! {
    /// Errors raised by latest-counter adapters.
    pub enum LatestRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "latest repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "latest repository query failed: {message}",
    }
}

/// Single-value store for the most recent simulator command id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LatestRepository: Send + Sync {
    /// Current value, or [`LATEST_UNSET`] if never written.
    async fn get_latest(&self) -> Result<i64, LatestRepositoryError>;

    /// Overwrite the stored value.
    async fn update_latest(&self, latest: i64) -> Result<(), LatestRepositoryError>;
}
