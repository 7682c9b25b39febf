//! HTTP inbound adapter exposing the JSON API and the simulator API.
//!
//! Handlers translate requests into driving-port calls on [`state::HttpState`]
//! and render domain results. No handler talks to a store directly.

pub mod cheeps;
pub mod error;
pub mod follows;
pub mod health;
pub mod identity;
pub mod outcomes;
pub mod schemas;
pub mod simulator;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub(crate) mod validation;

pub use error::ApiResult;
