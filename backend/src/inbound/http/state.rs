//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CheepCommand, FeedQuery, GraphCommand, GraphQuery, SimulatorCommand, UserQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub graph: Arc<dyn GraphCommand>,
    pub graph_query: Arc<dyn GraphQuery>,
    pub cheeps: Arc<dyn CheepCommand>,
    pub feed: Arc<dyn FeedQuery>,
    pub users: Arc<dyn UserQuery>,
    pub simulator: Arc<dyn SimulatorCommand>,
}
