//! Domain primitives, ports and services.
//!
//! Purpose: define the microblogging model (users, cheeps, follow edges and
//! the typed outcomes of operations on them) independently of any transport
//! or storage technology. Adapters depend on this module, never the reverse.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, UserId, Username, Email: validated identity types.
//! - Cheep, CheepId, CheepText: short messages and their like-sets.
//! - FollowEdge: a directed follower → followee relation.
//! - FollowOutcome, UnfollowOutcome, LikeOutcome, UnlikeOutcome: closed
//!   result sets for graph and like operations.
//! - GraphService, CheepService, FeedComposer, SimulatorService,
//!   UserDirectory: driving-port implementations.

pub mod cheep;
pub mod cheep_service;
pub mod error;
pub mod feed_service;
pub mod follow;
pub mod graph_service;
pub mod outcome;
pub mod ports;
pub mod simulator_service;
pub mod trace_id;
pub mod user;
pub mod user_directory;

pub use self::cheep::{
    CHEEP_TEXT_MAX, Cheep, CheepId, CheepText, CheepValidationError, sort_newest_first,
};
pub use self::cheep_service::CheepService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::feed_service::FeedComposer;
pub use self::follow::{FollowEdge, SelfFollowError};
pub use self::graph_service::GraphService;
pub use self::outcome::{
    AddEdgeOutcome, FollowOutcome, LikeOutcome, Outcome, OutcomeKind, RemoveEdgeOutcome,
    UnfollowOutcome, UnlikeOutcome,
};
pub use self::simulator_service::SimulatorService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    Email, USER_ID_MAX, USERNAME_MAX, User, UserId, UserValidationError, Username,
};
pub use self::user_directory::UserDirectory;
