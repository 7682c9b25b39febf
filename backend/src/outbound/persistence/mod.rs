//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories translate between Diesel row structs (`models.rs`) and
//! domain types; no business rule lives here. Row structs and the table
//! definitions in `schema.rs` never leave this module.
//!
//! ```ignore
//! use chirp::outbound::persistence::{DbPool, DieselCheepRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/chirp")).await?;
//! let cheeps = DieselCheepRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_cheep_repository;
mod diesel_latest_repository;
mod diesel_social_graph_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_cheep_repository::DieselCheepRepository;
pub use diesel_latest_repository::DieselLatestRepository;
pub use diesel_social_graph_repository::DieselSocialGraphRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
