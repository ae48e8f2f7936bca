//! Core domain logic for the planet catalog.
//! This crate owns the planet invariants, filter construction and storage port.

pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, flush_logging, init_logging, logging_status};
pub use model::planet::{Planet, PlanetId, PlanetValidationError};
pub use query::filter::{build_filter, MatchMode, PlanetAttribute, PlanetFilter};
pub use repo::planet_repo::{
    ErrorKind, PlanetRepository, RepoError, RepoResult, SqlitePlanetRepository,
};
pub use service::planet_service::PlanetService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
