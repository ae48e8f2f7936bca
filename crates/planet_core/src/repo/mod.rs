//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the storage port the planet service depends on.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes enforce `Planet::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateName`)
//!   in addition to DB transport errors.

pub mod planet_repo;
