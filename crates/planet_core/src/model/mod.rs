//! Domain model for the planet catalog.
//!
//! # Responsibility
//! - Define the canonical planet record shared by storage and service code.
//! - Own the field invariants checked before persistence.
//!
//! # Invariants
//! - A persisted planet always carries a storage-assigned `PlanetId`.
//! - Deletion is a hard delete; there is no tombstone state.

pub mod planet;
