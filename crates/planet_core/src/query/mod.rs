//! Planet filter construction.
//!
//! # Responsibility
//! - Turn optional attribute values into one predicate object.
//! - Render that predicate both as SQL conditions and as an in-memory check.
//!
//! # Invariants
//! - Absent attributes never constrain results.
//! - SQL and in-memory renditions accept exactly the same planets.

pub mod filter;
