//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep boundary layers decoupled from storage details.

pub mod planet_service;
