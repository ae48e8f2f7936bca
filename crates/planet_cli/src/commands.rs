//! Command execution and boundary error translation.
//!
//! # Responsibility
//! - Run one subcommand against the planet service.
//! - Map repository error kinds to stable exit codes and messages.
//!
//! # Invariants
//! - Read misses (`get`, `get-by-name`) are reported as not found here; the
//!   service itself returns `Ok(None)`.

use crate::cli::{Command, CreateArgs, ListArgs};
use planet_core::{
    ErrorKind, MatchMode, Planet, PlanetRepository, PlanetService, RepoError,
};
use serde::Serialize;
use serde_json::Value;

/// Process exit codes per error kind.
pub mod exit_code {
    pub const OK: i32 = 0;
    pub const FAILURE: i32 = 1;
    pub const NOT_FOUND: i32 = 3;
    pub const UNPROCESSABLE: i32 = 4;
    pub const CONFLICT: i32 = 5;
}

/// Result of one command: JSON body on success, or a boundary failure.
#[derive(Debug)]
pub enum Outcome {
    Ok(Value),
    Failed { code: i32, message: String },
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Ok(_) => exit_code::OK,
            Self::Failed { code, .. } => *code,
        }
    }

    /// Generic failure outside the repository error kinds.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failed {
            code: exit_code::FAILURE,
            message: message.into(),
        }
    }

    fn not_found(what: impl Into<String>) -> Self {
        Self::Failed {
            code: exit_code::NOT_FOUND,
            message: what.into(),
        }
    }
}

impl From<RepoError> for Outcome {
    fn from(err: RepoError) -> Self {
        let (code, label) = match err.kind() {
            ErrorKind::Validation => (exit_code::UNPROCESSABLE, "unprocessable"),
            ErrorKind::Conflict => (exit_code::CONFLICT, "conflict"),
            ErrorKind::NotFound => (exit_code::NOT_FOUND, "not found"),
            ErrorKind::Storage => (exit_code::FAILURE, "storage failure"),
        };
        Self::Failed {
            code,
            message: format!("{label}: {err}"),
        }
    }
}

/// Runs one command and converts every result into an [`Outcome`].
pub fn run<R: PlanetRepository>(service: &PlanetService<R>, command: &Command) -> Outcome {
    match command {
        Command::Create(args) => create(service, args),
        Command::Get { id } => match service.get(*id) {
            Ok(Some(planet)) => json(&planet),
            Ok(None) => Outcome::not_found(format!("planet not found: {id}")),
            Err(err) => err.into(),
        },
        Command::GetByName { name } => match service.get_by_name(name) {
            Ok(Some(planet)) => json(&planet),
            Ok(None) => Outcome::not_found(format!("planet not found: `{name}`")),
            Err(err) => err.into(),
        },
        Command::List(args) => list(service, args),
        Command::Remove { id } => match service.remove(*id) {
            Ok(()) => Outcome::Ok(Value::Null),
            Err(err) => err.into(),
        },
    }
}

fn create<R: PlanetRepository>(service: &PlanetService<R>, args: &CreateArgs) -> Outcome {
    let planet = Planet::new(
        args.name.trim(),
        args.climate.trim(),
        args.terrain.trim(),
    );
    match service.create(&planet) {
        Ok(stored) => json(&stored),
        Err(err) => err.into(),
    }
}

fn list<R: PlanetRepository>(service: &PlanetService<R>, args: &ListArgs) -> Outcome {
    let mode = if args.exact {
        MatchMode::Exact
    } else {
        MatchMode::Contains
    };
    match service.list_with_mode(args.terrain.as_deref(), args.climate.as_deref(), mode) {
        Ok(planets) => json(&planets),
        Err(err) => err.into(),
    }
}

fn json(value: &impl Serialize) -> Outcome {
    match serde_json::to_value(value) {
        Ok(body) => Outcome::Ok(body),
        Err(err) => Outcome::failure(format!("failed to encode response: {err}")),
    }
}
