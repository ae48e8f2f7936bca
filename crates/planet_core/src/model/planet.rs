//! Planet domain model.
//!
//! # Responsibility
//! - Define the planet record and its storage identifier.
//! - Validate required attributes before a planet reaches storage.
//!
//! # Invariants
//! - `name`, `climate` and `terrain` are non-empty for persisted planets.
//! - `id` is `None` before persistence and is assigned exactly once.
//! - Filter templates reuse this shape but are never validated or persisted.

use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned planet identifier (SQLite rowid).
pub type PlanetId = i64;

/// Validation failures for planet records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanetValidationError {
    EmptyName,
    EmptyClimate,
    EmptyTerrain,
    /// Identifiers are assigned by storage and must be positive.
    InvalidId(PlanetId),
    /// `assign_id` was called on a planet that already has an id.
    IdAlreadyAssigned(PlanetId),
}

impl Display for PlanetValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "planet name must not be empty"),
            Self::EmptyClimate => write!(f, "planet climate must not be empty"),
            Self::EmptyTerrain => write!(f, "planet terrain must not be empty"),
            Self::InvalidId(id) => write!(f, "planet id must be positive, got {id}"),
            Self::IdAlreadyAssigned(id) => write!(f, "planet id already assigned: {id}"),
        }
    }
}

impl Error for PlanetValidationError {}

/// Canonical planet record.
///
/// Missing or `null` string attributes decode as empty so that they are
/// rejected by `validate()` rather than by the decoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Planet {
    #[serde(default)]
    id: Option<PlanetId>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub climate: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub terrain: String,
}

impl Planet {
    /// Creates an unsaved planet. Storage assigns the id on save.
    pub fn new(
        name: impl Into<String>,
        climate: impl Into<String>,
        terrain: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            climate: climate.into(),
            terrain: terrain.into(),
        }
    }

    /// Creates a planet with a known identifier.
    ///
    /// Used by row parsing and import paths where identity already exists.
    ///
    /// # Errors
    /// - `InvalidId` when `id` is zero or negative.
    pub fn with_id(
        id: PlanetId,
        name: impl Into<String>,
        climate: impl Into<String>,
        terrain: impl Into<String>,
    ) -> Result<Self, PlanetValidationError> {
        ensure_positive_id(id)?;
        let mut planet = Self::new(name, climate, terrain);
        planet.id = Some(id);
        Ok(planet)
    }

    /// Creates a filter template carrying only climate/terrain.
    ///
    /// Empty strings mean "unconstrained" for that attribute. Templates are
    /// not valid planets and must never be saved.
    pub fn template(climate: impl Into<String>, terrain: impl Into<String>) -> Self {
        Self::new(String::new(), climate, terrain)
    }

    /// Returns the storage identifier, if the planet has been persisted.
    pub fn id(&self) -> Option<PlanetId> {
        self.id
    }

    /// Returns whether storage has assigned an id yet.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Sets the storage identifier exactly once.
    pub fn assign_id(&mut self, id: PlanetId) -> Result<(), PlanetValidationError> {
        ensure_positive_id(id)?;
        if let Some(existing) = self.id {
            return Err(PlanetValidationError::IdAlreadyAssigned(existing));
        }
        self.id = Some(id);
        Ok(())
    }

    /// Checks persistence invariants.
    ///
    /// Whitespace-only attributes count as empty.
    pub fn validate(&self) -> Result<(), PlanetValidationError> {
        if let Some(id) = self.id {
            ensure_positive_id(id)?;
        }
        if is_blank(&self.name) {
            return Err(PlanetValidationError::EmptyName);
        }
        if is_blank(&self.climate) {
            return Err(PlanetValidationError::EmptyClimate);
        }
        if is_blank(&self.terrain) {
            return Err(PlanetValidationError::EmptyTerrain);
        }
        Ok(())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn ensure_positive_id(id: PlanetId) -> Result<(), PlanetValidationError> {
    if id <= 0 {
        return Err(PlanetValidationError::InvalidId(id));
    }
    Ok(())
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
