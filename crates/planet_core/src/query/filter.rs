//! Optional-attribute filter for planet listing.
//!
//! # Responsibility
//! - Absorb "climate only / terrain only / both / neither" branching once.
//! - Support typed optional inputs and planet-shaped filter templates.
//!
//! # Invariants
//! - No constraints => every planet matches.
//! - Multiple constraints combine with AND.
//! - An explicitly empty filter value matches nothing.
//! - Case folding is Unicode-aware and identical in SQL (`unicode_lower`)
//!   and in memory; SQL rendering needs a connection from `db::open_db*`.

use crate::db::functions::{fold_case, UNICODE_LOWER};
use crate::model::planet::Planet;
use rusqlite::types::Value;

/// How a present filter value is compared with the stored attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Case-insensitive substring match.
    #[default]
    Contains,
    /// Case-sensitive equality.
    Exact,
}

/// Filterable planet attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanetAttribute {
    Climate,
    Terrain,
}

impl PlanetAttribute {
    /// Column name in the `planets` table.
    pub fn column(self) -> &'static str {
        match self {
            Self::Climate => "climate",
            Self::Terrain => "terrain",
        }
    }

    fn value_of(self, planet: &Planet) -> &str {
        match self {
            Self::Climate => planet.climate.as_str(),
            Self::Terrain => planet.terrain.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Constraint {
    attribute: PlanetAttribute,
    value: String,
}

/// Predicate over planets built from optional climate/terrain values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanetFilter {
    constraints: Vec<Constraint>,
    mode: MatchMode,
}

/// Builds a filter from optional climate and terrain values.
///
/// Note the argument order: climate first, terrain second.
pub fn build_filter(climate: Option<&str>, terrain: Option<&str>) -> PlanetFilter {
    PlanetFilter::new(climate, terrain)
}

impl PlanetFilter {
    /// Creates a filter; `None` leaves the attribute unconstrained.
    pub fn new(climate: Option<&str>, terrain: Option<&str>) -> Self {
        let mut constraints = Vec::with_capacity(2);
        if let Some(value) = climate {
            constraints.push(Constraint {
                attribute: PlanetAttribute::Climate,
                value: value.to_string(),
            });
        }
        if let Some(value) = terrain {
            constraints.push(Constraint {
                attribute: PlanetAttribute::Terrain,
                value: value.to_string(),
            });
        }

        Self {
            constraints,
            mode: MatchMode::default(),
        }
    }

    /// Filter that matches every planet.
    pub fn all() -> Self {
        Self::default()
    }

    /// Creates a filter from a planet-shaped template.
    ///
    /// Non-empty `climate`/`terrain` become constraints; empty ones are
    /// unconstrained. `name` and `id` are ignored.
    pub fn from_template(template: &Planet) -> Self {
        Self::new(
            non_empty(template.climate.as_str()),
            non_empty(template.terrain.as_str()),
        )
    }

    /// Switches how present values are compared.
    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Returns the value constraining `attribute`, if any.
    pub fn value_for(&self, attribute: PlanetAttribute) -> Option<&str> {
        self.constraints
            .iter()
            .find(|constraint| constraint.attribute == attribute)
            .map(|constraint| constraint.value.as_str())
    }

    /// Returns whether this filter accepts every planet.
    pub fn is_unconstrained(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Evaluates the filter against one planet in memory.
    pub fn matches(&self, planet: &Planet) -> bool {
        self.constraints.iter().all(|constraint| {
            let stored = constraint.attribute.value_of(planet);
            if constraint.value.is_empty() {
                return false;
            }
            match self.mode {
                MatchMode::Contains => fold_case(stored).contains(&fold_case(&constraint.value)),
                MatchMode::Exact => stored == constraint.value,
            }
        })
    }

    /// Appends ` AND ...` conditions to a query that already has a `WHERE`.
    ///
    /// Values are always bound as parameters, never spliced into `sql`.
    pub fn push_sql_conditions(&self, sql: &mut String, bind_values: &mut Vec<Value>) {
        for constraint in &self.constraints {
            let column = constraint.attribute.column();
            if constraint.value.is_empty() {
                sql.push_str(" AND 0 = 1");
                continue;
            }

            match self.mode {
                MatchMode::Contains => {
                    sql.push_str(&format!(
                        " AND instr({UNICODE_LOWER}({column}), {UNICODE_LOWER}(?)) > 0"
                    ));
                }
                MatchMode::Exact => {
                    sql.push_str(&format!(" AND {column} = ?"));
                }
            }
            bind_values.push(Value::Text(constraint.value.clone()));
        }
    }
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
