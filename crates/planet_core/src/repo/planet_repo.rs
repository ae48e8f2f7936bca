//! Planet repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide the storage port the planet service depends on.
//! - Keep SQL details and constraint-error decoding inside the repository.
//!
//! # Invariants
//! - Write paths call `Planet::validate()` before SQL mutations.
//! - Name uniqueness is decided by the `UNIQUE` constraint during `INSERT`;
//!   there is no check-then-insert.
//! - Listing order is insertion order (`id ASC`).
//! - Read paths reject invalid persisted rows instead of masking them.

use crate::db::migrations::{current_version, latest_version};
use crate::db::DbError;
use crate::model::planet::{Planet, PlanetId, PlanetValidationError};
use crate::query::filter::PlanetFilter;
use rusqlite::types::Value;
use rusqlite::{ffi, params, params_from_iter, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PLANET_SELECT_SQL: &str = "SELECT
    id,
    name,
    climate,
    terrain
FROM planets";

pub type RepoResult<T> = Result<T, RepoError>;

/// Coarse error classification used by boundary layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required attribute is missing or empty.
    Validation,
    /// A uniqueness rule was broken.
    Conflict,
    /// The addressed planet does not exist.
    NotFound,
    /// Storage or schema failure.
    Storage,
}

/// Repository error for planet persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(PlanetValidationError),
    /// Another planet already uses this name.
    DuplicateName(String),
    /// Another planet already uses this explicit id.
    DuplicateId(PlanetId),
    NotFound(PlanetId),
    Db(DbError),
    InvalidData(String),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl RepoError {
    /// Classifies this error for boundary translation.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::DuplicateName(_) | Self::DuplicateId(_) => ErrorKind::Conflict,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Db(_)
            | Self::InvalidData(_)
            | Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. } => ErrorKind::Storage,
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateName(name) => write!(f, "planet name already exists: `{name}`"),
            Self::DuplicateId(id) => write!(f, "planet id already exists: {id}"),
            Self::NotFound(id) => write!(f, "planet not found: {id}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted planet data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "planet repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "planet repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "planet repository requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PlanetValidationError> for RepoError {
    fn from(value: PlanetValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage port for planet records.
pub trait PlanetRepository {
    /// Persists a planet and returns it with its assigned id.
    fn save(&self, planet: &Planet) -> RepoResult<Planet>;
    fn find_by_id(&self, id: PlanetId) -> RepoResult<Option<Planet>>;
    /// Exact, case-sensitive name lookup.
    fn find_by_name(&self, name: &str) -> RepoResult<Option<Planet>>;
    /// Returns matching planets in insertion order; empty when none match.
    fn find_by_filter(&self, filter: &PlanetFilter) -> RepoResult<Vec<Planet>>;
    /// Hard-deletes a planet; `NotFound` when the id does not exist.
    fn delete_by_id(&self, id: PlanetId) -> RepoResult<()>;
}

impl<R: PlanetRepository + ?Sized> PlanetRepository for &R {
    fn save(&self, planet: &Planet) -> RepoResult<Planet> {
        (**self).save(planet)
    }

    fn find_by_id(&self, id: PlanetId) -> RepoResult<Option<Planet>> {
        (**self).find_by_id(id)
    }

    fn find_by_name(&self, name: &str) -> RepoResult<Option<Planet>> {
        (**self).find_by_name(name)
    }

    fn find_by_filter(&self, filter: &PlanetFilter) -> RepoResult<Vec<Planet>> {
        (**self).find_by_filter(filter)
    }

    fn delete_by_id(&self, id: PlanetId) -> RepoResult<()> {
        (**self).delete_by_id(id)
    }
}

/// SQLite-backed planet repository.
pub struct SqlitePlanetRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePlanetRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` for foreign schemas.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_planet_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl PlanetRepository for SqlitePlanetRepository<'_> {
    fn save(&self, planet: &Planet) -> RepoResult<Planet> {
        planet.validate()?;

        self.conn
            .execute(
                "INSERT INTO planets (id, name, climate, terrain) VALUES (?1, ?2, ?3, ?4);",
                params![
                    planet.id(),
                    planet.name.as_str(),
                    planet.climate.as_str(),
                    planet.terrain.as_str(),
                ],
            )
            .map_err(|err| map_insert_error(err, planet))?;

        let mut stored = planet.clone();
        if !stored.is_persisted() {
            stored.assign_id(self.conn.last_insert_rowid())?;
        }
        Ok(stored)
    }

    fn find_by_id(&self, id: PlanetId) -> RepoResult<Option<Planet>> {
        self.find_one(&format!("{PLANET_SELECT_SQL} WHERE id = ?1;"), Value::Integer(id))
    }

    fn find_by_name(&self, name: &str) -> RepoResult<Option<Planet>> {
        self.find_one(
            &format!("{PLANET_SELECT_SQL} WHERE name = ?1;"),
            Value::Text(name.to_string()),
        )
    }

    fn find_by_filter(&self, filter: &PlanetFilter) -> RepoResult<Vec<Planet>> {
        let mut sql = format!("{PLANET_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();
        filter.push_sql_conditions(&mut sql, &mut bind_values);
        sql.push_str(" ORDER BY id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut planets = Vec::new();

        while let Some(row) = rows.next()? {
            planets.push(parse_planet_row(row)?);
        }

        Ok(planets)
    }

    fn delete_by_id(&self, id: PlanetId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM planets WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

impl SqlitePlanetRepository<'_> {
    fn find_one(&self, sql: &str, key: Value) -> RepoResult<Option<Planet>> {
        let mut stmt = self.conn.prepare(sql)?;
        let row = stmt
            .query_row([key], |row| Ok(parse_planet_row(row)))
            .optional()?;
        row.transpose()
    }
}

fn parse_planet_row(row: &Row<'_>) -> RepoResult<Planet> {
    let id: PlanetId = row.get("id")?;
    let planet = Planet::with_id(
        id,
        row.get::<_, String>("name")?,
        row.get::<_, String>("climate")?,
        row.get::<_, String>("terrain")?,
    )
    .map_err(|err| RepoError::InvalidData(format!("planets row {id}: {err}")))?;

    planet
        .validate()
        .map_err(|err| RepoError::InvalidData(format!("planets row {id}: {err}")))?;
    Ok(planet)
}

fn map_insert_error(err: rusqlite::Error, planet: &Planet) -> RepoError {
    if let rusqlite::Error::SqliteFailure(failure, _) = &err {
        match (failure.extended_code, planet.id()) {
            (ffi::SQLITE_CONSTRAINT_UNIQUE, _) => {
                return RepoError::DuplicateName(planet.name.clone());
            }
            (ffi::SQLITE_CONSTRAINT_PRIMARYKEY, Some(id)) => {
                return RepoError::DuplicateId(id);
            }
            _ => {}
        }
    }
    RepoError::from(err)
}

fn ensure_planet_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "planets")? {
        return Err(RepoError::MissingRequiredTable("planets"));
    }

    for column in ["id", "name", "climate", "terrain"] {
        if !table_has_column(conn, "planets", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "planets",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
