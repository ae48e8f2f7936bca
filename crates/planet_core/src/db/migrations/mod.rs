//! Embedded schema migrations.
//!
//! # Responsibility
//! - List the planet schema migrations shipped with this binary.
//! - Bring a connection from its recorded version to `latest_version()`.
//!
//! # Invariants
//! - Versions start at 1 and increase by exactly one.
//! - All pending migrations commit together or not at all.
//! - The applied version is recorded in `PRAGMA user_version`.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "create_planets",
    sql: include_str!("0001_init.sql"),
}];

/// Highest schema version this binary can produce.
pub fn latest_version() -> u32 {
    MIGRATIONS.len() as u32
}

/// Schema version recorded in `conn` (0 for a fresh database).
pub fn current_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

fn pending(from_version: u32) -> impl Iterator<Item = &'static Migration> {
    MIGRATIONS
        .iter()
        .skip_while(move |migration| migration.version <= from_version)
}

/// Applies pending migrations and returns how many ran.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the database is newer than this binary.
/// - `Migration` naming the step whose SQL failed; nothing is committed.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<usize> {
    let from_version = current_version(conn)?;
    let latest = latest_version();
    if from_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: latest,
        });
    }

    let tx = conn.transaction()?;
    let mut applied = 0;
    for migration in pending(from_version) {
        tx.execute_batch(migration.sql)
            .and_then(|()| tx.pragma_update(None, "user_version", migration.version))
            .map_err(|source| DbError::Migration {
                version: migration.version,
                name: migration.name,
                source,
            })?;
        info!(
            "event=db_migrate module=db status=ok version={} name={}",
            migration.version, migration.name
        );
        applied += 1;
    }
    tx.commit()?;

    Ok(applied)
}
