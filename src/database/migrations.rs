//! Versioned schema for the local storage database.
//!
//! Applied versions are tracked in `schema_version`; each entry of
//! [`MIGRATIONS`] above the stored version runs once, in order.

use rusqlite::{params, Connection};

/// Highest version in [`MIGRATIONS`].
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

type Migration = fn(&Connection) -> Result<(), rusqlite::Error>;

/// `(version, description, apply)`, ascending by version.
const MIGRATIONS: &[(i32, &str, Migration)] = &[(1, "Key/value local storage", create_local_storage)];

/// Stored schema version; 0 for a fresh database.
pub fn get_schema_version(conn: &Connection) -> i32 {
    conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
        row.get::<_, Option<i32>>(0)
    })
    .ok()
    .flatten()
    .unwrap_or(0)
}

/// Brings the schema up to [`CURRENT_SCHEMA_VERSION`].
///
/// # Errors
/// Returns `rusqlite::Error` if any statement fails.
pub fn run_all(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         CREATE TABLE IF NOT EXISTS schema_version (
             version     INTEGER PRIMARY KEY,
             description TEXT NOT NULL,
             applied_at  INTEGER NOT NULL
         );",
    )?;

    let applied = get_schema_version(conn);
    for (version, description, apply) in MIGRATIONS.iter().filter(|(v, _, _)| *v > applied) {
        apply(conn)?;
        conn.execute(
            "INSERT OR IGNORE INTO schema_version (version, description, applied_at)
             VALUES (?1, ?2, ?3)",
            params![version, description, chrono::Utc::now().timestamp()],
        )?;
        tracing::debug!(version, "Applied storage migration");
    }
    Ok(())
}

/// One row per storage key; values are opaque text.
fn create_local_storage(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS local_storage (
             key        TEXT PRIMARY KEY,
             value      TEXT NOT NULL,
             updated_at INTEGER NOT NULL
         );",
    )
}
