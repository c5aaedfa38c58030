//! Schema migrations, applied in order and tracked in `schema_version`.

mod v001_session_tables;
mod v002_session_activity;

use rusqlite::Connection;
use tracing::info;

use examforge_core::errors::{ForgeResult, StorageError};

use crate::to_storage_err;

type Migration = fn(&Connection) -> ForgeResult<()>;

const MIGRATIONS: &[(u32, Migration)] = &[
    (1, v001_session_tables::migrate),
    (2, v002_session_activity::migrate),
];

/// The schema version after all migrations have run.
pub const LATEST_VERSION: u32 = 2;

/// Current schema version, 0 for a fresh database.
pub fn current_version(conn: &Connection) -> ForgeResult<u32> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Apply every migration newer than the stored version. Returns how many ran.
pub fn run_migrations(conn: &Connection) -> ForgeResult<usize> {
    let current = current_version(conn)?;
    let mut applied = 0;
    for (version, migrate) in MIGRATIONS.iter().filter(|(v, _)| *v > current) {
        let step = || -> ForgeResult<()> {
            conn.execute_batch("BEGIN IMMEDIATE;")
                .map_err(|e| to_storage_err(e.to_string()))?;
            let outcome = migrate(conn).and_then(|_| {
                conn.execute(
                    "INSERT INTO schema_version (version) VALUES (?1)",
                    [version],
                )
                .map_err(|e| to_storage_err(e.to_string()))
            });
            match outcome {
                Ok(_) => conn
                    .execute_batch("COMMIT;")
                    .map_err(|e| to_storage_err(e.to_string())),
                Err(e) => {
                    let _ = conn.execute_batch("ROLLBACK;");
                    Err(e)
                }
            }
        };
        step().map_err(|e| StorageError::MigrationFailed {
            version: *version,
            reason: e.to_string(),
        })?;
        info!(version, "applied schema migration");
        applied += 1;
    }
    Ok(applied)
}
