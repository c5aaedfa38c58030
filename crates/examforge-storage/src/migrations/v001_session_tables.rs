//! v001: selection_history, signature_cache.

use rusqlite::Connection;

use examforge_core::errors::ForgeResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> ForgeResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS selection_history (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            session_id  TEXT NOT NULL,
            blueprint   TEXT NOT NULL,
            recorded_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_history_session ON selection_history(session_id, id);

        CREATE TABLE IF NOT EXISTS signature_cache (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            session_id     TEXT NOT NULL,
            signature_text TEXT NOT NULL,
            embedding      BLOB NOT NULL,
            recorded_at    TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_signature_session ON signature_cache(session_id, id);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
