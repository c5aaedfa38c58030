//! v002: session_activity for idle-session cleanup.

use rusqlite::Connection;

use examforge_core::errors::ForgeResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> ForgeResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS session_activity (
            session_id    TEXT PRIMARY KEY,
            created_at    TEXT NOT NULL,
            last_activity TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_activity_last ON session_activity(last_activity);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
