//! PRAGMA configuration applied when a connection is opened.

use rusqlite::Connection;

use examforge_core::errors::ForgeResult;

use crate::to_storage_err;

/// WAL journaling and a busy timeout for file-backed databases.
pub fn apply_pragmas(conn: &Connection) -> ForgeResult<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        PRAGMA foreign_keys = ON;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// In-memory databases have no journal to tune.
pub fn apply_memory_pragmas(conn: &Connection) -> ForgeResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Whether WAL mode is active on a connection.
pub fn verify_wal_mode(conn: &Connection) -> ForgeResult<bool> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
