//! SqliteSessionStore: file-backed IHistoryStore + ISignatureStore.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{Duration, Utc};
use rusqlite::{params, Connection, Transaction, TransactionBehavior};
use tracing::debug;

use examforge_core::errors::{ForgeResult, StorageError};
use examforge_core::models::{Blueprint, HistoryEntry, SignatureEntry};
use examforge_core::traits::{IHistoryStore, ISignatureStore};

use crate::codec::{decode_embedding, decode_timestamp, encode_embedding, encode_timestamp};
use crate::migrations;
use crate::pragmas::{apply_memory_pragmas, apply_pragmas};
use crate::to_storage_err;

const HISTORY_TABLE: &str = "selection_history";
const SIGNATURE_TABLE: &str = "signature_cache";

/// Session state persisted in SQLite.
///
/// A single connection sits behind a mutex, so same-session operations are
/// serialized and every read-modify-append commits or rolls back as a unit.
pub struct SqliteSessionStore {
    conn: Mutex<Connection>,
}

impl SqliteSessionStore {
    /// Open (or create) a database file and bring its schema up to date.
    pub fn open(path: &Path) -> ForgeResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Self::initialize(conn)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> ForgeResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        apply_memory_pragmas(&conn)?;
        Self::initialize(conn)
    }

    fn initialize(conn: Connection) -> ForgeResult<Self> {
        let applied = migrations::run_migrations(&conn)?;
        debug!(applied, "session store ready");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> ForgeResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| {
            StorageError::LockPoisoned {
                resource: "sqlite connection".to_string(),
            }
            .into()
        })
    }

    /// Run `f` inside an immediate transaction. Any error rolls back.
    fn with_tx<T>(&self, f: impl FnOnce(&Transaction<'_>) -> ForgeResult<T>) -> ForgeResult<T> {
        let mut conn = self.lock()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| to_storage_err(e.to_string()))?;
        let value = f(&tx)?;
        tx.commit().map_err(|e| to_storage_err(e.to_string()))?;
        Ok(value)
    }

    /// Current schema version.
    pub fn schema_version(&self) -> ForgeResult<u32> {
        let conn = self.lock()?;
        migrations::current_version(&conn)
    }

    /// Number of sessions with recorded activity.
    pub fn session_count(&self) -> ForgeResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM session_activity", [], |row| row.get(0))
            .map_err(|e| to_storage_err(e.to_string()))?;
        Ok(count as usize)
    }

    /// Signatures cached for a session.
    pub fn signature_count(&self, session_id: &str) -> ForgeResult<usize> {
        let conn = self.lock()?;
        count_rows(&conn, SIGNATURE_TABLE, session_id)
    }

    /// Delete every session idle for longer than `max_idle`. Returns how many.
    pub fn remove_idle(&self, max_idle: Duration) -> ForgeResult<usize> {
        let cutoff = encode_timestamp(&(Utc::now() - max_idle));
        let removed = self.with_tx(|tx| {
            let stale: Vec<String> = {
                let mut stmt = tx
                    .prepare("SELECT session_id FROM session_activity WHERE last_activity < ?1")
                    .map_err(|e| to_storage_err(e.to_string()))?;
                let ids = stmt
                    .query_map([&cutoff], |row| row.get(0))
                    .map_err(|e| to_storage_err(e.to_string()))?
                    .collect::<Result<Vec<String>, _>>()
                    .map_err(|e| to_storage_err(e.to_string()))?;
                ids
            };
            for session_id in &stale {
                delete_session(tx, session_id)?;
            }
            Ok(stale.len())
        })?;
        if removed > 0 {
            debug!(removed, "removed idle sessions");
        }
        Ok(removed)
    }
}

impl IHistoryStore for SqliteSessionStore {
    fn recent(&self, session_id: &str, depth: usize) -> ForgeResult<Vec<HistoryEntry>> {
        let conn = self.lock()?;
        recent_history(&conn, session_id, depth)
    }

    fn append(&self, entry: HistoryEntry, max_entries: usize) -> ForgeResult<()> {
        self.with_tx(|tx| insert_history(tx, &entry, max_entries))
    }

    fn select_and_append(
        &self,
        session_id: &str,
        window: usize,
        max_entries: usize,
        select: &mut dyn FnMut(&[HistoryEntry]) -> ForgeResult<Blueprint>,
    ) -> ForgeResult<HistoryEntry> {
        self.with_tx(|tx| {
            let recent = recent_history(tx, session_id, window)?;
            let blueprint = select(&recent)?;
            let entry = HistoryEntry::new(session_id, blueprint);
            insert_history(tx, &entry, max_entries)?;
            Ok(entry)
        })
    }

    fn evict(&self, session_id: &str) -> ForgeResult<()> {
        self.with_tx(|tx| {
            tx.execute(
                "DELETE FROM selection_history WHERE session_id = ?1",
                [session_id],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
            Ok(())
        })
    }

    fn len(&self, session_id: &str) -> ForgeResult<usize> {
        let conn = self.lock()?;
        count_rows(&conn, HISTORY_TABLE, session_id)
    }
}

impl ISignatureStore for SqliteSessionStore {
    fn recent(&self, session_id: &str, depth: usize) -> ForgeResult<Vec<SignatureEntry>> {
        let conn = self.lock()?;
        recent_signatures(&conn, session_id, depth)
    }

    fn record_if(
        &self,
        session_id: &str,
        depth: usize,
        entry: SignatureEntry,
        accept: &mut dyn FnMut(&[SignatureEntry]) -> bool,
    ) -> ForgeResult<bool> {
        self.with_tx(|tx| {
            let recent = recent_signatures(tx, session_id, depth)?;
            if !accept(&recent) {
                return Ok(false);
            }
            tx.execute(
                "INSERT INTO signature_cache (session_id, signature_text, embedding, recorded_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    session_id,
                    entry.signature_text,
                    encode_embedding(&entry.embedding),
                    encode_timestamp(&entry.recorded_at),
                ],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
            trim(tx, SIGNATURE_TABLE, session_id, depth)?;
            touch(tx, session_id)?;
            Ok(true)
        })
    }

    fn evict(&self, session_id: &str) -> ForgeResult<()> {
        self.with_tx(|tx| {
            tx.execute(
                "DELETE FROM signature_cache WHERE session_id = ?1",
                [session_id],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
            Ok(())
        })
    }
}

// ── row helpers ──

fn insert_history(conn: &Connection, entry: &HistoryEntry, max_entries: usize) -> ForgeResult<()> {
    let blueprint = serde_json::to_string(&entry.blueprint).map_err(|e| {
        StorageError::CorruptRecord {
            table: HISTORY_TABLE.to_string(),
            details: e.to_string(),
        }
    })?;
    conn.execute(
        "INSERT INTO selection_history (session_id, blueprint, recorded_at) VALUES (?1, ?2, ?3)",
        params![
            entry.session_id,
            blueprint,
            encode_timestamp(&entry.recorded_at)
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    trim(conn, HISTORY_TABLE, &entry.session_id, max_entries)?;
    touch(conn, &entry.session_id)
}

fn recent_history(conn: &Connection, session_id: &str, depth: usize) -> ForgeResult<Vec<HistoryEntry>> {
    let mut stmt = conn
        .prepare(
            "SELECT blueprint, recorded_at FROM selection_history
             WHERE session_id = ?1 ORDER BY id DESC LIMIT ?2",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows: Vec<(String, String)> = stmt
        .query_map(params![session_id, depth as i64], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<_, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut entries = rows
        .into_iter()
        .map(|(blueprint, recorded_at)| -> ForgeResult<HistoryEntry> {
            let blueprint: Blueprint = serde_json::from_str(&blueprint).map_err(|e| {
                StorageError::CorruptRecord {
                    table: HISTORY_TABLE.to_string(),
                    details: e.to_string(),
                }
            })?;
            Ok(HistoryEntry {
                session_id: session_id.to_string(),
                blueprint,
                recorded_at: decode_timestamp(HISTORY_TABLE, &recorded_at)?,
            })
        })
        .collect::<ForgeResult<Vec<_>>>()?;
    entries.reverse();
    Ok(entries)
}

fn recent_signatures(
    conn: &Connection,
    session_id: &str,
    depth: usize,
) -> ForgeResult<Vec<SignatureEntry>> {
    let mut stmt = conn
        .prepare(
            "SELECT signature_text, embedding, recorded_at FROM signature_cache
             WHERE session_id = ?1 ORDER BY id DESC LIMIT ?2",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows: Vec<(String, Vec<u8>, String)> = stmt
        .query_map(params![session_id, depth as i64], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?))
        })
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<_, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut entries = rows
        .into_iter()
        .map(|(signature_text, blob, recorded_at)| -> ForgeResult<SignatureEntry> {
            Ok(SignatureEntry {
                signature_text,
                embedding: decode_embedding(SIGNATURE_TABLE, &blob)?,
                recorded_at: decode_timestamp(SIGNATURE_TABLE, &recorded_at)?,
            })
        })
        .collect::<ForgeResult<Vec<_>>>()?;
    entries.reverse();
    Ok(entries)
}

/// Keep only the newest `keep` rows (at least one) for a session.
fn trim(conn: &Connection, table: &str, session_id: &str, keep: usize) -> ForgeResult<()> {
    let sql = format!(
        "DELETE FROM {table} WHERE session_id = ?1 AND id NOT IN (
            SELECT id FROM {table} WHERE session_id = ?1 ORDER BY id DESC LIMIT ?2
        )"
    );
    let evicted = conn
        .execute(&sql, params![session_id, keep.max(1) as i64])
        .map_err(|e| to_storage_err(e.to_string()))?;
    if evicted > 0 {
        debug!(table, session_id, evicted, "evicted oldest rows");
    }
    Ok(())
}

fn touch(conn: &Connection, session_id: &str) -> ForgeResult<()> {
    let now = encode_timestamp(&Utc::now());
    conn.execute(
        "INSERT INTO session_activity (session_id, created_at, last_activity) VALUES (?1, ?2, ?2)
         ON CONFLICT(session_id) DO UPDATE SET last_activity = excluded.last_activity",
        params![session_id, now],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

fn count_rows(conn: &Connection, table: &str, session_id: &str) -> ForgeResult<usize> {
    let count: i64 = conn
        .query_row(
            &format!("SELECT COUNT(*) FROM {table} WHERE session_id = ?1"),
            [session_id],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count as usize)
}

fn delete_session(conn: &Connection, session_id: &str) -> ForgeResult<()> {
    for sql in [
        "DELETE FROM selection_history WHERE session_id = ?1",
        "DELETE FROM signature_cache WHERE session_id = ?1",
        "DELETE FROM session_activity WHERE session_id = ?1",
    ] {
        conn.execute(sql, [session_id])
            .map_err(|e| to_storage_err(e.to_string()))?;
    }
    Ok(())
}
