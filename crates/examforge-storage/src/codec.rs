//! Row encodings: embeddings as little-endian f32 blobs, timestamps as RFC 3339.

use chrono::{DateTime, SecondsFormat, Utc};

use examforge_core::errors::{ForgeResult, StorageError};

pub fn encode_embedding(embedding: &[f32]) -> Vec<u8> {
    embedding.iter().flat_map(|v| v.to_le_bytes()).collect()
}

pub fn decode_embedding(table: &str, bytes: &[u8]) -> ForgeResult<Vec<f32>> {
    if bytes.len() % 4 != 0 {
        return Err(StorageError::CorruptRecord {
            table: table.to_string(),
            details: format!("embedding blob of {} bytes is not a multiple of 4", bytes.len()),
        }
        .into());
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect())
}

/// Fixed-width UTC form, so stored timestamps also compare correctly as text.
pub fn encode_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_timestamp(table: &str, raw: &str) -> ForgeResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            StorageError::CorruptRecord {
                table: table.to_string(),
                details: format!("bad timestamp {raw:?}: {e}"),
            }
            .into()
        })
}
