//! Property tests for SQLite history bounds and ordering.

use proptest::prelude::*;

use examforge_core::models::{Blueprint, HistoryEntry};
use examforge_core::traits::IHistoryStore;
use examforge_storage::codec::{decode_embedding, encode_embedding};
use examforge_storage::SqliteSessionStore;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn history_keeps_newest_entries_in_order(
        levels in prop::collection::vec(1u8..4, 0..30),
        max_entries in 1usize..10,
    ) {
        let store = SqliteSessionStore::open_in_memory().unwrap();
        for (i, level) in levels.iter().enumerate() {
            let bp = Blueprint::new(format!("d{i}"), "definition", level.to_string(), "technical");
            store.append(HistoryEntry::new("s", bp), max_entries).unwrap();
        }
        let kept = store.recent("s", 100).unwrap();
        let expected: Vec<String> = (0..levels.len())
            .skip(levels.len().saturating_sub(max_entries))
            .map(|i| format!("d{i}"))
            .collect();
        let actual: Vec<String> = kept.into_iter().map(|e| e.blueprint.domain_id).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn embedding_blob_preserves_bits(values in prop::collection::vec(any::<f32>(), 0..64)) {
        let decoded = decode_embedding("t", &encode_embedding(&values)).unwrap();
        let bits = |v: &[f32]| v.iter().map(|f| f.to_bits()).collect::<Vec<_>>();
        prop_assert_eq!(bits(&decoded), bits(&values));
    }
}
