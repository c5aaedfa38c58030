//! Property tests for bounded session state and the duplicate detector.

use proptest::prelude::*;

use examforge_core::errors::ForgeResult;
use examforge_session::{check_and_record, InMemorySignatureStore, SessionState};

fn basis(text: &str) -> ForgeResult<Vec<f32>> {
    let idx: usize = text.parse().unwrap_or(0);
    let mut v = vec![0.0f32; 64];
    v[idx % 64] = 1.0;
    Ok(v)
}

proptest! {
    #[test]
    fn state_never_exceeds_bound(pushes in 0usize..50, max in 1usize..10) {
        let mut s = SessionState::new();
        for i in 0..pushes {
            s.push_bounded(i, max);
        }
        prop_assert_eq!(s.len(), pushes.min(max));
        let recent = s.recent(max);
        let expected: Vec<usize> = (pushes.saturating_sub(max)..pushes).collect();
        prop_assert_eq!(recent, expected);
    }

    #[test]
    fn cache_size_is_bounded_by_depth(ids in prop::collection::vec(0usize..64, 1..40), depth in 1usize..8) {
        let store = InMemorySignatureStore::new();
        for id in &ids {
            let verdict = check_and_record(&store, "s", &id.to_string(), &basis, 0.9, depth).unwrap();
            prop_assert!(verdict.compared_against <= depth);
        }
        prop_assert!(store.len("s") <= depth);
    }
}
