//! Property tests for chunk ranking and overlap dedup.

use proptest::prelude::*;

use examforge_core::models::{KnowledgeChunk, RetrievalStage, RetrievedChunk, ScoredChunk};
use examforge_retrieval::dedup::{dedup_overlapping, text_overlap};
use examforge_retrieval::ranking::select_top;

fn scored(i: usize, sim: f64, kb_priority: i32) -> ScoredChunk {
    ScoredChunk {
        chunk: KnowledgeChunk {
            id: format!("c{i}"),
            text: format!("chunk number {i}"),
            embedding: vec![],
            kb_id: "kb".into(),
            kb_priority,
            chunk_index: i,
            is_priority: false,
            domain: None,
        },
        similarity: sim,
    }
}

proptest! {
    #[test]
    fn select_top_is_sorted_bounded_and_thresholded(
        sims in prop::collection::vec((-1.0f64..1.0, 0i32..3), 0..20),
        k in 1usize..6,
        min in -1.0f64..1.0,
    ) {
        let chunks: Vec<ScoredChunk> = sims
            .iter()
            .enumerate()
            .map(|(i, (s, p))| scored(i, *s, *p))
            .collect();
        let eligible = chunks.iter().filter(|c| c.similarity >= min).count();
        let top = select_top(chunks, k, min);

        prop_assert_eq!(top.len(), eligible.min(k));
        prop_assert!(top.iter().all(|c| c.similarity >= min));
        prop_assert!(top.windows(2).all(|w| w[0].similarity >= w[1].similarity));
    }

    #[test]
    fn overlap_is_symmetric_and_bounded(a in "[a-c ]{0,20}", b in "[a-c ]{0,20}") {
        let ab = text_overlap(&a, &b);
        prop_assert!((0.0..=1.0).contains(&ab));
        prop_assert_eq!(ab, text_overlap(&b, &a));
    }

    #[test]
    fn dedup_leaves_no_pair_above_threshold(
        texts in prop::collection::vec("[a-d]{1,2}( [a-d]{1,2}){0,3}", 0..10),
    ) {
        let mut chunks: Vec<RetrievedChunk> = texts
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let mut s = scored(i, 0.5, 0);
                s.chunk.text = t.clone();
                RetrievedChunk { chunk: s.chunk, similarity: 0.5, stage: RetrievalStage::StageB }
            })
            .collect();
        let before = chunks.len();
        let dropped = dedup_overlapping(&mut chunks, 0.7);

        prop_assert_eq!(before, chunks.len() + dropped);
        for (i, a) in chunks.iter().enumerate() {
            for b in &chunks[i + 1..] {
                prop_assert!(text_overlap(&a.chunk.text, &b.chunk.text) <= 0.7);
            }
        }
    }
}
