use std::sync::{Arc, Mutex};
use std::thread;

use examforge_core::config::RetrievalConfig;
use examforge_core::errors::{ForgeResult, RetrievalError};
use examforge_core::models::{
    Blueprint, ChunkFilter, KnowledgeChunk, RetrievalMode, RetrievalStage, ScoredChunk,
};
use examforge_core::traits::IVectorIndex;
use examforge_embeddings::HashingEmbedder;
use examforge_retrieval::{InMemoryVectorIndex, TwoStageRetriever};
use test_fixtures::{load_chunks, security_profile};

fn chunk(id: &str, text: &str, priority: bool, index: usize) -> KnowledgeChunk {
    KnowledgeChunk {
        id: id.into(),
        text: text.into(),
        embedding: vec![],
        kb_id: if priority { "outline".into() } else { "content".into() },
        kb_priority: 0,
        chunk_index: index,
        is_priority: priority,
        domain: if priority { None } else { Some("asset_security".into()) },
    }
}

fn scored(id: &str, text: &str, priority: bool, index: usize, sim: f64) -> ScoredChunk {
    ScoredChunk {
        chunk: chunk(id, text, priority, index),
        similarity: sim,
    }
}

/// Returns fixed results per stage and records every call.
struct ScriptedIndex {
    outline: Vec<ScoredChunk>,
    content: Vec<ScoredChunk>,
    calls: Mutex<Vec<(RetrievalStage, usize, Vec<f32>)>>,
}

impl ScriptedIndex {
    fn new(outline: Vec<ScoredChunk>, content: Vec<ScoredChunk>) -> Arc<Self> {
        Arc::new(Self {
            outline,
            content,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls_for(&self, stage: RetrievalStage) -> Vec<usize> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(s, _, _)| *s == stage)
            .map(|(_, k, _)| *k)
            .collect()
    }
}

impl IVectorIndex for ScriptedIndex {
    fn search(&self, query: &[f32], k: usize, filter: &ChunkFilter) -> ForgeResult<Vec<ScoredChunk>> {
        let (stage, source) = if filter.is_priority == Some(true) {
            (RetrievalStage::StageA, &self.outline)
        } else {
            (RetrievalStage::StageB, &self.content)
        };
        self.calls.lock().unwrap().push((stage, k, query.to_vec()));
        // Unordered on purpose: ordering is the retriever's job too.
        Ok(source.iter().take(k).cloned().collect())
    }

    fn len(&self) -> usize {
        self.outline.len() + self.content.len()
    }
}

struct FailingIndex;

impl IVectorIndex for FailingIndex {
    fn search(&self, _: &[f32], _: usize, _: &ChunkFilter) -> ForgeResult<Vec<ScoredChunk>> {
        Err(RetrievalError::SearchFailed {
            reason: "index offline".into(),
        }
        .into())
    }

    fn len(&self) -> usize {
        0
    }
}

fn retriever(index: Arc<dyn IVectorIndex>) -> TwoStageRetriever {
    TwoStageRetriever::new(
        index,
        Arc::new(HashingEmbedder::new(128)),
        RetrievalConfig::default(),
    )
}

fn blueprint() -> Blueprint {
    Blueprint::new("asset_security", "definition", "1", "technical")
}

fn outline() -> Vec<ScoredChunk> {
    vec![scored(
        "o1",
        "2.1 Information and Asset Classification\nIdentify and classify information and assets.",
        true,
        0,
        0.80,
    )]
}

// ── disabled ──

#[test]
fn disabled_orders_stage_b_and_never_queries_stage_a() {
    let index = ScriptedIndex::new(
        outline(),
        vec![
            scored("b1", "owners approve classification labels", false, 0, 0.91),
            scored("b2", "retention schedules define disposal timing", false, 1, 0.72),
            scored("b3", "custodians apply technical safeguards daily", false, 2, 0.88),
        ],
    );
    let result = retriever(index.clone())
        .retrieve(&blueprint(), &security_profile(), RetrievalMode::Disabled)
        .unwrap();

    let scores: Vec<f64> = result.chunks.iter().map(|c| c.similarity).collect();
    assert_eq!(scores, vec![0.91, 0.88, 0.72]);
    assert!(index.calls_for(RetrievalStage::StageA).is_empty());
    assert_eq!(index.calls_for(RetrievalStage::StageB), vec![4]);
    assert_eq!(result.retrieval_path(), "stage_b");
    assert!(!result.hot_topics_used());
    assert!(result.subtopic.is_none());
}

#[test]
fn chunks_below_threshold_are_dropped_not_padded() {
    let index = ScriptedIndex::new(
        vec![],
        vec![
            scored("b1", "owners approve classification labels", false, 0, 0.90),
            scored("b2", "unrelated text about something else", false, 1, 0.10),
        ],
    );
    let result = retriever(index)
        .retrieve(&blueprint(), &security_profile(), RetrievalMode::Disabled)
        .unwrap();
    assert_eq!(result.chunks.len(), 1);
    // One of the two desired chunks survived the threshold.
    assert_eq!(result.degradations.len(), 1);
    let degradation = &result.degradations[0];
    assert_eq!(degradation.stage, RetrievalStage::StageB);
    assert_eq!(degradation.returned, 1);
    assert!(degradation.reason.contains("1 of 2 desired"));
}

#[test]
fn full_stage_b_is_not_degraded() {
    let index = ScriptedIndex::new(
        vec![],
        vec![
            scored("b1", "owners approve classification labels", false, 0, 0.90),
            scored("b2", "custodians apply technical safeguards daily", false, 1, 0.80),
        ],
    );
    let result = retriever(index)
        .retrieve(&blueprint(), &security_profile(), RetrievalMode::Disabled)
        .unwrap();
    assert_eq!(result.chunks.len(), 2);
    assert!(!result.is_degraded());
}

// ── assistive ──

#[test]
fn assistive_enriches_short_stage_b_with_stage_a() {
    let index = ScriptedIndex::new(
        outline(),
        vec![scored("b1", "owners approve classification labels", false, 0, 0.91)],
    );
    let result = retriever(index.clone())
        .retrieve(&blueprint(), &security_profile(), RetrievalMode::Assistive)
        .unwrap();

    assert_eq!(result.retrieval_path(), "stage_b+stage_a");
    // One chunk short of the two desired.
    assert_eq!(index.calls_for(RetrievalStage::StageA), vec![1]);
    let stages: Vec<RetrievalStage> = result.chunks.iter().map(|c| c.stage).collect();
    assert_eq!(stages, vec![RetrievalStage::StageB, RetrievalStage::StageA]);
    assert!(result.hot_topics_used());
}

#[test]
fn assistive_skips_stage_a_when_stage_b_suffices() {
    let index = ScriptedIndex::new(
        outline(),
        vec![
            scored("b1", "owners approve classification labels", false, 0, 0.91),
            scored("b2", "custodians apply technical safeguards daily", false, 1, 0.85),
        ],
    );
    let result = retriever(index.clone())
        .retrieve(&blueprint(), &security_profile(), RetrievalMode::Assistive)
        .unwrap();
    assert!(index.calls_for(RetrievalStage::StageA).is_empty());
    assert_eq!(result.retrieval_path(), "stage_b");
    assert!(!result.hot_topics_used());
}

// ── priority ──

#[test]
fn priority_puts_stage_a_first_and_refines_stage_b() {
    let index = ScriptedIndex::new(
        outline(),
        vec![scored("b1", "owners approve classification labels", false, 0, 0.91)],
    );
    let result = retriever(index.clone())
        .retrieve(&blueprint(), &security_profile(), RetrievalMode::Priority)
        .unwrap();

    assert_eq!(result.retrieval_path(), "stage_a+stage_b");
    assert_eq!(result.chunks[0].stage, RetrievalStage::StageA);
    assert_eq!(result.chunks[1].stage, RetrievalStage::StageB);
    assert_eq!(
        result.subtopic.as_deref(),
        Some("Information and Asset Classification")
    );
    // Both stages came back one short.
    let short: Vec<RetrievalStage> = result.degradations.iter().map(|d| d.stage).collect();
    assert_eq!(short, vec![RetrievalStage::StageA, RetrievalStage::StageB]);

    let calls = index.calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].1, 2);
    assert_eq!(calls[1].1, 4);
    assert_ne!(calls[0].2, calls[1].2, "stage B query should be refined");
}

#[test]
fn priority_without_refinement_reuses_query() {
    let index = ScriptedIndex::new(outline(), vec![]);
    let config = RetrievalConfig {
        refine_with_subtopic: false,
        ..RetrievalConfig::default()
    };
    let retriever = TwoStageRetriever::new(index.clone(), Arc::new(HashingEmbedder::new(128)), config);
    retriever
        .retrieve(&blueprint(), &security_profile(), RetrievalMode::Priority)
        .unwrap();
    let calls = index.calls.lock().unwrap();
    assert_eq!(calls[0].2, calls[1].2);
}

// ── degradation ──

#[test]
fn empty_stages_are_valid_and_reported() {
    let index = ScriptedIndex::new(vec![], vec![]);
    let result = retriever(index)
        .retrieve(&blueprint(), &security_profile(), RetrievalMode::Priority)
        .unwrap();
    assert!(result.chunks.is_empty());
    assert_eq!(result.degradations.len(), 2);
    assert_eq!(result.degradations[0].stage, RetrievalStage::StageA);
    assert_eq!(result.degradations[0].returned, 0);
}

#[test]
fn index_failure_degrades_instead_of_failing() {
    let result = retriever(Arc::new(FailingIndex))
        .retrieve(&blueprint(), &security_profile(), RetrievalMode::Assistive)
        .unwrap();
    assert!(result.chunks.is_empty());
    assert!(result
        .degradations
        .iter()
        .all(|d| d.reason.contains("index offline")));
    assert_eq!(result.retrieval_path(), "stage_b+stage_a");
}

#[test]
fn overlapping_chunks_are_deduplicated() {
    let index = ScriptedIndex::new(
        vec![],
        vec![
            scored("b1", "owners approve classification labels", false, 0, 0.91),
            scored("b2", "Owners approve classification labels", false, 1, 0.90),
            scored("b3", "custodians apply technical safeguards daily", false, 2, 0.80),
        ],
    );
    let result = retriever(index)
        .retrieve(&blueprint(), &security_profile(), RetrievalMode::Disabled)
        .unwrap();
    let ids: Vec<&str> = result.chunks.iter().map(|c| c.chunk.id.as_str()).collect();
    assert_eq!(ids, vec!["b1", "b3"]);
}

// ── in-memory index ──

#[test]
fn in_memory_index_filters_by_domain_and_priority() {
    let embedder = HashingEmbedder::new(128);
    let index = InMemoryVectorIndex::build(load_chunks("security_chunks.json"), &embedder).unwrap();
    assert_eq!(index.len(), 6);

    let query = examforge_core::traits::IEmbeddingProvider::embed(&embedder, "firewall traffic").unwrap();
    let content = index
        .search(&query, 4, &ChunkFilter::content("communication_network_security"))
        .unwrap();
    assert_eq!(content.len(), 3);
    assert!(content
        .iter()
        .all(|c| c.chunk.domain.as_deref() == Some("communication_network_security")));
    assert!(content.windows(2).all(|w| w[0].similarity >= w[1].similarity));

    let outline = index.search(&query, 2, &ChunkFilter::priority()).unwrap();
    assert!(outline.iter().all(|c| c.chunk.is_priority));
}

#[test]
fn end_to_end_with_fixture_chunks() {
    let embedder = Arc::new(HashingEmbedder::new(256));
    let index = Arc::new(
        InMemoryVectorIndex::build(load_chunks("security_chunks.json"), embedder.as_ref()).unwrap(),
    );
    let config = RetrievalConfig {
        min_similarity: -1.0,
        ..RetrievalConfig::default()
    };
    let retriever = TwoStageRetriever::new(index, embedder, config);
    let bp = Blueprint::new("communication_network_security", "troubleshooting", "2", "technical");
    let result = retriever
        .retrieve(&bp, &security_profile(), RetrievalMode::Priority)
        .unwrap();
    assert_eq!(result.retrieval_path(), "stage_a+stage_b");
    assert!(result.hot_topics_used());
    assert!(result
        .chunks
        .iter()
        .filter(|c| c.stage == RetrievalStage::StageB)
        .all(|c| c.chunk.domain.as_deref() == Some("communication_network_security")));
}

#[test]
fn snapshot_swap_is_safe_under_concurrent_reads() {
    let index = Arc::new(InMemoryVectorIndex::new(vec![]));
    let query = vec![1.0f32, 0.0];
    let mut handles = Vec::new();
    for t in 0..4 {
        let index = index.clone();
        let query = query.clone();
        handles.push(thread::spawn(move || {
            for _ in 0..200 {
                let found = index.search(&query, 4, &ChunkFilter::default()).unwrap();
                // Each snapshot holds a consistent batch: all ids share a generation.
                if let Some(first) = found.first() {
                    let seen = first.chunk.kb_id.clone();
                    assert!(found.iter().all(|c| c.chunk.kb_id == seen), "reader {t} saw a torn write");
                }
            }
        }));
    }
    for generation in 0..50 {
        let batch: Vec<KnowledgeChunk> = (0..3)
            .map(|i| KnowledgeChunk {
                id: format!("g{generation}-{i}"),
                text: String::new(),
                embedding: vec![1.0, i as f32],
                kb_id: format!("gen-{generation}"),
                kb_priority: 0,
                chunk_index: i,
                is_priority: false,
                domain: None,
            })
            .collect();
        index.replace(batch).unwrap();
    }
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(index.len(), 3);
}
