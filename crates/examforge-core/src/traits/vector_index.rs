use crate::errors::ForgeResult;
use crate::models::{ChunkFilter, ScoredChunk};

/// Read-only nearest-neighbour search over knowledge chunks.
///
/// Implementations must tolerate concurrent searches and must not expose
/// partially applied writes to in-flight readers.
pub trait IVectorIndex: Send + Sync {
    /// Up to `k` chunks matching `filter`, ordered by descending similarity.
    fn search(&self, query: &[f32], k: usize, filter: &ChunkFilter)
        -> ForgeResult<Vec<ScoredChunk>>;

    /// Number of chunks currently indexed.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
