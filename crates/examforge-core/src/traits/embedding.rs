use crate::errors::ForgeResult;

/// Turns query text and question signatures into vectors.
///
/// Retrieval and duplicate detection must share one provider so their
/// vectors are comparable.
pub trait IEmbeddingProvider: Send + Sync {
    fn embed(&self, text: &str) -> ForgeResult<Vec<f32>>;

    /// Defaults to one `embed` call per text.
    fn embed_batch(&self, texts: &[String]) -> ForgeResult<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    /// Length of every vector this provider returns.
    fn dimensions(&self) -> usize;

    fn name(&self) -> &str;

    /// `false` when a remote backend is known to be down.
    fn is_available(&self) -> bool {
        true
    }
}
