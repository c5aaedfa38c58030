//! # examforge-embeddings
//!
//! Embedding plumbing shared by retrieval and duplicate detection:
//! a deterministic offline embedder, a content-addressed L1 cache wrapper,
//! and cosine similarity.

pub mod cache;
pub mod providers;
pub mod similarity;

pub use cache::CachedEmbedder;
pub use providers::HashingEmbedder;
pub use similarity::cosine_similarity;
