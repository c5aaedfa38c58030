//! # examforge-retrieval
//!
//! Two-stage retrieval of supporting text for a blueprint.
//!
//! Stage A searches priority/outline chunks for scope; Stage B searches
//! content chunks tagged with the blueprint's domain. The retrieval mode
//! decides which stages run and in what order.

pub mod dedup;
pub mod engine;
pub mod index;
pub mod query;
pub mod ranking;
pub mod subtopic;

pub use engine::TwoStageRetriever;
pub use index::InMemoryVectorIndex;
pub use subtopic::extract_subtopic;
