mod embedding;
mod generation;
mod profile_store;
mod session_store;
mod vector_index;

pub use embedding::IEmbeddingProvider;
pub use generation::IGenerationProvider;
pub use profile_store::IProfileStore;
pub use session_store::{IHistoryStore, ISignatureStore};
pub use vector_index::IVectorIndex;
