mod blueprint;
mod chunk;
mod constraint;
mod difficulty;
mod history;
mod profile;
mod prompt;
mod retrieval;
mod signature;

pub use blueprint::Blueprint;
pub use chunk::{ChunkFilter, KnowledgeChunk, ScoredChunk};
pub use constraint::{ConstraintPayload, DifficultyDirective, QuestionTypeDirective};
pub use difficulty::{DifficultyRegistry, GlobalDifficultyLevel};
pub use history::HistoryEntry;
pub use profile::{
    DifficultyProfile, Domain, Profile, ProfileDocument, QuestionType, ReasoningMode,
};
pub use prompt::{GenerationParams, PromptPayload};
pub use retrieval::{
    RetrievalDegradation, RetrievalMode, RetrievalResult, RetrievalStage, RetrievedChunk,
};
pub use signature::{DuplicateOutcome, DuplicateVerdict, SignatureEntry};
