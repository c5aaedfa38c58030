//! # examforge-pipeline
//!
//! The generation orchestrator. One request runs
//! `INIT → BLUEPRINT_SELECTED → RETRIEVED → GENERATED → {ACCEPTED | REJECTED_*}`,
//! retrying generation (never selection) up to a bounded attempt count and
//! ending `EXHAUSTED` when every attempt is rejected.

pub mod attempt;
pub mod format;
pub mod generator;
pub mod mode;
pub mod profile_store;
pub mod record;
pub mod request;

pub use attempt::{AttemptRecord, AttemptState};
pub use format::{FormatRule, FormatViolation};
pub use generator::{default_embedder, Collaborators, QuestionGenerator};
pub use mode::resolve_mode;
pub use profile_store::{InMemoryProfileStore, JsonProfileStore};
pub use record::QuestionRecord;
pub use request::{BlueprintSummary, GenerationOutcome, GenerationOutput, GenerationRequest};
