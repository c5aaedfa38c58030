//! # examforge-session
//!
//! Per-session state behind the repository traits in `examforge-core`:
//! selection history for blueprint rotation and the signature cache used by
//! the duplicate detector. Sessions are independent; operations on one
//! session are serialized through the owning `DashMap` shard.

pub mod cleanup;
pub mod detector;
pub mod history;
pub mod signature;
pub mod signatures;
pub mod state;

pub use cleanup::cleanup_idle_sessions;
pub use detector::{check_and_record, DuplicateDetector};
pub use history::InMemoryHistoryStore;
pub use signature::extract_signature;
pub use signatures::InMemorySignatureStore;
pub use state::SessionState;
