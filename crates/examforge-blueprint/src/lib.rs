//! # examforge-blueprint
//!
//! Blueprint selection: which domain, difficulty level, question type, and
//! reasoning mode a single generation request should target.
//!
//! Level choice is a weighted draw biased away from recently used levels.
//! The other fields rotate least-recently-used. All randomness flows through
//! an injectable [`RandomSource`].

pub mod constraint;
pub mod distribution;
pub mod hint;
pub mod random;
pub mod rotation;
pub mod selector;

pub use constraint::{build_constraint, ConstraintBuilder};
pub use distribution::{draw_index, level_distribution, normalize_weights};
pub use hint::detect_domain_hint;
pub use random::{RandomSource, SeededRandom};
pub use selector::BlueprintSelector;
