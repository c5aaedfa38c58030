//! # examforge-observability
//!
//! Tracing subscriber setup, structured pipeline events, span macros, and
//! serializable pipeline counters.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::PipelineMetrics;
pub use tracing_setup::{events, init_tracing};
