// Single source of truth for all default values.

// --- Selection ---
pub const DEFAULT_SELECTION_HISTORY_DEPTH: usize = 8;
pub const DEFAULT_MAX_HISTORY_ENTRIES: usize = 32;

// --- Retrieval ---
pub const DEFAULT_STAGE_A_TOP_K: usize = 2;
pub const DEFAULT_STAGE_B_TOP_K: usize = 4;
pub const DEFAULT_MIN_DESIRED_CHUNKS: usize = 2;
pub const DEFAULT_MIN_SIMILARITY: f64 = 0.30;
pub const DEFAULT_OVERLAP_THRESHOLD: f64 = 0.70;
pub const DEFAULT_REFINE_WITH_SUBTOPIC: bool = true;
pub const DEFAULT_RETRIEVAL_MODE: &str = "assistive";

// --- Duplicate detection ---
pub const DEFAULT_DEDUP_ENABLED: bool = true;
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.90;
pub const DEFAULT_DEDUP_HISTORY_DEPTH: usize = 5;

// --- Generation ---
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_FORMAT_RULE: &str = "multiple_choice";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 800;

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 256;
pub const DEFAULT_L1_CACHE_SIZE: u64 = 10_000;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
