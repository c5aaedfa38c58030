/// examforge version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Hard upper bound on the per-session history window, regardless of config.
pub const MAX_HISTORY_DEPTH: usize = 256;

/// Stage A (priority/outline) top-K bounds.
pub const STAGE_A_MIN_K: usize = 1;
pub const STAGE_A_MAX_K: usize = 2;

/// Stage B (domain/content) top-K bounds.
pub const STAGE_B_MIN_K: usize = 2;
pub const STAGE_B_MAX_K: usize = 4;

/// Hard upper bound on generation attempts per request.
pub const MAX_GENERATION_ATTEMPTS: u32 = 10;
