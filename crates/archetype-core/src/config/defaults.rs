// Single source of truth for all default values.

// --- Signatures ---
/// `(prevalence threshold, multiplier)`, highest threshold first.
pub const DEFAULT_SIGNATURE_TIERS: [(f64, f64); 2] = [(0.8, 1.0), (0.3, 0.5)];
pub const DEFAULT_USE_THRESHOLDS: bool = false;
pub const DEFAULT_USE_PCP: bool = true;
pub const DEFAULT_PCP_THRESHOLD: f64 = 0.5;
pub const DEFAULT_PCP_EXPONENT: i32 = 3;
pub const DEFAULT_USE_CCP: bool = true;
pub const DEFAULT_CCP_INCLUSION_CUTOFF: f64 = 0.0;

// --- Similarity ---
pub const DEFAULT_SIGNIFICANCE_FLOOR: f64 = 0.25;

// --- Consolidation ---
pub const DEFAULT_MERGE_SIMILARITY: f64 = 0.85;
pub const DEFAULT_CONSOLIDATE: bool = true;

// --- Inheritance ---
pub const DEFAULT_INHERITANCE_THRESHOLD: f64 = 0.85;

// --- Experimental ---
pub const DEFAULT_EXPERIMENTAL_THRESHOLD_PCT: f64 = 0.01;
pub const DEFAULT_SMALL_CLUSTER_CUTOFF: u64 = 1_500;

// --- Classification ---
pub const DEFAULT_CUTOFF_RATIO: f64 = 0.25;

// --- Grouping ---
pub const DEFAULT_MIN_CLUSTER_SIZE: usize = 2;
pub const DEFAULT_MIN_SAMPLES: usize = 1;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
